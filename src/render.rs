//! Render-on-change binding.
//!
//! After every store mutation the owning feature re-reads its slot, projects
//! it through `views` and writes the result to a `ViewSink`. There is no
//! batching: one mutation, one synchronous write.

use serde::{Deserialize, Serialize};

use crate::capture::FormId;
use crate::models::{Appointment, CartItem, Review};
use crate::store::{KeyedStore, StoreKey};
use crate::views::{self, View};

/// Page sections that navigation can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Doctors,
    Appointment,
    Symptoms,
    Hospitals,
    Reviews,
    Delivery,
    History,
}

impl Section {
    pub fn anchor(&self) -> &'static str {
        match self {
            Section::Doctors => "#doctors",
            Section::Appointment => "#appointment",
            Section::Symptoms => "#symptoms",
            Section::Hospitals => "#hospitals",
            Section::Reviews => "#reviews",
            Section::Delivery => "#delivery",
            Section::History => "#history",
        }
    }
}

/// Side effects on the page other than section views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum Notice {
    /// Blocking informational alert.
    Alert { message: String },
    Navigate { section: Section, anchor: &'static str },
    /// A form went back to its defaults.
    ResetForm { form: FormId },
    /// Put a value into a form field without submitting.
    Prefill { form: FormId, field: &'static str, value: String },
    OpenChat,
    CloseChat,
}

impl Notice {
    pub fn alert(message: impl Into<String>) -> Self {
        Notice::Alert {
            message: message.into(),
        }
    }

    pub fn navigate(section: Section) -> Self {
        Notice::Navigate {
            section,
            anchor: section.anchor(),
        }
    }
}

/// The imperative half of rendering: wherever views end up.
pub trait ViewSink: Send {
    fn show(&mut self, view: View);
    fn notify(&mut self, notice: Notice);
}

/// Sink that buffers everything until taken.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Outbox {
    pub views: Vec<View>,
    pub notices: Vec<Notice>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the buffer.
    pub fn take(&mut self) -> Outbox {
        std::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty() && self.notices.is_empty()
    }

    pub fn alerts(&self) -> Vec<&str> {
        self.notices
            .iter()
            .filter_map(|n| match n {
                Notice::Alert { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ViewSink for Outbox {
    fn show(&mut self, view: View) {
        self.views.push(view);
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

// ═══════════════════════════════════════════
// Binders — read slot, project, write
// ═══════════════════════════════════════════

pub fn render_appointments(store: &KeyedStore, sink: &mut dyn ViewSink) {
    let items: Vec<Appointment> = store.load(StoreKey::Appointments);
    sink.show(views::appointments_view(&items));
}

pub fn render_reviews(store: &KeyedStore, sink: &mut dyn ViewSink) {
    let items: Vec<Review> = store.load(StoreKey::Reviews);
    sink.show(views::reviews_view(&items));
}

pub fn render_cart(store: &KeyedStore, sink: &mut dyn ViewSink) {
    let items: Vec<CartItem> = store.load(StoreKey::Cart);
    sink.show(views::cart_view(&items));
}

pub fn render_history(store: &KeyedStore, sink: &mut dyn ViewSink) {
    let raw = store.load_raw(StoreKey::History);
    sink.show(views::history_view(raw.as_deref()));
}

/// Render every stored section, as on page load.
pub fn render_all(store: &KeyedStore, sink: &mut dyn ViewSink) {
    render_appointments(store, sink);
    render_reviews(store, sink);
    render_cart(store, sink);
    render_history(store, sink);
}
