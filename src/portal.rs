//! The portal: every feature wired to the store, the view sink and the
//! speech capabilities.
//!
//! Each public method is one user action. It runs to completion
//! synchronously: capture or route the input, mutate the store, re-render
//! the affected section, then notify and narrate.

use serde::Serialize;

use crate::capture::{Form, FormData, FormId};
use crate::chat::ChatPanel;
use crate::directory::{self, DoctorCard};
use crate::hospitals::{self, LocationProvider, MapView};
use crate::intent::{self, IntentRouter, VoiceAction, VOICE_FALLBACK};
use crate::models::{Appointment, CartItem, Review};
use crate::render::{self, Notice, Outbox, Section, ViewSink};
use crate::speech::{Recognizer, Speaker, SpeechBridge, VoiceSession, VoiceStatus};
use crate::store::{KeyedStore, StoreKey};
use crate::symptoms::{self, AreaAdvice};
use crate::views::View;

pub const APPOINTMENT_SPOKEN: &str = "Your appointment has been reserved.";
pub const APPOINTMENT_ALERT: &str = "Appointment reserved!";
pub const REVIEW_SPOKEN: &str = "Thanks for your review.";
pub const CHECKOUT_MESSAGE: &str = "Order placed (demo). A pharmacy partner will contact you shortly.";
pub const CHECKOUT_SPOKEN: &str = "Your medicine order has been placed.";
pub const CHECKOUT_EMPTY_ALERT: &str = "Cart is empty.";

/// Optional platform capabilities, fixed at startup.
#[derive(Default)]
pub struct Capabilities {
    pub speaker: Option<Box<dyn Speaker>>,
    pub recognizer: Option<Box<dyn Recognizer>>,
}

/// Everything the directory section shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryView {
    pub grid: Vec<DoctorCard>,
    pub options: Vec<String>,
    pub vets: Vec<String>,
}

pub struct Portal<S: ViewSink = Outbox> {
    store: KeyedStore,
    sink: S,
    speech: SpeechBridge,
    voice: VoiceSession,
    voice_router: IntentRouter<VoiceAction>,
    chat: ChatPanel,
}

impl Portal<Outbox> {
    /// Portal rendering into a buffer.
    pub fn buffered(store: KeyedStore, caps: Capabilities) -> Self {
        Self::new(store, Outbox::new(), caps)
    }

    /// Drain views and notices produced since the last call.
    pub fn take_outbox(&mut self) -> Outbox {
        self.sink.take()
    }
}

impl<S: ViewSink> Portal<S> {
    pub fn new(store: KeyedStore, sink: S, caps: Capabilities) -> Self {
        Self {
            store,
            sink,
            speech: SpeechBridge::new(caps.speaker),
            voice: VoiceSession::new(caps.recognizer),
            voice_router: intent::voice_router(),
            chat: ChatPanel::new(),
        }
    }

    pub fn store(&self) -> &KeyedStore {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Initial render of every stored section and the voice indicator.
    pub fn load(&mut self) {
        render::render_all(&self.store, &mut self.sink);
        self.show_voice_status();
    }

    // ── Directory ───────────────────────────────────────────

    pub fn directory(&self) -> DirectoryView {
        DirectoryView {
            grid: directory::grid(directory::all()),
            options: directory::select_options(directory::all()),
            vets: directory::vet_list(&directory::veterinary()),
        }
    }

    /// "Book" on a doctor card: preselect the doctor and jump to booking.
    pub fn book_doctor(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        self.sink.notify(Notice::Prefill {
            form: FormId::Appointment,
            field: "doctor",
            value: name.to_string(),
        });
        self.sink.notify(Notice::navigate(Section::Appointment));
        self.speech.speak(&format!("Booking form opened for {name}"));
    }

    /// Quick-action tile: jump straight to a section.
    pub fn open_section(&mut self, section: Section) {
        self.sink.notify(Notice::navigate(section));
    }

    // ── Appointments ────────────────────────────────────────

    pub fn appointments(&self) -> Vec<Appointment> {
        self.store.load(StoreKey::Appointments)
    }

    pub fn submit_appointment(&mut self, form: &mut Form) {
        let data = form.submit();
        if let Some(appt) = decode::<Appointment>(data, FormId::Appointment) {
            self.store.append(StoreKey::Appointments, appt);
        }
        render::render_appointments(&self.store, &mut self.sink);
        self.sink.notify(Notice::ResetForm { form: form.id });
        self.speech.speak(APPOINTMENT_SPOKEN);
        self.sink.notify(Notice::alert(APPOINTMENT_ALERT));
    }

    // ── Reviews ─────────────────────────────────────────────

    pub fn reviews(&self) -> Vec<Review> {
        self.store.load(StoreKey::Reviews)
    }

    pub fn submit_review(&mut self, form: &mut Form) {
        let data = form.submit();
        self.sink.notify(Notice::ResetForm { form: form.id });
        if let Some(review) = decode::<Review>(data, FormId::Review) {
            self.store.prepend(StoreKey::Reviews, review);
        }
        render::render_reviews(&self.store, &mut self.sink);
        self.speech.speak(REVIEW_SPOKEN);
    }

    // ── Cart ────────────────────────────────────────────────

    pub fn cart(&self) -> Vec<CartItem> {
        self.store.load(StoreKey::Cart)
    }

    pub fn add_to_cart(&mut self, form: &mut Form) {
        let data = form.submit();
        if let Some(item) = decode::<CartItem>(data, FormId::Delivery) {
            self.store.append(StoreKey::Cart, item);
        }
        render::render_cart(&self.store, &mut self.sink);
        self.sink.notify(Notice::ResetForm { form: form.id });
    }

    /// Remove the cart line at `index` as rendered in the latest cart view.
    /// Medicine pill: put its name into the delivery form. Nothing is stored.
    pub fn pick_medicine(&mut self, medicine: &str) {
        self.sink.notify(Notice::Prefill {
            form: FormId::Delivery,
            field: "medicine",
            value: medicine.to_string(),
        });
    }

    pub fn remove_from_cart(&mut self, index: usize) -> bool {
        let removed = self.store.remove_at::<CartItem>(StoreKey::Cart, index);
        render::render_cart(&self.store, &mut self.sink);
        removed
    }

    /// Place the order. Returns whether anything was ordered.
    pub fn checkout(&mut self) -> bool {
        let cart: Vec<CartItem> = self.store.load(StoreKey::Cart);
        if cart.is_empty() {
            self.sink.notify(Notice::alert(CHECKOUT_EMPTY_ALERT));
            return false;
        }
        tracing::info!(items = cart.len(), "Medicine order placed");
        self.sink.show(View::CheckoutMessage {
            text: CHECKOUT_MESSAGE.to_string(),
        });
        self.speech.speak(CHECKOUT_SPOKEN);
        self.store.clear(StoreKey::Cart);
        render::render_cart(&self.store, &mut self.sink);
        true
    }

    // ── History ─────────────────────────────────────────────

    pub fn history_text(&self) -> Option<String> {
        self.store.load_raw(StoreKey::History)
    }

    /// Replace the saved history with the form's fields. The form keeps its
    /// values so the user can keep editing.
    pub fn save_history(&mut self, form: &Form) {
        let record = form.data().into_history();
        self.store.replace_one(StoreKey::History, &record);
        render::render_history(&self.store, &mut self.sink);
    }

    // ── Symptoms & hospitals ────────────────────────────────

    pub fn symptom_area(&self, area: &str) -> Option<AreaAdvice> {
        symptoms::lookup(area)
    }

    /// Centre the hospital map on the provider's position. Failures are
    /// shown to the user as an alert carrying the provider's message.
    pub fn locate(&mut self, provider: Option<&dyn LocationProvider>) -> Option<MapView> {
        match hospitals::locate(provider) {
            Ok(view) => Some(view),
            Err(e) => {
                tracing::debug!(error = %e, "Location unavailable");
                self.sink.notify(Notice::alert(e.to_string()));
                None
            }
        }
    }

    // ── Voice ───────────────────────────────────────────────

    pub fn voice_status(&self) -> &VoiceStatus {
        self.voice.status()
    }

    pub fn voice_supported(&self) -> bool {
        self.voice.is_supported()
    }

    pub fn voice_active(&self) -> bool {
        self.voice.is_active()
    }

    pub fn start_voice(&mut self) {
        self.voice.start_listening();
        self.show_voice_status();
    }

    pub fn stop_voice(&mut self) {
        self.voice.stop_listening();
        self.show_voice_status();
    }

    /// A finalized recognition batch: route the latest transcript.
    pub fn voice_results(&mut self, transcripts: &[String]) -> Option<VoiceAction> {
        let text = self.voice.accept_results(transcripts)?;
        self.show_voice_status();
        Some(self.handle_voice(&text))
    }

    /// Route one spoken command and carry it out.
    pub fn handle_voice(&mut self, text: &str) -> VoiceAction {
        let action = *self.voice_router.route(text);
        tracing::debug!(?action, "Voice command routed");
        match action {
            VoiceAction::Navigate { section } => self.sink.notify(Notice::navigate(section)),
            VoiceAction::OpenChat => self.open_chat(),
            VoiceAction::ReadAppointments => {
                let count = self.appointments().len();
                self.speech.speak(&intent::appointment_count_phrase(count));
            }
            VoiceAction::NotUnderstood => self.speech.speak(VOICE_FALLBACK),
        }
        action
    }

    fn show_voice_status(&mut self) {
        self.sink.show(View::VoiceStatus {
            text: self.voice.status().label(),
        });
    }

    // ── Chat ────────────────────────────────────────────────

    pub fn chat(&self) -> &ChatPanel {
        &self.chat
    }

    pub fn open_chat(&mut self) {
        self.chat.open();
        self.sink.notify(Notice::OpenChat);
    }

    pub fn close_chat(&mut self) {
        self.chat.close();
        self.sink.notify(Notice::CloseChat);
    }

    /// Send a chat message; the reply is also spoken.
    pub fn send_chat(&mut self, text: &str) -> Option<&'static str> {
        let reply = self.chat.send(text)?;
        self.speech.speak(reply);
        Some(reply)
    }
}

/// Flatten submitted fields into a typed record.
fn decode<T: serde::de::DeserializeOwned>(data: FormData, form: FormId) -> Option<T> {
    match data.into_record() {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(?form, error = %e, "Form fields did not fit the record");
            None
        }
    }
}
