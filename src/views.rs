//! Pure projections from stored collections to display models.
//!
//! Each function depends only on its snapshot, so calling it twice with the
//! same input yields the same view. Writing the view somewhere is the job of
//! `render`.

use serde::Serialize;

use crate::models::{Appointment, CartItem, Review};

pub const EMPTY_APPOINTMENTS: &str = "No appointments yet.";
pub const EMPTY_REVIEWS: &str = "No reviews yet.";
pub const EMPTY_CART: &str = "Cart is empty.";
pub const EMPTY_HISTORY: &str = "No records saved on this device.";

/// Shown in place of the average when there is nothing to average.
pub const NO_AVERAGE: &str = "—";

/// A review line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewLine {
    pub hospital: String,
    pub rating: String,
    pub text: String,
}

/// A cart line with the position its remove button refers to.
///
/// The index is only valid for the snapshot it was rendered from; any
/// removal shifts later lines, so the cart must be re-rendered first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub index: usize,
    pub text: String,
}

/// Display model for one portal section.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Appointments {
        items: Vec<String>,
        empty: Option<&'static str>,
    },
    Reviews {
        items: Vec<ReviewLine>,
        empty: Option<&'static str>,
        /// `"{avg} / 5.00 ({count})"`, or `—` when there are no reviews.
        average: String,
    },
    Cart {
        items: Vec<CartLine>,
        empty: Option<&'static str>,
    },
    History {
        text: String,
    },
    CheckoutMessage {
        text: String,
    },
    VoiceStatus {
        text: String,
    },
}

fn empty_state<T>(items: &[T], message: &'static str) -> Option<&'static str> {
    items.is_empty().then_some(message)
}

pub fn appointments_view(appointments: &[Appointment]) -> View {
    let items: Vec<String> = appointments
        .iter()
        .map(|a| format!("{} {} — {} ({})", a.date, a.time, a.doctor, a.department))
        .collect();
    View::Appointments {
        empty: empty_state(&items, EMPTY_APPOINTMENTS),
        items,
    }
}

/// Mean rating over every review. None for an empty collection.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: f64 = reviews.iter().map(Review::rating_value).sum();
    Some(total / reviews.len() as f64)
}

/// Two-decimal text with ties rounded away from zero (`4.125` → `4.13`).
/// Non-finite values print as `NaN`, `Infinity` or `-Infinity`.
fn fixed_2(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded:.2}")
}

/// Summary line for the review section.
pub fn review_summary(reviews: &[Review]) -> String {
    match average_rating(reviews) {
        Some(avg) => format!("{} / 5.00 ({})", fixed_2(avg), reviews.len()),
        None => NO_AVERAGE.to_string(),
    }
}

pub fn reviews_view(reviews: &[Review]) -> View {
    let items: Vec<ReviewLine> = reviews
        .iter()
        .map(|r| ReviewLine {
            hospital: r.hospital.clone(),
            rating: format!("⭐ {}", r.rating),
            text: r.text.clone(),
        })
        .collect();
    View::Reviews {
        empty: empty_state(&items, EMPTY_REVIEWS),
        average: review_summary(reviews),
        items,
    }
}

pub fn cart_view(cart: &[CartItem]) -> View {
    let items: Vec<CartLine> = cart
        .iter()
        .enumerate()
        .map(|(index, c)| CartLine {
            index,
            text: format!("{} × {} — {}", c.qty, c.medicine, c.address),
        })
        .collect();
    View::Cart {
        empty: empty_state(&items, EMPTY_CART),
        items,
    }
}

/// Stored history text verbatim, or the empty-state message.
pub fn history_text(raw: Option<&str>) -> String {
    match raw {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => EMPTY_HISTORY.to_string(),
    }
}

pub fn history_view(raw: Option<&str>) -> View {
    View::History {
        text: history_text(raw),
    }
}
