//! API endpoint handlers, one module per portal section.

pub mod appointments;
pub mod cart;
pub mod chat;
pub mod doctors;
pub mod health;
pub mod history;
pub mod hospitals;
pub mod navigation;
pub mod reviews;
pub mod symptoms;
pub mod voice;
