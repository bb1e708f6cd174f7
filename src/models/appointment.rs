use serde::{Deserialize, Serialize};

use super::flat_string;

/// A booked visit, stored exactly as entered in the booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(default, deserialize_with = "flat_string")]
    pub date: String,
    #[serde(default, deserialize_with = "flat_string")]
    pub time: String,
    #[serde(default, deserialize_with = "flat_string")]
    pub doctor: String,
    #[serde(default, deserialize_with = "flat_string")]
    pub department: String,
}
