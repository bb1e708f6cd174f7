use serde::{Deserialize, Serialize};

use super::flat_string;

/// One line of the medicine delivery cart. `qty` is kept as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(default, deserialize_with = "flat_string")]
    pub medicine: String,
    #[serde(default, deserialize_with = "flat_string")]
    pub qty: String,
    #[serde(default, deserialize_with = "flat_string")]
    pub address: String,
}
