//! Shared types for the portal API layer.

use std::sync::Arc;

use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::capture::Form;
use crate::core_state::{CoreState, Effects};
use crate::portal::Portal;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }

    /// Run one portal action and wrap its result with the turn's effects.
    pub fn turn<R: Serialize>(
        &self,
        f: impl FnOnce(&mut Portal) -> R,
    ) -> Result<Json<Turn<R>>, ApiError> {
        let (result, effects) = self.core.act(f)?;
        Ok(Json(Turn { result, effects }))
    }
}

// ═══════════════════════════════════════════════════════════
// Responses
// ═══════════════════════════════════════════════════════════

/// Response of every mutating route: the action's own result plus
/// `views`, `notices` and `spoken` for the client to apply.
#[derive(Debug, Serialize)]
pub struct Turn<R: Serialize> {
    pub result: R,
    #[serde(flatten)]
    pub effects: Effects,
}

// ═══════════════════════════════════════════════════════════
// Requests
// ═══════════════════════════════════════════════════════════

/// Form-encoded body as ordered pairs. Names may repeat.
pub type FormPairs = Vec<(String, String)>;

/// Copy submitted pairs into a fresh form.
pub fn filled(mut form: Form, pairs: &[(String, String)]) -> Form {
    form.fill(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::FormId;

    #[test]
    fn filled_keeps_last_repeated_value() {
        let pairs: FormPairs = vec![
            ("qty".into(), "1".into()),
            ("medicine".into(), "Aspirin".into()),
            ("qty".into(), "4".into()),
        ];
        let form = filled(Form::delivery(), &pairs);
        assert_eq!(form.id, FormId::Delivery);
        assert_eq!(form.value("qty"), Some("4"));
        assert_eq!(form.value("address"), Some(""));
    }

    #[test]
    fn turn_flattens_effects() {
        let turn = Turn { result: true, effects: Effects::default() };
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["result"], true);
        assert!(json["views"].as_array().unwrap().is_empty());
        assert!(json["spoken"].as_array().unwrap().is_empty());
    }
}
