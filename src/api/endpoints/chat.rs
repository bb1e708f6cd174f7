//! Chat panel endpoints.
//!
//! - `GET /api/chat` — panel state and transcript
//! - `POST /api/chat/open`, `POST /api/chat/close`
//! - `POST /api/chat/send` — one message, one reply

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, Turn};
use crate::chat::ChatPanel;

/// Longest accepted chat message, in bytes.
const MAX_MESSAGE_LEN: usize = 2000;

/// `GET /api/chat`
pub async fn panel(State(ctx): State<ApiContext>) -> Result<Json<ChatPanel>, ApiError> {
    Ok(Json(ctx.core.read(|p| p.chat().clone())?))
}

/// `POST /api/chat/open`
pub async fn open(State(ctx): State<ApiContext>) -> Result<Json<Turn<()>>, ApiError> {
    ctx.turn(|p| p.open_chat())
}

/// `POST /api/chat/close`
pub async fn close(State(ctx): State<ApiContext>) -> Result<Json<Turn<()>>, ApiError> {
    ctx.turn(|p| p.close_chat())
}

#[derive(Deserialize)]
pub struct ChatSendRequest {
    pub text: String,
}

/// `POST /api/chat/send` — `result` is the reply; blank messages are
/// ignored and give null.
pub async fn send(
    State(ctx): State<ApiContext>,
    Json(req): Json<ChatSendRequest>,
) -> Result<Json<Turn<Option<&'static str>>>, ApiError> {
    if req.text.chars().count() > MAX_MESSAGE_LEN {
        return Err(ApiError::BadRequest(format!(
            "Message too long (max {MAX_MESSAGE_LEN} chars)"
        )));
    }
    ctx.turn(|p| p.send_chat(&req.text))
}
