//! Portal HTTP API.
//!
//! Exposes the portal's actions as JSON routes under `/api/` for the local
//! page. Mutating routes answer with the turn's effects; the page applies
//! views, notices and narration in that order.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::portal_router;
pub use server::{PortalServer, ServerSession};
pub use types::ApiContext;
