//! HTTP front door.
//!
//! Exposes the same capabilities as the messaging front door over four
//! routes: the chat page, a JSON chat endpoint, a multipart upload
//! endpoint, and artifact serving. Each request is independent and
//! stateless; everything shared lives behind [`state::AppState`].

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use error::ApiError;
pub use router::{create_router, serve};
pub use state::AppState;
