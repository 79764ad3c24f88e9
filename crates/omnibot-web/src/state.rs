//! Application state shared across handlers.

use std::sync::Arc;

use omnibot_router::Router;
use omnibot_store::FileStore;

/// State shared by every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    /// Dispatch core shared with the messaging front door.
    pub router: Arc<Router>,
    /// Artifact store backing upload and file-serving routes.
    pub files: Arc<FileStore>,
}

impl AppState {
    pub fn new(router: Arc<Router>, files: Arc<FileStore>) -> Self {
        Self { router, files }
    }
}
