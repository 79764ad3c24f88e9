//! Error types for the Telegram front door.

use thiserror::Error;

/// Errors raised while talking to the Telegram API or the local stores.
#[derive(Debug, Error)]
pub enum BotError {
    /// Telegram API request failed.
    #[error("Telegram API error: {0}")]
    Api(#[from] teloxide::RequestError),

    /// File download from the Telegram API failed.
    #[error("download error: {0}")]
    Download(#[from] teloxide::DownloadError),

    /// Local store failure.
    #[error("store error: {0}")]
    Store(#[from] omnibot_store::StoreError),
}

/// Result type for Telegram front-door operations.
pub type Result<T> = std::result::Result<T, BotError>;
