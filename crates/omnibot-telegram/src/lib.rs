//! Telegram front door.
//!
//! A long-polling teloxide dispatcher that parses slash commands and free
//! text into router requests, saves inbound photos to the file store, and
//! delivers replies in their native Telegram shape (message, photo by URL,
//! audio or document attachment).

pub mod bot;
pub mod error;
pub mod handlers;

pub use bot::{BotFront, BotState};
pub use error::{BotError, Result};
