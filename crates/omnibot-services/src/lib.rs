//! Third-party service adapters.
//!
//! Every capability of the relay is a thin adapter from an internal call
//! shape to some external API. All adapters normalize their failures into
//! [`ServiceError`] at this boundary; the router maps those to fixed
//! user-facing replies in one place instead of per handler.

pub mod ai;
pub mod error;
pub mod media;
pub mod pdf;
pub mod tts;
pub mod weather;
pub mod wiki;

pub use ai::{AiClient, AI_ERROR_PREFIX};
pub use error::ServiceError;
pub use media::{image_url, meme_url};
pub use pdf::render_pdf;
pub use tts::SpeechClient;
pub use weather::{WeatherClient, WeatherReport};
pub use wiki::WikiClient;
