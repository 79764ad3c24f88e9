//! Command routing for omnibot.
//!
//! Both front doors parse their inbound unit into a [`Request`] and hand it
//! to [`Router::dispatch`], which validates arguments, calls at most one
//! downstream adapter, and produces a [`Reply`] the front door delivers in
//! its native format. All fixed reply strings live here so the two doors
//! cannot drift apart.

pub mod reply;
pub mod router;

pub use reply::Reply;
pub use router::{Request, Router, IMG_MARKER};
