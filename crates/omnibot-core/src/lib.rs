//! Core configuration for the omnibot relay.
//!
//! Both front doors and every adapter are constructed from a single
//! [`Config`] read once at startup; nothing else in the workspace looks at
//! the environment.

pub mod config;

pub use config::{Config, ConfigError};
