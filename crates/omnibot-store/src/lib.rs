//! Persistence layer for omnibot.
//!
//! Two stores back the whole system: a [`FileStore`] holding uploaded and
//! generated artifacts under timestamped names, and a [`NotesStore`] keeping
//! an ordered list of free-text notes in a single JSON document. Writes go
//! through atomic temp-file-then-rename operations so neither store is ever
//! left half-written.

pub mod atomic;
pub mod error;
pub mod files;
pub mod notes;

pub use error::{Result, StoreError};
pub use files::FileStore;
pub use notes::NotesStore;
