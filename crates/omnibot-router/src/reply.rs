//! Reply payloads produced by the router.

/// What a handler decided to send back.
///
/// `Audio` and `Document` name artifacts in the file store; the delivering
/// front door uploads the file as an attachment and then deletes it
/// (best-effort) — those outputs are ephemeral by design.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text.
    Text(String),
    /// Photo referenced by URL, with a caption.
    Photo { url: String, caption: String },
    /// Audio attachment stored under `filename`.
    Audio { filename: String },
    /// Document attachment stored under `filename`.
    Document { filename: String },
}

impl Reply {
    /// Shorthand for a text reply.
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text(text.into())
    }

    /// The text payload, if this is a text reply.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(text) => Some(text),
            _ => None,
        }
    }
}
