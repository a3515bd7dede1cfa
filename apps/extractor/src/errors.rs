use thiserror::Error;

/// Error surfaced by an [`EntityTagger`](crate::tagger::EntityTagger) backend.
///
/// The engine never propagates this: every tagger call site catches it,
/// logs at `warn`, and falls back to the tagger-less path for that span.
/// A single tagger failure must never abort a whole extraction pass.
#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("tagger backend failed: {0}")]
    Backend(String),

    #[error("tagger rejected input: {0}")]
    InvalidInput(String),
}
