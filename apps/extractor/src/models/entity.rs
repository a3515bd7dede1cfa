use serde::{Deserialize, Serialize};

/// Category assigned to a tagged span by an entity tagger backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    /// Any label the engine does not act on.
    Other,
}

/// A labeled text span produced by an [`EntityTagger`](crate::tagger::EntityTagger).
///
/// Entities live only for the duration of one extraction pass; nothing in
/// the engine retains them across calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub label: EntityLabel,
    pub text: String,
    /// Byte offsets into the tagged text, when the backend reports them.
    pub span: Option<(usize, usize)>,
}
