//! Resume-to-profile extraction engine.
//!
//! Given plain resume text (already pulled out of its source document by
//! whatever reader owns that job) and an optional named-entity tagger,
//! recovers a structured professional profile: contact fields, skills,
//! education, and a segmented list of work-experience entries.
//!
//! The engine is synchronous and pure — no I/O, no shared state, the same
//! input always yields the same profile — so it can be called concurrently
//! with distinct inputs. Data quality never fails a call: missing signals
//! and tagger errors degrade to empty fields and sentinel values.

pub mod config;
pub mod errors;
pub mod extraction;
pub mod models;
pub mod tagger;

pub use config::ExtractionLimits;
pub use errors::TaggerError;
pub use extraction::extract_profile;
pub use models::entity::{Entity, EntityLabel};
pub use models::profile::{ExtractedProfile, WorkExperience};
pub use tagger::{EntityTagger, HeuristicTagger};
