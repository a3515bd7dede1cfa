//! Profile assembly — merges the independent extractor outputs into the
//! final record and applies the configured limits.

use tracing::debug;

use crate::config::ExtractionLimits;
use crate::extraction::{fields, segmenter};
use crate::models::profile::ExtractedProfile;
use crate::tagger::EntityTagger;

/// Runs every extractor over `text` and assembles the normalized profile.
///
/// This never fails: missing signals and tagger errors degrade to empty
/// fields, and blank input yields an all-empty profile with a zero-role
/// summary. Running it twice on the same input produces identical output.
pub fn extract_profile(
    text: &str,
    tagger: Option<&dyn EntityTagger>,
    limits: &ExtractionLimits,
) -> ExtractedProfile {
    let mut experiences = segmenter::segment_experiences(text, tagger, limits);
    let roles_found = experiences.len();
    experiences.truncate(limits.max_experiences);

    let profile = ExtractedProfile {
        name: fields::extract_name(text, tagger),
        email: fields::extract_email(text),
        phone: fields::extract_phone(text),
        universities: fields::extract_universities(text, tagger, limits.max_universities),
        degrees: fields::extract_degrees(text, limits.max_degrees),
        experiences,
        skills: fields::extract_skills(text, limits.max_skills),
        // Tenure math over free-form date strings is not attempted.
        total_exp: 0,
        raw_summary: format!("Professional profile with {roles_found} roles identified."),
    };

    debug!(
        roles = roles_found,
        skills = profile.skills.len(),
        has_name = !profile.name.is_empty(),
        "assembled profile"
    );
    profile
}
