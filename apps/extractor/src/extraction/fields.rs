//! Field extractors — one independent, stateless pass over the full text
//! per scalar/list field. First match wins for the scalar fields; the list
//! fields report matches in vocabulary order, not appearance order.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::models::entity::EntityLabel;
use crate::tagger::EntityTagger;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    // local@domain token grammar; anchored on word characters at both ends
    // so surrounding punctuation is never captured.
    Regex::new(r"\w[\w.\-]*@[\w.\-]*\w").expect("email pattern must compile")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    // Loose North-American shape: optional country code, optionally
    // parenthesized area code, exchange, line number. No validation.
    Regex::new(r"(?:\+?\d{1,3}[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}")
        .expect("phone pattern must compile")
});

/// Bounded skills vocabulary. Canonical casing is what ends up in the
/// profile; matching is case-insensitive and whole-word.
const SKILLS_VOCABULARY: &[&str] = &[
    "Python", "Java", "JavaScript", "TypeScript", "Rust", "Go", "C++", "C#",
    "SQL", "HTML", "CSS", "React", "Angular", "Vue", "Node.js", "Django",
    "Flask", "Spring", "GraphQL", "REST",
    "Docker", "Kubernetes", "Terraform", "Jenkins", "Git", "Linux",
    "AWS", "Azure", "GCP",
    "PostgreSQL", "MySQL", "MongoDB", "Redis", "Kafka", "Spark",
    "Machine Learning", "Deep Learning", "NLP", "TensorFlow", "PyTorch",
    "Pandas", "NumPy",
];

/// Degree vocabulary. Substring matching, deliberately looser than the
/// skills test so "Bachelor of Science" surfaces "Bachelor".
const DEGREE_VOCABULARY: &[&str] = &[
    "Bachelor", "Master", "PhD", "Ph.D", "B.Tech", "M.Tech", "B.Sc", "M.Sc",
    "MBA", "Associate",
];

pub(crate) const INSTITUTION_KEYWORDS: &[&str] =
    &["University", "College", "Institute", "School", "Polytechnic"];

/// First email-shaped substring, or `""`.
pub fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First phone-shaped substring, or `""`.
pub fn extract_phone(text: &str) -> String {
    PHONE_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Vocabulary skills present in `text` as whole words, canonical casing,
/// vocabulary order, capped at `max_skills`.
pub fn extract_skills(text: &str, max_skills: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    SKILLS_VOCABULARY
        .iter()
        .filter(|skill| contains_whole_word(&lowered, &skill.to_lowercase()))
        .take(max_skills)
        .map(|skill| skill.to_string())
        .collect()
}

/// Vocabulary degrees present in `text` as substrings, vocabulary order,
/// capped at `max_degrees`.
pub fn extract_degrees(text: &str, max_degrees: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    DEGREE_VOCABULARY
        .iter()
        .filter(|degree| lowered.contains(&degree.to_lowercase()))
        .take(max_degrees)
        .map(|degree| degree.to_string())
        .collect()
}

/// ORGANIZATION entities that look like educational institutions,
/// deduplicated by exact text, first-seen order, capped at
/// `max_universities`. Empty without a tagger.
pub fn extract_universities(
    text: &str,
    tagger: Option<&dyn EntityTagger>,
    max_universities: usize,
) -> Vec<String> {
    let Some(tagger) = tagger else {
        return Vec::new();
    };
    let entities = match tagger.tag(text) {
        Ok(entities) => entities,
        Err(err) => {
            warn!("entity tagger failed on education scan: {err}");
            return Vec::new();
        }
    };

    let mut found: Vec<String> = Vec::new();
    for entity in entities {
        if entity.label != EntityLabel::Organization {
            continue;
        }
        if !INSTITUTION_KEYWORDS.iter().any(|k| entity.text.contains(k)) {
            continue;
        }
        if found.contains(&entity.text) {
            continue;
        }
        found.push(entity.text);
        if found.len() == max_universities {
            break;
        }
    }
    found
}

/// First PERSON entity with at least two whitespace-separated tokens —
/// single-token matches are overwhelmingly false positives. Empty without
/// a tagger.
pub fn extract_name(text: &str, tagger: Option<&dyn EntityTagger>) -> String {
    let Some(tagger) = tagger else {
        return String::new();
    };
    let entities = match tagger.tag(text) {
        Ok(entities) => entities,
        Err(err) => {
            warn!("entity tagger failed on name scan: {err}");
            return String::new();
        }
    };

    entities
        .into_iter()
        .filter(|e| e.label == EntityLabel::Person)
        .map(|e| e.text)
        .find(|t| t.split_whitespace().count() >= 2)
        .unwrap_or_default()
}

/// Whole-word containment over an already-lowercased haystack. Word edges
/// are any non-alphanumeric neighbor, so vocabulary terms like "C++" and
/// "Node.js" work without regex escaping.
fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    let mut from = 0;
    while let Some(pos) = haystack[from..].find(needle) {
        let start = from + pos;
        let end = start + needle.len();
        let left_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let right_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if left_ok && right_ok {
            return true;
        }
        from = start + 1;
    }
    false
}
