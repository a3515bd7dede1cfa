//! Entity tagging — the NER seam of the engine.
//!
//! The engine never talks to a concrete NER backend directly: callers
//! inject any `EntityTagger` (or none at all) into the extraction entry
//! point, mirroring how the app swaps scorer backends behind a trait.
//! `HeuristicTagger` is the built-in deterministic backend so the binary
//! and tests run without an external model.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TaggerError;
use crate::extraction::fields::INSTITUTION_KEYWORDS;
use crate::extraction::segmenter::TITLE_KEYWORDS;
use crate::models::entity::{Entity, EntityLabel};

/// A named-entity tagger capability.
///
/// `tag` returns every labeled span found in `text`, in document order.
/// Implementations must be safe to call concurrently; the engine holds no
/// lock around tagger invocations.
pub trait EntityTagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<Entity>, TaggerError>;
}

// Maximal run of capitalized tokens, allowing lowercase connectors inside
// ("University of Michigan"). `[ \t]` keeps runs from crossing lines.
static CAPITALIZED_RUN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Z][A-Za-z0-9.&'\-]*(?:[ \t]+(?:(?:of|and|for|the|&)[ \t]+)?[A-Z][A-Za-z0-9.&'\-]*)*")
        .expect("capitalized-run pattern must compile")
});

const ORG_SUFFIXES: &[&str] = &[
    "Inc", "LLC", "Ltd", "Corp", "Co", "Company", "Technologies", "Tech",
    "Labs", "Systems", "Solutions", "Software", "Group", "Consulting",
    "Bank", "Studios",
];

// Capitalized words that rule a run out as a person name: section headers,
// degree words, and date-range tail words all show up capitalized in
// resumes without naming anyone.
const PERSON_BLOCKERS: &[&str] = &[
    "Experience", "Education", "Skills", "Summary", "Objective", "Projects",
    "Certifications", "References", "Contact", "Work", "Professional",
    "Bachelor", "Master", "Associate", "Science", "Arts",
    "Present", "Current", "Resume", "Curriculum", "Vitae",
];

const MONTH_NAMES: &[&str] = &[
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

/// Rule-based tagger: capitalized-run scanning plus organization-suffix and
/// institution gazetteers. A deterministic stand-in for a real NER model —
/// precision over recall, and it never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicTagger;

impl EntityTagger for HeuristicTagger {
    fn tag(&self, text: &str) -> Result<Vec<Entity>, TaggerError> {
        let mut entities = Vec::new();
        for m in CAPITALIZED_RUN_RE.find_iter(text) {
            let run = m.as_str();
            let mut spans = token_spans(run);

            // Months and stray connectors at the edges belong to the
            // surrounding date range, not the entity.
            while spans.first().is_some_and(|&(s, e)| is_edge_noise(&run[s..e])) {
                spans.remove(0);
            }
            while spans.last().is_some_and(|&(s, e)| is_edge_noise(&run[s..e])) {
                spans.pop();
            }
            let (Some(&(first, _)), Some(&(_, last))) = (spans.first(), spans.last()) else {
                continue;
            };

            let tokens: Vec<&str> = spans.iter().map(|&(s, e)| &run[s..e]).collect();
            let Some(label) = classify_run(&tokens) else {
                continue;
            };
            entities.push(Entity {
                label,
                text: run[first..last].to_string(),
                span: Some((m.start() + first, m.start() + last)),
            });
        }
        Ok(entities)
    }
}

fn classify_run(tokens: &[&str]) -> Option<EntityLabel> {
    if tokens.iter().any(|t| is_org_marker(t)) {
        return Some(EntityLabel::Organization);
    }
    if tokens.iter().any(|t| blocks_person(t)) {
        return None;
    }
    if (2..=4).contains(&tokens.len()) {
        return Some(EntityLabel::Person);
    }
    None
}

fn is_org_marker(token: &str) -> bool {
    let bare = token.trim_end_matches('.');
    ORG_SUFFIXES.iter().chain(INSTITUTION_KEYWORDS).any(|m| *m == bare)
}

fn blocks_person(token: &str) -> bool {
    if is_month_token(token) {
        return true;
    }
    if !token.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        // lowercase connector inside the run
        return true;
    }
    TITLE_KEYWORDS
        .iter()
        .chain(PERSON_BLOCKERS)
        .any(|w| w.eq_ignore_ascii_case(token))
}

fn is_edge_noise(token: &str) -> bool {
    is_month_token(token) || !token.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

fn is_month_token(token: &str) -> bool {
    let lowered = token.trim_end_matches('.').to_lowercase();
    lowered.len() >= 3 && MONTH_NAMES.iter().any(|full| full.starts_with(&lowered))
}

/// Byte ranges of the whitespace-separated tokens inside `run`.
fn token_spans(run: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in run.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, run.len()));
    }
    spans
}
