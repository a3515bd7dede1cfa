//! Experience segmentation — a two-state machine over resume lines.
//!
//! Each non-blank line is tested for two boundary signals: a date range or
//! a job-title keyword. Either one closes the active block and opens a new
//! one; everything else feeds the active block's description. The machine
//! is a single transition function so every edge is unit-testable.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::config::ExtractionLimits;
use crate::models::entity::EntityLabel;
use crate::models::profile::WorkExperience;
use crate::tagger::EntityTagger;

pub(crate) const TITLE_KEYWORDS: &[&str] = &[
    "Engineer", "Developer", "Manager", "Analyst", "Lead",
    "Architect", "Scientist", "Consultant", "Designer", "Specialist",
];

/// Lines at or above this length are prose, not headings, even when they
/// mention a title keyword.
const TITLE_LINE_MAX_CHARS: usize = 100;
const FIELD_MAX_CHARS: usize = 100;

const FALLBACK_TITLE: &str = "Team Member";
const FALLBACK_COMPANY: &str = "Company";

// `<month year | mm/yy[yy]>` separator `<month year | mm/yy[yy] | present | current>`.
// Month tokens are 3+-letter prefixes of a month name, optional trailing
// period, followed by a 4-digit year. Two capture groups: start and end.
static DATE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    let month = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|jun(?:e)?|jul(?:y)?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s*\d{4}";
    let numeric = r"\d{1,2}/\d{2,4}";
    let pattern = format!(r"(?i)({month}|{numeric})\s*(?:-|–|to)\s*({month}|{numeric}|present|current)");
    Regex::new(&pattern).expect("date-range pattern must compile")
});

static TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"(?i)\b(?:{})\b", TITLE_KEYWORDS.join("|"));
    Regex::new(&pattern).expect("title pattern must compile")
});

#[derive(Debug)]
enum SegmenterState {
    NoActiveBlock,
    ActiveBlock(WorkExperience),
}

/// Splits `text` into finalized work-experience blocks, in document order,
/// uncapped — the assembler applies the experience limit so the role count
/// in the summary can still reflect everything that was found.
pub fn segment_experiences(
    text: &str,
    tagger: Option<&dyn EntityTagger>,
    limits: &ExtractionLimits,
) -> Vec<WorkExperience> {
    let mut state = SegmenterState::NoActiveBlock;
    let mut blocks = Vec::new();

    for line in text.lines() {
        let (next, finalized) = step(state, line, tagger, limits);
        state = next;
        if let Some(block) = finalized {
            debug!(title = %block.title, company = %block.company, "finalized experience block");
            blocks.push(block);
        }
    }
    if let SegmenterState::ActiveBlock(block) = state {
        if block.is_attributable() {
            blocks.push(block);
        }
    }
    blocks
}

/// The whole segmenter as one transition:
/// `(state, line) -> (next_state, finalized_block?)`.
fn step(
    state: SegmenterState,
    line: &str,
    tagger: Option<&dyn EntityTagger>,
    limits: &ExtractionLimits,
) -> (SegmenterState, Option<WorkExperience>) {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return (state, None);
    }

    let date_match = DATE_RANGE_RE.captures(trimmed);
    let title_signal =
        trimmed.chars().count() < TITLE_LINE_MAX_CHARS && TITLE_RE.is_match(trimmed);

    if date_match.is_some() || title_signal {
        let finalized = match state {
            SegmenterState::ActiveBlock(block) if block.is_attributable() => Some(block),
            _ => None,
        };
        let opened = open_block(trimmed, date_match, tagger);
        return (SegmenterState::ActiveBlock(opened), finalized);
    }

    match state {
        SegmenterState::ActiveBlock(mut block) => {
            // Append only while under the cap; the line that would cross it
            // is the last one kept, later lines are dropped whole.
            if block.description.chars().count() < limits.max_description_chars {
                block.description.push_str(trimmed);
                block.description.push(' ');
            }
            (SegmenterState::ActiveBlock(block), None)
        }
        // Prose ahead of the first recognized entry is not attributable.
        SegmenterState::NoActiveBlock => (SegmenterState::NoActiveBlock, None),
    }
}

/// Derives title, company, and dates for a block opened on `line`.
fn open_block(
    line: &str,
    date_match: Option<Captures<'_>>,
    tagger: Option<&dyn EntityTagger>,
) -> WorkExperience {
    let mut title = line.to_string();
    let mut company = String::new();

    if let Some(tagger) = tagger {
        match tagger.tag(line) {
            Ok(entities) => {
                let org = entities
                    .into_iter()
                    .find(|e| e.label == EntityLabel::Organization);
                if let Some(org) = org {
                    title = strip_fragment(&title, &org.text);
                    company = org.text;
                }
            }
            Err(err) => warn!("entity tagger failed on block-start line: {err}"),
        }
    }

    let (start_date, end_date) = match date_match {
        Some(caps) => {
            title = strip_fragment(&title, &caps[0]);
            (caps[1].to_string(), caps[2].to_string())
        }
        None => (String::new(), String::new()),
    };

    WorkExperience {
        title: clamp_field(&title, FALLBACK_TITLE),
        company: clamp_field(&company, FALLBACK_COMPANY),
        start_date,
        end_date,
        description: String::new(),
    }
}

/// Removes the first occurrence of `fragment` and trims leftover separator
/// characters from both ends.
fn strip_fragment(value: &str, fragment: &str) -> String {
    value
        .replacen(fragment, "", 1)
        .trim_matches([',', '-', ' '])
        .to_string()
}

/// Substitutes the sentinel when empty, then truncates to the field cap.
fn clamp_field(value: &str, fallback: &str) -> String {
    let value = if value.trim().is_empty() { fallback } else { value };
    value.chars().take(FIELD_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TaggerError;
    use crate::models::entity::Entity;

    struct StubTagger(Vec<(EntityLabel, &'static str)>);

    impl EntityTagger for StubTagger {
        fn tag(&self, text: &str) -> Result<Vec<Entity>, TaggerError> {
            Ok(self
                .0
                .iter()
                .filter(|(_, phrase)| text.contains(phrase))
                .map(|(label, phrase)| Entity {
                    label: *label,
                    text: phrase.to_string(),
                    span: None,
                })
                .collect())
        }
    }

    struct FailingTagger;

    impl EntityTagger for FailingTagger {
        fn tag(&self, _text: &str) -> Result<Vec<Entity>, TaggerError> {
            Err(TaggerError::Backend("model unavailable".to_string()))
        }
    }

    fn limits() -> ExtractionLimits {
        ExtractionLimits::default()
    }

    #[test]
    fn test_title_and_date_line_with_tagged_company() {
        let tagger = StubTagger(vec![(EntityLabel::Organization, "Acme Corp")]);
        let text = "Software Engineer at Acme Corp Jan 2020 - Present\nBuilt the billing pipeline.";
        let blocks = segment_experiences(text, Some(&tagger), &limits());

        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.company, "Acme Corp");
        assert_eq!(block.start_date, "Jan 2020");
        assert_eq!(block.end_date, "Present");
        assert!(!block.title.contains("Acme Corp"), "company must be stripped from title");
        assert!(!block.title.contains("Jan 2020"), "date must be stripped from title");
        assert!(block.title.contains("Software Engineer"));
        assert_eq!(block.description, "Built the billing pipeline. ");
    }

    #[test]
    fn test_date_only_line_gets_sentinel_title_and_company() {
        let blocks = segment_experiences("Jan 2020 - Dec 2021", None, &limits());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Team Member");
        assert_eq!(blocks[0].company, "Company");
        assert_eq!(blocks[0].start_date, "Jan 2020");
        assert_eq!(blocks[0].end_date, "Dec 2021");
    }

    #[test]
    fn test_title_only_line_has_no_dates() {
        let blocks = segment_experiences("Data Analyst", None, &limits());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Data Analyst");
        assert_eq!(blocks[0].start_date, "");
        assert_eq!(blocks[0].end_date, "");
    }

    #[test]
    fn test_two_consecutive_title_lines_finalize_two_blocks() {
        let blocks = segment_experiences("Senior Engineer\nStaff Developer", None, &limits());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title, "Senior Engineer");
        assert_eq!(blocks[0].company, "Company");
        assert_eq!(blocks[1].title, "Staff Developer");
        assert_eq!(blocks[1].company, "Company");
    }

    #[test]
    fn test_long_prose_line_mentioning_title_is_description() {
        let prose = "Collaborated with the engineering manager and three partner teams on a \
                     migration that touched every analyst workflow in the company.";
        assert!(prose.chars().count() >= 100);
        let text = format!("Platform Lead\n{prose}");
        let blocks = segment_experiences(&text, None, &limits());
        assert_eq!(blocks.len(), 1, "a ≥100-char line must not open a block");
        assert!(blocks[0].description.starts_with("Collaborated"));
    }

    #[test]
    fn test_numeric_and_dash_variant_date_ranges() {
        let blocks = segment_experiences("03/2018 to 11/20\nMar. 2021 – Sep 2022", None, &limits());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].start_date, "03/2018");
        assert_eq!(blocks[0].end_date, "11/20");
        assert_eq!(blocks[1].start_date, "Mar. 2021");
        assert_eq!(blocks[1].end_date, "Sep 2022");
    }

    #[test]
    fn test_prose_before_first_block_is_dropped() {
        let text = "A short paragraph about hobbies.\nMore prose.\nProject Manager";
        let blocks = segment_experiences(text, None, &limits());
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].description.is_empty());
    }

    #[test]
    fn test_blank_lines_do_not_change_state() {
        let text = "QA Engineer\nFirst line.\n\n\nSecond line.";
        let blocks = segment_experiences(text, None, &limits());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].description, "First line. Second line. ");
    }

    #[test]
    fn test_description_stops_at_cap_without_mid_line_truncation() {
        let line = "x".repeat(120);
        let mut text = String::from("Build Engineer\n");
        for _ in 0..10 {
            text.push_str(&line);
            text.push('\n');
        }
        let blocks = segment_experiences(&text, None, &limits());
        let described = blocks[0].description.chars().count();
        // 121 chars per appended line; the fifth append crosses 500 and is
        // the last one kept.
        assert_eq!(described, 605);
        assert!(described <= 500 + line.chars().count() + 1);
    }

    #[test]
    fn test_document_order_preserved_when_dates_are_unsorted() {
        let text = "Consultant Jan 2022 - Dec 2022\nConsultant Jan 2015 - Dec 2015";
        let blocks = segment_experiences(text, None, &limits());
        assert_eq!(blocks[0].start_date, "Jan 2022");
        assert_eq!(blocks[1].start_date, "Jan 2015");
    }

    #[test]
    fn test_tagger_failure_never_aborts_the_pass() {
        let text = "Software Engineer at Acme Corp Jan 2020 - Present\nKept shipping.";
        let blocks = segment_experiences(text, Some(&FailingTagger), &limits());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].company, "Company", "tagger failure falls back to the sentinel");
        assert_eq!(blocks[0].description, "Kept shipping. ");
    }

    #[test]
    fn test_no_signals_means_no_blocks() {
        let text = "I enjoy long walks.\nI also enjoy short walks.";
        assert!(segment_experiences(text, None, &limits()).is_empty());
    }

    #[test]
    fn test_present_end_token_is_case_insensitive() {
        let blocks = segment_experiences("jul 2019 - PRESENT", None, &limits());
        assert_eq!(blocks[0].end_date, "PRESENT");
    }
}
