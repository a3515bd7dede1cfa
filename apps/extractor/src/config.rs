use anyhow::{Context, Result};

/// Truncation and limit policy applied when assembling a profile.
///
/// The defaults are the caps downstream consumers were built against.
/// `from_env` lets the binary override any of them without a recompile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionLimits {
    /// Accumulated description size at which further lines are dropped.
    pub max_description_chars: usize,
    pub max_experiences: usize,
    pub max_universities: usize,
    pub max_degrees: usize,
    pub max_skills: usize,
}

impl Default for ExtractionLimits {
    fn default() -> Self {
        Self {
            max_description_chars: 500,
            max_experiences: 5,
            max_universities: 2,
            max_degrees: 2,
            max_skills: 15,
        }
    }
}

impl ExtractionLimits {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Self::default();
        Ok(Self {
            max_description_chars: env_or(
                "EXTRACTOR_MAX_DESCRIPTION_CHARS",
                defaults.max_description_chars,
            )?,
            max_experiences: env_or("EXTRACTOR_MAX_EXPERIENCES", defaults.max_experiences)?,
            max_universities: env_or("EXTRACTOR_MAX_UNIVERSITIES", defaults.max_universities)?,
            max_degrees: env_or("EXTRACTOR_MAX_DEGREES", defaults.max_degrees)?,
            max_skills: env_or("EXTRACTOR_MAX_SKILLS", defaults.max_skills)?,
        })
    }
}

fn env_or(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("'{key}' must be a non-negative integer")),
        Err(_) => Ok(default),
    }
}
