use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use extractor::config::ExtractionLimits;
use extractor::extraction::extract_profile;
use extractor::tagger::HeuristicTagger;

fn main() -> Result<()> {
    // Load limits first (reads .env; env vars override the documented caps)
    let limits = ExtractionLimits::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=info", env!("CARGO_PKG_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume extractor v{}", env!("CARGO_PKG_VERSION"));

    let text = read_input().context("failed to read resume text")?;
    let tagger = HeuristicTagger;
    let profile = extract_profile(&text, Some(&tagger), &limits);

    info!(
        roles = profile.experiences.len(),
        skills = profile.skills.len(),
        "extraction finished"
    );
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

/// Reads already-extracted resume text from the first CLI argument, or
/// stdin when no path is given. Binary document formats (PDF, DOCX) are a
/// reader concern, not ours.
fn read_input() -> Result<String> {
    match std::env::args().nth(1) {
        Some(path) => {
            let path = PathBuf::from(path);
            std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read '{}'", path.display()))
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("cannot read stdin")?;
            Ok(buffer)
        }
    }
}
