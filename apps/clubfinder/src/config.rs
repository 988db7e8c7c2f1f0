use std::path::PathBuf;

use anyhow::{bail, Context, Result};

const DEFAULT_CATALOG_PATH: &str = "activities.json";
const DEFAULT_MAX_RESUME_TAGS: usize = 4;
const DEFAULT_MIN_RESUME_SCORE: u32 = 1;

/// Configuration loaded from environment variables (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    /// Built-in taxonomy is used when unset.
    pub taxonomy_path: Option<PathBuf>,
    pub max_resume_tags: usize,
    pub min_resume_score: u32,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            taxonomy_path: None,
            max_resume_tags: DEFAULT_MAX_RESUME_TAGS,
            min_resume_score: DEFAULT_MIN_RESUME_SCORE,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. `from_env` delegates here.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_resume_tags = match lookup("CLUBFINDER_MAX_RESUME_TAGS") {
            Some(raw) => raw
                .parse::<usize>()
                .context("CLUBFINDER_MAX_RESUME_TAGS must be a positive integer")?,
            None => DEFAULT_MAX_RESUME_TAGS,
        };
        if max_resume_tags == 0 {
            bail!("CLUBFINDER_MAX_RESUME_TAGS must be at least 1");
        }

        let min_resume_score = match lookup("CLUBFINDER_MIN_RESUME_SCORE") {
            Some(raw) => raw
                .parse::<u32>()
                .context("CLUBFINDER_MIN_RESUME_SCORE must be a non-negative integer")?,
            None => DEFAULT_MIN_RESUME_SCORE,
        };

        Ok(Config {
            catalog_path: lookup("CLUBFINDER_CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH)),
            taxonomy_path: lookup("CLUBFINDER_TAXONOMY_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            max_resume_tags,
            min_resume_score,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
