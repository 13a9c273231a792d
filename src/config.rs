use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
const DEFAULT_HERO_ROTATE_SECS: u64 = 8;
const HERO_FADE_MS: u64 = 500;
const SECTION_SIZE: usize = 12;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub search_debounce: Duration,
    pub hero_rotate_every: Duration,
    pub hero_fade: Duration,
    pub section_size: usize,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            hero_rotate_every: Duration::from_secs(DEFAULT_HERO_ROTATE_SECS),
            hero_fade: Duration::from_millis(HERO_FADE_MS),
            section_size: SECTION_SIZE,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = non_empty_var("WATCHIFY_API_URL") {
            config = config.with_api_url(&url);
        }
        if let Some(ms) = non_empty_var("WATCHIFY_SEARCH_DEBOUNCE_MS") {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("WATCHIFY_SEARCH_DEBOUNCE_MS is not a number: {ms}"))?;
            config.search_debounce = Duration::from_millis(ms);
        }
        if let Some(secs) = non_empty_var("WATCHIFY_HERO_ROTATE_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("WATCHIFY_HERO_ROTATE_SECS is not a number: {secs}"))?;
            config.hero_rotate_every = Duration::from_secs(secs);
        }
        if let Some(seed) = non_empty_var("WATCHIFY_SEED") {
            let seed: u64 = seed
                .parse()
                .with_context(|| format!("WATCHIFY_SEED is not a number: {seed}"))?;
            config.seed = Some(seed);
        }
        Ok(config)
    }

    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_base_url = url.trim().trim_end_matches('/').to_string();
        self
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}
