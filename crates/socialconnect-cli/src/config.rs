use anyhow::{Result, bail};

use socialconnect_core::dispatcher::DEFAULT_CAPACITY;
use socialconnect_core::verifier::DEFAULT_BIO;

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Start with the two starter posts in the feed
    pub seed_demo: bool,
    pub event_capacity: usize,
    /// Bio given to new profiles that leave theirs blank
    pub default_bio: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let seed_demo = match lookup("SOCIALCONNECT_SEED_DEMO") {
            Some(raw) => parse_bool("SOCIALCONNECT_SEED_DEMO", &raw)?,
            None => true,
        };

        let event_capacity: usize = lookup("SOCIALCONNECT_EVENT_CAPACITY")
            .unwrap_or_else(|| DEFAULT_CAPACITY.to_string())
            .trim()
            .parse()?;
        if event_capacity == 0 {
            bail!("SOCIALCONNECT_EVENT_CAPACITY must be greater than zero");
        }

        let default_bio = lookup("SOCIALCONNECT_DEFAULT_BIO")
            .map(|bio| bio.trim().to_string())
            .filter(|bio| !bio.is_empty())
            .unwrap_or_else(|| DEFAULT_BIO.to_string());

        Ok(Self {
            seed_demo,
            event_capacity,
            default_bio,
        })
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be a boolean, got {:?}", key, other),
    }
}
