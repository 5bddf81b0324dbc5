use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use shared::domain::DEFAULT_MAX_IDENTIFIER_LEN;
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "https://cyber-backend-y4p5.onrender.com";
pub const CONFIG_FILE_NAME: &str = "lookup.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub max_identifier_len: usize,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            max_identifier_len: DEFAULT_MAX_IDENTIFIER_LEN,
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// `None` leaves the transport's own default in charge.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(base_url.as_ref());
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    base_url: Option<String>,
    max_identifier_len: Option<usize>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `lookup.toml` from the working directory, then environment.
pub fn load_config() -> ClientConfig {
    load_config_from(Path::new(CONFIG_FILE_NAME), |name| std::env::var(name).ok())
}

pub fn load_config_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientConfig {
    let mut config = ClientConfig::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileConfig>(&raw) {
            Ok(file_cfg) => {
                info!(path = %path.display(), "loaded lookup config file");
                if let Some(v) = file_cfg.base_url {
                    config.base_url = v;
                }
                if let Some(v) = file_cfg.max_identifier_len {
                    config.max_identifier_len = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    config.request_timeout_secs = Some(v);
                }
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "ignoring malformed lookup config file")
            }
        }
    }

    if let Some(v) = read_non_empty(&env, "LOOKUP_BASE_URL") {
        config.base_url = v;
    }
    if let Some(v) = read_non_empty(&env, "APP__BASE_URL") {
        config.base_url = v;
    }

    if let Some(v) = read_non_empty(&env, "APP__MAX_IDENTIFIER_LEN") {
        match v.parse::<usize>() {
            Ok(parsed) => config.max_identifier_len = parsed,
            Err(err) => warn!(value = %v, %err, "ignoring invalid APP__MAX_IDENTIFIER_LEN"),
        }
    }

    if let Some(v) = read_non_empty(&env, "APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => config.request_timeout_secs = Some(parsed),
            Err(err) => warn!(value = %v, %err, "ignoring invalid APP__REQUEST_TIMEOUT_SECS"),
        }
    }

    if config.max_identifier_len == 0 {
        warn!("max_identifier_len of 0 would reject every input; using default");
        config.max_identifier_len = DEFAULT_MAX_IDENTIFIER_LEN;
    }

    config.base_url = normalize_base_url(&config.base_url);
    if config.base_url.is_empty() {
        config.base_url = DEFAULT_BASE_URL.into();
    }
    config
}

fn read_non_empty(env: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    env(name).filter(|v| !v.trim().is_empty())
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
