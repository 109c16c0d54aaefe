//! Loading the YouTube Data API key.

use crate::error::Error;
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Where the key file lives unless `--config` says otherwise.
pub const DEFAULT_CONFIG_PATH: &str = "config/api_config.toml";

/// Environment variable that takes precedence over the config file.
pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// A YouTube Data API key. Its `Debug` output never shows the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, Error> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(Error::Config(format!("{API_KEY_VAR} is empty")));
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// On-disk layout of the key file:
///
/// ```toml
/// YOUTUBE_API_KEY = "AIza..."
/// ```
#[derive(Debug, Deserialize)]
struct ApiConfig {
    #[serde(rename = "YOUTUBE_API_KEY")]
    youtube_api_key: Option<String>,
}

/// Reads the API key from `YOUTUBE_API_KEY`, falling back to the TOML file at `path`.
pub fn load_api_key(path: &Path) -> Result<ApiKey, Error> {
    load_api_key_with(path, |key| std::env::var(key).ok())
}

fn load_api_key_with(
    path: &Path,
    env_lookup: impl Fn(&str) -> Option<String>,
) -> Result<ApiKey, Error> {
    if let Some(key) = env_lookup(API_KEY_VAR).filter(|key| !key.trim().is_empty()) {
        tracing::debug!("using API key from environment");
        return ApiKey::new(key);
    }

    let raw = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "{API_KEY_VAR} not set and {} could not be read: {e}",
            path.display()
        ))
    })?;
    let config: ApiConfig = toml::from_str(&raw)
        .map_err(|e| Error::Config(format!("parse {}: {e}", path.display())))?;

    let key = config
        .youtube_api_key
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("missing {API_KEY_VAR} in {}", path.display())))?;
    tracing::debug!(path = %path.display(), "using API key from config file");
    ApiKey::new(key)
}
