use std::{fs, io, path::Path, time::Duration};

use serde::Deserialize;
use url::Url;

use crate::error::SettingsError;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://api.github.com/search/users";
pub const DEFAULT_SETTINGS_FILE: &str = "user_search.toml";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_USER_AGENT: &str = concat!("user-search-form/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub search_endpoint: Url,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub github_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    search_endpoint: Option<String>,
    request_timeout_ms: Option<u64>,
    user_agent: Option<String>,
    github_token: Option<String>,
}

/// Loads settings from `user_search.toml` (or `USER_SEARCH_CONFIG`) and the
/// process environment. A missing file is not an error.
pub fn load_settings() -> Result<SearchSettings, SettingsError> {
    let path =
        std::env::var("USER_SEARCH_CONFIG").unwrap_or_else(|_| DEFAULT_SETTINGS_FILE.to_string());
    let raw = read_optional(Path::new(&path))?;
    SearchSettings::from_sources(raw.as_deref(), &path, |name| std::env::var(name).ok())
}

fn read_optional(path: &Path) -> Result<Option<String>, SettingsError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SettingsError::Read {
            path: path.display().to_string(),
            source,
        }),
    }
}

impl SearchSettings {
    /// Built-in settings before any file or environment overrides.
    pub fn defaults() -> Result<Self, SettingsError> {
        Ok(Self {
            search_endpoint: parse_endpoint(DEFAULT_SEARCH_ENDPOINT)?,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            github_token: None,
        })
    }

    /// Layers defaults, then the TOML document, then environment overrides.
    pub fn from_sources(
        file_contents: Option<&str>,
        file_label: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SettingsError> {
        let file_cfg = match file_contents {
            Some(raw) => toml::from_str::<SettingsFile>(raw).map_err(|source| {
                SettingsError::Parse {
                    path: file_label.to_string(),
                    source,
                }
            })?,
            None => SettingsFile::default(),
        };

        let mut settings = Self::defaults()?;

        if let Some(v) = file_cfg.search_endpoint {
            settings.search_endpoint = parse_endpoint(&v)?;
        }
        if let Some(v) = file_cfg.request_timeout_ms {
            settings.request_timeout = Duration::from_millis(v);
        }
        if let Some(v) = file_cfg.user_agent {
            settings.user_agent = v;
        }
        if let Some(v) = file_cfg.github_token {
            settings.github_token = Some(v);
        }

        if let Some(v) = non_empty(env("APP__SEARCH_ENDPOINT")) {
            settings.search_endpoint = parse_endpoint(&v)?;
        }
        if let Some(v) = non_empty(env("APP__REQUEST_TIMEOUT_MS")) {
            let parsed = v
                .trim()
                .parse::<u64>()
                .map_err(|_| SettingsError::InvalidValue {
                    name: "APP__REQUEST_TIMEOUT_MS",
                    value: v.clone(),
                })?;
            settings.request_timeout = Duration::from_millis(parsed);
        }
        if let Some(v) = non_empty(env("APP__USER_AGENT")) {
            settings.user_agent = v;
        }
        if let Some(v) = non_empty(env("GITHUB_TOKEN")) {
            settings.github_token = Some(v);
        }
        if let Some(v) = non_empty(env("APP__GITHUB_TOKEN")) {
            settings.github_token = Some(v);
        }

        if settings.request_timeout.is_zero() {
            return Err(SettingsError::InvalidValue {
                name: "request_timeout_ms",
                value: "0".to_string(),
            });
        }

        Ok(settings)
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, SettingsError> {
        self.search_endpoint = parse_endpoint(endpoint)?;
        Ok(self)
    }
}

pub fn parse_endpoint(raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw.trim()).map_err(|source| SettingsError::InvalidEndpoint {
        endpoint: raw.to_string(),
        source,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
