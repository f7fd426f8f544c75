use std::path::PathBuf;

use portal_client_core::auth::{
    BaseUrlError, DEFAULT_API_BASE_URL, ENV_API_BASE_URL, normalize_base_url,
};
use portal_http_client::DEFAULT_TIMEOUT_MS;
use thiserror::Error;

pub const ENV_TOKEN_PATH: &str = "PORTAL_TOKEN_PATH";
pub const ENV_LOG_FILTER: &str = "PORTAL_LOG_FILTER";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "PORTAL_REQUEST_TIMEOUT_MS";

const DEFAULT_LOG_FILTER: &str = "warn";
const TOKEN_DIR_NAME: &str = ".membership-portal";
const TOKEN_FILE_NAME: &str = "token";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORTAL_API_BASE_URL: {0}")]
    BaseUrl(#[from] BaseUrlError),
    #[error("invalid PORTAL_REQUEST_TIMEOUT_MS: {0}")]
    InvalidRequestTimeout(String),
    #[error("cannot locate a home directory; set PORTAL_TOKEN_PATH")]
    MissingHomeDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub token_path: PathBuf,
    pub log_filter: String,
    pub request_timeout_ms: u64,
}

/// Values given on the command line. Each one replaces its environment
/// counterpart before that counterpart is read or defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub token_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    pub fn from_lookup<F>(lookup: F, overrides: &ConfigOverrides) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let base_url = match overrides.base_url.as_deref() {
            Some(flag) => normalize_base_url(flag)?,
            None => normalize_base_url(
                value(ENV_API_BASE_URL)
                    .as_deref()
                    .unwrap_or(DEFAULT_API_BASE_URL),
            )?,
        };
        let token_path = match (&overrides.token_path, value(ENV_TOKEN_PATH)) {
            (Some(flag), _) => flag.clone(),
            (None, Some(path)) => PathBuf::from(path),
            (None, None) => default_token_path()?,
        };
        let log_filter = value(ENV_LOG_FILTER).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let request_timeout_ms = match value(ENV_REQUEST_TIMEOUT_MS) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|error| ConfigError::InvalidRequestTimeout(error.to_string()))?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            base_url,
            token_path,
            log_filter,
            request_timeout_ms,
        })
    }
}

fn default_token_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
    Ok(home.join(TOKEN_DIR_NAME).join(TOKEN_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::{Config, ConfigError, ConfigOverrides};

    fn config_from(values: &[(&str, &str)]) -> Result<Config, ConfigError> {
        config_with(values_from(values), &ConfigOverrides::default())
    }

    fn values_from(values: &[(&str, &str)]) -> HashMap<String, String> {
        values
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    fn config_with(
        values: HashMap<String, String>,
        overrides: &ConfigOverrides,
    ) -> Result<Config, ConfigError> {
        Config::from_lookup(|key| values.get(key).cloned(), overrides)
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let config = config_from(&[("PORTAL_TOKEN_PATH", "/tmp/portal-token")]).expect("config");
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.token_path, PathBuf::from("/tmp/portal-token"));
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn default_token_path_lives_under_home() {
        if dirs::home_dir().is_none() {
            return;
        }
        let config = config_from(&[]).expect("config");
        assert!(config.token_path.ends_with(".membership-portal/token"));
    }

    #[test]
    fn env_values_are_trimmed_and_normalized() {
        let config = config_from(&[
            ("PORTAL_API_BASE_URL", " https://portal.example.org/ "),
            ("PORTAL_TOKEN_PATH", "/tmp/portal-token"),
            ("PORTAL_LOG_FILTER", "portal_client_core=debug"),
            ("PORTAL_REQUEST_TIMEOUT_MS", "2500"),
        ])
        .expect("config");
        assert_eq!(config.base_url, "https://portal.example.org");
        assert_eq!(config.log_filter, "portal_client_core=debug");
        assert_eq!(config.request_timeout_ms, 2_500);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let error = config_from(&[
            ("PORTAL_API_BASE_URL", "portal.example.org"),
            ("PORTAL_TOKEN_PATH", "/tmp/portal-token"),
        ])
        .expect_err("scheme required");
        assert!(matches!(error, ConfigError::BaseUrl(_)));

        let error = config_from(&[
            ("PORTAL_TOKEN_PATH", "/tmp/portal-token"),
            ("PORTAL_REQUEST_TIMEOUT_MS", "soon"),
        ])
        .expect_err("timeout must be numeric");
        assert!(matches!(error, ConfigError::InvalidRequestTimeout(_)));
    }

    #[test]
    fn flags_override_env() {
        let config = config_with(
            values_from(&[
                ("PORTAL_API_BASE_URL", "https://portal.example.org"),
                ("PORTAL_TOKEN_PATH", "/tmp/portal-token"),
            ]),
            &ConfigOverrides {
                base_url: Some("http://10.0.0.2:9000/".to_string()),
                token_path: Some(PathBuf::from("/tmp/other-token")),
            },
        )
        .expect("config");
        assert_eq!(config.base_url, "http://10.0.0.2:9000");
        assert_eq!(config.token_path, PathBuf::from("/tmp/other-token"));
    }

    #[test]
    fn base_url_flag_wins_over_invalid_env_value() {
        let config = config_with(
            values_from(&[
                ("PORTAL_API_BASE_URL", "portal.example.org"),
                ("PORTAL_TOKEN_PATH", "/tmp/portal-token"),
            ]),
            &ConfigOverrides {
                base_url: Some("http://127.0.0.1:9000".to_string()),
                token_path: None,
            },
        )
        .expect("flag replaces the env value");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn invalid_base_url_flag_is_rejected() {
        let error = config_with(
            values_from(&[("PORTAL_TOKEN_PATH", "/tmp/portal-token")]),
            &ConfigOverrides {
                base_url: Some("10.0.0.2:9000".to_string()),
                token_path: None,
            },
        )
        .expect_err("scheme required");
        assert!(matches!(error, ConfigError::BaseUrl(_)));
    }

    #[test]
    fn token_path_flag_skips_home_lookup() {
        let config = config_with(
            HashMap::new(),
            &ConfigOverrides {
                base_url: None,
                token_path: Some(PathBuf::from("/tmp/flag-token")),
            },
        )
        .expect("no home directory needed");
        assert_eq!(config.token_path, PathBuf::from("/tmp/flag-token"));
    }
}
