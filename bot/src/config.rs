use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use homework_core::client::DEFAULT_ENDPOINT;
use homework_core::telegram::DEFAULT_API_URL;
use thiserror::Error;
use tracing::{debug, error, info, warn};

const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("{name} must be a positive number of seconds, got {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: String,
    pub telegram_api_url: String,
    /// Pause between the end of one poll and the start of the next.
    pub retry_period: Duration,
    /// Upper bound on a single HTTP round-trip.
    pub request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period", &self.retry_period)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source. Every missing required
    /// variable is reported, not just the first.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let mut required = |name: &'static str| {
            let value = non_empty(lookup(name));
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let practicum_token = required("PRACTICUM_TOKEN");
        let telegram_token = required("TELEGRAM_TOKEN");
        let telegram_chat_id = required("TELEGRAM_CHAT_ID");
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let endpoint =
            non_empty(lookup("PRACTICUM_ENDPOINT")).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let telegram_api_url =
            non_empty(lookup("TELEGRAM_API_URL")).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let retry_period = seconds(
            "RETRY_PERIOD_SECS",
            lookup("RETRY_PERIOD_SECS"),
            DEFAULT_RETRY_PERIOD_SECS,
        )?;
        let request_timeout = seconds(
            "REQUEST_TIMEOUT_SECS",
            lookup("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;

        Ok(Config {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            telegram_api_url,
            retry_period,
            request_timeout,
        })
    }
}

/// Load variables from a dotenv file without overriding ones already set.
/// A missing file is normal; an unreadable one is logged and skipped.
pub fn load_dotenv_from(path: &Path) -> bool {
    match dotenvy::from_path(path) {
        Ok(()) => {
            info!("loaded environment from {}", path.display());
            true
        }
        Err(e) if e.not_found() => {
            debug!("no {} file, using the process environment", path.display());
            false
        }
        Err(e) => {
            warn!("ignoring {}: {e}", path.display());
            false
        }
    }
}

/// Startup precondition: `None` means the poll loop must not start.
pub fn startup_config(lookup: impl Fn(&str) -> Option<String>) -> Option<Config> {
    match Config::from_lookup(lookup) {
        Ok(config) => {
            info!("configuration loaded: {config:?}");
            Some(config)
        }
        Err(e) => {
            error!("cannot start: {e}");
            None
        }
    }
}

/// Treat unset, empty and whitespace-only values alike.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn seconds(name: &'static str, value: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(value) = non_empty(value) else {
        return Ok(Duration::from_secs(default));
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name: &str| vars.get(name).map(|v| v.to_string())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("PRACTICUM_TOKEN", "p-token"),
        ("TELEGRAM_TOKEN", "123:abc"),
        ("TELEGRAM_CHAT_ID", "42"),
    ];

    #[test]
    fn test_required_only_uses_defaults() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.practicum_token, "p-token");
        assert_eq!(config.telegram_chat_id, "42");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.telegram_api_url, DEFAULT_API_URL);
        assert_eq!(config.retry_period, Duration::from_secs(600));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_all_missing_variables_are_reported() {
        let err = Config::from_lookup(lookup(&[("TELEGRAM_TOKEN", "123:abc")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"])
        );
        assert_eq!(
            err.to_string(),
            "missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[test]
    fn test_blank_required_variable_counts_as_missing() {
        let vars = [
            ("PRACTICUM_TOKEN", "   "),
            ("TELEGRAM_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", ""),
        ];
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Missing(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"])
        );
    }

    #[test]
    fn test_optional_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("PRACTICUM_ENDPOINT", "http://127.0.0.1:3000/api/user_api/homework_statuses/"),
            ("TELEGRAM_API_URL", "http://127.0.0.1:3000"),
            ("RETRY_PERIOD_SECS", "5"),
            ("REQUEST_TIMEOUT_SECS", " 2 "),
        ]);
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:3000/api/user_api/homework_statuses/");
        assert_eq!(config.telegram_api_url, "http://127.0.0.1:3000");
        assert_eq!(config.retry_period, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_period_is_rejected() {
        for bad in ["ten", "-1", "0"] {
            let mut vars = REQUIRED.to_vec();
            vars.push(("RETRY_PERIOD_SECS", bad));
            let err = Config::from_lookup(lookup(&vars)).unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    name: "RETRY_PERIOD_SECS",
                    value: bad.to_string()
                }
            );
        }
    }

    #[test]
    fn test_debug_output_redacts_tokens() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("p-token"));
        assert!(!rendered.contains("123:abc"));
        assert!(rendered.contains("42"));
    }

    #[test]
    fn test_startup_refuses_incomplete_config() {
        assert!(startup_config(lookup(&[("PRACTICUM_TOKEN", "p-token")])).is_none());
        assert!(startup_config(|_: &str| None).is_none());
    }

    #[test]
    fn test_startup_accepts_complete_config() {
        let config = startup_config(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.telegram_chat_id, "42");
    }

    #[test]
    fn test_dotenv_file_fills_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "HOMEWORK_BOT_DOTENV_TEST=from-file\n").unwrap();

        assert!(load_dotenv_from(&path));
        assert_eq!(env::var("HOMEWORK_BOT_DOTENV_TEST").unwrap(), "from-file");
    }

    #[test]
    fn test_dotenv_does_not_override_existing_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, "PATH=/from/dotenv\n").unwrap();
        let before = env::var_os("PATH");

        load_dotenv_from(&path);
        assert_eq!(env::var_os("PATH"), before);
    }

    #[test]
    fn test_missing_or_broken_dotenv_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!load_dotenv_from(&dir.path().join(".env")));

        let broken = dir.path().join("broken.env");
        std::fs::write(&broken, "NOT A VALID LINE\n").unwrap();
        assert!(!load_dotenv_from(&broken));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("".to_string())), None);
        assert_eq!(non_empty(Some(" \t\n".to_string())), None);
        assert_eq!(non_empty(Some(" x ".to_string())), Some(" x ".to_string()));
    }
}
