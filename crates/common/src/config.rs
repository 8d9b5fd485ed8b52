use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::PollError;

/// Default review API endpoint.
pub const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Default interval between poll cycles in seconds (10 minutes).
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Default per-request HTTP timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// The review service opened to students on 2019-02-12 09:00 UTC; every poll
/// asks for submissions since then.
pub fn default_anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 2, 12, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

/// The three secrets required to run. All must be non-empty.
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,

    /// Review API status endpoint
    pub practicum_endpoint: String,

    /// Telegram Bot API base URL (overridable for testing)
    pub telegram_api_url: String,

    /// Fixed wait between poll cycles
    pub poll_interval: Duration,

    /// Upper bound on a single HTTP request
    pub request_timeout: Duration,

    /// `from_date` sent on every poll, seconds since epoch. Never advanced.
    pub anchor_timestamp: i64,
}

impl AppConfig {
    /// Load configuration from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, PollError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PollError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, PollError> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
                _ => Err(PollError::Config(format!(
                    "missing required environment variable: {key}"
                ))),
            }
        };

        let credentials = Credentials {
            practicum_token: required("PRACTICUM_TOKEN")?,
            telegram_token: required("TELEGRAM_TOKEN")?,
            telegram_chat_id: required("TELEGRAM_CHAT_ID")?,
        };

        let poll_interval_secs =
            parse_or(&lookup, "POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
        if poll_interval_secs == 0 {
            return Err(PollError::Config(
                "POLL_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }
        let request_timeout_secs =
            parse_or(&lookup, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(Self {
            credentials,
            practicum_endpoint: lookup("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_PRACTICUM_ENDPOINT.to_string()),
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            poll_interval: Duration::from_secs(poll_interval_secs),
            request_timeout: Duration::from_secs(request_timeout_secs),
            anchor_timestamp: parse_or(
                &lookup,
                "ANCHOR_TIMESTAMP",
                default_anchor().timestamp(),
            )?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, PollError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| PollError::Config(format!("{key} must be a valid integer"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::error::ErrorKind;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn load(vars: &HashMap<String, String>) -> Result<AppConfig, PollError> {
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("PRACTICUM_TOKEN", "practicum-secret"),
        ("TELEGRAM_TOKEN", "123:telegram-secret"),
        ("TELEGRAM_CHAT_ID", "42"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = load(&env(&REQUIRED)).unwrap();
        assert_eq!(config.practicum_endpoint, DEFAULT_PRACTICUM_ENDPOINT);
        assert_eq!(config.telegram_api_url, DEFAULT_TELEGRAM_API_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(600));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.anchor_timestamp, 1_549_962_000);
        assert_eq!(config.credentials.telegram_chat_id, "42");
    }

    #[test]
    fn test_each_missing_credential_is_fatal() {
        for skipped in ["PRACTICUM_TOKEN", "TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"] {
            let vars: Vec<_> = REQUIRED
                .iter()
                .copied()
                .filter(|(k, _)| *k != skipped)
                .collect();
            let err = load(&env(&vars)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config);
            assert!(err.to_string().contains(skipped));
        }
    }

    #[test]
    fn test_blank_credential_is_rejected() {
        let mut vars = env(&REQUIRED);
        vars.insert("TELEGRAM_TOKEN".to_string(), "   ".to_string());
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let mut vars = env(&REQUIRED);
        vars.insert("POLL_INTERVAL_SECS".to_string(), "5".to_string());
        vars.insert("ANCHOR_TIMESTAMP".to_string(), "0".to_string());
        let config = load(&vars).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.anchor_timestamp, 0);

        vars.insert("REQUEST_TIMEOUT_SECS".to_string(), "soon".to_string());
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut vars = env(&REQUIRED);
        vars.insert("POLL_INTERVAL_SECS".to_string(), "0".to_string());
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = load(&env(&REQUIRED)).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("practicum-secret"));
        assert!(!rendered.contains("telegram-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
