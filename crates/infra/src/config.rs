//! Process configuration.
//!
//! Read once at startup from the environment (or any key lookup, for tests)
//! into an explicit `AppConfig` that is then passed to the services. Empty
//! values count as unset.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

use meister_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_BUSINESS_EMAIL: &str = "architektundmeister@gmail.com";
pub const DEFAULT_FROM_EMAIL: &str = "onboarding@resend.dev";
pub const DEFAULT_FROM_NAME: &str = "ARCHITEKTUNDMEISTER";
pub const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com";
pub const DEFAULT_DATABASE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_EMAIL_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Relational store settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    /// Pool acquire timeout and per-statement timeout.
    pub timeout: Duration,
}

impl core::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Transactional-email settings.
#[derive(Clone, PartialEq, Eq)]
pub struct EmailConfig {
    /// Provider credential; `None` disables sending entirely.
    pub api_key: Option<String>,
    pub api_url: String,
    pub timeout: Duration,
    pub business_email: String,
    pub from_email: String,
    pub from_name: String,
    pub reply_to: String,
}

impl core::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .field("business_email", &self.business_email)
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .field("reply_to", &self.reply_to)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// `None` when no connection string is configured; orders are then refused.
    pub database: Option<DatabaseConfig>,
    pub email: EmailConfig,
    /// `LOG_FORMAT`: `json` (default) or `pretty`.
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = parse_addr(
            "BIND_ADDR",
            &get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let database = match get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                timeout: parse_secs("DATABASE_TIMEOUT_SECS", get("DATABASE_TIMEOUT_SECS"))?
                    .unwrap_or(DEFAULT_DATABASE_TIMEOUT),
            }),
            None => None,
        };

        let business_email =
            get("BUSINESS_EMAIL").unwrap_or_else(|| DEFAULT_BUSINESS_EMAIL.to_string());
        let email = EmailConfig {
            api_key: get("RESEND_API_KEY"),
            api_url: get("EMAIL_API_URL").unwrap_or_else(|| DEFAULT_EMAIL_API_URL.to_string()),
            timeout: parse_secs("EMAIL_TIMEOUT_SECS", get("EMAIL_TIMEOUT_SECS"))?
                .unwrap_or(DEFAULT_EMAIL_TIMEOUT),
            from_email: get("FROM_EMAIL").unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
            from_name: get("FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            reply_to: get("REPLY_TO_EMAIL").unwrap_or_else(|| business_email.clone()),
            business_email,
        };

        let log_format = get("LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();

        Ok(Self {
            bind_addr,
            database,
            email,
            log_format,
        })
    }
}

fn parse_addr(key: &'static str, value: &str) -> Result<SocketAddr, ConfigError> {
    value.parse().map_err(|e| ConfigError::InvalidValue {
        key,
        reason: format!("{value:?}: {e}"),
    })
}

fn parse_secs(key: &'static str, value: Option<String>) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            key,
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Some(Duration::from_secs(secs))),
        Err(e) => Err(ConfigError::InvalidValue {
            key,
            reason: format!("{value:?}: {e}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert!(cfg.database.is_none());
        assert!(cfg.email.api_key.is_none());
        assert_eq!(cfg.email.api_url, DEFAULT_EMAIL_API_URL);
        assert_eq!(cfg.email.timeout, DEFAULT_EMAIL_TIMEOUT);
        assert_eq!(cfg.email.business_email, DEFAULT_BUSINESS_EMAIL);
        assert_eq!(cfg.email.from_email, DEFAULT_FROM_EMAIL);
        assert_eq!(cfg.email.from_name, DEFAULT_FROM_NAME);
        assert_eq!(cfg.email.reply_to, DEFAULT_BUSINESS_EMAIL);
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn log_format_is_read_with_the_rest() {
        assert_eq!(config(&[("LOG_FORMAT", "pretty")]).unwrap().log_format, LogFormat::Pretty);
        assert_eq!(config(&[("LOG_FORMAT", "json")]).unwrap().log_format, LogFormat::Json);
        assert_eq!(config(&[("LOG_FORMAT", "")]).unwrap().log_format, LogFormat::Json);
    }

    #[test]
    fn reply_to_follows_business_address() {
        let cfg = config(&[("BUSINESS_EMAIL", "orders@example.de")]).unwrap();
        assert_eq!(cfg.email.reply_to, "orders@example.de");

        let cfg = config(&[
            ("BUSINESS_EMAIL", "orders@example.de"),
            ("REPLY_TO_EMAIL", "hello@example.de"),
        ])
        .unwrap();
        assert_eq!(cfg.email.reply_to, "hello@example.de");
    }

    #[test]
    fn empty_values_count_as_unset() {
        let cfg = config(&[("DATABASE_URL", ""), ("RESEND_API_KEY", "  "), ("FROM_NAME", " ")]).unwrap();
        assert!(cfg.database.is_none());
        assert!(cfg.email.api_key.is_none());
        assert_eq!(cfg.email.from_name, DEFAULT_FROM_NAME);
    }

    #[test]
    fn database_settings() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://shop:pw@localhost/shop"),
            ("DATABASE_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        let db = cfg.database.unwrap();
        assert_eq!(db.url, "postgres://shop:pw@localhost/shop");
        assert_eq!(db.timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_malformed_numbers_and_addresses() {
        assert!(matches!(
            config(&[("EMAIL_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::InvalidValue { key: "EMAIL_TIMEOUT_SECS", .. })
        ));
        assert!(matches!(
            config(&[("DATABASE_URL", "postgres://x"), ("DATABASE_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidValue { key: "DATABASE_TIMEOUT_SECS", .. })
        ));
        assert!(matches!(
            config(&[("BIND_ADDR", "localhost")]),
            Err(ConfigError::InvalidValue { key: "BIND_ADDR", .. })
        ));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://shop:hunter2@db/shop"),
            ("RESEND_API_KEY", "re_live_secret"),
        ])
        .unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("re_live_secret"));
    }
}
