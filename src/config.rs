use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_STORE_URL: &str = "https://e-vm-f7bdf-default-rtdb.firebaseio.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_VIEW_TTL_MINUTES: u64 = 60;
const MAX_TIMEOUT_SECS: u64 = 600;
const MAX_VIEW_TTL_MINUTES: u64 = 7 * 24 * 60;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: Option<String>,
    pub store_url: String,
    pub request_timeout: Duration,
    pub view_ttl: Duration,
    pub guild_id: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset so an empty line in `.env` falls
    /// back to the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store_url = get("STORE_URL")
            .unwrap_or_else(|| DEFAULT_STORE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs =
            parse_positive(get("STORE_TIMEOUT_SECS"), "STORE_TIMEOUT_SECS", MAX_TIMEOUT_SECS)?
                .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let ttl_minutes =
            parse_positive(get("VIEW_TTL_MINUTES"), "VIEW_TTL_MINUTES", MAX_VIEW_TTL_MINUTES)?
                .unwrap_or(DEFAULT_VIEW_TTL_MINUTES);
        let guild_id = parse_positive(get("DASHBOARD_GUILD_ID"), "DASHBOARD_GUILD_ID", u64::MAX)?;

        Ok(Self {
            discord_token: get("DISCORD_TOKEN"),
            store_url,
            request_timeout: Duration::from_secs(timeout_secs),
            view_ttl: Duration::from_secs(ttl_minutes * 60),
            guild_id,
        })
    }

    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.discord_token
            .as_deref()
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))
    }
}

/// Parses a value in `1..=max`.
fn parse_positive(
    value: Option<String>,
    var: &'static str,
    max: u64,
) -> Result<Option<u64>, ConfigError> {
    match value {
        None => Ok(None),
        Some(raw) => match raw.parse::<u64>() {
            Ok(n) if n > 0 && n <= max => Ok(Some(n)),
            _ => Err(ConfigError::Invalid { var, value: raw }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.store_url, DEFAULT_STORE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.view_ttl, Duration::from_secs(3600));
        assert!(config.guild_id.is_none());
        assert_eq!(config.require_token(), Err(ConfigError::Missing("DISCORD_TOKEN")));
    }

    #[test]
    fn store_url_loses_trailing_slash() {
        let config = Config::from_lookup(lookup(&[("STORE_URL", "http://localhost:9000/")])).unwrap();
        assert_eq!(config.store_url, "http://localhost:9000");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::from_lookup(lookup(&[("STORE_TIMEOUT_SECS", "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "STORE_TIMEOUT_SECS",
                value: "0".into()
            }
        );
    }

    #[test]
    fn oversized_view_ttl_is_rejected() {
        let err = Config::from_lookup(lookup(&[("VIEW_TTL_MINUTES", "307445734561825861")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "VIEW_TTL_MINUTES",
                value: "307445734561825861".into()
            }
        );
        assert!(Config::from_lookup(lookup(&[("VIEW_TTL_MINUTES", "10081")])).is_err());

        let config = Config::from_lookup(lookup(&[("VIEW_TTL_MINUTES", "10080")])).unwrap();
        assert_eq!(config.view_ttl, Duration::from_secs(7 * 24 * 3600));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "abc"),
            ("VIEW_TTL_MINUTES", "  "),
            ("DASHBOARD_GUILD_ID", "1234"),
        ]))
        .unwrap();
        assert_eq!(config.require_token(), Ok("abc"));
        assert_eq!(config.view_ttl, Duration::from_secs(3600));
        assert_eq!(config.guild_id, Some(1234));
    }
}
