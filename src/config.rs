use std::env;
use std::time::Duration;

use crate::error::{config_error, Error};

pub const DEFAULT_GEOAPIFY_BASE: &str = "https://api.geoapify.com";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CURRENCY: &str = "INR";

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub geoapify_base_url: String,
    pub geoapify_api_key: String,
    pub razorpay_key_id: String,
    pub currency: String,
    pub poll_interval: Duration,
    pub http_timeout: Duration,
}

impl Config {
    #[tracing::instrument(name = "Config::from_env")]
    pub fn from_env() -> Result<Self, Error> {
        if let Err(err) = dotenv::dotenv() {
            tracing::debug!(%err, "no .env file loaded");
        }

        let config = Self {
            api_base_url: env::var("RIDEX_API_BASE_URL")?,
            geoapify_base_url: optional_var("GEOAPIFY_API_BASE")
                .unwrap_or_else(|| DEFAULT_GEOAPIFY_BASE.into()),
            geoapify_api_key: env::var("GEOAPIFY_API_KEY")?,
            razorpay_key_id: env::var("RAZORPAY_KEY_ID")?,
            currency: optional_var("RIDEX_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.into()),
            poll_interval: Duration::from_secs(seconds_var(
                "RIDEX_POLL_INTERVAL_SECS",
                DEFAULT_POLL_INTERVAL_SECS,
            )?),
            http_timeout: Duration::from_secs(seconds_var(
                "RIDEX_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        };

        config.validate()?;

        Ok(config)
    }

    /// Settings pointing both HTTP collaborators at a single local base URL.
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_base_url: base_url.into(),
            geoapify_base_url: base_url.into(),
            geoapify_api_key: "test-key".into(),
            razorpay_key_id: "rzp_test".into(),
            currency: DEFAULT_CURRENCY.into(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            http_timeout: Duration::from_secs(5),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.api_base_url.trim().is_empty() {
            return Err(config_error("RIDEX_API_BASE_URL must not be empty"));
        }

        if self.geoapify_api_key.trim().is_empty() {
            return Err(config_error("GEOAPIFY_API_KEY must not be empty"));
        }

        if self.poll_interval.is_zero() {
            return Err(config_error("RIDEX_POLL_INTERVAL_SECS must be greater than 0"));
        }

        Ok(())
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn seconds_var(name: &str, default: u64) -> Result<u64, Error> {
    match optional_var(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| config_error(format!("{} must be a whole number of seconds", name))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testing_config_is_valid() {
        let config = Config::for_testing("http://127.0.0.1:9999");
        assert!(config.validate().is_ok());
        assert_eq!(config.poll_interval, Duration::from_secs(30));
        assert_eq!(config.currency, "INR");
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let config = Config::for_testing("  ");
        let err = config.validate().unwrap_err();
        assert_eq!(err.code, 2);
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let config = Config {
            poll_interval: Duration::ZERO,
            ..Config::for_testing("http://localhost")
        };
        assert!(config.validate().is_err());
    }
}
