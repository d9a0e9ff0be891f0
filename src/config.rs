use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::pricing::PriceTable;
use crate::tts::{ModelMap, DEFAULT_ENDPOINT};

/// Per-call character ceiling of the remote endpoint.
pub const DEFAULT_MAX_CHARS: usize = 4096;

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub api_url: String,
    pub max_chars: usize,
    pub request_timeout: Duration,
    pub models: ModelMap,
    pub prices: PriceTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_url: DEFAULT_ENDPOINT.to_string(),
            max_chars: DEFAULT_MAX_CHARS,
            request_timeout: Duration::from_secs(60),
            models: ModelMap::default(),
            prices: PriceTable::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_chars: usize = parse_or(
            &lookup,
            "TTS_MAX_CHARS",
            defaults.max_chars,
            "a positive integer",
        )?;
        if max_chars == 0 {
            return Err(ConfigError::Invalid {
                key: "TTS_MAX_CHARS",
                value: "0".to_string(),
                expected: "a positive integer",
            });
        }

        let timeout_secs: u64 = parse_or(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
            "a number of seconds",
        )?;

        let settings = Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port, "a port number")?,
            api_url: lookup("TTS_API_URL").unwrap_or(defaults.api_url),
            max_chars,
            request_timeout: Duration::from_secs(timeout_secs),
            models: ModelMap {
                standard: lookup("TTS_MODEL_STANDARD").unwrap_or(defaults.models.standard),
                hd: lookup("TTS_MODEL_HD").unwrap_or(defaults.models.hd),
            },
            prices: PriceTable {
                standard: parse_or(
                    &lookup,
                    "PRICE_STANDARD_PER_1K",
                    defaults.prices.standard,
                    "a decimal number",
                )?,
                hd: parse_or(&lookup, "PRICE_HD_PER_1K", defaults.prices.hd, "a decimal number")?,
            },
        };

        // Fail at startup rather than on the first bind.
        settings.addr()?;
        Ok(settings)
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let value = format!("{}:{}", self.host, self.port);
        value.parse().map_err(|_| ConfigError::Invalid {
            key: "HOST",
            value,
            expected: "an IP address",
        })
    }
}

fn parse_or<F, T>(
    lookup: &F,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value,
            expected,
        }),
        None => Ok(default),
    }
}
