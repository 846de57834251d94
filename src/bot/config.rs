use std::{env, time::Duration};

/* Config gathers everything the bot needs from the environment at startup.
 * A `.env` file is loaded beforehand by main, so any of these may live there.
 */

const TOKEN_KEY: &str = "TOKEN";
const COMPANIES_PATH_KEY: &str = "COMPANIES_PATH";
const EXCHANGE_HOST_KEY: &str = "EXCHANGE_HOST";
const FETCH_TIMEOUT_KEY: &str = "FETCH_TIMEOUT_SECS";

pub const DEFAULT_COMPANIES_PATH: &str = "companies.json";
pub const DEFAULT_EXCHANGE_HOST: &str = "www.nepalstock.com";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("TOKEN not set")]
    MissingToken,
    #[error("Invalid FETCH_TIMEOUT_SECS value: {0}")]
    InvalidTimeout(String),
}

#[derive(Clone, Debug)]
pub struct BotConfig {
    pub token: String,
    pub companies_path: String,
    pub exchange_host: String,
    pub fetch_timeout: Duration,
}

impl BotConfig {
    pub fn from_env() -> Result<BotConfig, ConfigError> {
        BotConfig::from_lookup(|key| env::var(key).ok())
    }

    // Builds the config from any key lookup, so tests need not touch the process env.
    fn from_lookup<F>(lookup: F) -> Result<BotConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = match lookup(TOKEN_KEY) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(ConfigError::MissingToken),
        };

        let companies_path =
            lookup(COMPANIES_PATH_KEY).unwrap_or_else(|| DEFAULT_COMPANIES_PATH.to_string());
        let exchange_host =
            lookup(EXCHANGE_HOST_KEY).unwrap_or_else(|| DEFAULT_EXCHANGE_HOST.to_string());

        let fetch_timeout = match lookup(FETCH_TIMEOUT_KEY) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(value)),
            },
            None => Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        };

        Ok(BotConfig {
            token,
            companies_path,
            exchange_host,
            fetch_timeout,
        })
    }
}
