//! Configuration management for the sync bridge.
//!
//! Configuration is read from environment variables. A `.env` file is loaded
//! first if present; `dotenvy` never prints, so stdout stays clean for MCP.

use crate::error::{ConfigError, ConfigResult};
use std::env;

pub const DEFAULT_ATTIO_API_URL: &str = "https://api.attio.com/v2";
pub const DEFAULT_APOLLO_API_URL: &str = "https://api.apollo.io/api/v1";
pub const DEFAULT_APOLLO_APP_URL: &str = "https://app.apollo.io";

/// Configuration for the sync bridge.
#[derive(Debug, Clone)]
pub struct Config {
    /// Attio API base URL
    pub attio_api_url: String,

    /// Attio bearer token
    pub attio_api_token: String,

    /// Apollo API base URL
    pub apollo_api_url: String,

    /// Apollo API key, sent in request bodies and query strings
    pub apollo_api_key: String,

    /// Apollo web app URL used to build "view in Apollo" links
    pub apollo_app_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Page size for Apollo search requests (default: 25)
    pub search_page_size: usize,

    /// Re-read the Apollo record after each write (default: false)
    pub verify_writes: bool,

    /// Attio attribute slug that stores the Apollo id. Write-back is skipped when unset.
    pub apollo_id_attribute: Option<String>,

    /// Attio attribute slug holding a person's lifecycle stage
    pub person_stage_attribute: Option<String>,

    /// Attio attribute slug holding a deal's pipeline stage (default: "stage")
    pub deal_stage_attribute: String,

    /// Extra manual stage mappings, Attio name -> Apollo name
    pub stage_overrides: Vec<(String, String)>,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `ATTIO_API_TOKEN`
    /// - `APOLLO_API_KEY`
    ///
    /// Everything else falls back to the defaults listed on [`Config`].
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let attio_api_token = Self::required_secret("ATTIO_API_TOKEN")?;
        let apollo_api_key = Self::required_secret("APOLLO_API_KEY")?;

        let attio_api_url = Self::parse_url("ATTIO_API_BASE_URL", DEFAULT_ATTIO_API_URL)?;
        let apollo_api_url = Self::parse_url("APOLLO_API_BASE_URL", DEFAULT_APOLLO_API_URL)?;
        let apollo_app_url = Self::parse_url("APOLLO_APP_URL", DEFAULT_APOLLO_APP_URL)?;

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let search_page_size = Self::parse_env_usize("SEARCH_PAGE_SIZE", 25)?;
        if search_page_size == 0 || search_page_size > 100 {
            return Err(ConfigError::InvalidValue {
                var: "SEARCH_PAGE_SIZE".to_string(),
                reason: "Must be between 1 and 100".to_string(),
            });
        }

        let verify_writes = Self::parse_env_bool("VERIFY_WRITES", false)?;
        let apollo_id_attribute = Self::optional_var("APOLLO_ID_ATTRIBUTE");
        let person_stage_attribute = Self::optional_var("PERSON_STAGE_ATTRIBUTE");
        let deal_stage_attribute =
            Self::optional_var("DEAL_STAGE_ATTRIBUTE").unwrap_or_else(|| "stage".to_string());

        let stage_overrides = match env::var("STAGE_OVERRIDES") {
            Ok(raw) => Self::parse_stage_overrides(&raw)?,
            Err(_) => Vec::new(),
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            attio_api_url,
            attio_api_token,
            apollo_api_url,
            apollo_api_key,
            apollo_app_url,
            request_timeout,
            search_page_size,
            verify_writes,
            apollo_id_attribute,
            person_stage_attribute,
            deal_stage_attribute,
            stage_overrides,
            log_level,
        })
    }

    fn required_secret(var_name: &str) -> ConfigResult<String> {
        let value =
            env::var(var_name).map_err(|_| ConfigError::MissingVar(var_name.to_string()))?;
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }
        Ok(value)
    }

    fn optional_var(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_url(var_name: &str, default: &str) -> ConfigResult<String> {
        let url = env::var(var_name).unwrap_or_else(|_| default.to_string());
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(url)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }

    /// Parse `Attio Name=Apollo Name;Other=Other` into pairs.
    fn parse_stage_overrides(raw: &str) -> ConfigResult<Vec<(String, String)>> {
        raw.split(';')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (local, remote) =
                    entry
                        .split_once('=')
                        .ok_or_else(|| ConfigError::InvalidValue {
                            var: "STAGE_OVERRIDES".to_string(),
                            reason: format!("Expected `attio=apollo`, got: {}", entry),
                        })?;
                let (local, remote) = (local.trim(), remote.trim());
                if local.is_empty() || remote.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        var: "STAGE_OVERRIDES".to_string(),
                        reason: format!("Empty stage name in: {}", entry),
                    });
                }
                Ok((local.to_string(), remote.to_string()))
            })
            .collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            attio_api_url: DEFAULT_ATTIO_API_URL.to_string(),
            attio_api_token: String::new(),
            apollo_api_url: DEFAULT_APOLLO_API_URL.to_string(),
            apollo_api_key: String::new(),
            apollo_app_url: DEFAULT_APOLLO_APP_URL.to_string(),
            request_timeout: 10,
            search_page_size: 25,
            verify_writes: false,
            apollo_id_attribute: None,
            person_stage_attribute: None,
            deal_stage_attribute: "stage".to_string(),
            stage_overrides: Vec::new(),
            log_level: "error".to_string(),
        }
    }
}
