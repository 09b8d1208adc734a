//! Configuration for the `TripKit` server
//!
//! Everything is read once from the environment at startup and stays
//! immutable for the process lifetime. `.env` loading happens in the
//! binary before this module is consulted.

use std::env;

/// Root configuration structure for the `TripKit` server
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// National Weather Service API settings
    pub weather: WeatherConfig,
    /// Amadeus travel-data API settings
    pub amadeus: AmadeusConfig,
}

/// National Weather Service API settings
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Base URL for the NWS API
    pub base_url: String,
    /// User agent sent with every NWS request (the API requires one)
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

/// Amadeus travel-data API settings
#[derive(Debug, Clone)]
pub struct AmadeusConfig {
    /// Base URL for the Amadeus API
    pub base_url: String,
    /// OAuth2 client id. Left empty when unset; the first travel-data call
    /// then fails lazily instead of blocking the weather tools at startup.
    pub client_id: String,
    /// OAuth2 client secret, same laziness as `client_id`
    pub client_secret: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// defaults for everything except the Amadeus credentials.
    pub fn from_env() -> Self {
        Self {
            weather: WeatherConfig {
                base_url: env_or("NWS_API_BASE", &default_nws_base_url()),
                user_agent: env_or("TRIPKIT_USER_AGENT", &default_user_agent()),
                timeout_seconds: timeout_from_env(),
            },
            amadeus: AmadeusConfig {
                base_url: env_or("AMADEUS_BASE_URL", &default_amadeus_base_url()),
                client_id: env::var("AMADEUS_CLIENT_ID").unwrap_or_default(),
                client_secret: env::var("AMADEUS_CLIENT_SECRET").unwrap_or_default(),
                timeout_seconds: timeout_from_env(),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

// Default value functions
fn default_nws_base_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_amadeus_base_url() -> String {
    "https://test.api.amadeus.com".to_string()
}

fn default_user_agent() -> String {
    format!("tripkit/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_seconds() -> u64 {
    30
}

fn timeout_from_env() -> u64 {
    env::var("TRIPKIT_HTTP_TIMEOUT_SECONDS")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(default_timeout_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // Env vars are not set in the test environment for these keys.
        let config = AppConfig::from_env();
        assert!(config.weather.base_url.starts_with("https://"));
        assert_eq!(config.weather.timeout_seconds, 30);
        assert!(config.weather.user_agent.starts_with("tripkit/"));
        assert!(config.amadeus.base_url.contains("amadeus"));
    }

    #[test]
    fn test_missing_credentials_are_empty_not_fatal() {
        let config = AppConfig::from_env();
        // Absent credentials must not prevent construction.
        let _ = (config.amadeus.client_id, config.amadeus.client_secret);
    }
}
