use std::time::Duration;

use reqwest::Client;

use crate::error::GridcastError;
use crate::locations::DEFAULT_LOCATIONS_URL;
use crate::nws::DEFAULT_API_BASE_URL;
use crate::resolver::MatchOptions;

/// Per-request timeout applied to every HTTP call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// api.weather.gov rejects requests without a User-Agent.
pub const DEFAULT_USER_AGENT: &str = concat!("gridcast/", env!("CARGO_PKG_VERSION"));

/// Run parameters for one invocation.
///
/// There is no config file or environment lookup; the CLI maps its flags
/// onto this struct over the defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub locations_url: String,
    pub api_base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub matching: MatchOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locations_url: DEFAULT_LOCATIONS_URL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            matching: MatchOptions::default(),
        }
    }
}

impl Settings {
    /// Builds the HTTP client shared by both remote services, with the
    /// timeout and User-Agent applied once.
    pub fn http_client(&self) -> Result<Client, GridcastError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_public_services() {
        let settings = Settings::default();

        assert_eq!(settings.api_base_url, "https://api.weather.gov");
        assert!(settings.locations_url.ends_with("locations.json"));
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.matching.cutoff, 0.5);
        assert_eq!(settings.matching.max_suggestions, 3);
        assert!(settings.user_agent.starts_with("gridcast/"));
    }

    #[test]
    fn http_client_builds_with_defaults() {
        assert!(Settings::default().http_client().is_ok());
    }
}
