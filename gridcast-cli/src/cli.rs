use std::time::Duration;

use clap::Parser;
use tracing::error;

use gridcast_core::config::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
use gridcast_core::resolver::{DEFAULT_CUTOFF, DEFAULT_MAX_SUGGESTIONS};
use gridcast_core::{pipeline, GridcastError, MatchOptions, Prompter, Settings};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "gridcast", version, about = "Current NWS forecast for a US city")]
pub struct Cli {
    /// "City, State" to look up; prompts interactively when omitted.
    pub query: Option<String>,

    /// Per-request HTTP timeout, in seconds.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Override the location dataset URL.
    #[arg(long, value_name = "URL")]
    pub locations_url: Option<String>,

    /// Override the weather API base URL.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// User-Agent header sent with every request (api.weather.gov requires one).
    #[arg(long, value_name = "STRING", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Maximum number of fuzzy suggestions to offer.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_SUGGESTIONS)]
    pub suggestions: usize,

    /// Similarity cutoff (0..=1) below which no suggestion is made.
    #[arg(long, value_name = "RATIO", default_value_t = DEFAULT_CUTOFF)]
    pub cutoff: f64,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let (settings, query) = self.into_parts();

        match pipeline::run(&settings, query, &TerminalPrompter).await {
            Ok(period) => {
                println!("{period}");
                Ok(())
            }
            Err(err) => {
                report(&err);
                Err(err.into())
            }
        }
    }

    fn into_parts(self) -> (Settings, Option<String>) {
        let mut settings = Settings::default();
        if let Some(url) = self.locations_url {
            settings.locations_url = url;
        }
        if let Some(url) = self.api_url {
            settings.api_base_url = url;
        }
        settings.user_agent = self.user_agent;
        settings.timeout = Duration::from_secs(self.timeout);
        settings.matching = MatchOptions {
            cutoff: self.cutoff,
            max_suggestions: self.suggestions,
        };
        (settings, self.query)
    }
}

/// Logs what the generic error message would lose, then lets the error
/// propagate to `main` for the non-zero exit.
fn report(err: &GridcastError) {
    if let GridcastError::Api {
        endpoint,
        status,
        body,
    } = err
    {
        error!("API request to {endpoint} failed with status {status}: {body}");
    }
}

/// `inquire`-backed prompter used for real terminal sessions.
struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, message: &str) -> Result<String, GridcastError> {
        inquire::Text::new(message)
            .prompt()
            .map_err(|e| GridcastError::Prompt(e.to_string()))
    }

    fn pick(&self, message: &str, options: Vec<String>) -> Result<String, GridcastError> {
        inquire::Select::new(message, options)
            .prompt()
            .map_err(|e| GridcastError::Prompt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_library_constants() {
        let cli = Cli::try_parse_from(["gridcast"]).unwrap();

        assert!(cli.query.is_none());
        assert_eq!(cli.timeout, 10);
        assert_eq!(cli.suggestions, 3);
        assert_eq!(cli.cutoff, 0.5);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "gridcast",
            "Boston, Massachusetts",
            "--timeout",
            "3",
            "--api-url",
            "http://localhost:9100",
        ])
        .unwrap();

        assert_eq!(cli.query.as_deref(), Some("Boston, Massachusetts"));
        assert_eq!(cli.timeout, 3);

        let (settings, query) = cli.into_parts();
        assert_eq!(settings.api_base_url, "http://localhost:9100");
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(query.as_deref(), Some("Boston, Massachusetts"));
    }
}
