use std::env;
use std::path::PathBuf;

use tracing::info;

pub const DEFAULT_OUTPUT_CSV: &str = "uae_investors_research.csv";
pub const DEFAULT_SPREADSHEET_NAME: &str = "UAE Investors Database";
pub const DEFAULT_WORKSHEET_NAME: &str = "Investors";
pub const DEFAULT_TARGET_INDUSTRY: &str = "creator economy, social commerce, marketplace platforms";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub target_industry: String,
    pub output_csv: PathBuf,
    pub spreadsheet_name: String,
    pub worksheet_name: String,
    /// Service-account credential JSON for the spreadsheet backend.
    pub gsheet_credentials: String,
}

impl Config {
    /// Configuration for the research run.
    /// Panics with a clear message if the generation credential is missing.
    pub fn scout_from_env() -> Self {
        let mut config = Self::defaults_from_env();
        config.anthropic_api_key = required_env("ANTHROPIC_API_KEY");
        config
    }

    /// Configuration for the sheet sync. The credential JSON stays optional
    /// here: the publisher reports a missing credential as an authentication
    /// failure with its own exit code instead of panicking.
    pub fn publisher_from_env() -> Self {
        Self::defaults_from_env()
    }

    fn defaults_from_env() -> Self {
        Self {
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").unwrap_or_default(),
            target_industry: env::var("TARGET_INDUSTRY")
                .unwrap_or_else(|_| DEFAULT_TARGET_INDUSTRY.to_string()),
            output_csv: env::var("OUTPUT_CSV")
                .unwrap_or_else(|_| DEFAULT_OUTPUT_CSV.to_string())
                .into(),
            spreadsheet_name: env::var("SPREADSHEET_NAME")
                .unwrap_or_else(|_| DEFAULT_SPREADSHEET_NAME.to_string()),
            worksheet_name: env::var("WORKSHEET_NAME")
                .unwrap_or_else(|_| DEFAULT_WORKSHEET_NAME.to_string()),
            gsheet_credentials: env::var("GSHEET_CREDENTIALS").unwrap_or_default(),
        }
    }

    /// Log the effective configuration without leaking secrets.
    pub fn log_redacted(&self) {
        info!(
            target_industry = self.target_industry.as_str(),
            output_csv = %self.output_csv.display(),
            spreadsheet_name = self.spreadsheet_name.as_str(),
            worksheet_name = self.worksheet_name.as_str(),
            anthropic_key_set = !self.anthropic_api_key.is_empty(),
            gsheet_credentials_set = !self.gsheet_credentials.is_empty(),
            "Configuration loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
