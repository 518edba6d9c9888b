use std::env;
use std::time::Duration;

use anyhow::Result;

use crate::sheets::client::{
    DEFAULT_COMMENTS_SHEET_ID, DEFAULT_DM_SHEET_ID, DEFAULT_RANGE, DEFAULT_SHEETS_API_URL,
};

/// How often the dashboard refetches the sheets unless overridden.
pub const DEFAULT_REFRESH_SECS: u64 = 30;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Google API key for the Sheets values API. Absent means sample mode,
    /// which is a supported state rather than an error.
    pub google_api_key: Option<String>,
    /// Sheets API endpoint (defaults to https://sheets.googleapis.com).
    pub sheets_api_url: String,
    pub dm_sheet_id: String,
    pub comments_sheet_id: String,
    /// A1 range read from each sheet.
    pub sheet_range: String,
    /// Period of the dashboard's refresh timer.
    pub refresh_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; only the API key is needed for live data.
    pub fn load() -> Result<Self> {
        let refresh_secs = env::var("IGPULSE_REFRESH_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_REFRESH_SECS);

        Ok(Self {
            google_api_key: env::var("GOOGLE_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            sheets_api_url: env::var("SHEETS_API_URL")
                .unwrap_or_else(|_| DEFAULT_SHEETS_API_URL.to_string()),
            dm_sheet_id: env::var("SHEET_ID_DM").unwrap_or_else(|_| DEFAULT_DM_SHEET_ID.to_string()),
            comments_sheet_id: env::var("SHEET_ID_COMMENTS")
                .unwrap_or_else(|_| DEFAULT_COMMENTS_SHEET_ID.to_string()),
            sheet_range: env::var("SHEET_RANGE").unwrap_or_else(|_| DEFAULT_RANGE.to_string()),
            refresh_interval: Duration::from_secs(refresh_secs),
        })
    }

    /// Whether live data can be fetched.
    pub fn has_api_key(&self) -> bool {
        self.google_api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: None,
            sheets_api_url: DEFAULT_SHEETS_API_URL.to_string(),
            dm_sheet_id: DEFAULT_DM_SHEET_ID.to_string(),
            comments_sheet_id: DEFAULT_COMMENTS_SHEET_ID.to_string(),
            sheet_range: DEFAULT_RANGE.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_sample_mode() {
        let config = Config::default();
        assert!(!config.has_api_key());
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.sheet_range, "A1:Z2000");
    }
}
