// HTTP client for the Google Sheets values API.
//
// One GET per refresh: `/v4/spreadsheets/{id}/values/{range}?key=...`.
// The response is a 2-D grid under `values` whose first row is the header.
// Every failure collapses to "no rows" so the dashboard can fall back to
// sample data; nothing here surfaces an error to the caller of
// `fetch_interactions`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, warn};

use super::normalize::normalize_values;
use super::traits::InteractionSource;
use crate::config::Config;
use crate::interactions::{Interaction, InteractionKind};

/// Default Google Sheets API endpoint.
pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com";

/// Cell range read from each sheet.
pub const DEFAULT_RANGE: &str = "A1:Z2000";

/// Spreadsheet holding direct messages.
pub const DEFAULT_DM_SHEET_ID: &str = "1xDOce6APLC4bH4EaM0Jr-Gu6VJ4osCl2Z1yFsdn31ec";

/// Spreadsheet holding comments.
pub const DEFAULT_COMMENTS_SHEET_ID: &str = "1wSfNLEBJEWeT-vEIgI1yfUXGeBpq_ptO7cKpXoFzri0";

/// Response from `spreadsheets.values.get`.
///
/// `values` is omitted entirely when the range is empty. Cells are usually
/// strings but numbers and booleans show up when the sheet is read with a
/// non-default render option, so they are kept as raw JSON here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValuesResponse {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl ValuesResponse {
    /// The grid with every cell rendered as a string.
    pub fn into_string_grid(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

fn cell_to_string(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Read-only client for the spreadsheet-backed interaction data.
pub struct SheetsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    range: String,
    dm_sheet_id: String,
    comments_sheet_id: String,
}

impl SheetsClient {
    /// Create a client pointing at the given API base URL.
    ///
    /// A missing or blank `api_key` is allowed: every fetch then returns no
    /// rows without touching the network.
    pub fn new(base_url: &str, api_key: Option<&str>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("igpulse/0.1 (instagram-sentiment-dashboard)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
            range: DEFAULT_RANGE.to_string(),
            dm_sheet_id: DEFAULT_DM_SHEET_ID.to_string(),
            comments_sheet_id: DEFAULT_COMMENTS_SHEET_ID.to_string(),
        })
    }

    /// Create a client from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(&config.sheets_api_url, config.google_api_key.as_deref())?
            .with_sheet_ids(&config.dm_sheet_id, &config.comments_sheet_id)
            .with_range(&config.sheet_range))
    }

    pub fn with_sheet_ids(mut self, dm_sheet_id: &str, comments_sheet_id: &str) -> Self {
        self.dm_sheet_id = dm_sheet_id.to_string();
        self.comments_sheet_id = comments_sheet_id.to_string();
        self
    }

    pub fn with_range(mut self, range: &str) -> Self {
        self.range = range.to_string();
        self
    }

    /// Whether an API key is configured.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// The spreadsheet id backing a kind.
    pub fn sheet_id(&self, kind: InteractionKind) -> &str {
        match kind {
            InteractionKind::DirectMessage => &self.dm_sheet_id,
            InteractionKind::Comment => &self.comments_sheet_id,
        }
    }

    /// Fetch the raw value grid of a spreadsheet.
    ///
    /// Fails on transport errors, non-success statuses and undecodable
    /// bodies. Callers that need the never-fail contract use
    /// `fetch_interactions` instead.
    pub async fn fetch_values(&self, sheet_id: &str) -> Result<Vec<Vec<String>>> {
        let Some(api_key) = self.api_key.as_deref() else {
            anyhow::bail!("GOOGLE_API_KEY not configured");
        };

        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, sheet_id, self.range
        );

        debug!(sheet_id = sheet_id, range = %self.range, "Sheets values GET");

        let response = self
            .client
            .get(&url)
            .query(&[("key", api_key)])
            .send()
            .await
            .with_context(|| format!("Sheets request failed for {sheet_id}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Sheets API returned {status} for {sheet_id}: {body}");
        }

        let parsed = response
            .json::<ValuesResponse>()
            .await
            .with_context(|| format!("Failed to parse Sheets response for {sheet_id}"))?;

        debug!(
            sheet_id = sheet_id,
            range = parsed.range.as_deref().unwrap_or("-"),
            rows = parsed.values.len(),
            "Sheets values received"
        );

        Ok(parsed.into_string_grid())
    }

    /// Fetch and normalize the interactions of a kind.
    ///
    /// Never fails: a missing key, a network or HTTP failure, or a bad body
    /// all yield an empty list (after logging).
    pub async fn fetch_interactions(&self, kind: InteractionKind) -> Vec<Interaction> {
        if !self.has_credentials() {
            warn!(kind = %kind, "GOOGLE_API_KEY not configured, using sample data");
            return Vec::new();
        }

        let sheet_id = self.sheet_id(kind);
        match self.fetch_values(sheet_id).await {
            Ok(values) => {
                let interactions = normalize_values(kind, &values);
                debug!(
                    kind = %kind,
                    rows = values.len().saturating_sub(1),
                    interactions = interactions.len(),
                    "Sheet rows normalized"
                );
                interactions
            }
            Err(e) => {
                error!(kind = %kind, sheet_id = sheet_id, error = %e, "Error fetching sheet data");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl InteractionSource for SheetsClient {
    async fn fetch_interactions(&self, kind: InteractionKind) -> Result<Vec<Interaction>> {
        Ok(SheetsClient::fetch_interactions(self, kind).await)
    }
}
