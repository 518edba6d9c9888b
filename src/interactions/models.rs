// Interaction models: the typed records that flow through the dashboard.
//
// Both DMs and comments share one shape. The `kind` field is the explicit
// discriminator; it decides which sheet column feeds `text` and which sample
// dataset stands in when the sheet is empty.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Sentiment label attached to an interaction by the upstream classifier.
///
/// The unset label is modelled as `Option<Sentiment>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    #[serde(rename = "POSITIVO")]
    Positive,
    #[serde(rename = "NEUTRO")]
    Neutral,
    #[serde(rename = "NEGATIVO")]
    Negative,
}

impl Sentiment {
    /// Parse a sheet cell into a sentiment label.
    ///
    /// Case-insensitive. Accepts the Portuguese labels the sheets are filled
    /// with as well as their English equivalents; anything else is unset.
    pub fn from_label(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "POSITIVO" | "POSITIVE" => Some(Sentiment::Positive),
            "NEUTRO" | "NEUTRAL" => Some(Sentiment::Neutral),
            "NEGATIVO" | "NEGATIVE" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    /// Canonical upper-case label, as written in the sheets.
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVO",
            Sentiment::Neutral => "NEUTRO",
            Sentiment::Negative => "NEGATIVO",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sentiment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sentiment::from_label(s)
            .ok_or_else(|| anyhow::anyhow!("unknown sentiment '{s}' (expected positive, neutral or negative)"))
    }
}

/// Which Instagram surface an interaction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    DirectMessage,
    Comment,
}

impl InteractionKind {
    pub fn label(self) -> &'static str {
        match self {
            InteractionKind::DirectMessage => "DM",
            InteractionKind::Comment => "Comments",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InteractionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dm" | "dms" | "direct" | "direct-message" => Ok(InteractionKind::DirectMessage),
            "comment" | "comments" | "comentarios" | "comentários" => Ok(InteractionKind::Comment),
            other => anyhow::bail!("unknown interaction kind '{other}' (expected dm or comments)"),
        }
    }
}

/// One inbound DM or comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub kind: InteractionKind,
    /// Instagram account id of the sender. Empty when the sheet row lacks it.
    pub profile_id: String,
    /// Instagram handle without guarantees about a leading "@".
    pub handle: Option<String>,
    /// DM message or comment content.
    pub text: String,
    pub date: String,
    pub time: String,
    /// Combined timestamp column; may be empty, in which case `date` and
    /// `time` are combined instead.
    pub timestamp: String,
    pub sentiment: Option<Sentiment>,
}

impl Interaction {
    /// The raw timestamp string used for time-based logic.
    pub fn raw_timestamp(&self) -> String {
        if self.timestamp.trim().is_empty() {
            format!("{}T{}", self.date.trim(), self.time.trim())
        } else {
            self.timestamp.clone()
        }
    }

    /// When this interaction happened, if its timestamp can be parsed.
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.raw_timestamp())
    }

    /// Handle if present and non-empty.
    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref().filter(|h| !h.is_empty())
    }
}

/// Naive date-time layouts seen in the sheets, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%YT%H:%M:%S",
    "%d/%m/%YT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Parse an interaction timestamp.
///
/// Accepts RFC 3339, ISO-8601 local date-times (with or without seconds),
/// date-only ISO strings, and the day-first `dd/mm/yyyy` spreadsheet form.
/// Values without an offset are read in the local time zone. Returns `None`
/// for anything else, including local times that fall in a DST gap.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    // "2025-01-15T" comes from a row with a date but no time
    let raw = raw.trim().trim_end_matches('T');
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NAIVE_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
