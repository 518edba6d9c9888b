// Dashboard filter state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::interactions::Sentiment;

/// Time window applied before every other filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// The last 24 hours.
    Today,
    Last7Days,
    #[default]
    Last30Days,
    Custom(u32),
    /// No period filter.
    All,
}

impl Period {
    /// Map a day count onto the matching quick range, if there is one.
    pub fn from_days(days: u32) -> Self {
        match days {
            0 => Period::Today,
            7 => Period::Last7Days,
            30 => Period::Last30Days,
            n => Period::Custom(n),
        }
    }

    /// Day count passed to the period filter; `None` disables it.
    pub fn days(self) -> Option<u32> {
        match self {
            Period::Today => Some(0),
            Period::Last7Days => Some(7),
            Period::Last30Days => Some(30),
            Period::Custom(n) => Some(n),
            Period::All => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Today => f.write_str("today"),
            Period::Last7Days => f.write_str("7 days"),
            Period::Last30Days => f.write_str("30 days"),
            Period::Custom(n) => write!(f, "{n} days"),
            Period::All => f.write_str("all time"),
        }
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "today" | "hoje" => Ok(Period::Today),
            "all" | "todos" => Ok(Period::All),
            other => {
                let digits = other.strip_suffix('d').unwrap_or(other);
                digits
                    .parse::<u32>()
                    .map(Period::from_days)
                    .map_err(|_| anyhow::anyhow!("unknown period '{s}' (expected today, 7d, 30d, all or a day count)"))
            }
        }
    }
}

/// Everything the user can narrow the dashboard by.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text search over handle and profile id.
    pub query: String,
    pub period: Period,
    /// `None` shows every sentiment, including unlabelled interactions.
    pub sentiment: Option<Sentiment>,
}
