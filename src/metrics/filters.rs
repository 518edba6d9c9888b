// Interaction filters by period, sentiment and free-text search.
//
// All filters keep the input order and never fail. The period filter keeps
// interactions whose timestamp can't be parsed.

use chrono::{DateTime, Utc};

use crate::interactions::{Interaction, Sentiment};

/// Keep interactions at most `days` whole days older than `now` (inclusive).
///
/// `days = 0` keeps anything from the last 24 hours. Timestamps in the future
/// and unparseable timestamps are kept.
pub fn filter_by_period(
    interactions: &[Interaction],
    days: u32,
    now: DateTime<Utc>,
) -> Vec<Interaction> {
    interactions
        .iter()
        .filter(|i| within_period(i, days, now))
        .cloned()
        .collect()
}

fn within_period(interaction: &Interaction, days: u32, now: DateTime<Utc>) -> bool {
    match interaction.occurred_at() {
        Some(at) => (now - at).num_days() <= i64::from(days),
        None => true,
    }
}

/// Keep interactions labelled with `sentiment`; `None` keeps everything.
pub fn filter_by_sentiment(
    interactions: &[Interaction],
    sentiment: Option<Sentiment>,
) -> Vec<Interaction> {
    match sentiment {
        None => interactions.to_vec(),
        Some(wanted) => interactions
            .iter()
            .filter(|i| i.sentiment == Some(wanted))
            .cloned()
            .collect(),
    }
}

/// Normalize a search query: trimmed, leading "@" removed, lower-cased.
pub fn normalize_query(query: &str) -> String {
    query.trim().trim_start_matches('@').trim().to_lowercase()
}

/// Keep interactions whose handle or profile id contains `query`,
/// case-insensitively. A blank query keeps everything.
pub fn filter_by_query(interactions: &[Interaction], query: &str) -> Vec<Interaction> {
    let term = normalize_query(query);
    if term.is_empty() {
        return interactions.to_vec();
    }

    interactions
        .iter()
        .filter(|i| {
            i.handle()
                .is_some_and(|h| h.to_lowercase().contains(&term))
                || i.profile_id.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}
