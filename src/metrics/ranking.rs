// Participant ranking: per-profile rollup ordered by interaction volume.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interactions::{Interaction, Sentiment};

/// Hard cap applied by `build_ranking` itself.
pub const RANKING_CAP: usize = 10;

/// Number of rows the dashboard shows.
pub const DEFAULT_RANKING_LIMIT: usize = 5;

/// One participant's rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub profile_id: String,
    /// Last non-empty handle seen for this participant.
    pub handle: Option<String>,
    pub total_interactions: usize,
    pub positive: usize,
    /// Share of positive interactions, 0-100.
    pub positive_pct: f64,
    /// Most recent parseable timestamp. `None` when none of the
    /// participant's timestamps could be parsed.
    pub last_interaction: Option<DateTime<Utc>>,
}

impl RankingEntry {
    /// Key used to break ties between equally active participants.
    fn tie_break_key(&self) -> &str {
        self.handle.as_deref().unwrap_or(&self.profile_id)
    }
}

/// Group interactions by participant without ordering or truncation.
///
/// Groups come back in first-seen order.
pub fn group_by_participant(interactions: &[Interaction]) -> Vec<RankingEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<RankingEntry> = Vec::new();

    for interaction in interactions {
        let slot = *index
            .entry(interaction.profile_id.as_str())
            .or_insert_with(|| {
                entries.push(RankingEntry {
                    profile_id: interaction.profile_id.clone(),
                    handle: None,
                    total_interactions: 0,
                    positive: 0,
                    positive_pct: 0.0,
                    last_interaction: None,
                });
                entries.len() - 1
            });

        let entry = &mut entries[slot];
        entry.total_interactions += 1;
        if interaction.sentiment == Some(Sentiment::Positive) {
            entry.positive += 1;
        }
        if let Some(handle) = interaction.handle() {
            entry.handle = Some(handle.to_string());
        }
        if let Some(at) = interaction.occurred_at() {
            if entry.last_interaction.map_or(true, |last| at > last) {
                entry.last_interaction = Some(at);
            }
        }
    }

    for entry in &mut entries {
        entry.positive_pct = entry.positive as f64 / entry.total_interactions as f64 * 100.0;
    }

    entries
}

/// Order ranking entries: most interactions first, then handle (or id when
/// there is no handle) ascending, then id.
pub fn compare_entries(a: &RankingEntry, b: &RankingEntry) -> Ordering {
    b.total_interactions
        .cmp(&a.total_interactions)
        .then_with(|| a.tie_break_key().cmp(b.tie_break_key()))
        .then_with(|| a.profile_id.cmp(&b.profile_id))
}

/// Build the participant ranking, capped at `RANKING_CAP` entries.
pub fn build_ranking(interactions: &[Interaction]) -> Vec<RankingEntry> {
    let mut ranking = group_by_participant(interactions);
    ranking.sort_by(compare_entries);
    ranking.truncate(RANKING_CAP);
    ranking
}

/// Build the ranking and keep only the top `limit` rows.
pub fn top_ranking(interactions: &[Interaction], limit: usize) -> Vec<RankingEntry> {
    let mut ranking = build_ranking(interactions);
    ranking.truncate(limit);
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, handle: Option<&str>, total: usize) -> RankingEntry {
        RankingEntry {
            profile_id: id.to_string(),
            handle: handle.map(str::to_string),
            total_interactions: total,
            positive: 0,
            positive_pct: 0.0,
            last_interaction: None,
        }
    }

    #[test]
    fn test_compare_more_interactions_first() {
        let a = entry("1", Some("zed"), 5);
        let b = entry("2", Some("amy"), 3);
        assert_eq!(compare_entries(&a, &b), Ordering::Less);
    }

    #[test]
    fn test_compare_tie_breaks_on_handle_then_id() {
        let a = entry("9", Some("amy"), 3);
        let b = entry("1", Some("bob"), 3);
        assert_eq!(compare_entries(&a, &b), Ordering::Less);

        // No handle: the id stands in
        let c = entry("100", None, 3);
        assert_eq!(compare_entries(&c, &a), Ordering::Less);
    }

    #[test]
    fn test_empty_input_yields_empty_ranking() {
        assert!(build_ranking(&[]).is_empty());
        assert!(top_ranking(&[], 5).is_empty());
    }
}
