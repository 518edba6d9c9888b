// Aggregate sentiment metrics: counts, sentiment index and the most active voice.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::interactions::{Interaction, Sentiment};

/// Weight of a neutral interaction in the sentiment index.
const NEUTRAL_WEIGHT: f64 = 0.5;

/// The participant with the most interactions in a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveParticipant {
    pub profile_id: String,
    /// Last non-empty handle seen for this participant.
    pub handle: Option<String>,
    pub count: usize,
}

impl ActiveParticipant {
    pub fn display_name(&self) -> String {
        participant_name(self.handle.as_deref(), &self.profile_id)
    }
}

/// "@handle", or "ID #" plus the first eight characters of the profile id.
pub fn participant_name(handle: Option<&str>, profile_id: &str) -> String {
    match handle.filter(|h| !h.is_empty()) {
        Some(handle) => format!("@{handle}"),
        None => {
            let short: String = profile_id.chars().take(8).collect();
            format!("ID #{short}")
        }
    }
}

/// Headline numbers for a set of interactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub total: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// 0-100; positives count fully, neutrals half, negatives not at all.
    pub sentiment_index: f64,
    pub most_active: Option<ActiveParticipant>,
}

impl Default for AggregateMetrics {
    fn default() -> Self {
        compute_metrics(&[])
    }
}

/// Compute the sentiment index from label counts.
///
/// Returns 0.0 for an empty set. Interactions without a label count toward
/// `total` only, which pulls the index down.
pub fn sentiment_index(positive: usize, neutral: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (positive as f64 + neutral as f64 * NEUTRAL_WEIGHT) / total as f64 * 100.0
}

/// Compute aggregate metrics for a set of interactions.
///
/// The most active participant is the one with the highest final count.
/// Among participants tied at that count, the one seen first in the input
/// wins.
pub fn compute_metrics(interactions: &[Interaction]) -> AggregateMetrics {
    let mut positive = 0;
    let mut neutral = 0;
    let mut negative = 0;

    // Per-profile (id, count, last non-empty handle), in first-seen order
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut per_profile: Vec<(&str, usize, Option<&str>)> = Vec::new();

    for interaction in interactions {
        match interaction.sentiment {
            Some(Sentiment::Positive) => positive += 1,
            Some(Sentiment::Neutral) => neutral += 1,
            Some(Sentiment::Negative) => negative += 1,
            None => {}
        }

        let id = interaction.profile_id.as_str();
        let slot = *index.entry(id).or_insert_with(|| {
            per_profile.push((id, 0, None));
            per_profile.len() - 1
        });
        let entry = &mut per_profile[slot];
        entry.1 += 1;
        if let Some(handle) = interaction.handle() {
            entry.2 = Some(handle);
        }
    }

    let mut leader: Option<&(&str, usize, Option<&str>)> = None;
    for candidate in &per_profile {
        if leader.map_or(true, |best| candidate.1 > best.1) {
            leader = Some(candidate);
        }
    }

    let most_active = leader.map(|&(id, count, handle)| ActiveParticipant {
        profile_id: id.to_string(),
        handle: handle.map(str::to_string),
        count,
    });

    AggregateMetrics {
        total: interactions.len(),
        positive,
        neutral,
        negative,
        sentiment_index: sentiment_index(positive, neutral, interactions.len()),
        most_active,
    }
}
