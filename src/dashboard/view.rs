// Derived dashboard view: filtered interactions plus everything computed
// from them. Rebuilt from scratch on every data or filter change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filters::FilterState;
use crate::interactions::Interaction;
use crate::metrics::ranking::DEFAULT_RANKING_LIMIT;
use crate::metrics::topics::DEFAULT_TOPIC_LIMIT;
use crate::metrics::{
    compute_metrics, extract_topics, filter_by_period, filter_by_query, filter_by_sentiment,
    top_ranking, AggregateMetrics, RankingEntry,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Interactions that passed every filter, in source order.
    pub interactions: Vec<Interaction>,
    pub metrics: AggregateMetrics,
    /// Top participants, at most `DEFAULT_RANKING_LIMIT`.
    pub ranking: Vec<RankingEntry>,
    /// Most frequent words, at most `DEFAULT_TOPIC_LIMIT`.
    pub topics: Vec<String>,
}

/// Apply period, then sentiment, then query filters.
pub fn apply_filters(
    raw: &[Interaction],
    filters: &FilterState,
    now: DateTime<Utc>,
) -> Vec<Interaction> {
    let by_period = match filters.period.days() {
        Some(days) => filter_by_period(raw, days, now),
        None => raw.to_vec(),
    };
    let by_sentiment = filter_by_sentiment(&by_period, filters.sentiment);
    filter_by_query(&by_sentiment, &filters.query)
}

impl DashboardView {
    pub fn compute(raw: &[Interaction], filters: &FilterState, now: DateTime<Utc>) -> Self {
        let interactions = apply_filters(raw, filters, now);
        let metrics = compute_metrics(&interactions);
        let ranking = top_ranking(&interactions, DEFAULT_RANKING_LIMIT);
        let topics = extract_topics(&interactions, DEFAULT_TOPIC_LIMIT);

        Self {
            interactions,
            metrics,
            ranking,
            topics,
        }
    }
}
