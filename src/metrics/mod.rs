// Aggregation: pure functions over in-memory interaction sets.

pub mod aggregate;
pub mod filters;
pub mod ranking;
pub mod topics;

pub use aggregate::{compute_metrics, participant_name, AggregateMetrics, ActiveParticipant};
pub use filters::{filter_by_period, filter_by_query, filter_by_sentiment};
pub use ranking::{build_ranking, top_ranking, RankingEntry};
pub use topics::extract_topics;
