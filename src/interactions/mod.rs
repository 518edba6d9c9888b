// Interaction records: typed DMs and comments, plus fixed sample data.

pub mod models;
pub mod samples;

pub use models::{parse_timestamp, Interaction, InteractionKind, Sentiment};
