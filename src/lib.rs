// igpulse: sentiment dashboard for Instagram DMs and comments
//
// This is the library root. Each module corresponds to a major subsystem
// of the dashboard, leaf-first: records, data source, aggregation, the live
// controller, and terminal output.

pub mod config;
pub mod dashboard;
pub mod interactions;
pub mod metrics;
pub mod output;
pub mod sheets;
