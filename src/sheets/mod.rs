// Google Sheets data source: fetch a sheet and normalize its rows.

pub mod client;
pub mod normalize;
pub mod traits;
