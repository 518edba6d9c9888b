// Live dashboard: refresh loop, filter state and derived view.

pub mod controller;
pub mod filters;
pub mod view;

pub use controller::{DashboardController, DashboardSnapshot, DataOrigin, Phase};
pub use filters::{FilterState, Period};
pub use view::DashboardView;
