//! Chart and feed models built from a usage payload.
//!
//! These are render-ready values with no terminal dependency. The TUI draws
//! them; the dashboard binds them to its chart surfaces.

pub mod activity;
pub mod breakdown;
pub mod trend;

pub use activity::{relative_time, ActivityFeed};
pub use breakdown::BreakdownChart;
pub use trend::{TrendChart, TrendPoint};
