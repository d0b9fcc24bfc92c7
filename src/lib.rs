//! issue-chart: per-day, per-region issue counts as a navigable time chart.
//!
//! The crate covers the non-presentational part of an issue dashboard:
//! aggregating day batches into a date/region series with a drill-down index,
//! a tri-state region filter, and a zoom/brush/pan viewport over the series.
//! Fetching and rendering stay with the host application.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod source;
pub mod telemetry;

pub use api::{ChartConfig, IssueChart};
pub use error::{ChartError, ChartResult};
