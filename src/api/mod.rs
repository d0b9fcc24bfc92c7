//! Chart facade consumed by host applications.

mod data_controller;
mod drill_down;
mod engine;
mod engine_config;
mod engine_snapshot;
mod json_contract;
mod navigation_controller;
mod selection_controller;
mod series_projection;

pub use drill_down::DrillDown;
pub use engine::{FetchTicket, IssueChart, LoadStatus};
pub use engine_config::ChartConfig;
pub use engine_snapshot::ChartSnapshot;
pub use json_contract::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshotJsonContractV1};
