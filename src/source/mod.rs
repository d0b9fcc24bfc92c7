//! Data-access seam: where day batches come from.
//!
//! The chart core never performs I/O itself; the facade asks an
//! [`IssueSource`] for the full dataset once per refresh.

mod file;
mod grouping;
#[cfg(feature = "http-source")]
mod http;
mod payload;

pub use file::JsonFileSource;
pub use grouping::group_by_monitor_deadline;
#[cfg(feature = "http-source")]
pub use http::HttpIssueSource;
pub use payload::{decode_day_batches, decode_day_batches_value};

use crate::core::DayBatch;
use crate::error::ChartResult;

/// One-shot provider of the complete day-batch dataset.
///
/// Any failure is reported as [`crate::ChartError::Transport`].
pub trait IssueSource {
    fn fetch(&self) -> ChartResult<Vec<DayBatch>>;
}

impl<F> IssueSource for F
where
    F: Fn() -> ChartResult<Vec<DayBatch>>,
{
    fn fetch(&self) -> ChartResult<Vec<DayBatch>> {
        self()
    }
}

/// In-memory dataset, handy for tests and replaying captured payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticSource {
    batches: Vec<DayBatch>,
}

impl StaticSource {
    #[must_use]
    pub fn new(batches: Vec<DayBatch>) -> Self {
        Self { batches }
    }
}

impl IssueSource for StaticSource {
    fn fetch(&self) -> ChartResult<Vec<DayBatch>> {
        Ok(self.batches.clone())
    }
}
