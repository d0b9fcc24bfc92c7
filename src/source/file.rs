use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{IssueSource, decode_day_batches};
use crate::core::DayBatch;
use crate::error::{ChartError, ChartResult};

/// Reads a day-batch payload from a JSON file on every fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IssueSource for JsonFileSource {
    fn fetch(&self) -> ChartResult<Vec<DayBatch>> {
        debug!(path = %self.path.display(), "reading day batch file");
        let raw = fs::read_to_string(&self.path).map_err(|e| {
            ChartError::Transport(format!("failed to read {}: {e}", self.path.display()))
        })?;
        decode_day_batches(&raw)
    }
}
