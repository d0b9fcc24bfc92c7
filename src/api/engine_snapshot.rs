use serde::{Deserialize, Serialize};

use crate::core::{DateKey, RegionKey, SeriesPoint, SkippedBatch, date_key};
use crate::interaction::{SelectionMode, ViewportWindow};

use super::{IssueChart, LoadStatus};

/// Serializable view of everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub status: LoadStatus,
    pub selection_mode: SelectionMode,
    pub selected_regions: Vec<RegionKey>,
    pub viewport: ViewportWindow,
    pub visible_range: (usize, usize),
    pub series: Vec<SeriesPoint>,
    pub visible_regions: Vec<RegionKey>,
    pub today: DateKey,
    pub today_position: Option<usize>,
    pub selected_date: Option<DateKey>,
    pub skipped_batches: Vec<SkippedBatch>,
}

impl IssueChart {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        self.snapshot_at(date_key::today_key())
    }

    /// Snapshot with an explicit "today", for reproducible output.
    #[must_use]
    pub fn snapshot_at(&self, today: DateKey) -> ChartSnapshot {
        let range = self.visible_range();
        ChartSnapshot {
            status: self.status.clone(),
            selection_mode: self.selection.mode(),
            selected_regions: self.selection.region_members().collect(),
            viewport: self.viewport.window(),
            visible_range: (range.start, range.end),
            series: self.visible_series(),
            visible_regions: self.visible_regions(),
            today_position: self.position_in_window(&today),
            today,
            selected_date: self.selected_date.clone(),
            skipped_batches: self.aggregation.skipped().to_vec(),
        }
    }
}
