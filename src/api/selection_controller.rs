use crate::core::RegionKey;
use crate::interaction::{RegionSelection, SelectionEvent};

use super::IssueChart;

impl IssueChart {
    #[must_use]
    pub fn region_selection(&self) -> &RegionSelection {
        &self.selection
    }

    pub fn toggle_all_regions(&mut self) {
        self.selection.toggle_all();
    }

    pub fn toggle_region(&mut self, region: RegionKey) {
        self.selection.toggle_region(region);
    }

    pub fn apply_selection_event(&mut self, event: SelectionEvent) {
        self.selection = self.selection.clone().apply(event);
    }

    #[must_use]
    pub fn is_region_visible(&self, region: RegionKey) -> bool {
        self.selection.is_visible(region)
    }
}
