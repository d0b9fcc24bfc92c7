use indexmap::IndexSet;

use crate::core::{DateKey, RegionKey, SeriesPoint, date_key};

use super::IssueChart;

impl IssueChart {
    /// Points inside the viewport with hidden regions removed.
    ///
    /// `total` on each returned point is recomputed over the regions that stay
    /// visible.
    #[must_use]
    pub fn visible_series(&self) -> Vec<SeriesPoint> {
        let range = self.visible_range();
        self.aggregation.series()[range]
            .iter()
            .map(|point| point.retain_regions(|region| self.selection.is_visible(region)))
            .collect()
    }

    /// Every region that occurs in the loaded data, in legend order: catalog
    /// regions first, then ids missing from the catalog, then `unknown`.
    #[must_use]
    pub fn data_regions(&self) -> Vec<RegionKey> {
        let present: IndexSet<RegionKey> = self
            .aggregation
            .series()
            .iter()
            .flat_map(|point| point.counts().map(|(region, _)| region))
            .collect();

        let mut ordered: Vec<RegionKey> = self
            .config
            .regions
            .keys()
            .filter(|region| present.contains(region))
            .collect();
        let mut outside_catalog: Vec<RegionKey> = present
            .iter()
            .copied()
            .filter(|region| !self.config.regions.contains(*region))
            .collect();
        outside_catalog.sort();
        ordered.extend(outside_catalog);
        ordered
    }

    /// Regions with their own line on the chart.
    #[must_use]
    pub fn visible_regions(&self) -> Vec<RegionKey> {
        self.data_regions()
            .into_iter()
            .filter(|region| self.selection.is_visible(*region))
            .collect()
    }

    /// Position of today inside [`Self::visible_series`], if it is on screen.
    #[must_use]
    pub fn today_position(&self) -> Option<usize> {
        self.position_in_window(&date_key::today_key())
    }

    /// Position of `date` inside [`Self::visible_series`], if it is on screen.
    #[must_use]
    pub fn position_in_window(&self, date: &DateKey) -> Option<usize> {
        let range = self.visible_range();
        self.aggregation
            .position_of(date)
            .filter(|position| range.contains(position))
            .map(|position| position - range.start)
    }

    #[must_use]
    pub fn today_key(&self) -> DateKey {
        date_key::today_key()
    }
}
