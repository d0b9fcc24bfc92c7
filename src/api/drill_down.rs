use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{DateKey, IssueDetail, IssueRecord, RegionKey};
use crate::error::ChartResult;

use super::IssueChart;

/// Records behind one chart day, grouped by visible region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillDown {
    pub date: DateKey,
    pub groups: IndexMap<RegionKey, Vec<IssueRecord>>,
}

impl DrillDown {
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issue_count() == 0
    }

    /// All records, region by region, each region in input order.
    pub fn records(&self) -> impl Iterator<Item = &IssueRecord> + '_ {
        self.groups.values().flatten()
    }
}

impl IssueChart {
    /// Marks `date` as the drill-down target. Returns `false` (and clears the
    /// selection) when the date is not in the loaded data.
    pub fn select_date(&mut self, date: DateKey) -> bool {
        let known = self.aggregation.position_of(&date).is_some();
        self.selected_date = known.then_some(date);
        known
    }

    /// Same as [`Self::select_date`] for a `DD.MM.YY` label coming back from the renderer.
    pub fn select_date_label(&mut self, label: &str) -> ChartResult<bool> {
        let date = DateKey::parse(label)?;
        Ok(self.select_date(date))
    }

    pub fn clear_selected_date(&mut self) {
        self.selected_date = None;
    }

    #[must_use]
    pub fn selected_date(&self) -> Option<&DateKey> {
        self.selected_date.as_ref()
    }

    /// Records for `date` restricted to currently visible regions.
    #[must_use]
    pub fn drill_down(&self, date: &DateKey) -> Option<DrillDown> {
        let regions = self.aggregation.index().regions(date)?;
        let groups = regions
            .iter()
            .filter(|(region, _)| self.selection.is_visible(**region))
            .map(|(region, records)| (*region, records.clone()))
            .collect();
        Some(DrillDown {
            date: date.clone(),
            groups,
        })
    }

    #[must_use]
    pub fn selected_drill_down(&self) -> Option<DrillDown> {
        self.selected_date
            .as_ref()
            .and_then(|date| self.drill_down(date))
    }

    /// Detail card for issue `id`, regardless of the region filter.
    #[must_use]
    pub fn issue_detail(&self, id: i64) -> Option<IssueDetail> {
        self.aggregation
            .index()
            .find_issue(id)
            .map(|(_, _, record)| IssueDetail::from_record(record, self.offset))
    }
}
