use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{DateKey, DayBatch, DrillIndex, SeriesPoint, date_key};
use crate::error::ChartError;

/// Day batch dropped because its date could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedBatch {
    pub date: String,
    pub issue_count: usize,
    pub reason: String,
}

/// Aggregated chart data: the ordered series plus the drill-down index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    series: Vec<SeriesPoint>,
    index: DrillIndex,
    skipped: Vec<SkippedBatch>,
}

impl Aggregation {
    /// Series ordered by calendar date, one point per distinct date key.
    #[must_use]
    pub fn series(&self) -> &[SeriesPoint] {
        &self.series
    }

    #[must_use]
    pub fn index(&self) -> &DrillIndex {
        &self.index
    }

    #[must_use]
    pub fn skipped(&self) -> &[SkippedBatch] {
        &self.skipped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[must_use]
    pub fn position_of(&self, date: &DateKey) -> Option<usize> {
        self.series
            .binary_search_by(|point| point.date().cmp(date))
            .ok()
    }

    #[must_use]
    pub fn point(&self, date: &DateKey) -> Option<&SeriesPoint> {
        self.position_of(date).map(|position| &self.series[position])
    }
}

/// Builds the per-day/per-region series and drill index from raw day batches.
///
/// Batches that normalize to the same date key are merged. Batches with a
/// malformed date are skipped and reported; the rest still aggregate.
#[must_use]
pub fn aggregate(batches: &[DayBatch]) -> Aggregation {
    let mut points: IndexMap<DateKey, SeriesPoint> = IndexMap::new();
    let mut index = DrillIndex::default();
    let mut skipped = Vec::new();

    for batch in batches {
        let date = match date_key::to_display_key(&batch.date) {
            Ok(date) => date,
            Err(err) => {
                warn!(
                    date = %batch.date,
                    issues = batch.issues.len(),
                    error = %err,
                    "skipping day batch"
                );
                skipped.push(skipped_batch(batch, &err));
                continue;
            }
        };

        index.touch(&date);
        let point = points
            .entry(date.clone())
            .or_insert_with(|| SeriesPoint::new(date.clone()));
        for issue in &batch.issues {
            let region = issue.region_key();
            point.record(region);
            index.push(&date, region, issue.clone());
        }
    }

    points.sort_keys();
    index.sort_days();
    let series: Vec<SeriesPoint> = points.into_values().collect();

    debug!(
        batch_count = batches.len(),
        point_count = series.len(),
        skipped_count = skipped.len(),
        "aggregated day batches"
    );

    Aggregation {
        series,
        index,
        skipped,
    }
}

fn skipped_batch(batch: &DayBatch, err: &ChartError) -> SkippedBatch {
    SkippedBatch {
        date: batch.date.clone(),
        issue_count: batch.issues.len(),
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::aggregate;
    use crate::core::{DateKey, DayBatch, IssueRecord, RegionKey};

    fn key(label: &str) -> DateKey {
        DateKey::parse(label).expect("date key")
    }

    #[test]
    fn same_day_batches_merge_into_one_point() {
        let batches = vec![
            DayBatch::new(
                "2024-06-01",
                vec![IssueRecord::new(1, Some(5)), IssueRecord::new(2, None)],
            ),
            DayBatch::new("2024-06-01", vec![IssueRecord::new(3, Some(5))]),
        ];

        let aggregation = aggregate(&batches);
        assert_eq!(aggregation.len(), 1);

        let point = &aggregation.series()[0];
        assert_eq!(point.date().as_str(), "01.06.24");
        assert_eq!(point.total(), 3);
        assert_eq!(point.count(RegionKey::Id(5)), 2);
        assert_eq!(point.count(RegionKey::Unknown), 1);

        let ids: Vec<_> = aggregation
            .index()
            .records(&key("01.06.24"), RegionKey::Id(5))
            .iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn series_is_sorted_by_calendar_date() {
        let batches = vec![
            DayBatch::new("2024-01-02", vec![IssueRecord::new(1, Some(1))]),
            DayBatch::new("2023-12-31", vec![IssueRecord::new(2, Some(1))]),
            DayBatch::new("2024-01-01", vec![IssueRecord::new(3, Some(1))]),
        ];

        let labels: Vec<_> = aggregate(&batches)
            .series()
            .iter()
            .map(|point| point.date().to_string())
            .collect();
        assert_eq!(labels, vec!["31.12.23", "01.01.24", "02.01.24"]);
    }

    #[test]
    fn malformed_batch_is_skipped_without_aborting() {
        let batches = vec![
            DayBatch::new("06/01/2024", vec![IssueRecord::new(1, Some(5))]),
            DayBatch::new("2024-06-02", vec![IssueRecord::new(2, Some(5))]),
        ];

        let aggregation = aggregate(&batches);
        assert_eq!(aggregation.len(), 1);
        assert_eq!(aggregation.skipped().len(), 1);
        assert_eq!(aggregation.skipped()[0].date, "06/01/2024");
        assert_eq!(aggregation.skipped()[0].issue_count, 1);
        assert!(aggregation.index().find_issue(1).is_none());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let aggregation = aggregate(&[]);
        assert!(aggregation.is_empty());
        assert!(aggregation.index().is_empty());
        assert!(aggregation.skipped().is_empty());
    }

    #[test]
    fn empty_batch_still_marks_its_day() {
        let aggregation = aggregate(&[DayBatch::new("2024-06-03", Vec::new())]);
        assert_eq!(aggregation.len(), 1);
        assert_eq!(aggregation.series()[0].total(), 0);
        assert_eq!(aggregation.position_of(&key("03.06.24")), Some(0));
    }

    #[test]
    fn rerun_is_identical() {
        let batches = vec![
            DayBatch::new("2024-06-02", vec![IssueRecord::new(1, Some(7))]),
            DayBatch::new("2024-06-01", vec![IssueRecord::new(2, None)]),
        ];
        assert_eq!(aggregate(&batches), aggregate(&batches));
    }
}
