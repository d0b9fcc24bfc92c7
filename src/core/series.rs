use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{DateKey, IssueRecord, RegionKey};

/// Counts for one chart day.
///
/// `total` always equals the sum of the per-region counters. The JSON form is
/// flat: `{"date": "01.06.24", "total": 3, "5": 2, "unknown": 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSeriesPoint")]
pub struct SeriesPoint {
    date: DateKey,
    total: u64,
    #[serde(flatten)]
    counts: IndexMap<RegionKey, u64>,
}

#[derive(Deserialize)]
struct RawSeriesPoint {
    date: DateKey,
    total: u64,
    #[serde(flatten)]
    counts: IndexMap<RegionKey, u64>,
}

impl TryFrom<RawSeriesPoint> for SeriesPoint {
    type Error = String;

    fn try_from(raw: RawSeriesPoint) -> Result<Self, Self::Error> {
        let sum: u64 = raw.counts.values().sum();
        if sum != raw.total {
            return Err(format!(
                "series point {} has total {} but region counters sum to {sum}",
                raw.date, raw.total
            ));
        }
        Ok(Self {
            date: raw.date,
            total: raw.total,
            counts: raw.counts,
        })
    }
}

impl SeriesPoint {
    #[must_use]
    pub fn new(date: DateKey) -> Self {
        Self {
            date,
            total: 0,
            counts: IndexMap::new(),
        }
    }

    /// Builds a point from explicit counters; `total` is derived.
    #[must_use]
    pub fn from_counts(date: DateKey, counts: impl IntoIterator<Item = (RegionKey, u64)>) -> Self {
        let mut point = Self::new(date);
        for (region, count) in counts {
            *point.counts.entry(region).or_insert(0) += count;
            point.total += count;
        }
        point
    }

    /// Counts one more issue for `region`.
    pub fn record(&mut self, region: RegionKey) {
        *self.counts.entry(region).or_insert(0) += 1;
        self.total += 1;
    }

    #[must_use]
    pub fn date(&self) -> &DateKey {
        &self.date
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn count(&self, region: RegionKey) -> u64 {
        self.counts.get(&region).copied().unwrap_or(0)
    }

    /// Region counters in first-encounter order.
    pub fn counts(&self) -> impl Iterator<Item = (RegionKey, u64)> + '_ {
        self.counts.iter().map(|(region, count)| (*region, *count))
    }

    /// Copy of this point keeping only regions accepted by `keep`, with `total` recomputed.
    #[must_use]
    pub fn retain_regions(&self, mut keep: impl FnMut(RegionKey) -> bool) -> Self {
        Self::from_counts(
            self.date.clone(),
            self.counts().filter(|(region, _)| keep(*region)),
        )
    }
}

/// Date → region → records lookup backing drill-down views.
///
/// Records keep input order within a day/region. Never used for chart counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrillIndex {
    days: IndexMap<DateKey, IndexMap<RegionKey, Vec<IssueRecord>>>,
}

impl DrillIndex {
    pub fn push(&mut self, date: &DateKey, region: RegionKey, record: IssueRecord) {
        self.day_entry(date)
            .entry(region)
            .or_default()
            .push(record);
    }

    /// Registers a day even if it has no records.
    pub fn touch(&mut self, date: &DateKey) {
        self.day_entry(date);
    }

    fn day_entry(&mut self, date: &DateKey) -> &mut IndexMap<RegionKey, Vec<IssueRecord>> {
        self.days.entry(date.clone()).or_default()
    }

    pub(crate) fn sort_days(&mut self) {
        self.days.sort_keys();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = &DateKey> + '_ {
        self.days.keys()
    }

    #[must_use]
    pub fn regions(&self, date: &DateKey) -> Option<&IndexMap<RegionKey, Vec<IssueRecord>>> {
        self.days.get(date)
    }

    #[must_use]
    pub fn records(&self, date: &DateKey, region: RegionKey) -> &[IssueRecord] {
        self.days
            .get(date)
            .and_then(|regions| regions.get(&region))
            .map_or(&[], Vec::as_slice)
    }

    /// Locates an issue by id across all days.
    #[must_use]
    pub fn find_issue(&self, id: i64) -> Option<(&DateKey, RegionKey, &IssueRecord)> {
        self.days.iter().find_map(|(date, regions)| {
            regions.iter().find_map(|(region, records)| {
                records
                    .iter()
                    .find(|record| record.id == id)
                    .map(|record| (date, *region, record))
            })
        })
    }
}
