use chrono::FixedOffset;
use indexmap::IndexMap;
use tracing::debug;

use crate::core::{DayBatch, IssueRecord, issue::unix_seconds_to_date};

/// Groups a flat issue list into day batches by the calendar date of
/// `monitor_deadline_at` in `offset`.
///
/// Issues without a monitor deadline are left out. Batches come out in
/// ascending date order; issues keep their input order within a day.
#[must_use]
pub fn group_by_monitor_deadline(issues: &[IssueRecord], offset: FixedOffset) -> Vec<DayBatch> {
    let mut days: IndexMap<_, Vec<IssueRecord>> = IndexMap::new();
    let mut undated = 0_usize;

    for issue in issues {
        match issue
            .monitor_deadline_at
            .and_then(|ts| unix_seconds_to_date(ts, offset))
        {
            Some(date) => days.entry(date).or_default().push(issue.clone()),
            None => undated += 1,
        }
    }

    days.sort_keys();
    debug!(
        issue_count = issues.len(),
        day_count = days.len(),
        undated,
        "grouped issues by monitor deadline"
    );

    days.into_iter()
        .map(|(date, issues)| DayBatch::new(date.format("%Y-%m-%d").to_string(), issues))
        .collect()
}
