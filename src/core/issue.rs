use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::RegionKey;

/// Object carrying a human readable `title` (status, theme).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Titled {
    #[serde(default)]
    pub title: Option<String>,
}

/// Addressable object an issue is filed against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueObject {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentMonitor {
    #[serde(default)]
    pub executor_make_answer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueComment {
    #[serde(default)]
    pub monitor: Option<CommentMonitor>,
}

/// One issue as received from the data source. Never mutated after decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    pub id: i64,
    #[serde(default)]
    pub region_id: Option<i64>,
    /// Unix seconds.
    #[serde(default)]
    pub monitor_deadline_at: Option<i64>,
    /// Unix seconds.
    #[serde(default)]
    pub deadline_at: Option<i64>,
    #[serde(default)]
    pub status: Option<Titled>,
    #[serde(default)]
    pub theme: Option<Titled>,
    #[serde(default)]
    pub object: Option<IssueObject>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<IssueComment>,
}

impl IssueRecord {
    /// Minimal record, mostly useful for fixtures.
    #[must_use]
    pub fn new(id: i64, region_id: Option<i64>) -> Self {
        Self {
            id,
            region_id,
            monitor_deadline_at: None,
            deadline_at: None,
            status: None,
            theme: None,
            object: None,
            comments: Vec::new(),
        }
    }

    #[must_use]
    pub fn region_key(&self) -> RegionKey {
        RegionKey::from_region_id(self.region_id)
    }

    #[must_use]
    pub fn status_title(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.title.as_deref())
    }

    #[must_use]
    pub fn theme_title(&self) -> Option<&str> {
        self.theme.as_ref().and_then(|t| t.title.as_deref())
    }

    #[must_use]
    pub fn object_name(&self) -> Option<&str> {
        self.object.as_ref().and_then(|o| o.name.as_deref())
    }

    /// First executor answer found in comment order.
    #[must_use]
    pub fn executor(&self) -> Executor {
        self.comments
            .iter()
            .filter_map(|comment| comment.monitor.as_ref())
            .filter_map(|monitor| monitor.executor_make_answer.as_deref())
            .find(|answer| !answer.is_empty())
            .map_or(Executor::Unassigned, |answer| {
                Executor::Named(answer.to_owned())
            })
    }

    #[must_use]
    pub fn monitor_deadline_date(&self, offset: FixedOffset) -> Option<NaiveDate> {
        self.monitor_deadline_at
            .and_then(|ts| unix_seconds_to_date(ts, offset))
    }

    #[must_use]
    pub fn deadline_date(&self, offset: FixedOffset) -> Option<NaiveDate> {
        self.deadline_at
            .and_then(|ts| unix_seconds_to_date(ts, offset))
    }
}

/// Calendar date of a unix timestamp in the given offset. Zero means "unset".
pub(crate) fn unix_seconds_to_date(ts: i64, offset: FixedOffset) -> Option<NaiveDate> {
    if ts == 0 {
        return None;
    }
    DateTime::from_timestamp(ts, 0).map(|utc| utc.with_timezone(&offset).date_naive())
}

/// Person responsible for answering an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Executor {
    Named(String),
    Unassigned,
}

impl fmt::Display for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Unassigned => f.write_str("unassigned"),
        }
    }
}

/// Issues whose monitor deadline falls on one calendar day, as delivered on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBatch {
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub issues: Vec<IssueRecord>,
}

impl DayBatch {
    #[must_use]
    pub fn new(date: impl Into<String>, issues: Vec<IssueRecord>) -> Self {
        Self {
            date: date.into(),
            issues,
        }
    }
}

/// Detail card for a single issue, as shown when an operator opens it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetail {
    pub id: i64,
    pub region: RegionKey,
    pub theme: Option<String>,
    pub status: Option<String>,
    pub address: Option<String>,
    pub executor: Executor,
    pub monitor_date: Option<NaiveDate>,
    pub deadline_date: Option<NaiveDate>,
}

impl IssueDetail {
    #[must_use]
    pub fn from_record(record: &IssueRecord, offset: FixedOffset) -> Self {
        Self {
            id: record.id,
            region: record.region_key(),
            theme: record.theme_title().map(str::to_owned),
            status: record.status_title().map(str::to_owned),
            address: record.object_name().map(str::to_owned),
            executor: record.executor(),
            monitor_date: record.monitor_deadline_date(offset),
            deadline_date: record.deadline_date(offset),
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate};

    use super::{DayBatch, Executor, IssueDetail, IssueRecord};
    use crate::core::RegionKey;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).expect("offset")
    }

    #[test]
    fn decodes_sparse_and_null_fields() {
        let json = r#"{
            "id": 17,
            "region_id": null,
            "status": {"title": "In progress"},
            "theme": null,
            "comments": null,
            "extra_field": [1, 2, 3]
        }"#;
        let record: IssueRecord = serde_json::from_str(json).expect("decode");
        assert_eq!(record.id, 17);
        assert_eq!(record.region_key(), RegionKey::Unknown);
        assert_eq!(record.status_title(), Some("In progress"));
        assert_eq!(record.theme_title(), None);
        assert!(record.comments.is_empty());
        assert_eq!(record.executor(), Executor::Unassigned);
    }

    #[test]
    fn executor_is_first_comment_with_an_answer() {
        let json = r#"{
            "id": 1,
            "comments": [
                {},
                {"monitor": {}},
                {"monitor": {"executor_make_answer": ""}},
                {"monitor": {"executor_make_answer": "Ivanova"}},
                {"monitor": {"executor_make_answer": "Petrov"}}
            ]
        }"#;
        let record: IssueRecord = serde_json::from_str(json).expect("decode");
        assert_eq!(record.executor(), Executor::Named("Ivanova".to_owned()));
        assert_eq!(Executor::Unassigned.to_string(), "unassigned");
    }

    #[test]
    fn detail_projects_dates_in_offset() {
        let mut record = IssueRecord::new(9, Some(4));
        // 2024-06-01T22:30:00Z
        record.monitor_deadline_at = Some(1_717_281_000);
        record.deadline_at = Some(0);

        let detail = IssueDetail::from_record(&record, utc());
        assert_eq!(detail.monitor_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(detail.deadline_date, None);

        let moscow = FixedOffset::east_opt(3 * 3600).expect("offset");
        let detail = IssueDetail::from_record(&record, moscow);
        assert_eq!(detail.monitor_date, NaiveDate::from_ymd_opt(2024, 6, 2));
        assert_eq!(detail.region, RegionKey::Id(4));
    }

    #[test]
    fn day_batch_defaults_missing_issues() {
        let batch: DayBatch = serde_json::from_str(r#"{"date": "2024-06-01"}"#).expect("decode");
        assert!(batch.issues.is_empty());
    }
}
