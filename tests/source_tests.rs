use std::fs;
use std::path::PathBuf;

use chrono::FixedOffset;
use issue_chart::api::LoadStatus;
use issue_chart::core::{IssueRecord, RegionCatalog};
use issue_chart::source::{
    IssueSource, JsonFileSource, decode_day_batches, group_by_monitor_deadline,
};
use issue_chart::{ChartConfig, ChartError, IssueChart};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "issue-chart-{}-{name}.json",
        std::process::id()
    ));
    fs::write(&path, contents).expect("write temp payload");
    path
}

#[test]
fn json_file_source_feeds_the_chart() {
    let path = temp_file(
        "feed",
        r#"[{"date": "2024-06-01", "issues": [{"id": 1, "region_id": 5}, {"id": 2}]}]"#,
    );
    let source = JsonFileSource::new(&path);
    let mut chart = IssueChart::new(ChartConfig::new(RegionCatalog::new())).expect("chart");

    assert_eq!(chart.refresh_from(&source), &LoadStatus::Ready);
    assert_eq!(chart.aggregation().series()[0].total(), 2);
    fs::remove_file(&path).expect("remove temp payload");
}

#[test]
fn missing_file_is_a_transport_error() {
    let source = JsonFileSource::new(std::env::temp_dir().join("issue-chart-does-not-exist.json"));
    assert!(matches!(source.fetch(), Err(ChartError::Transport(_))));
}

#[test]
fn non_array_payload_is_a_transport_error() {
    let path = temp_file("object", r#"{"date": "2024-06-01", "issues": []}"#);
    let result = JsonFileSource::new(&path).fetch();
    fs::remove_file(&path).expect("remove temp payload");
    assert!(matches!(result, Err(ChartError::Transport(_))));
    assert!(decode_day_batches("not json").is_err());
}

#[test]
fn grouped_issues_aggregate_by_deadline_day() {
    let mut first = IssueRecord::new(1, Some(5));
    first.monitor_deadline_at = Some(1_717_243_200); // 2024-06-01T12:00:00Z
    let mut second = IssueRecord::new(2, Some(5));
    second.monitor_deadline_at = Some(1_717_156_800); // 2024-05-31T12:00:00Z
    let undated = IssueRecord::new(3, Some(5));

    let offset = FixedOffset::east_opt(0).expect("utc");
    let batches = group_by_monitor_deadline(&[first, second, undated], offset);
    let dates: Vec<_> = batches.iter().map(|batch| batch.date.as_str()).collect();
    assert_eq!(dates, vec!["2024-05-31", "2024-06-01"]);

    let mut chart = IssueChart::new(ChartConfig::new(RegionCatalog::new())).expect("chart");
    chart.load_batches(&batches);
    let labels: Vec<_> = chart
        .visible_series()
        .iter()
        .map(|point| point.date().as_str().to_owned())
        .collect();
    assert_eq!(labels, vec!["31.05.24", "01.06.24"]);
}
