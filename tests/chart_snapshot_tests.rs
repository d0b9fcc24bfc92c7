use issue_chart::api::{CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, LoadStatus};
use issue_chart::core::{DateKey, DayBatch, IssueRecord, RegionCatalog, RegionKey};
use issue_chart::interaction::SelectionMode;
use issue_chart::{ChartConfig, IssueChart};

fn key(label: &str) -> DateKey {
    DateKey::parse(label).expect("date key")
}

fn loaded_chart() -> IssueChart {
    let regions = RegionCatalog::new()
        .with_region(5, "South")
        .with_region(7, "East");
    let mut chart = IssueChart::new(ChartConfig::new(regions)).expect("chart");
    let mut batches: Vec<_> = (1..=5)
        .map(|day| {
            DayBatch::new(
                format!("2024-06-{day:02}"),
                vec![IssueRecord::new(day, Some(5)), IssueRecord::new(day + 100, None)],
            )
        })
        .collect();
    batches.push(DayBatch::new("bogus", vec![IssueRecord::new(999, Some(7))]));
    chart.load_batches(&batches);
    chart
}

#[test]
fn snapshot_reflects_session_state() {
    let mut chart = loaded_chart();
    chart.toggle_region(RegionKey::Id(7));
    chart.set_brush(1, 2);
    assert!(chart.select_date_label("02.06.24").expect("label"));

    let snapshot = chart.snapshot_at(key("03.06.24"));
    assert_eq!(snapshot.status, LoadStatus::Ready);
    assert_eq!(snapshot.selection_mode, SelectionMode::Partial);
    assert_eq!(snapshot.selected_regions, vec![RegionKey::Id(5)]);
    assert_eq!(snapshot.visible_range, (1, 3));
    assert_eq!(snapshot.series.len(), 2);
    assert!(snapshot.series.iter().all(|point| point.total() == 1));
    assert_eq!(snapshot.visible_regions, vec![RegionKey::Id(5)]);
    assert_eq!(snapshot.today_position, Some(1));
    assert_eq!(snapshot.selected_date, Some(key("02.06.24")));
    assert_eq!(snapshot.skipped_batches.len(), 1);
    assert_eq!(snapshot.skipped_batches[0].date, "bogus");
}

#[test]
fn snapshot_contract_v1_roundtrip() {
    let mut chart = loaded_chart();
    chart.set_brush(1, 2);
    let snapshot = chart.snapshot_at(key("01.01.30"));

    let json = snapshot
        .to_json_contract_v1_pretty()
        .expect("snapshot contract should serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(
        value["schema_version"],
        serde_json::json!(CHART_SNAPSHOT_JSON_SCHEMA_V1)
    );
    assert_eq!(value["snapshot"]["series"][0]["date"], "02.06.24");
    assert_eq!(value["snapshot"]["series"][0]["unknown"], 1);

    let restored = ChartSnapshot::from_json_compat_str(&json).expect("contract should parse");
    assert_eq!(restored, snapshot);
}

#[test]
fn bare_snapshot_json_is_accepted() {
    let snapshot = loaded_chart().snapshot_at(key("01.06.24"));
    let json = snapshot.to_json_pretty().expect("snapshot should serialize");
    let restored = ChartSnapshot::from_json_compat_str(&json).expect("bare snapshot should parse");
    assert_eq!(restored, snapshot);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let snapshot = loaded_chart().snapshot_at(key("01.06.24"));
    let mut value: serde_json::Value = serde_json::from_str(
        &snapshot
            .to_json_contract_v1_pretty()
            .expect("snapshot contract should serialize"),
    )
    .expect("valid json");
    value["schema_version"] = serde_json::json!(2);

    let err = ChartSnapshot::from_json_compat_str(&value.to_string())
        .expect_err("version 2 should be rejected");
    assert!(err.to_string().contains("unsupported snapshot schema version"));
}

#[test]
fn inconsistent_total_is_rejected() {
    let snapshot = loaded_chart().snapshot_at(key("01.06.24"));
    let mut value = serde_json::to_value(&snapshot).expect("serialize");
    value["series"][0]["total"] = serde_json::json!(7);
    assert!(ChartSnapshot::from_json_compat_str(&value.to_string()).is_err());
}
