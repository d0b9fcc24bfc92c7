use issue_chart::core::{DateKey, DayBatch, IssueRecord, RegionKey, aggregate};
use issue_chart::source::decode_day_batches;

fn key(label: &str) -> DateKey {
    DateKey::parse(label).expect("date key")
}

#[test]
fn scenario_two_batches_same_day_merge() {
    let batches = decode_day_batches(
        r#"[
            {"date": "2024-06-01", "issues": [{"id": 1, "region_id": 5}, {"id": 2, "region_id": null}]},
            {"date": "2024-06-01", "issues": [{"id": 3, "region_id": 5}]}
        ]"#,
    )
    .expect("payload");

    let aggregation = aggregate(&batches);
    assert_eq!(aggregation.series().len(), 1);

    let point = &aggregation.series()[0];
    let json = serde_json::to_value(point).expect("serialize point");
    assert_eq!(
        json,
        serde_json::json!({"date": "01.06.24", "total": 3, "5": 2, "unknown": 1})
    );

    let ids: Vec<_> = aggregation
        .index()
        .records(&key("01.06.24"), RegionKey::Id(5))
        .iter()
        .map(|record| record.id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
    let unknown: Vec<_> = aggregation
        .index()
        .records(&key("01.06.24"), RegionKey::Unknown)
        .iter()
        .map(|record| record.id)
        .collect();
    assert_eq!(unknown, vec![2]);
}

#[test]
fn unknown_region_counts_toward_total_only_under_unknown() {
    let aggregation = aggregate(&[DayBatch::new(
        "2024-06-05",
        vec![IssueRecord::new(1, None), IssueRecord::new(2, None)],
    )]);
    let point = &aggregation.series()[0];
    assert_eq!(point.total(), 2);
    let regions: Vec<_> = point.counts().map(|(region, _)| region).collect();
    assert_eq!(regions, vec![RegionKey::Unknown]);
}

#[test]
fn year_boundary_sorts_by_calendar() {
    let batches = vec![
        DayBatch::new("2025-01-01", vec![IssueRecord::new(1, Some(1))]),
        DayBatch::new("2024-12-31", vec![IssueRecord::new(2, Some(1))]),
        DayBatch::new("2024-02-15", vec![IssueRecord::new(3, Some(1))]),
    ];
    let aggregation = aggregate(&batches);
    let labels: Vec<_> = aggregation
        .series()
        .iter()
        .map(|point| point.date().as_str().to_owned())
        .collect();
    assert_eq!(labels, vec!["15.02.24", "31.12.24", "01.01.25"]);

    let index_dates: Vec<_> = aggregation
        .index()
        .dates()
        .map(|date| date.as_str().to_owned())
        .collect();
    assert_eq!(index_dates, labels);
}

#[test]
fn malformed_dates_are_reported_and_rest_aggregates() {
    let batches = vec![
        DayBatch::new("2024-06-01", vec![IssueRecord::new(1, Some(5))]),
        DayBatch::new("2024-02-30", vec![IssueRecord::new(2, Some(5))]),
        DayBatch::new("", Vec::new()),
        DayBatch::new("2024-06-02", vec![IssueRecord::new(3, Some(5))]),
    ];
    let aggregation = aggregate(&batches);
    assert_eq!(aggregation.len(), 2);

    let skipped: Vec<_> = aggregation
        .skipped()
        .iter()
        .map(|skip| skip.date.as_str())
        .collect();
    assert_eq!(skipped, vec!["2024-02-30", ""]);
    assert!(aggregation.skipped()[0].reason.contains("YYYY-MM-DD"));
}

#[test]
fn point_lookup_by_date() {
    let aggregation = aggregate(&[
        DayBatch::new("2024-06-02", vec![IssueRecord::new(1, Some(5))]),
        DayBatch::new("2024-06-01", vec![IssueRecord::new(2, Some(7))]),
    ]);
    assert_eq!(aggregation.position_of(&key("02.06.24")), Some(1));
    assert_eq!(
        aggregation
            .point(&key("01.06.24"))
            .map(|point| point.count(RegionKey::Id(7))),
        Some(1)
    );
    assert!(aggregation.point(&key("03.06.24")).is_none());
}
