use super::*;
use crate::usage_api::fake::{FakeCall, FakeUsageApi};
use crate::usage_api::{
    ApiBreakdownRecord, DailyUsageRecord, Direction, FetchError, Period, RecentMessage, Service,
    ServiceId, UsagePayload,
};
use chrono::{NaiveDate, TimeZone};
use tempfile::TempDir;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn payload() -> UsagePayload {
    UsagePayload {
        daily_usage: vec![
            DailyUsageRecord::new(day(3), 5, 2),
            DailyUsageRecord::new(day(2), 3, 1),
            DailyUsageRecord::new(day(1), 0, 0),
        ],
        api_breakdown: vec![
            ApiBreakdownRecord::new("chat", 1500),
            ApiBreakdownRecord::new("vision", 500),
        ],
        recent_messages: vec![RecentMessage {
            direction: Direction::Incoming,
            message_type: Some("text".to_string()),
            message_content: Some("hello".to_string()),
            created_at: Some(Utc.with_ymd_and_hms(2024, 1, 3, 11, 55, 0).unwrap()),
        }],
        skipped_records: 0,
    }
}

fn api() -> FakeUsageApi {
    FakeUsageApi::new()
        .with_services(vec![
            Service::new("1", "Shop bot", "LINE Bot"),
            Service::new("2", "Support", "API"),
        ])
        .with_usage("1", Period::Week, payload())
        .with_usage("2", Period::Month, UsagePayload::default())
}

#[tokio::test]
async fn test_collect_snapshot_loads_first_service() {
    let api = api();
    let mut dashboard = Dashboard::new(Period::Week, 50);

    let snapshot = collect_snapshot(&api, &mut dashboard, None).await.unwrap();

    assert_eq!(snapshot.service_id, ServiceId::new("1"));
    assert_eq!(snapshot.service_label, "Shop bot (LINE Bot)");
    assert_eq!(snapshot.totals.total_bot_messages, 8);
    assert_eq!(snapshot.totals.total_api_calls, 3);
    assert_eq!(snapshot.trend.len(), 3);
    assert_eq!(snapshot.trend[0].date, day(1));
    assert_eq!(
        api.calls(),
        vec![
            FakeCall::ListServices,
            FakeCall::Usage(ServiceId::new("1"), Period::Week)
        ]
    );
}

#[tokio::test]
async fn test_collect_snapshot_honors_preferred_service_and_period() {
    let api = api();
    let mut dashboard =
        Dashboard::new(Period::Month, 50).with_preferred_service(Some(ServiceId::new("2")));

    let snapshot = collect_snapshot(&api, &mut dashboard, None).await.unwrap();

    assert_eq!(snapshot.service_id, ServiceId::new("2"));
    assert_eq!(snapshot.period, Period::Month);
    assert_eq!(snapshot.totals.total_bot_messages, 0);
    assert!(snapshot.trend.is_empty());
    assert!(snapshot.breakdown.is_empty());
}

#[tokio::test]
async fn test_collect_snapshot_reports_services_failure() {
    let api = FakeUsageApi::new().with_services_error(FetchError::Status {
        code: 500,
        message: None,
    });
    let mut dashboard = Dashboard::new(Period::Week, 50);

    let err = collect_snapshot(&api, &mut dashboard, None)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Failed to load services: backend returned HTTP 500"
    );
}

#[tokio::test]
async fn test_collect_snapshot_reports_usage_failure() {
    let api = FakeUsageApi::new().with_services(vec![Service::new("9", "Lonely", "")]);
    let mut dashboard = Dashboard::new(Period::Week, 50);

    let err = collect_snapshot(&api, &mut dashboard, None)
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Failed to load usage data"));
}

#[tokio::test]
async fn test_collect_snapshot_with_no_services() {
    let api = FakeUsageApi::new().with_services(Vec::new());
    let mut dashboard = Dashboard::new(Period::Week, 50);

    let err = collect_snapshot(&api, &mut dashboard, None)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "No services found for this account");
    assert_eq!(api.calls(), vec![FakeCall::ListServices]);
}

#[tokio::test]
async fn test_collect_snapshot_writes_event_log() {
    let temp_dir = TempDir::new().unwrap();
    let logger = StructuredLogger::new("headless", temp_dir.path()).unwrap();
    let api = api();
    let mut dashboard = Dashboard::new(Period::Week, 50);

    collect_snapshot(&api, &mut dashboard, Some(&logger))
        .await
        .unwrap();

    let content = std::fs::read_to_string(logger.path()).unwrap();
    let types: Vec<String> = content
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["event"]["type"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(
        types,
        vec!["FetchIssued", "ServicesLoaded", "FetchIssued", "UsageRendered"]
    );
}

#[tokio::test]
async fn test_text_and_json_output() {
    let api = api();
    let mut dashboard = Dashboard::new(Period::Week, 50);
    let snapshot = collect_snapshot(&api, &mut dashboard, None).await.unwrap();
    let now = Utc.with_ymd_and_hms(2024, 1, 3, 12, 0, 0).unwrap();

    let text = format_snapshot_text(&snapshot, now);
    assert!(text.starts_with("Shop bot (LINE Bot) (1), Last 7 days\n"));
    assert!(text.contains("Bot messages: 8"));
    assert!(text.contains("API calls:    3"));
    assert!(text.contains("2024-01-01"));
    assert!(text.contains("1,500"));
    assert!(text.contains("75.0%"));
    assert!(text.contains("5 min ago"));
    assert!(text.contains("hello"));

    let json: serde_json::Value =
        serde_json::from_str(&format_snapshot_json(&snapshot).unwrap()).unwrap();
    assert_eq!(json["service_id"], "1");
    assert_eq!(json["period"], "7d");
    assert_eq!(json["totals"]["total_bot_messages"], 8);
    assert_eq!(json["breakdown"]["state"], "categories");
    assert_eq!(json["trend"][0]["date"], "2024-01-01");
    assert_eq!(json["recent_messages"]["entries"][0]["direction"], "incoming");
}

#[tokio::test]
async fn test_text_output_empty_states() {
    let api = api();
    let mut dashboard =
        Dashboard::new(Period::Month, 50).with_preferred_service(Some(ServiceId::new("2")));
    let snapshot = collect_snapshot(&api, &mut dashboard, None).await.unwrap();

    let text = format_snapshot_text(&snapshot, Utc::now());
    assert_eq!(text.matches("No data").count(), 2);
    assert!(text.contains("No messages"));
}
