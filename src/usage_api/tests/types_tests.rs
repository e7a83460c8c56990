use super::*;
use serde_json::json;

#[test]
fn test_service_id_accepts_numbers_and_strings() {
    let from_number: ServiceId = serde_json::from_value(json!(42)).unwrap();
    let from_string: ServiceId = serde_json::from_value(json!(" 42 ")).unwrap();
    assert_eq!(from_number, from_string);
    assert_eq!(from_number.as_str(), "42");
}

#[test]
fn test_service_id_rejects_objects() {
    let result: Result<ServiceId, _> = serde_json::from_value(json!({"id": 1}));
    assert!(result.is_err());
}

#[test]
fn test_period_round_trips_wire_form() {
    for period in Period::ALL {
        let parsed: Period = period.as_str().parse().unwrap();
        assert_eq!(parsed, period);
        assert_eq!(
            serde_json::to_value(period).unwrap(),
            json!(period.as_str())
        );
    }
    assert!("24h".parse::<Period>().is_err());
}

#[test]
fn test_period_cycles_in_selector_order() {
    assert_eq!(Period::Week.next(), Period::Month);
    assert_eq!(Period::Month.next(), Period::Quarter);
    assert_eq!(Period::Quarter.next(), Period::Week);
    assert_eq!(Period::Month.label(), "Last 30 days");
}

#[test]
fn test_service_decodes_list_row() {
    let service: Service = serde_json::from_value(json!({
        "id": 7,
        "service_name": "Shop bot",
        "service_type": "LINE Bot",
        "platform": "line",
        "api_key": "secret",
        "status": "active",
        "messages_24h": "15",
        "api_calls_24h": null
    }))
    .unwrap();

    assert_eq!(service.id, ServiceId::new("7"));
    assert_eq!(service.display_label(), "Shop bot (LINE Bot)");
    assert_eq!(service.platform.as_deref(), Some("line"));
    assert_eq!(service.messages_24h, Some(15));
    assert_eq!(service.api_calls_24h, None);
}

#[test]
fn test_service_label_without_type() {
    let service = Service::new("3", "", "");
    assert_eq!(service.display_label(), "Service 3");
}

#[test]
fn test_daily_usage_tolerates_malformed_fields() {
    let records: Vec<DailyUsageRecord> = serde_json::from_value(json!([
        {"date": "2024-01-03", "bot_messages": "5", "api_calls": 2},
        {"date": "2024-01-02", "bot_messages": null, "api_calls": "abc"},
        {"date": "2024-01-01"},
        {"date": "2024-01-04 00:00:00", "bot_messages": 3.9, "api_calls": -4}
    ]))
    .unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(records[0].bot_messages, Some(5));
    assert_eq!(records[1].bot_messages, None);
    assert_eq!(records[1].api_calls, None);
    assert_eq!(records[2].bot_messages_or_zero(), 0);
    assert_eq!(
        records[3].date,
        NaiveDate::from_ymd_opt(2024, 1, 4)
    );
    assert_eq!(records[3].bot_messages, Some(3));
    assert_eq!(records[3].api_calls, Some(0));
}

#[test]
fn test_unparseable_date_is_none() {
    let record: DailyUsageRecord =
        serde_json::from_value(json!({"date": "yesterday", "bot_messages": 1})).unwrap();
    assert_eq!(record.date, None);
    assert_eq!(record.bot_messages, Some(1));
}

#[test]
fn test_breakdown_record_optional_metrics() {
    let record: ApiBreakdownRecord = serde_json::from_value(json!({
        "api_type": "vision",
        "total_requests": "120",
        "avg_response_time": "350.25",
        "total_cost": null
    }))
    .unwrap();

    assert_eq!(record.total_requests_or_zero(), 120);
    assert_eq!(record.avg_response_time, Some(350.25));
    assert_eq!(record.total_cost, None);
}

#[test]
fn test_recent_message_direction_and_content() {
    let messages: Vec<RecentMessage> = serde_json::from_value(json!([
        {"direction": "incoming", "message_content": "hello", "created_at": "2024-01-03T10:00:00Z"},
        {"direction": "outgoing", "message_content": "   ", "created_at": "2024-01-03 09:00:00"},
        {"direction": null, "message_content": {"type": "image"}},
        {"direction": "INCOMING"}
    ]))
    .unwrap();

    assert_eq!(messages[0].direction, Direction::Incoming);
    assert_eq!(messages[0].content(), Some("hello"));
    assert_eq!(
        messages[0].created_at.map(|ts| ts.to_rfc3339()),
        Some("2024-01-03T10:00:00+00:00".to_string())
    );
    assert_eq!(messages[1].direction, Direction::Outgoing);
    assert_eq!(messages[1].content(), None);
    assert!(messages[1].created_at.is_some());
    assert_eq!(messages[2].direction, Direction::Outgoing);
    assert_eq!(messages[2].content(), Some(r#"{"type":"image"}"#));
    assert_eq!(messages[2].created_at, None);
    assert_eq!(messages[3].direction, Direction::Incoming);
}

#[test]
fn test_payload_null_collections_are_empty() {
    let payload: UsagePayload = serde_json::from_value(json!({
        "daily_usage": [],
        "api_breakdown": null
    }))
    .unwrap();

    assert!(payload.daily_usage.is_empty());
    assert!(payload.api_breakdown.is_empty());
    assert!(payload.recent_messages.is_empty());
}

#[test]
fn test_envelope_success_returns_data() {
    let envelope: ApiEnvelope<Vec<Service>> = serde_json::from_value(json!({
        "success": true,
        "data": [{"id": 1, "service_name": "A", "service_type": "Bot"}]
    }))
    .unwrap();

    let services = envelope.into_result().unwrap();
    assert_eq!(services.len(), 1);
}

#[test]
fn test_envelope_failure_is_rejected() {
    let envelope: ApiEnvelope<UsagePayload> = serde_json::from_value(json!({
        "success": false,
        "message": "Service not found"
    }))
    .unwrap();

    assert_eq!(
        envelope.into_result(),
        Err(FetchError::Rejected(Some("Service not found".to_string())))
    );
}

#[test]
fn test_envelope_success_without_data_is_decode_error() {
    let envelope: ApiEnvelope<UsagePayload> =
        serde_json::from_value(json!({"success": true})).unwrap();
    assert!(matches!(envelope.into_result(), Err(FetchError::Decode(_))));
}

#[test]
fn test_payload_drops_non_record_elements_and_keeps_the_rest() {
    let payload: UsagePayload = serde_json::from_str(
        r#"{
            "daily_usage": [
                {"date": "2024-01-02", "bot_messages": 3, "api_calls": 1},
                null,
                "garbage",
                {"date": "2024-01-01", "bot_messages": "5", "api_calls": 2}
            ],
            "api_breakdown": [{"api_type": "chat", "total_requests": 4}, 17],
            "recent_messages": [null, {"direction": "incoming", "message_content": "hi"}]
        }"#,
    )
    .unwrap();

    assert_eq!(payload.daily_usage.len(), 2);
    assert_eq!(payload.daily_usage[1].bot_messages, Some(5));
    assert_eq!(payload.api_breakdown.len(), 1);
    assert_eq!(payload.recent_messages.len(), 1);
    assert_eq!(payload.skipped_records, 4);
}

#[test]
fn test_envelope_with_mixed_daily_usage_still_decodes() {
    let envelope: ApiEnvelope<UsagePayload> = serde_json::from_value(json!({
        "success": true,
        "data": {"daily_usage": [null, {"date": "2024-01-03", "bot_messages": 1}]}
    }))
    .unwrap();

    let payload = envelope.into_result().unwrap();
    assert_eq!(payload.daily_usage.len(), 1);
    assert_eq!(payload.skipped_records, 1);
}

#[test]
fn test_numeric_strings_read_leading_integer() {
    let cases = [
        (json!("12abc"), Some(12)),
        (json!("1e3"), Some(1)),
        (json!(" 42 "), Some(42)),
        (json!("+7"), Some(7)),
        (json!("12.9"), Some(12)),
        (json!("-5"), Some(0)),
        (json!("abc"), None),
        (json!("-"), None),
        (json!(""), None),
        (json!("99999999999999999999999"), Some(u64::MAX)),
        (json!(1e3), Some(1000)),
        (json!(3.9), Some(3)),
        (json!(true), None),
    ];
    for (value, expected) in cases {
        assert_eq!(lenient::coerce_u64(&value), expected, "coercing {}", value);
    }
}
