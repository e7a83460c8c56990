use super::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

/// Serves a single canned HTTP response and reports the raw request it saw.
fn serve_once(status_line: &str, body: &str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        tx.send(String::from_utf8_lossy(&request).to_string()).unwrap();
    });

    (format!("http://{}/api", addr), rx)
}

fn api_for(base_url: &str, token: Option<&str>) -> HttpUsageApi {
    HttpUsageApi::new(
        base_url,
        token.map(str::to_string),
        Duration::from_secs(5),
    )
}

#[test]
fn test_urls_trim_trailing_slash() {
    let api = api_for("https://example.com/api/", None);
    assert_eq!(api.services_url(), "https://example.com/api/services/list");
    assert_eq!(
        api.usage_url(&ServiceId::new("12"), Period::Month).unwrap(),
        "https://example.com/api/services/12/usage?period=30d"
    );
}

#[test]
fn test_usage_url_rejects_empty_and_unsafe_ids() {
    let api = api_for("https://example.com/api", None);
    assert!(matches!(
        api.usage_url(&ServiceId::new(""), Period::Week),
        Err(FetchError::InvalidRequest(_))
    ));
    assert!(matches!(
        api.usage_url(&ServiceId::new("1/../admin"), Period::Week),
        Err(FetchError::InvalidRequest(_))
    ));
}

#[tokio::test]
async fn test_get_usage_with_empty_id_sends_nothing() {
    // Unroutable base URL: the call must fail before any I/O happens.
    let api = api_for("http://127.0.0.1:1/api", None);
    let result = api.get_usage(&ServiceId::new(" "), Period::Week).await;
    assert!(matches!(result, Err(FetchError::InvalidRequest(_))));
}

#[tokio::test]
async fn test_list_services_sends_bearer_token() {
    let body = r#"{"success":true,"data":[{"id":1,"service_name":"Shop bot","service_type":"LINE Bot"}]}"#;
    let (base_url, request_rx) = serve_once("200 OK", body);
    let api = api_for(&base_url, Some("tok-123"));

    let services = api.list_services().await.unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].service_name, "Shop bot");

    let request = request_rx.recv().unwrap();
    assert!(request.starts_with("GET /api/services/list "));
    assert!(request
        .to_ascii_lowercase()
        .contains("authorization: bearer tok-123"));
}

#[tokio::test]
async fn test_get_usage_decodes_payload() {
    let body = r#"{"success":true,"data":{
        "daily_usage":[{"date":"2024-01-02","bot_messages":"3","api_calls":1}],
        "api_breakdown":[{"api_type":"chat","total_requests":"4"}],
        "recent_messages":[]
    }}"#;
    let (base_url, request_rx) = serve_once("200 OK", body);
    let api = api_for(&base_url, None);

    let payload = api
        .get_usage(&ServiceId::new("9"), Period::Quarter)
        .await
        .unwrap();
    assert_eq!(payload.daily_usage[0].bot_messages, Some(3));
    assert_eq!(payload.api_breakdown[0].total_requests, Some(4));

    let request = request_rx.recv().unwrap();
    assert!(request.starts_with("GET /api/services/9/usage?period=90d "));
    assert!(!request.to_ascii_lowercase().contains("authorization:"));
}

#[tokio::test]
async fn test_non_success_status_carries_backend_message() {
    let body = r#"{"success":false,"message":"Service not found"}"#;
    let (base_url, _request_rx) = serve_once("404 Not Found", body);
    let api = api_for(&base_url, None);

    let err = api
        .get_usage(&ServiceId::new("5"), Period::Week)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        FetchError::Status {
            code: 404,
            message: Some("Service not found".to_string()),
        }
    );
    assert_eq!(err.to_string(), "backend returned HTTP 404: Service not found");
}

#[tokio::test]
async fn test_success_false_envelope_is_rejected() {
    let body = r#"{"success":false,"message":"Failed to get service usage"}"#;
    let (base_url, _request_rx) = serve_once("200 OK", body);
    let api = api_for(&base_url, None);

    let err = api
        .get_usage(&ServiceId::new("5"), Period::Week)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Rejected(Some(_))));
}

#[tokio::test]
async fn test_garbage_body_is_decode_error() {
    let (base_url, _request_rx) = serve_once("200 OK", "<html>oops</html>");
    let api = api_for(&base_url, None);

    let err = api.list_services().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = api_for(&format!("http://{}/api", addr), None);
    let err = api.list_services().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
