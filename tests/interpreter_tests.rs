use std::time::Duration;

use chrono::{Duration as ChronoDuration, Local, NaiveDate, NaiveTime};
use serde_json::json;
use sport_slot_bot::interpreter::{InterpretError, QueryInterpreter};
use wiremock::matchers::{bearer_token, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn interpreter_for(server: &MockServer) -> QueryInterpreter {
    QueryInterpreter::new(
        "sk-test",
        "gpt-test",
        format!("{}/v1/", server.uri()),
        Duration::from_secs(5),
        1.0,
    )
    .expect("Failed to build interpreter")
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

#[tokio::test]
async fn test_interpret_through_model() {
    let server = MockServer::start().await;
    let day = today() + ChronoDuration::days(2);
    let reply = format!(
        "```json\n[{{\"duration_hours\": 1.5, \"date\": \"{day}\", \"start_time\": \"18:00\", \"end_time\": \"20:00\"}},\
         {{\"duration_hours\": 1.5, \"date\": \"{day}\", \"start_time\": \"19:30\", \"end_time\": \"23:30\"}}]\n```"
    );

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(bearer_token("sk-test"))
        .and(body_partial_json(json!({"model": "gpt-test"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&reply)))
        .expect(1)
        .mount(&server)
        .await;

    let queries = interpreter_for(&server)
        .interpret("the day after tomorrow, evening, 1.5 hours", today())
        .await
        .expect("Interpretation should succeed");

    // Overlapping windows are merged and the end is clamped to closing time.
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].date, day);
    assert_eq!(queries[0].start_time, t(18, 0));
    assert_eq!(queries[0].end_time, t(23, 0));
    assert_eq!(queries[0].duration_hours, 1.5);
}

#[tokio::test]
async fn test_direct_form_skips_model() {
    let server = MockServer::start().await;
    let day = today() + ChronoDuration::days(1);

    let queries = interpreter_for(&server)
        .interpret(&format!("{} 19:00-22:00 2h", day.format("%Y-%m-%d")), today())
        .await
        .expect("Direct form should parse");

    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].start_time, t(19, 0));
    assert_eq!(queries[0].end_time, t(22, 0));
    assert_eq!(queries[0].duration_hours, 2.0);

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_api_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let result = interpreter_for(&server).interpret("tomorrow evening", today()).await;
    match result {
        Err(InterpretError::Api { status, body }) => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let result = interpreter_for(&server).interpret("tomorrow evening", today()).await;
    assert!(matches!(result, Err(InterpretError::EmptyReply)));
}

#[tokio::test]
async fn test_malformed_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion("I could not find a date in that.")),
        )
        .mount(&server)
        .await;

    let result = interpreter_for(&server).interpret("something vague", today()).await;
    assert!(matches!(result, Err(InterpretError::Malformed(_))));
}

#[tokio::test]
async fn test_reply_with_only_past_dates() {
    let server = MockServer::start().await;
    let past = today() - ChronoDuration::days(3);
    let reply = format!("[{{\"date\": \"{past}\", \"start_time\": \"10:00\", \"end_time\": \"12:00\"}}]");

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(&reply)))
        .mount(&server)
        .await;

    let result = interpreter_for(&server).interpret("last monday morning", today()).await;
    assert!(matches!(result, Err(InterpretError::NothingUsable)));
}
