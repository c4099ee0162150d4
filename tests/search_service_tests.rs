use std::time::Duration;

use chrono::Duration as ChronoDuration;
use serde_json::json;
use sport_slot_bot::database::connection::DatabaseManager;
use sport_slot_bot::database::models::SearchRecord;
use sport_slot_bot::interpreter::{InterpretError, QueryInterpreter};
use sport_slot_bot::scraper::SlotScraper;
use sport_slot_bot::services::search::SearchService;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PAGE: &str = r#"
<div class="type-search-result location">
  <a href="/nl/sportinfrastructuur/locatie/101">Sporthal Noord</a>
</div>
"#;

const LOCATION_PAGE: &str = r#"
<div class="timeslots">
  <a class="slot">10:00</a>
  <a class="slot">10:30</a>
  <a class="slot">11:00</a>
  <a class="slot">11:30</a>
</div>
"#;

async fn create_service(server: &MockServer) -> (SearchService, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let db = DatabaseManager::new(&format!("sqlite://{}", db_path.display()))
        .await
        .expect("Failed to create test database");
    db.run_migrations().await.expect("Failed to run migrations");

    let interpreter = QueryInterpreter::new(
        "sk-test",
        "gpt-test",
        format!("{}/v1", server.uri()),
        Duration::from_secs(5),
        1.0,
    )
    .expect("Failed to build interpreter");

    let base = Url::parse(&format!("{}/nl/sportinfrastructuur", server.uri())).unwrap();
    let scraper = SlotScraper::new(base, "2317", Duration::from_secs(5), 4)
        .expect("Failed to build scraper");

    (SearchService::new(interpreter, scraper, db, 1.0), temp_dir)
}

async fn mount_site(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/nl/sportinfrastructuur/zoeken"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/nl/sportinfrastructuur/locatie/101"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOCATION_PAGE))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_text_end_to_end() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let day = SearchService::today() + ChronoDuration::days(1);
    let reply = format!(
        "[{{\"duration_hours\": 2, \"date\": \"{day}\", \"start_time\": \"10:00\", \"end_time\": \"12:00\"}}]"
    );
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": reply}}]
        })))
        .mount(&server)
        .await;

    let (service, _temp_dir) = create_service(&server).await;
    let outcome = service
        .search_text(55, 7, "tomorrow morning for two hours")
        .await
        .expect("Search should succeed");

    assert_eq!(outcome.queries.len(), 1);
    assert_eq!(outcome.slots.len(), 1);
    assert_eq!(outcome.slots[0].location_name, "Sporthal Noord");
    assert_eq!(outcome.slots[0].date, day);

    let history = SearchRecord::find_recent_by_chat(&service.db().pool, 55, 10)
        .await
        .expect("Failed to load history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].user_id, 7);
    assert_eq!(history[0].query_text, "tomorrow morning for two hours");
    assert_eq!(history[0].query_count, 1);
    assert_eq!(history[0].result_count, 1);
}

#[tokio::test]
async fn test_search_text_direct_form_without_model() {
    let server = MockServer::start().await;
    mount_site(&server).await;

    let (service, _temp_dir) = create_service(&server).await;
    let day = SearchService::today() + ChronoDuration::days(3);
    let outcome = service
        .search_text(1, 1, &format!("{} 10:00-12:00 1h", day.format("%Y-%m-%d")))
        .await
        .expect("Search should succeed");

    assert_eq!(outcome.slots.len(), 3);

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.iter().all(|r| r.method.as_str() == "GET"));
}

#[tokio::test]
async fn test_search_text_interpretation_failure_is_not_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (service, _temp_dir) = create_service(&server).await;
    let result = service.search_text(9, 9, "whenever").await;
    assert!(matches!(result, Err(InterpretError::Api { .. })));

    let stats = SearchRecord::stats_for_chat(&service.db().pool, 9).await.unwrap();
    assert_eq!(stats.total_searches, 0);
}

#[tokio::test]
async fn test_staged_search_records_only_interpreted_requests() {
    let server = MockServer::start().await;
    mount_site(&server).await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (service, _temp_dir) = create_service(&server).await;

    // Interpretation failure: the chat handler stops before scraping.
    assert!(service.interpret("whenever suits").await.is_err());
    let stats = SearchRecord::stats_for_chat(&service.db().pool, 21).await.unwrap();
    assert_eq!(stats.total_searches, 0);

    let day = SearchService::today() + ChronoDuration::days(2);
    let text = format!("{} 10:00-12:00 1h", day.format("%Y-%m-%d"));
    let queries = service.interpret(&text).await.expect("Direct form should parse");
    let slots = service.search_and_record(21, 4, &text, &queries).await;
    assert_eq!(slots.len(), 3);

    let history = SearchRecord::find_recent_by_chat(&service.db().pool, 21, 10)
        .await
        .expect("Failed to load history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].query_text, text);
    assert_eq!(history[0].query_count, 1);
    assert_eq!(history[0].result_count, 3);
}

#[tokio::test]
async fn test_prepare_uses_default_duration() {
    let server = MockServer::start().await;
    let (service, _temp_dir) = create_service(&server).await;

    let raw = sport_slot_bot::slots::RawSlotQuery {
        date: None,
        start_time: Some("19:00".to_string()),
        end_time: Some("22:00".to_string()),
        duration_hours: None,
    };
    let queries = tokio_test::assert_ok!(service.prepare(vec![raw]));

    assert_eq!(queries[0].date, SearchService::today());
    assert_eq!(queries[0].duration_hours, service.default_duration_hours());
}
