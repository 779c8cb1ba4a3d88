//! HTTP behaviour of `/concordances/{uuid}` against in-memory back-ends.

mod common;

use axum::http::StatusCode;
use common::{CONCEPT_ID, app, app_with_store, path, payload};
use concordance_core::ConcordanceRecord;
use testing::InMemoryConcordanceStore;

fn stored_record() -> ConcordanceRecord {
    ConcordanceRecord::new(CONCEPT_ID, vec!["1".to_string(), "2".to_string()])
}

#[tokio::test]
async fn test_put_then_get_round_trip() {
    let app = app();

    let response = app
        .put(&path(CONCEPT_ID), &payload(CONCEPT_ID, &["1", "2"]))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body.is_empty());

    let response = app.get(&path(CONCEPT_ID)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        r#"{"conceptId":"4f50b156-6c50-4693-b835-02f70d3f3bc0","concordedIds":["1","2"]}"#
    );
    assert_eq!(app.notifier.sent(), vec![CONCEPT_ID]);
}

#[tokio::test]
async fn test_put_existing_record_is_update() {
    let app = app_with_store(InMemoryConcordanceStore::new().with_record(stored_record()));

    let response = app.put(&path(CONCEPT_ID), &payload(CONCEPT_ID, &["3"])).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_empty());
    assert_eq!(
        app.store.get(CONCEPT_ID).unwrap().concorded_ids,
        vec!["3".to_string()]
    );
}

#[tokio::test]
async fn test_put_same_body_twice_is_create_then_update() {
    let app = app();
    let body = payload(CONCEPT_ID, &["1"]);

    assert_eq!(app.put(&path(CONCEPT_ID), &body).await.status, StatusCode::CREATED);
    assert_eq!(app.put(&path(CONCEPT_ID), &body).await.status, StatusCode::OK);
    assert_eq!(app.notifier.sent_count(), 2);
}

#[tokio::test]
async fn test_put_corrupted_json() {
    let app = app();

    let response = app.put(&path(CONCEPT_ID), "{\"conceptId\":").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.content_type(), Some("application/json"));
    assert_eq!(
        response.json()["message"],
        "Invalid payload. Error: Corrupted JSON"
    );
    assert_eq!(app.store.total_calls(), 0);
}

#[tokio::test]
async fn test_put_empty_body_is_corrupted_json() {
    let app = app();

    let response = app.put(&path(CONCEPT_ID), "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json()["message"],
        "Invalid payload. Error: Corrupted JSON"
    );
}

#[tokio::test]
async fn test_put_mismatched_id_never_reaches_storage() {
    let app = app();
    let other = "11111111-2222-4333-8444-555555555555";

    let response = app.put(&path(CONCEPT_ID), &payload(other, &["1"])).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let message = response.json()["message"].as_str().unwrap().to_string();
    assert!(message.contains(CONCEPT_ID));
    assert!(message.contains(other));
    assert_eq!(app.store.total_calls(), 0);
    assert_eq!(app.notifier.sent_count(), 0);
}

#[tokio::test]
async fn test_put_without_concept_id() {
    let app = app();

    let response = app.put(&path(CONCEPT_ID), r#"{"concordedIds":["1"]}"#).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let message = response.json()["message"].as_str().unwrap().to_string();
    assert!(message.contains("Concept UUID in payload is different from UUID path parameter"));
    assert!(message.contains(CONCEPT_ID));
    assert_eq!(app.store.total_calls(), 0);
}

#[tokio::test]
async fn test_put_null_body_is_an_id_mismatch() {
    let app = app();

    let response = app.put(&path(CONCEPT_ID), "null").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let message = response.json()["message"].as_str().unwrap().to_string();
    assert!(message.starts_with(
        "Invalid payload. Error: Concept UUID in payload is different from UUID path parameter"
    ));
    assert!(message.contains(CONCEPT_ID));
    assert_eq!(app.store.total_calls(), 0);
}

#[tokio::test]
async fn test_put_without_concorded_ids() {
    let app = app();

    for body in [
        format!(r#"{{"conceptId":"{CONCEPT_ID}"}}"#),
        format!(r#"{{"conceptId":"{CONCEPT_ID}","concordedIds":null}}"#),
        payload(CONCEPT_ID, &[]),
    ] {
        let response = app.put(&path(CONCEPT_ID), &body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(
            response.json()["message"],
            "Invalid payload. Error: Payload has no concorded UUIDs to store."
        );
    }
    assert_eq!(app.store.total_calls(), 0);
}

#[tokio::test]
async fn test_put_storage_failure_is_unavailable() {
    let app = app();
    app.store.set_unavailable(true);

    let response = app.put(&path(CONCEPT_ID), &payload(CONCEPT_ID, &["1"])).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json()["message"], "Error storing concordances");
    assert_eq!(app.notifier.sent_count(), 0);
}

#[tokio::test]
async fn test_put_notification_failure_is_unavailable_but_record_persists() {
    let app = app();
    app.notifier.set_failing(true);

    let response = app.put(&path(CONCEPT_ID), &payload(CONCEPT_ID, &["1"])).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json()["message"], "Error storing concordances");
    assert!(app.store.get(CONCEPT_ID).is_some());
}

#[tokio::test]
async fn test_get_missing_record() {
    let app = app();

    let response = app.get(&path(CONCEPT_ID)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.content_type(), Some("application/json"));
    assert_eq!(response.json()["message"], "Concordances not found");
}

#[tokio::test]
async fn test_get_storage_failure() {
    let app = app();
    app.store.set_unavailable(true);

    let response = app.get(&path(CONCEPT_ID)).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json()["message"], "Error retrieving concordances");
}

#[tokio::test]
async fn test_get_never_notifies() {
    let app = app_with_store(InMemoryConcordanceStore::new().with_record(stored_record()));

    assert_eq!(app.get(&path(CONCEPT_ID)).await.status, StatusCode::OK);
    assert_eq!(app.notifier.sent_count(), 0);
}

#[tokio::test]
async fn test_uppercase_uuid_is_accepted() {
    let app = app();
    let upper = CONCEPT_ID.to_uppercase();

    let response = app.put(&path(&upper), &payload(&upper, &["1"])).await;
    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_non_uuid_path_is_not_found_before_storage() {
    let app = app();

    let get = app.get(&path("not-a-uuid")).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
    assert_eq!(get.content_type(), Some("application/json"));
    assert_eq!(get.json()["message"], "Concordances not found");

    let put = app.put(&path("not-a-uuid"), &payload("not-a-uuid", &["1"])).await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);

    let delete = app.delete(&path("not-a-uuid")).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    assert_eq!(app.store.total_calls(), 0);
    assert_eq!(app.notifier.sent_count(), 0);
}

#[tokio::test]
async fn test_delete_existing_record() {
    let app = app_with_store(InMemoryConcordanceStore::new().with_record(stored_record()));

    let response = app.delete(&path(CONCEPT_ID)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_empty());
    assert_eq!(app.notifier.sent(), vec![CONCEPT_ID]);

    assert_eq!(app.get(&path(CONCEPT_ID)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_record_does_not_notify() {
    let app = app();

    let response = app.delete(&path(CONCEPT_ID)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["message"], "Concordances not found");
    assert_eq!(app.notifier.sent_count(), 0);
}

#[tokio::test]
async fn test_delete_notification_failure_is_unavailable() {
    let app = app_with_store(InMemoryConcordanceStore::new().with_record(stored_record()));
    app.notifier.set_failing(true);

    let response = app.delete(&path(CONCEPT_ID)).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.json()["message"], "Error deleting concordances");
    assert!(app.store.get(CONCEPT_ID).is_none());
}

#[tokio::test]
async fn test_delete_storage_failure_is_unavailable() {
    let app = app_with_store(InMemoryConcordanceStore::new().with_record(stored_record()));
    app.store.set_unavailable(true);

    let response = app.delete(&path(CONCEPT_ID)).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(app.notifier.sent_count(), 0);
}

#[tokio::test]
async fn test_request_id_is_generated_and_echoed() {
    let app = app();

    let response = app.get(&path(CONCEPT_ID)).await;
    assert!(response.headers.contains_key("x-request-id"));
}
