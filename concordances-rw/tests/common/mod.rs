#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower::ServiceExt;

use concordances_rw::{AppState, create_router};
use config::AppConfig;
use testing::{InMemoryConcordanceStore, RecordingNotifier};

pub const CONCEPT_ID: &str = "4f50b156-6c50-4693-b835-02f70d3f3bc0";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryConcordanceStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
    }
}

pub fn app() -> TestApp {
    app_with_store(InMemoryConcordanceStore::new())
}

pub fn app_with_store(store: InMemoryConcordanceStore) -> TestApp {
    build(store, None)
}

pub fn app_with_metrics(handle: PrometheusHandle) -> TestApp {
    build(InMemoryConcordanceStore::new(), Some(handle))
}

fn build(store: InMemoryConcordanceStore, metrics: Option<PrometheusHandle>) -> TestApp {
    let store = Arc::new(store);
    let notifier = Arc::new(RecordingNotifier::new());
    let mut state = AppState::new(AppConfig::default(), store.clone(), notifier.clone());
    if let Some(handle) = metrics {
        state = state.with_metrics(handle);
    }
    TestApp {
        router: create_router(Arc::new(state)),
        store,
        notifier,
    }
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
        let body = body.map_or_else(Body::empty, |b| Body::from(b.to_string()));
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn put(&self, uri: &str, body: &str) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }
}

pub fn path(concept_id: &str) -> String {
    format!("/concordances/{concept_id}")
}

pub fn payload(concept_id: &str, concorded_ids: &[&str]) -> String {
    serde_json::json!({ "conceptId": concept_id, "concordedIds": concorded_ids }).to_string()
}
