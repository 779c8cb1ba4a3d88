//! Route definitions for the concordances service.

use axum::{
    Router,
    body::Body,
    http::{HeaderName, Request},
    routing::get,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::health;
use crate::state::AppState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Creates the Axum router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let concordances = Router::new().route(
        "/concordances/{uuid}",
        get(handlers::get_concordance)
            .put(handlers::put_concordance)
            .delete(handlers::delete_concordance),
    );

    let admin = Router::new()
        .route("/__health", get(health::health))
        .route("/__gtg", get(health::good_to_go))
        .route("/__build-info", get(health::build_info))
        .route("/metrics", get(handlers::metrics));

    // Outermost first: assign an id, log with it, then echo it back.
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or_default();
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::new(request_id));

    Router::new()
        .merge(concordances)
        .merge(admin)
        .layer(middleware)
        .with_state(state)
}
