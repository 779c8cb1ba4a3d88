//! HTTP request handlers for `/concordances/{uuid}`.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

use concordance_core::{ConcordancePayload, ConcordanceRecord, StorageOutcome, is_valid_concept_uuid};

use crate::error::{ApiError, ValidationError};
use crate::state::AppState;

/// GET /concordances/{uuid}
pub async fn get_concordance(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
) -> Result<Json<ConcordanceRecord>, ApiError> {
    ensure_concept_uuid(&uuid)?;

    let record = state
        .service
        .read(&uuid)
        .await
        .map_err(|_| ApiError::retrieving())?;

    if record.is_empty() {
        tracing::info!(concept_id = %uuid, "Concordances not found");
        return Err(ApiError::NotFound);
    }
    Ok(Json(record))
}

/// PUT /concordances/{uuid}
///
/// Returns 201 when the record was created and 200 when it replaced an
/// existing one, both with an empty body.
pub async fn put_concordance(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    ensure_concept_uuid(&uuid)?;

    let record = validate_payload(&uuid, &body).inspect_err(|e| {
        tracing::info!(concept_id = %uuid, error = %e, "Rejected concordance payload");
    })?;

    match state.service.write(&record).await {
        StorageOutcome::Created => Ok(StatusCode::CREATED),
        StorageOutcome::Updated => Ok(StatusCode::OK),
        StorageOutcome::Deleted | StorageOutcome::NotFound | StorageOutcome::Error => {
            Err(ApiError::storing())
        }
    }
}

/// DELETE /concordances/{uuid}
pub async fn delete_concordance(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
) -> Result<StatusCode, ApiError> {
    ensure_concept_uuid(&uuid)?;

    match state.service.delete(&uuid).await {
        StorageOutcome::Deleted => Ok(StatusCode::NO_CONTENT),
        StorageOutcome::NotFound => Err(ApiError::NotFound),
        StorageOutcome::Created | StorageOutcome::Updated | StorageOutcome::Error => {
            Err(ApiError::deleting())
        }
    }
}

/// GET /metrics
///
/// Prometheus text exposition; 204 when no recorder was installed.
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Identifiers outside the UUID shape do not name a concordance resource, so
/// they are answered like an unmatched route.
fn ensure_concept_uuid(id: &str) -> Result<(), ApiError> {
    if is_valid_concept_uuid(id) {
        Ok(())
    } else {
        tracing::debug!(concept_id = %id, "Path identifier is not a concept UUID");
        Err(ApiError::NotFound)
    }
}

/// Checks a PUT body against the path id, in order: well-formed JSON, then a
/// `conceptId` equal to `path_id`, then at least one concorded id. A JSON
/// `null` body is well-formed and carries no fields.
pub fn validate_payload(path_id: &str, body: &[u8]) -> Result<ConcordanceRecord, ValidationError> {
    let payload: ConcordancePayload = serde_json::from_slice::<Option<ConcordancePayload>>(body)
        .map_err(|_| ValidationError::CorruptedJson)?
        .unwrap_or_default();

    let concept_id = payload.concept_id.unwrap_or_default();
    if concept_id != path_id {
        return Err(ValidationError::MismatchedConceptId {
            path_id: path_id.to_string(),
            body_id: concept_id,
        });
    }

    match payload.concorded_ids {
        Some(ids) if !ids.is_empty() => Ok(ConcordanceRecord::new(concept_id, ids)),
        _ => Err(ValidationError::MissingConcordedIds),
    }
}
