//! Admin endpoints: `/__health`, `/__gtg` and `/__build-info`.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use concordance_core::{ConcordanceNotifier, ConcordanceStore};

use crate::state::AppState;

const PANIC_GUIDE: &str = "https://dewey.ft.com/concordances-rw-dynamodb.html";
const HEALTH_DESCRIPTION: &str =
    "Reads and writes concorded concepts to DynamoDB and publishes change notifications to SNS";

/// One entry of the `/__health` report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResult {
    pub id: &'static str,
    pub name: &'static str,
    pub ok: bool,
    pub severity: u8,
    pub business_impact: &'static str,
    pub technical_summary: &'static str,
    pub panic_guide: &'static str,
    pub check_output: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub schema_version: u8,
    pub system_code: String,
    pub name: String,
    pub description: &'static str,
    pub ok: bool,
    pub checks: Vec<HealthCheckResult>,
}

/// Build metadata served by `/__build-info`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub system_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built_at: Option<&'static str>,
}

impl BuildInfo {
    pub fn new(system_code: impl Into<String>) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            system_code: system_code.into(),
            commit: option_env!("GIT_COMMIT"),
            built_at: option_env!("BUILD_TIME"),
        }
    }
}

/// Runs the dependency checks behind the admin endpoints.
pub struct HealthService {
    store: Arc<dyn ConcordanceStore>,
    notifier: Arc<dyn ConcordanceNotifier>,
    system_code: String,
    app_name: String,
}

impl HealthService {
    pub fn new(
        store: Arc<dyn ConcordanceStore>,
        notifier: Arc<dyn ConcordanceNotifier>,
        system_code: impl Into<String>,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            notifier,
            system_code: system_code.into(),
            app_name: app_name.into(),
        }
    }

    pub async fn check_dynamodb(&self) -> Result<String, String> {
        match self.store.healthcheck().await {
            Ok(()) => Ok("DynamoDB table is accessible".to_string()),
            Err(e) => {
                tracing::warn!(subsystem = "dynamodb", error = %e, "Health check failed");
                Err(format!("DynamoDB healthcheck failed: {e}"))
            }
        }
    }

    pub async fn check_sns(&self) -> Result<String, String> {
        match self.notifier.healthcheck().await {
            Ok(true) => Ok("SNS topic is accessible".to_string()),
            Ok(false) => {
                tracing::warn!(subsystem = "sns", "Health check found no topic attributes");
                Err("SNS healthcheck failed: topic has no attributes".to_string())
            }
            Err(e) => {
                tracing::warn!(subsystem = "sns", error = %e, "Health check failed");
                Err(format!("SNS healthcheck failed: {e}"))
            }
        }
    }

    /// Runs every check to completion and reports each one.
    pub async fn report(&self) -> HealthReport {
        let (dynamodb, sns) = tokio::join!(self.check_dynamodb(), self.check_sns());

        let checks = vec![
            check_result(
                "check-dynamodb-health",
                "Check connectivity to DynamoDB",
                "Concordance data cannot be read from or written to DynamoDB",
                "DynamoDB is not reachable or the concordances table does not exist",
                dynamodb,
            ),
            check_result(
                "check-sns-health",
                "Check connectivity to SNS",
                "Downstream consumers will not be notified of concordance changes",
                "SNS is not reachable or the configured topic does not exist",
                sns,
            ),
        ];

        HealthReport {
            schema_version: 1,
            system_code: self.system_code.clone(),
            name: self.app_name.clone(),
            description: HEALTH_DESCRIPTION,
            ok: checks.iter().all(|check| check.ok),
            checks,
        }
    }

    /// Runs every check concurrently and stops at the first failure.
    pub async fn good_to_go(&self) -> Result<(), String> {
        tokio::try_join!(self.check_dynamodb(), self.check_sns())?;
        Ok(())
    }
}

fn check_result(
    id: &'static str,
    name: &'static str,
    business_impact: &'static str,
    technical_summary: &'static str,
    result: Result<String, String>,
) -> HealthCheckResult {
    let (ok, check_output) = match result {
        Ok(output) => (true, output),
        Err(output) => (false, output),
    };
    HealthCheckResult {
        id,
        name,
        ok,
        severity: 1,
        business_impact,
        technical_summary,
        panic_guide: PANIC_GUIDE,
        check_output,
        last_updated: Utc::now(),
    }
}

/// GET /__health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    Json(state.health.report().await)
}

/// GET /__gtg
pub async fn good_to_go(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.health.good_to_go().await {
        Ok(()) => (StatusCode::OK, "OK".to_string()),
        Err(message) => (StatusCode::SERVICE_UNAVAILABLE, message),
    }
}

/// GET /__build-info
pub async fn build_info(State(state): State<Arc<AppState>>) -> Json<BuildInfo> {
    Json(state.build_info.clone())
}
