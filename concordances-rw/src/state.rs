//! Application state for the concordances service.

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use concordance_core::{ConcordanceNotifier, ConcordanceStore};
use config::AppConfig;
use notifications::SnsConcordanceNotifier;
use storage::DynamoDbConcordanceStore;

use crate::health::{BuildInfo, HealthService};
use crate::service::ConcordanceService;

/// Shared state handed to every handler.
pub struct AppState {
    pub config: AppConfig,
    pub service: ConcordanceService,
    pub health: HealthService,
    pub build_info: BuildInfo,
    /// Set only when the server installed the global Prometheus recorder.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Wires the service around the given back-ends.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn ConcordanceStore>,
        notifier: Arc<dyn ConcordanceNotifier>,
    ) -> Self {
        let health = HealthService::new(
            store.clone(),
            notifier.clone(),
            config.app_system_code.clone(),
            config.app_name.clone(),
        );
        Self {
            build_info: BuildInfo::new(config.app_system_code.clone()),
            service: ConcordanceService::new(store, notifier),
            health,
            config,
            metrics: None,
        }
    }

    /// Builds the DynamoDB and SNS clients described by `config`.
    pub async fn from_config(config: AppConfig) -> Self {
        let store = DynamoDbConcordanceStore::from_config(&config.dynamodb).await;
        let notifier = SnsConcordanceNotifier::from_config(&config.sns).await;
        tracing::info!(
            table = store.table(),
            topic_arn = notifier.topic_arn(),
            "Concordance back-ends ready"
        );
        Self::new(config, Arc::new(store), Arc::new(notifier))
    }

    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
