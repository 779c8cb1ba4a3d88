//! Server setup and lifecycle for the concordances service.

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, LogFormat};
use crate::error::ServerError;
use crate::routes::create_router;
use crate::state::AppState;
use crate::telemetry::install_prometheus_recorder;

pub type Result<T> = std::result::Result<T, ServerError>;

/// The concordances read/write server.
pub struct ConcordancesServer {
    state: Arc<AppState>,
}

impl ConcordancesServer {
    pub fn with_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Runs the HTTP server until Ctrl+C or SIGTERM.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.listen_addr();
        let router = create_router(self.state.clone());

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind {
                addr: addr.to_string(),
                reason: e.to_string(),
            })?;

        tracing::info!(
            %addr,
            system_code = %self.state.config.app_system_code,
            table = %self.state.config.dynamodb.table,
            topic_arn = %self.state.config.sns.topic_arn,
            "Concordances RW server starting"
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Serve(e.to_string()))?;

        tracing::info!("Concordances RW server stopped");
        Ok(())
    }
}

/// Signal handler for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        },
        () = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        },
    }
}

/// Initializes the global tracing subscriber. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Entry point for the binary: logging, metrics, back-end clients, then serve.
pub async fn run(args: Args) -> Result<()> {
    init_tracing(args.log_format);

    let config = args.to_config()?;
    let handle =
        install_prometheus_recorder().map_err(|e| ServerError::Telemetry(e.to_string()))?;

    let state = AppState::from_config(config).await.with_metrics(handle);
    ConcordancesServer::with_state(Arc::new(state)).run().await
}
