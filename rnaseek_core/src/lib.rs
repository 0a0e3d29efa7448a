//! Core library for the RNAseek front end: FASTQ intake, the upload form, the identity-gated
//! shell and the routes that serve them.

pub mod auth;
pub mod config;
pub mod error;
pub mod files;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod shell;
pub mod upload;

pub use auth::{AuthSignal, AuthState, AuthSubscription, IdentityClient, IdentityProvider, LocalIdentityProvider, UserInfo};
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use files::{maybe_decompress, FileValidator, ProcessedFile, SelectedFile, ValidationResult};
pub use handlers::routes::create_routes;
pub use shell::{AuthGate, GateView, NavBar};
pub use upload::{FormState, HttpSubmitter, SubmitAttempt, Submitter, UploadController, UploadOutcome};

use axum::{extract::DefaultBodyLimit, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub config: Arc<AppConfig>,
    pub identity: IdentityClient,
    pub gate: AuthGate,
    pub navbar: Arc<NavBar>,
    pub controller: Arc<UploadController>,
}

impl AppState {
    pub fn new(config: AppConfig, identity: IdentityClient, submitter: Arc<dyn Submitter>) -> Self {
        let controller = UploadController::from_config(&config.upload, submitter);
        Self::with_controller(config, identity, controller)
    }

    pub fn with_controller(config: AppConfig, identity: IdentityClient, controller: UploadController) -> Self {
        let gate = AuthGate::new(identity.subscribe());
        let navbar = NavBar::new(identity.clone());

        Self {
            app_name: "RNAseek".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            config: Arc::new(config),
            identity,
            gate,
            navbar: Arc::new(navbar),
            controller: Arc::new(controller),
        }
    }

    /// Resolves the identity signal in the background; the shell shows its loading view until then.
    pub fn spawn_session_restore(&self) -> tokio::task::JoinHandle<()> {
        let identity = self.identity.clone();
        tokio::spawn(async move {
            if let Err(e) = identity.restore_session().await {
                tracing::warn!("Session restore failed, continuing signed out: {}", e);
            }
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.upload.max_file_size_bytes();

    let router = Router::new()
        .merge(create_routes(&state))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    middleware::logging::with_request_logging(router)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
