//! HTTP Server
//!
//! axum router over the patient and token services.

use crate::cors::CorsConfig;
use crate::handler;
use axum::routing::{get, post, put};
use axum::Router;
use qflow_core::application::{PatientService, TokenService};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

const DEFAULT_HTTP_HOST: &str = "127.0.0.1";
const DEFAULT_HTTP_PORT: u16 = 8080;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub patients: Arc<PatientService>,
    pub tokens: Arc<TokenService>,
}

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            cors: CorsConfig::default(),
        }
    }
}

/// Build the full router with all routes and middleware.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/health", get(handler::health))
        .route("/patients", post(handler::register_patient))
        // Path used by the web frontend's registration form
        .route("/patients/register", post(handler::register_patient))
        .route("/patients/:id", get(handler::get_patient))
        .route(
            "/tokens",
            get(handler::list_tokens).post(handler::issue_token),
        )
        .route("/tokens/stats", get(handler::token_stats))
        .route("/tokens/:id/serve", put(handler::serve_token));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    state: AppState,
}

impl HttpServer {
    pub fn new(
        config: HttpServerConfig,
        patients: Arc<PatientService>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            config,
            state: AppState { patients, tokens },
        }
    }

    /// Bind and start serving in a background task.
    ///
    /// Port 0 binds an ephemeral port; read it back from
    /// [`ServerHandle::local_addr`].
    pub async fn start(self) -> Result<ServerHandle, String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        let cors = self.config.cors.layer().map_err(|e| {
            format!(
                "Invalid CORS origin {:?}: {}",
                self.config.cors.allowed_origin, e
            )
        })?;

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        info!(
            addr = %local_addr,
            cors_origin = %self.config.cors.normalized_origin(),
            "HTTP server listening"
        );

        let app = build_router(self.state, cors);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        Ok(ServerHandle {
            local_addr,
            shutdown_tx,
            task,
        })
    }
}

/// Handle to a running server
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn stop(self) -> Result<(), String> {
        // Receiver gone means the server already exited
        let _ = self.shutdown_tx.send(());

        self.task
            .await
            .map_err(|e| format!("HTTP server task failed: {}", e))?
            .map_err(|e| format!("HTTP server error: {}", e))
    }
}
