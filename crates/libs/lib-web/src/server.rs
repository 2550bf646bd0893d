//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that creates the Axum router,
//! registers all routes, applies middleware, and starts the HTTP server.

// region: --- Imports
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, Method, Request, StatusCode},
    middleware::{from_fn, from_fn_with_state},
    response::Response,
    routing::{get, post},
    Router,
};
use lib_core::error::message_response;
use lib_core::model::store::SqliteCredentialStore;
use lib_core::{create_pool, Config, DbPool};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::handlers;
use crate::middleware::{
    handle_panic, log_requests, map_res, require_auth, stamp_req, RequestStamp, AUTH_TOKEN_HEADER,
};
use crate::middleware::mw_req_stamp::REQUEST_ID_HEADER;
use crate::services::AuthService;
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
}

impl AppState {
    /// Wire the SQLite-backed services from a pool and validated configuration.
    pub fn new(db: DbPool, config: &Config) -> lib_core::Result<Self> {
        let store = Arc::new(SqliteCredentialStore::new(db));
        let auth = AuthService::from_config(store, config)?;
        Ok(Self { auth })
    }
}

impl axum::extract::FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Origins of the local Vue dev server.
const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:8080",
    "http://127.0.0.1:8080",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

/// HTTP-layer configuration that is not part of [`Config`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
    /// Database migrations path
    pub migrations_path: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            migrations_path: "./migrations",
        }
    }
}

impl ServerConfig {
    /// Defaults, with origins overridden by the comma-separated
    /// `CORS_ALLOWED_ORIGINS` variable when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(origins) = lib_utils::get_env("CORS_ALLOWED_ORIGINS") {
            config.allowed_origins = parse_origins(&origins);
        }
        config
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Configure the global tracing subscriber from `LOG_LEVEL`.
pub fn init_tracing() -> anyhow::Result<()> {
    let log_level = lib_utils::get_env_or("LOG_LEVEL", "info").to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {e}"))?;

    info!("Log level: {}", log_level);
    Ok(())
}

/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails (including a missing `JWT_SECRET`)
/// - Database connection fails
/// - Database migrations fail
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    init_tracing()?;

    info!("NEURO FARM BACKEND STARTING");

    info!("Loading configuration...");
    let app_config = Config::from_env()?;
    app_config.validate()?;
    info!("Configuration: {:?}", app_config);

    ensure_sqlite_dir(&app_config.database_url)?;

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!("Running database migrations from: {}", config.migrations_path);
    let migrator = sqlx::migrate::Migrator::new(Path::new(config.migrations_path)).await?;
    migrator.run(&pool).await?;
    info!("Migrations complete");

    let state = AppState::new(pool.clone(), &app_config)?;
    let app = create_router(state, &config.allowed_origins);

    let bind_address = app_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("SERVER READY: http://{}", bind_address);
    log_server_info();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("[ROUTE SETUP] Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTH_TOKEN_HEADER])
        .expose_headers([REQUEST_ID_HEADER]);

    info!("[ROUTE SETUP] Registering HTTP routes...");

    let protected = Router::new()
        .route("/api/user/profile", get(handlers::user::get_profile))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/health", get(|| async { "OK" }))
        .merge(protected)
        .fallback(route_not_found)
        .with_state(state)
        .layer(
            // Outermost first: the stamp must exist before the span and the log line.
            ServiceBuilder::new()
                .layer(from_fn(stamp_req))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &Request<Body>| {
                            tracing::info_span!(
                                "http_request",
                                request_id = %RequestStamp::id_of(request),
                                method = %request.method(),
                                uri = %request.uri(),
                                version = ?request.version(),
                            )
                        })
                        .on_failure(
                            |error: tower_http::classify::ServerErrorsFailureClass,
                             latency: std::time::Duration,
                             _span: &tracing::Span| {
                                error!(
                                    latency_ms = latency.as_millis(),
                                    "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                                    error,
                                    latency.as_millis()
                                );
                            },
                        ),
                )
                .layer(from_fn(log_requests))
                .layer(from_fn(map_res))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .layer(cors)
}

async fn route_not_found() -> Response {
    info!("[404 HANDLER] Unmatched route - returning 404");
    message_response(StatusCode::NOT_FOUND, "Route not found")
}

/// Create the parent directory of a file-backed SQLite URL.
fn ensure_sqlite_dir(database_url: &str) -> std::io::Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let rest = rest.trim_start_matches("//");
    let db_path = rest.split('?').next().unwrap_or(rest);

    if db_path.is_empty() || db_path == ":memory:" {
        return Ok(());
    }

    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created database directory: {:?}", parent);
        }
    }
    info!("Database file will be at: {}", db_path);
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}

/// Log server information
fn log_server_info() {
    info!(" AUTH:");
    info!("   • POST /api/auth/register");
    info!("   • POST /api/auth/login");
    info!(" USER (x-auth-token required):");
    info!("   • GET  /api/user/profile");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
