//! Server wiring for Roster: configuration, backend selection and the
//! application router.

pub mod backend;

use std::sync::Arc;

use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub use backend::{Backend, BackendError, StoreUrl};

/// The server always listens on this port.
pub const PORT: u16 = 3000;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, read from the process environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
  /// Store connection string (`ATLAS_URL`).
  pub atlas_url: Option<String>,
}

impl ServerConfig {
  /// Read configuration from the process environment.
  pub fn from_env() -> Result<Self, config::ConfigError> {
    Self::from_environment(config::Environment::default())
  }

  pub fn from_environment(source: config::Environment) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(source.try_parsing(false))
      .build()?
      .try_deserialize()
  }
}

// ─── Shutdown ─────────────────────────────────────────────────────────────────

/// Resolve on Ctrl-C or, on unix, SIGTERM. A handler that cannot be
/// installed is logged and never fires.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    use tokio::signal::unix::{SignalKind, signal};
    match signal(SignalKind::terminate()) {
      Ok(mut stream) => {
        stream.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => {}
    () = terminate => {}
  }
  tracing::info!("shutting down");
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API with request tracing.
pub fn app(backend: Arc<Backend>) -> Router {
  roster_api::api_router(backend).layer(TraceLayer::new_for_http())
}
