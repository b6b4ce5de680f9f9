//! Roster server binary.
//!
//! Loads `.env` if present, reads `ATLAS_URL` from the environment, sets up
//! the store it names and serves the JSON API on port 3000.
//!
//! ```sh
//! ATLAS_URL=mongodb://localhost:27017/roster cargo run -p roster-server
//! ATLAS_URL=sqlite://roster.db cargo run -p roster-server
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use roster_core::store::UserStore;
use roster_server::{Backend, PORT, ServerConfig, shutdown_signal};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // A missing .env file is fine; the environment may already be set.
  dotenv::dotenv().ok();

  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let server_cfg = ServerConfig::from_env().context("failed to read configuration")?;

  let backend = Arc::new(Backend::connect(server_cfg.atlas_url.as_deref()).await);

  // Verify in the background so the listener comes up immediately.
  let checked = backend.clone();
  tokio::spawn(async move {
    match checked.verify().await {
      Ok(()) => tracing::info!(backend = checked.kind(), "{}", checked.connected_message()),
      Err(e) => tracing::error!(error = %e, "Error connecting to the store"),
    }
  });

  let app = roster_server::app(backend.clone());
  let address = SocketAddr::from(([0, 0, 0, 0], PORT));

  let listener = TcpListener::bind(address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Server is running at http://localhost:{PORT}");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  backend.shutdown().await.context("failed to close the store")?;
  tracing::info!("store closed");

  Ok(())
}
