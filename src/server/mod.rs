//! HTTP API for the portfolio site.
//!
//! Serves the public project gallery and site copy, the admin editing
//! endpoints behind a shared secret, asset uploads, blob downloads and the
//! creative brief generator.

mod auth;
mod error;
mod handlers;
mod routes;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::llm::{generator_from_config, BriefGenerator};
use crate::repository::ContentRepository;
use crate::storage::BlobStore;

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<ContentRepository>,
    /// Admin shared secret; `None` rejects all admin requests.
    pub admin_password: Option<Arc<str>>,
    /// Brief generator; `None` when not configured.
    pub brief: Option<Arc<dyn BriefGenerator>>,
    pub cache_max_age_secs: u64,
}

impl AppState {
    pub fn new(settings: &Settings, store: Arc<dyn BlobStore>) -> anyhow::Result<Self> {
        if settings.admin_password.is_none() {
            tracing::warn!("ADMIN_PASSWORD is not set; admin endpoints will reject every request");
        }
        Ok(Self {
            repo: Arc::new(ContentRepository::new(store)),
            admin_password: settings.admin_password.as_deref().map(Arc::from),
            brief: generator_from_config(&settings.llm)?,
            cache_max_age_secs: settings.cache_max_age_secs,
        })
    }

    /// `Cache-Control` value for public read endpoints.
    pub fn cache_control(&self) -> String {
        format!(
            "s-maxage={}, stale-while-revalidate",
            self.cache_max_age_secs
        )
    }
}

/// Start the web server and run until Ctrl+C.
pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
