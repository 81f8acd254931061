mod catalog;
mod config;
mod db;
mod frame;
mod llm;
mod pages;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use std::time::Duration;

use crate::llm::LlmChat;

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    let catalog = catalog::Catalog::load().expect("bundled catalog is invalid");

    let pool = db::init_pool(&config.database_url)
        .await
        .expect("database init failed");

    // Initialize LLM client (non-fatal: AI herbalist disabled if config missing).
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(provider = client.provider(), model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, AI herbalist disabled");
            None
        }
    };

    let github = services::auth::GitHubConfig::from_env();
    if github.is_none() {
        tracing::warn!("GitHub OAuth not configured, sign-in disabled");
    }

    let state = state::AppState::new(pool, catalog, llm, github);

    let purge_pool = state.pool.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            match services::session::purge_expired(&purge_pool).await {
                Ok(0) => {}
                Ok(purged) => tracing::info!(purged, "expired sessions removed"),
                Err(e) => tracing::warn!(error = %e, "session purge failed"),
            }
        }
    });

    let app = routes::app(state, &config.static_dir);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "ayush-garden listening");
    axum::serve(listener, app).await.expect("server failed");
}
