//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the server-rendered pages, the JSON API, the
//! GitHub sign-in flow, the live feed websocket, and static assets.

pub mod api;
pub mod auth;
pub mod live;
pub mod pages;

use std::path::Path;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// JSON API, auth endpoints, and the live feed.
fn api_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/auth/github", get(auth::github_redirect))
        .route("/auth/github/callback", get(auth::github_callback))
        .route("/auth/logout", post(auth::logout_form))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/plants", get(api::list_plants))
        .route("/api/plants/{slug}", get(api::get_plant))
        .route("/api/explorer", get(api::explorer))
        .route("/api/announcements", get(api::announcements))
        .route("/api/posts", get(api::list_posts).post(api::create_post))
        .route("/api/posts/{id}", get(api::get_post))
        .route("/api/posts/{id}/comments", get(api::list_comments).post(api::create_comment))
        .route("/api/recommendations", post(api::recommendations))
        .route("/api/live", get(live::handle_live))
        .route("/healthz", get(healthz))
        .layer(cors)
}

/// Server-rendered HTML pages and their form posts.
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/announcements", get(pages::announcements))
        .route("/garden", get(pages::garden))
        .route("/plants/{slug}", get(pages::plant))
        .route("/explorer", get(pages::explorer))
        .route("/login", get(pages::login))
        .route("/community", get(pages::community).post(pages::create_post))
        .route("/community/{post_id}", get(pages::post_detail))
        .route("/community/{post_id}/comments", post(pages::create_comment))
        .route("/recommendations", get(pages::recommendations).post(pages::submit_recommendations))
}

/// Full application router.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    api_routes()
        .merge(page_routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
