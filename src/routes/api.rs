//! JSON API: catalog, forum and recommendation endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Service errors become `{code, message, retryable}` bodies. Each service
//! error enum has one `*_to_status` mapping below.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::{AuthUser, Viewer};
use crate::catalog::{Announcement, MapArea, MapMarker, Plant, PlantImage};
use crate::frame::ErrorCode;
use crate::services::forum::{self, Author, Comment, ForumError, NewComment, NewPost, Post};
use crate::services::recommend::{self, DISCLAIMER, Recommendation, RecommendError};
use crate::state::AppState;

// =============================================================================
// ERROR BODY
// =============================================================================

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    retryable: bool,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
    retryable: bool,
}

impl ApiError {
    pub fn new(status: StatusCode, err: &(impl ErrorCode + ?Sized)) -> Self {
        Self { status, code: err.error_code(), message: err.to_string(), retryable: err.retryable() }
    }

    #[must_use]
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "E_UNAUTHENTICATED",
            message: "sign in required".into(),
            retryable: false,
        }
    }

    #[must_use]
    pub fn not_found(what: &str) -> Self {
        Self { status: StatusCode::NOT_FOUND, code: "E_NOT_FOUND", message: format!("{what} not found"), retryable: false }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, code: "E_INTERNAL", message: message.into(), retryable: true }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(code = self.code, message = %self.message, "api: request failed");
        }
        let body = ErrorBody { code: self.code, message: &self.message, retryable: self.retryable };
        (self.status, Json(body)).into_response()
    }
}

pub(crate) fn forum_error_to_status(err: &ForumError) -> StatusCode {
    match err {
        ForumError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ForumError::PostNotFound(_) => StatusCode::NOT_FOUND,
        ForumError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn recommend_error_to_status(err: &RecommendError) -> StatusCode {
    match err {
        RecommendError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RecommendError::LlmNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        RecommendError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        RecommendError::Llm(_) | RecommendError::EmptyResponse => StatusCode::BAD_GATEWAY,
    }
}

impl From<ForumError> for ApiError {
    fn from(err: ForumError) -> Self {
        Self::new(forum_error_to_status(&err), &err)
    }
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        Self::new(recommend_error_to_status(&err), &err)
    }
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantView<'a> {
    #[serde(flatten)]
    plant: &'a Plant,
    image: Option<&'a PlantImage>,
}

/// `GET /api/plants`
pub async fn list_plants(State(state): State<AppState>) -> Response {
    let plants: Vec<PlantView<'_>> = state
        .catalog
        .plants()
        .iter()
        .map(|plant| PlantView { plant, image: state.catalog.plant_image(plant) })
        .collect();
    Json(plants).into_response()
}

/// `GET /api/plants/{slug}`
pub async fn get_plant(State(state): State<AppState>, Path(slug): Path<String>) -> Result<Response, ApiError> {
    let plant = state
        .catalog
        .plant_by_slug(&slug)
        .ok_or_else(|| ApiError::not_found("plant"))?;
    let view = PlantView { plant, image: state.catalog.plant_image(plant) };
    Ok(Json(view).into_response())
}

#[derive(Serialize)]
pub struct ExplorerView<'a> {
    areas: &'a [MapArea],
    markers: Vec<MapMarker>,
}

/// `GET /api/explorer`
pub async fn explorer(State(state): State<AppState>) -> Response {
    Json(ExplorerView { areas: state.catalog.map_areas(), markers: state.catalog.map_markers() }).into_response()
}

/// `GET /api/announcements`
pub async fn announcements(State(state): State<AppState>) -> Json<Vec<Announcement>> {
    Json(state.catalog.announcements().to_vec())
}

// =============================================================================
// FORUM
// =============================================================================

/// `GET /api/posts`
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(forum::list_posts(&state.pool).await?))
}

/// `POST /api/posts`
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<NewPost>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    let post = forum::create_post(&state.pool, &state.feed, &Author::from(&auth.user), &body).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// `GET /api/posts/{id}`
pub async fn get_post(State(state): State<AppState>, Path(post_id): Path<Uuid>) -> Result<Json<Post>, ApiError> {
    forum::get_post(&state.pool, post_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("post"))
}

/// `GET /api/posts/{id}/comments`
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    if forum::get_post(&state.pool, post_id).await?.is_none() {
        return Err(ApiError::not_found("post"));
    }
    Ok(Json(forum::list_comments(&state.pool, post_id).await?))
}

/// `POST /api/posts/{id}/comments`
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<Uuid>,
    Json(body): Json<NewComment>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let comment =
        forum::create_comment(&state.pool, &state.feed, &Author::from(&auth.user), post_id, &body).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

// =============================================================================
// RECOMMENDATIONS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub goals: String,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    #[serde(flatten)]
    recommendation: Recommendation,
    disclaimer: &'static str,
}

/// `POST /api/recommendations`
pub async fn recommendations(
    State(state): State<AppState>,
    viewer: Viewer,
    Json(body): Json<RecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let llm = state
        .llm
        .clone()
        .ok_or(RecommendError::LlmNotConfigured)?;
    let recommendation = recommend::recommend(&state, &llm, viewer.client_key(), &body.goals).await?;
    Ok(Json(RecommendResponse { recommendation, disclaimer: DISCLAIMER }))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
