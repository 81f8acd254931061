//! HTML page handlers.
//!
//! Each handler loads what its page needs, picks a view state, and renders
//! a component from `crate::pages`. Form posts follow post/redirect/get on
//! success and re-render the form with the submitted values on failure.

use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use leptos::prelude::*;
use serde::Deserialize;
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use super::api::{forum_error_to_status, recommend_error_to_status};
use super::auth::Viewer;
use crate::pages::announcements::AnnouncementsPage;
use crate::pages::community::{CommunityPage, CommunityView, PostDraft};
use crate::pages::explorer::ExplorerPage;
use crate::pages::garden::{GardenPage, PlantCardData};
use crate::pages::layout::NotFoundPage;
use crate::pages::login::LoginPage;
use crate::pages::plant::PlantPage;
use crate::pages::post::{CommentDraft, CommentsView, PostErrorPage, PostPage};
use crate::pages::recommendations::{RecommendOutcome, RecommendationsPage};
use crate::pages::render_document;
use crate::services::forum::{self, Author, ForumError, NewComment, NewPost};
use crate::services::recommend::{self, RecommendError};
use crate::services::session::SessionUser;
use crate::state::AppState;

const LOGIN_PATH: &str = "/login";

fn html(status: StatusCode, body: String) -> Response {
    (status, Html(body)).into_response()
}

fn not_found(viewer: Option<SessionUser>, message: &'static str) -> Response {
    html(StatusCode::NOT_FOUND, render_document(|| view! { <NotFoundPage viewer=viewer message=message/> }))
}

// =============================================================================
// CATALOG PAGES
// =============================================================================

/// `GET /`
pub async fn index() -> Redirect {
    Redirect::temporary("/garden")
}

/// `GET /announcements`
pub async fn announcements(State(state): State<AppState>, Viewer(viewer): Viewer) -> Html<String> {
    let items = state.catalog.announcements().to_vec();
    Html(render_document(|| view! { <AnnouncementsPage items=items viewer=viewer/> }))
}

/// `GET /garden`
pub async fn garden(State(state): State<AppState>, Viewer(viewer): Viewer) -> Html<String> {
    let plants: Vec<PlantCardData> = state
        .catalog
        .plants()
        .iter()
        .map(|plant| PlantCardData::new(&state.catalog, plant))
        .collect();
    Html(render_document(|| view! { <GardenPage plants=plants viewer=viewer/> }))
}

/// `GET /plants/{slug}`
pub async fn plant(State(state): State<AppState>, Viewer(viewer): Viewer, Path(slug): Path<String>) -> Response {
    match state.catalog.plant_by_slug(&slug).map(|plant| PlantCardData::new(&state.catalog, plant)) {
        Some(data) => html(StatusCode::OK, render_document(|| view! { <PlantPage data=data viewer=viewer/> })),
        None => not_found(viewer, "We could not find that plant in the garden."),
    }
}

/// `GET /explorer`
pub async fn explorer(State(state): State<AppState>, Viewer(viewer): Viewer) -> Html<String> {
    let areas = state.catalog.map_areas().to_vec();
    let markers = state.catalog.map_markers();
    Html(render_document(|| view! { <ExplorerPage areas=areas markers=markers viewer=viewer/> }))
}

/// `GET /login`
pub async fn login(State(state): State<AppState>, Viewer(viewer): Viewer) -> Response {
    if viewer.is_some() {
        return Redirect::to("/community").into_response();
    }
    let github_enabled = state.github.is_some();
    html(StatusCode::OK, render_document(|| view! { <LoginPage github_enabled=github_enabled/> }))
}

// =============================================================================
// COMMUNITY
// =============================================================================

async fn render_community(state: &AppState, viewer: Option<SessionUser>, draft: PostDraft, status: StatusCode) -> Response {
    let result = forum::list_posts(&state.pool).await;
    if let Err(e) = &result {
        warn!(error = %e, "pages: failed to load posts");
    }
    let posts = CommunityView::from_result(result);
    let status = if matches!(posts, CommunityView::Failed) { StatusCode::INTERNAL_SERVER_ERROR } else { status };
    let now = OffsetDateTime::now_utc();
    html(status, render_document(|| view! { <CommunityPage viewer=viewer posts=posts draft=draft now=now/> }))
}

/// `GET /community`
pub async fn community(State(state): State<AppState>, Viewer(viewer): Viewer) -> Response {
    render_community(&state, viewer, PostDraft::default(), StatusCode::OK).await
}

/// `POST /community`
pub async fn create_post(State(state): State<AppState>, Viewer(viewer): Viewer, Form(form): Form<NewPost>) -> Response {
    let Some(user) = viewer else {
        return Redirect::to(LOGIN_PATH).into_response();
    };
    match forum::create_post(&state.pool, &state.feed, &Author::from(&user), &form).await {
        Ok(post) => Redirect::to(&format!("/community/{}", post.id)).into_response(),
        Err(err) => {
            let status = forum_error_to_status(&err);
            let draft = PostDraft { title: form.title, content: form.content, error: Some(forum_error_message(&err)) };
            render_community(&state, Some(user), draft, status).await
        }
    }
}

async fn render_post(
    state: &AppState,
    viewer: Option<SessionUser>,
    post_id: Uuid,
    draft: CommentDraft,
    status: StatusCode,
) -> Response {
    let post = match forum::get_post(&state.pool, post_id).await {
        Ok(Some(post)) => post,
        Ok(None) => return not_found(viewer, "That discussion does not exist."),
        Err(e) => {
            warn!(error = %e, %post_id, "pages: failed to load post");
            return html(StatusCode::INTERNAL_SERVER_ERROR, render_document(|| view! { <PostErrorPage viewer=viewer/> }));
        }
    };
    let result = forum::list_comments(&state.pool, post_id).await;
    if let Err(e) = &result {
        warn!(error = %e, %post_id, "pages: failed to load comments");
    }
    let comments = CommentsView::from_result(result);
    let now = OffsetDateTime::now_utc();
    html(
        status,
        render_document(|| view! { <PostPage viewer=viewer post=post comments=comments draft=draft now=now/> }),
    )
}

/// `GET /community/{post_id}`
pub async fn post_detail(State(state): State<AppState>, Viewer(viewer): Viewer, Path(raw_id): Path<String>) -> Response {
    let Ok(post_id) = raw_id.parse::<Uuid>() else {
        return not_found(viewer, "That discussion does not exist.");
    };
    render_post(&state, viewer, post_id, CommentDraft::default(), StatusCode::OK).await
}

/// `POST /community/{post_id}/comments`
pub async fn create_comment(
    State(state): State<AppState>,
    Viewer(viewer): Viewer,
    Path(raw_id): Path<String>,
    Form(form): Form<NewComment>,
) -> Response {
    let Ok(post_id) = raw_id.parse::<Uuid>() else {
        return not_found(viewer, "That discussion does not exist.");
    };
    let Some(user) = viewer else {
        return Redirect::to(LOGIN_PATH).into_response();
    };
    match forum::create_comment(&state.pool, &state.feed, &Author::from(&user), post_id, &form).await {
        Ok(_) => Redirect::to(&format!("/community/{post_id}")).into_response(),
        Err(ForumError::PostNotFound(_)) => not_found(Some(user), "That discussion does not exist."),
        Err(err) => {
            let status = forum_error_to_status(&err);
            let draft = CommentDraft { content: form.content, error: Some(forum_error_message(&err)) };
            render_post(&state, Some(user), post_id, draft, status).await
        }
    }
}

/// User-facing text for a failed forum write.
pub(crate) fn forum_error_message(err: &ForumError) -> String {
    match err {
        ForumError::Validation(message) => message.clone(),
        ForumError::PostNotFound(_) => "That discussion does not exist.".to_string(),
        ForumError::Database(_) => "Something went wrong. Please try again.".to_string(),
    }
}

// =============================================================================
// RECOMMENDATIONS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct GoalsForm {
    #[serde(default)]
    pub goals: String,
}

/// `GET /recommendations`
pub async fn recommendations(State(state): State<AppState>, Viewer(viewer): Viewer) -> Html<String> {
    let enabled = state.llm.is_some();
    Html(render_document(|| view! { <RecommendationsPage viewer=viewer enabled=enabled/> }))
}

/// `POST /recommendations`
pub async fn submit_recommendations(
    State(state): State<AppState>,
    viewer: Viewer,
    Form(form): Form<GoalsForm>,
) -> Response {
    let enabled = state.llm.is_some();
    let result = match &state.llm {
        Some(llm) => recommend::recommend(&state, llm, viewer.client_key(), &form.goals).await,
        None => Err(RecommendError::LlmNotConfigured),
    };
    let (status, outcome) = match result {
        Ok(recommendation) => (StatusCode::OK, RecommendOutcome::Results(recommendation)),
        Err(err) => (recommend_error_to_status(&err), RecommendOutcome::Failed(recommend_error_message(&err))),
    };
    let Viewer(viewer) = viewer;
    let goals = form.goals;
    html(
        status,
        render_document(|| {
            view! { <RecommendationsPage viewer=viewer enabled=enabled goals=goals outcome=outcome/> }
        }),
    )
}

/// User-facing text for a failed recommendation.
pub(crate) fn recommend_error_message(err: &RecommendError) -> String {
    match err {
        RecommendError::Validation(message) => message.clone(),
        RecommendError::LlmNotConfigured => "The AI herbalist is currently unavailable.".to_string(),
        RecommendError::RateLimited(_) => "Too many requests. Please wait a moment and try again.".to_string(),
        RecommendError::Llm(_) | RecommendError::EmptyResponse => {
            "Sorry, we couldn't generate recommendations right now. Please try again.".to_string()
        }
    }
}

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;
