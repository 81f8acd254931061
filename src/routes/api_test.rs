use super::*;
use std::sync::Arc;

use axum::body::to_bytes;

use crate::llm::LlmChat;
use crate::llm::types::{ChatResponse, ContentBlock, LlmError, Message, Tool};
use crate::rate_limit::RateLimitError;
use crate::state::test_helpers;

async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

struct TextLlm(&'static str);

#[async_trait::async_trait]
impl LlmChat for TextLlm {
    async fn chat(
        &self,
        _max_tokens: u32,
        _system: &str,
        _messages: &[Message],
        _tools: Option<&[Tool]>,
    ) -> Result<ChatResponse, LlmError> {
        Ok(ChatResponse {
            content: vec![ContentBlock::Text { text: self.0.into() }],
            model: "mock".into(),
            stop_reason: "end_turn".into(),
            input_tokens: 1,
            output_tokens: 1,
        })
    }
}

// =============================================================================
// error mapping
// =============================================================================

#[test]
fn forum_errors_map_to_status() {
    assert_eq!(forum_error_to_status(&ForumError::Validation("x".into())), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(forum_error_to_status(&ForumError::PostNotFound(Uuid::nil())), StatusCode::NOT_FOUND);
    assert_eq!(
        forum_error_to_status(&ForumError::Database(sqlx::Error::PoolTimedOut)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn recommend_errors_map_to_status() {
    let limited = RecommendError::RateLimited(RateLimitError::PerClientExceeded { limit: 10, window_secs: 60 });
    assert_eq!(recommend_error_to_status(&limited), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(recommend_error_to_status(&RecommendError::Validation("x".into())), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(recommend_error_to_status(&RecommendError::LlmNotConfigured), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(recommend_error_to_status(&RecommendError::EmptyResponse), StatusCode::BAD_GATEWAY);
    let upstream = RecommendError::Llm(LlmError::ApiResponse { status: 500, body: String::new() });
    assert_eq!(recommend_error_to_status(&upstream), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn api_error_body_shape() {
    let err = ApiError::from(ForumError::Validation("Content cannot be empty.".into()));
    let resp = err.into_response();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(resp).await;
    assert_eq!(json["code"], "E_FORUM_VALIDATION");
    assert_eq!(json["message"], "Content cannot be empty.");
    assert_eq!(json["retryable"], false);
}

// =============================================================================
// catalog endpoints
// =============================================================================

#[tokio::test]
async fn list_plants_includes_images() {
    let state = test_helpers::test_app_state();
    let count = state.catalog.plants().len();
    let json = body_json(list_plants(State(state)).await).await;
    let plants = json.as_array().unwrap();
    assert_eq!(plants.len(), count);
    assert_eq!(plants[0]["slug"], "tulsi");
    assert_eq!(plants[0]["commonName"], "Tulsi");
    assert!(plants[0]["image"]["imageUrl"].is_string());
}

#[tokio::test]
async fn get_plant_unknown_slug_is_not_found() {
    let state = test_helpers::test_app_state();
    let Err(err) = get_plant(State(state), Path("mandrake".into())).await else {
        panic!("expected not found");
    };
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn explorer_has_areas_and_markers() {
    let state = test_helpers::test_app_state();
    let json = body_json(explorer(State(state)).await).await;
    assert_eq!(json["areas"].as_array().unwrap().len(), 4);
    let markers = json["markers"].as_array().unwrap();
    assert!(markers.iter().all(|m| m["slug"] != "amla" && m["slug"] != "shatavari"));
}

#[tokio::test]
async fn announcements_lists_four() {
    let state = test_helpers::test_app_state();
    let Json(items) = announcements(State(state)).await;
    assert_eq!(items.len(), 4);
}

// =============================================================================
// recommendations
// =============================================================================

#[tokio::test]
async fn recommendations_without_llm_is_unavailable() {
    let state = test_helpers::test_app_state();
    let body = RecommendRequest { goals: "help me sleep better".into() };
    let Err(err) = recommendations(State(state), Viewer::default(), Json(body)).await else {
        panic!("expected rejection");
    };
    assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(err.code, "E_LLM_NOT_CONFIGURED");
}

#[tokio::test]
async fn recommendations_includes_disclaimer() {
    let state = test_helpers::test_app_state_with_llm(Arc::new(TextLlm("Try Tulsi tea.")));
    let body = RecommendRequest { goals: "help me sleep better".into() };
    let Json(resp) = recommendations(State(state), Viewer::default(), Json(body)).await.unwrap();
    let json = serde_json::to_value(&resp).unwrap();
    assert_eq!(json["text"], "Try Tulsi tea.");
    assert_eq!(json["disclaimer"], DISCLAIMER);
}

#[tokio::test]
async fn recommendations_validates_goals() {
    let state = test_helpers::test_app_state_with_llm(Arc::new(TextLlm("unused")));
    let body = RecommendRequest { goals: "short".into() };
    let Err(err) = recommendations(State(state), Viewer::default(), Json(body)).await else {
        panic!("expected rejection");
    };
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
}
