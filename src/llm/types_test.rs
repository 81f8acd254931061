use super::*;
use crate::frame::ErrorCode;

fn response(content: Vec<ContentBlock>) -> ChatResponse {
    ChatResponse {
        content,
        model: "mock".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 1,
        output_tokens: 1,
    }
}

// =============================================================================
// ContentBlock serde
// =============================================================================

#[test]
fn content_block_text_deserializes() {
    let block: ContentBlock = serde_json::from_str(r#"{"type":"text","text":"hi"}"#).unwrap();
    assert!(matches!(block, ContentBlock::Text { text } if text == "hi"));
}

#[test]
fn content_block_tool_use_deserializes() {
    let block: ContentBlock =
        serde_json::from_str(r#"{"type":"tool_use","id":"tu_1","name":"recommend_plants","input":{"a":1}}"#).unwrap();
    assert!(matches!(block, ContentBlock::ToolUse { name, .. } if name == "recommend_plants"));
}

#[test]
fn content_block_unknown_type_is_unknown() {
    let block: ContentBlock = serde_json::from_str(r#"{"type":"thinking","thinking":"hmm"}"#).unwrap();
    assert!(matches!(block, ContentBlock::Unknown));
}

// =============================================================================
// ChatResponse helpers
// =============================================================================

#[test]
fn text_joins_non_empty_blocks() {
    let resp = response(vec![
        ContentBlock::Text { text: "first".into() },
        ContentBlock::Text { text: "   ".into() },
        ContentBlock::Text { text: "second".into() },
    ]);
    assert_eq!(resp.text().as_deref(), Some("first\nsecond"));
}

#[test]
fn text_none_without_text_blocks() {
    let resp = response(vec![ContentBlock::Unknown]);
    assert!(resp.text().is_none());
}

#[test]
fn tool_input_finds_named_tool() {
    let resp = response(vec![
        ContentBlock::ToolUse { id: "1".into(), name: "other".into(), input: serde_json::json!({"x": 1}) },
        ContentBlock::ToolUse { id: "2".into(), name: "recommend_plants".into(), input: serde_json::json!({"x": 2}) },
    ]);
    assert_eq!(resp.tool_input("recommend_plants"), Some(&serde_json::json!({"x": 2})));
    assert!(resp.tool_input("missing").is_none());
}

#[test]
fn message_user_sets_role() {
    let msg = Message::user("hello");
    assert_eq!(msg.role, "user");
    assert_eq!(msg.content, "hello");
}

// =============================================================================
// ErrorCode
// =============================================================================

#[test]
fn retryable_statuses() {
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
    assert!(!LlmError::ApiResponse { status: 400, body: String::new() }.retryable());
    assert!(LlmError::ApiRequest("timeout".into()).retryable());
    assert!(!LlmError::ApiParse("bad".into()).retryable());
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(LlmError::MissingApiKey { var: "X".into() }.error_code(), "E_MISSING_API_KEY");
    assert_eq!(LlmError::ApiParse(String::new()).error_code(), "E_API_PARSE");
}
