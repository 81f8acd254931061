use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

fn config() -> GitHubConfig {
    GitHubConfig {
        client_id: "id123".into(),
        client_secret: "secret456".into(),
        redirect_uri: "http://localhost:3000/auth/github/callback".into(),
    }
}

// =============================================================================
// GitHubConfig
// =============================================================================

#[test]
fn from_lookup_all_set_returns_some() {
    let config = GitHubConfig::from_lookup(lookup(&[
        ("GITHUB_CLIENT_ID", "id123"),
        ("GITHUB_CLIENT_SECRET", "secret456"),
        ("GITHUB_REDIRECT_URI", "http://localhost/callback"),
    ]))
    .unwrap();
    assert_eq!(config.client_id, "id123");
    assert_eq!(config.client_secret, "secret456");
    assert_eq!(config.redirect_uri, "http://localhost/callback");
}

#[test]
fn from_lookup_missing_secret_returns_none() {
    let config = GitHubConfig::from_lookup(lookup(&[
        ("GITHUB_CLIENT_ID", "id123"),
        ("GITHUB_REDIRECT_URI", "http://localhost/callback"),
    ]));
    assert!(config.is_none());
}

#[test]
fn from_lookup_blank_value_returns_none() {
    let config = GitHubConfig::from_lookup(lookup(&[
        ("GITHUB_CLIENT_ID", "  "),
        ("GITHUB_CLIENT_SECRET", "secret456"),
        ("GITHUB_REDIRECT_URI", "http://localhost/callback"),
    ]));
    assert!(config.is_none());
}

#[test]
fn authorize_url_encodes_redirect_and_state() {
    let url = config().authorize_url("abc123");
    assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
    assert!(url.contains("client_id=id123"));
    assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fgithub%2Fcallback"));
    assert!(url.contains("scope=read%3Auser"));
    assert!(url.contains("state=abc123"));
    assert!(!url.contains("secret456"));
}

// =============================================================================
// GitHubUser
// =============================================================================

#[test]
fn display_name_prefers_profile_name() {
    let user: GitHubUser =
        serde_json::from_str(r#"{"id":1,"login":"asha","name":"Asha Rao","avatar_url":null}"#).unwrap();
    assert_eq!(user.display_name(), "Asha Rao");
}

#[test]
fn display_name_falls_back_to_login() {
    let user: GitHubUser = serde_json::from_str(r#"{"id":1,"login":"asha","avatar_url":"https://a/b.png"}"#).unwrap();
    assert_eq!(user.display_name(), "asha");
    assert_eq!(user.avatar_url.as_deref(), Some("https://a/b.png"));
}

// =============================================================================
// token response
// =============================================================================

#[test]
fn parse_token_response_extracts_token() {
    let token = parse_token_response(r#"{"access_token":"gho_x","token_type":"bearer"}"#).unwrap();
    assert_eq!(token, "gho_x");
}

#[test]
fn parse_token_response_error_body() {
    let err = parse_token_response(r#"{"error":"bad_verification_code"}"#).unwrap_err();
    assert!(matches!(err, AuthError::TokenExchange(msg) if msg.contains("bad_verification_code")));
}

#[test]
fn auth_error_codes() {
    assert_eq!(AuthError::TokenExchange("x".into()).error_code(), "E_AUTH_TOKEN_EXCHANGE");
    assert!(!AuthError::TokenExchange("x".into()).retryable());
    assert_eq!(AuthError::GitHubApi("x".into()).error_code(), "E_AUTH_GITHUB_API");
    assert!(AuthError::GitHubApi("x".into()).retryable());
}
