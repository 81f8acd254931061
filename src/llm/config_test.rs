use super::*;
use std::collections::HashMap;

fn config_from(pairs: &[(&str, &str)]) -> Result<LlmConfig, LlmError> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    LlmConfig::from_lookup(|key| vars.get(key).cloned())
}

const KEY: [(&str, &str); 2] = [("LLM_API_KEY_ENV", "GARDEN_LLM_KEY"), ("GARDEN_LLM_KEY", "secret")];

#[test]
fn defaults_to_anthropic() {
    let cfg = config_from(&KEY).unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::Anthropic);
    assert_eq!(cfg.model, "claude-sonnet-4-5-20250929");
    assert_eq!(cfg.openai_base_url, DEFAULT_OPENAI_BASE_URL);
    assert_eq!(
        cfg.timeouts,
        LlmTimeouts { request_secs: DEFAULT_LLM_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_LLM_CONNECT_TIMEOUT_SECS }
    );
    assert_eq!(cfg.api_key, "secret");
}

#[test]
fn openai_overrides() {
    let mut pairs = KEY.to_vec();
    pairs.extend([
        ("LLM_PROVIDER", "openai"),
        ("LLM_OPENAI_BASE_URL", "https://example.test/v1/"),
        ("LLM_REQUEST_TIMEOUT_SECS", "42"),
        ("LLM_CONNECT_TIMEOUT_SECS", "7"),
    ]);
    let cfg = config_from(&pairs).unwrap();
    assert_eq!(cfg.provider, LlmProviderKind::OpenAi);
    assert_eq!(cfg.model, "gpt-4o-mini");
    assert_eq!(cfg.openai_base_url, "https://example.test/v1");
    assert_eq!(cfg.timeouts, LlmTimeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn explicit_model_and_bad_timeouts() {
    let mut pairs = KEY.to_vec();
    pairs.extend([("LLM_MODEL", "claude-haiku"), ("LLM_REQUEST_TIMEOUT_SECS", "soon")]);
    let cfg = config_from(&pairs).unwrap();
    assert_eq!(cfg.model, "claude-haiku");
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_LLM_REQUEST_TIMEOUT_SECS);
}

#[test]
fn unknown_provider_is_rejected() {
    let mut pairs = KEY.to_vec();
    pairs.push(("LLM_PROVIDER", "llama"));
    assert!(matches!(config_from(&pairs), Err(LlmError::ConfigParse(_))));
}

#[test]
fn missing_key_names_the_variable() {
    assert!(matches!(
        config_from(&[]),
        Err(LlmError::MissingApiKey { var }) if var == "LLM_API_KEY_ENV"
    ));
    assert!(matches!(
        config_from(&[("LLM_API_KEY_ENV", "GARDEN_LLM_KEY")]),
        Err(LlmError::MissingApiKey { var }) if var == "GARDEN_LLM_KEY"
    ));
    assert!(matches!(
        config_from(&[("LLM_API_KEY_ENV", "GARDEN_LLM_KEY"), ("GARDEN_LLM_KEY", "  ")]),
        Err(LlmError::MissingApiKey { .. })
    ));
}

#[test]
fn provider_parsing_trims() {
    assert_eq!(LlmProviderKind::parse(None).unwrap(), LlmProviderKind::Anthropic);
    assert_eq!(LlmProviderKind::parse(Some(" openai ")).unwrap(), LlmProviderKind::OpenAi);
    assert!(LlmProviderKind::parse(Some("gemini")).is_err());
}
