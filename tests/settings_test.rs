use std::collections::HashMap;
use std::path::PathBuf;

use yaad::presentation::config::{ConfigError, Environment, Settings};

fn base_vars() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("DEEPGRAM_API_KEY", "dg-test"),
        ("OPENAI_API_KEY", "oa-test"),
        ("QDRANT_URL", "http://localhost:6334"),
        ("QDRANT_COLLECTION", "memories"),
    ])
}

fn from_map(vars: &HashMap<&str, &str>) -> Result<Settings, ConfigError> {
    Settings::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
}

#[test]
fn given_all_required_vars_when_loading_then_defaults_apply() {
    let settings = from_map(&base_vars()).unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.openai.embedding_model, "text-embedding-ada-002");
    assert_eq!(settings.openai.embedding_dimensions, 1536);
    assert_eq!(settings.openai.chat_model, "gpt-4");
    assert_eq!(settings.openai.moderation_model, "text-moderation-latest");
    assert_eq!(settings.retrieval.top_k, 5);
    assert_eq!(settings.audio.directory, PathBuf::from("public/audio"));
    assert_eq!(settings.logging.environment, Environment::Local);
    assert!(!settings.logging.json_format);
    assert!(settings.deepgram.base_url.is_none());
}

#[test]
fn given_missing_vars_when_loading_then_all_names_are_reported() {
    let mut vars = base_vars();
    vars.remove("OPENAI_API_KEY");
    vars.remove("QDRANT_COLLECTION");

    let err = from_map(&vars).unwrap_err();

    match err {
        ConfigError::MissingVariables(names) => {
            assert_eq!(names, vec!["OPENAI_API_KEY", "QDRANT_COLLECTION"]);
        }
        other => panic!("expected MissingVariables, got {other:?}"),
    }
}

#[test]
fn given_no_vars_when_loading_then_every_required_name_is_reported() {
    let err = from_map(&HashMap::new()).unwrap_err();

    match err {
        ConfigError::MissingVariables(names) => {
            assert_eq!(
                names,
                vec![
                    "DEEPGRAM_API_KEY",
                    "OPENAI_API_KEY",
                    "QDRANT_URL",
                    "QDRANT_COLLECTION",
                ]
            );
        }
        other => panic!("expected MissingVariables, got {other:?}"),
    }
}

#[test]
fn given_blank_value_when_loading_then_it_counts_as_missing() {
    let mut vars = base_vars();
    vars.insert("DEEPGRAM_API_KEY", "   ");

    let err = from_map(&vars).unwrap_err();

    match err {
        ConfigError::MissingVariables(names) => {
            assert_eq!(names, vec!["DEEPGRAM_API_KEY"]);
        }
        other => panic!("expected MissingVariables, got {other:?}"),
    }
}

#[test]
fn given_unparseable_port_when_loading_then_invalid_value_names_the_var() {
    let mut vars = base_vars();
    vars.insert("SERVER_PORT", "not-a-port");

    let err = from_map(&vars).unwrap_err();

    match err {
        ConfigError::InvalidValue { name, value } => {
            assert_eq!(name, "SERVER_PORT");
            assert_eq!(value, "not-a-port");
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn given_overrides_when_loading_then_they_take_precedence() {
    let mut vars = base_vars();
    vars.insert("SERVER_PORT", "8080");
    vars.insert("RETRIEVAL_TOP_K", "3");
    vars.insert("OPENAI_BASE_URL", "http://localhost:9000/v1");
    vars.insert("APP_ENVIRONMENT", "prod");
    vars.insert("LOG_JSON", "true");

    let settings = from_map(&vars).unwrap();

    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.retrieval.top_k, 3);
    assert_eq!(
        settings.openai.base_url.as_deref(),
        Some("http://localhost:9000/v1")
    );
    assert_eq!(settings.logging.environment, Environment::Prod);
    assert!(settings.logging.json_format);
}

#[test]
fn given_unknown_environment_when_loading_then_invalid_value_is_returned() {
    let mut vars = base_vars();
    vars.insert("APP_ENVIRONMENT", "staging");

    let err = from_map(&vars).unwrap_err();

    assert!(matches!(err, ConfigError::InvalidValue { name, .. } if name == "APP_ENVIRONMENT"));
}
