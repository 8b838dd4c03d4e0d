use super::mocks::MockProvider;
use axum::Router;
use persona_chat::{
    config::{Config, SamplingParams},
    generator::{FallbackSet, Persona, ResponseGenerator},
    llm::Provider,
    server::{AppState, router},
};
use std::sync::Arc;
use tempfile::TempDir;

pub fn test_params() -> SamplingParams {
    SamplingParams {
        temperature: 0.7,
        top_p: 0.9,
        top_k: None,
        max_tokens: 100,
    }
}

/// Generator with the default persona and fallback set, calling `providers`
/// in the given order.
pub fn generator_with(providers: &[Arc<MockProvider>]) -> ResponseGenerator {
    let mut generator = ResponseGenerator::new(Persona::default(), FallbackSet::default(), 6);
    for provider in providers {
        let provider: Arc<dyn Provider> = provider.clone();
        generator = generator.with_provider(provider, test_params());
    }
    generator
}

pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.logs.level = "debug".to_string();
    config
}

pub fn create_test_app(providers: &[Arc<MockProvider>], diagnostics: bool) -> Router {
    let mut config = create_test_config();
    config.server.diagnostics = diagnostics;
    router(AppState::new(generator_with(providers), config))
}

pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Writes `content` as `config.yaml` inside `dir`.
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> String {
    let config_path = dir.path().join("config.yaml");
    tokio::fs::write(&config_path, content)
        .await
        .expect("Failed to write config file");
    config_path.to_string_lossy().to_string()
}

pub fn is_canned(text: &str) -> bool {
    FallbackSet::default().contains(text)
}

pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  diagnostics: true
  logs:
    level: "debug"

providers:
  primary: huggingface
  gemini:
    api_key: "AIzaFileKey0000000000000000000000000"
    timeout_secs: 12
  huggingface:
    token: "hf_file_token_00000000000000000000000"
    url: "http://localhost:9999/models/gpt2"
    sampling:
      temperature: 0.5
      top_p: 0.8
      max_tokens: 120

generation:
  min_response_chars: 3
  fallback_responses:
    - "Chwilka, zaraz wracam!"

persona:
  preamble: "Jestem testowym botem."
"#;
