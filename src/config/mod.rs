mod types;

pub use types::*;

use crate::Result;
use std::env;
use std::path::Path;
use tracing::{debug, info, warn};

pub const ENV_CONFIG_PATH: &str = "CONFIG_PATH";
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_API_URL: &str = "GEMINI_API_URL";
pub const ENV_HF_TOKEN: &str = "HF_TOKEN";
pub const ENV_HF_API_URL: &str = "HF_API_URL";
pub const ENV_PRIMARY_PROVIDER: &str = "PRIMARY_PROVIDER";
pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DEBUG: &str = "DEBUG";

/// Values copied verbatim from setup guides that mean "not configured".
const PLACEHOLDER_CREDENTIALS: &[&str] = &["TWÓJ_TOKEN_HF", "your-token-here", "changeme"];

/// Resolved configuration plus the advisory notes produced while resolving it.
///
/// Loading happens before logging is initialised, so notes are carried back to
/// `main` instead of being logged here.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub config: Config,
    pub notes: Vec<String>,
}

pub async fn load() -> Result<Loaded> {
    let config_path = env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| "config.yaml".to_string());

    let mut config = load_file(&config_path).await?;
    let notes = resolve(&mut config, |key| env::var(key).ok());

    Ok(Loaded { config, notes })
}

/// Reads the YAML settings file. A missing file yields the defaults.
pub async fn load_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();

    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        debug!("No configuration file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Applies environment overrides on top of the file values and normalises
/// credentials. `lookup` stands in for `std::env::var`.
pub fn resolve<F>(config: &mut Config, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut notes = Vec::new();

    if let Some(key) = lookup(ENV_GEMINI_API_KEY) {
        config.providers.gemini.api_key = Some(key);
    }
    if let Some(token) = lookup(ENV_HF_TOKEN) {
        config.providers.huggingface.token = Some(token);
    }
    if let Some(url) = lookup(ENV_GEMINI_API_URL).filter(|u| !u.trim().is_empty()) {
        config.providers.gemini.url = url.trim().to_string();
    }
    if let Some(url) = lookup(ENV_HF_API_URL).filter(|u| !u.trim().is_empty()) {
        config.providers.huggingface.url = url.trim().to_string();
    }

    config.providers.gemini.api_key = config
        .providers
        .gemini
        .api_key
        .as_deref()
        .and_then(sanitize_credential);
    config.providers.huggingface.token = config
        .providers
        .huggingface
        .token
        .as_deref()
        .and_then(sanitize_credential);

    if let Some(primary) = lookup(ENV_PRIMARY_PROVIDER) {
        match primary.parse::<ProviderKind>() {
            Ok(kind) => config.providers.primary = kind,
            Err(e) => notes.push(format!(
                "{} ignored: {}; keeping {}",
                ENV_PRIMARY_PROVIDER, e, config.providers.primary
            )),
        }
    }

    if let Some(host) = lookup(ENV_HOST).filter(|h| !h.trim().is_empty()) {
        config.server.host = host.trim().to_string();
    }
    if let Some(port) = lookup(ENV_PORT) {
        match port.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => {
                notes.push(format!(
                    "{}={:?} is not a valid port, falling back to {}",
                    ENV_PORT,
                    port,
                    default_port()
                ));
                config.server.port = default_port();
            }
        }
    }
    if let Some(debug) = lookup(ENV_DEBUG) {
        config.server.diagnostics = debug.trim().eq_ignore_ascii_case("true");
    }

    notes
}

/// Strips every whitespace character and maps placeholders to `None`.
pub fn sanitize_credential(raw: &str) -> Option<String> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() || PLACEHOLDER_CREDENTIALS.contains(&cleaned.as_str()) {
        None
    } else {
        Some(cleaned)
    }
}

/// Shape checks on the resolved configuration. Advisory only.
pub fn validate(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    let providers = &config.providers;

    if let Some(key) = &providers.gemini.api_key {
        if !key.starts_with("AIza") {
            warnings.push("Gemini API key does not start with 'AIza'".to_string());
        }
        if key.chars().count() < 30 {
            warnings.push(format!(
                "Gemini API key looks too short ({} chars)",
                key.chars().count()
            ));
        }
    }

    if let Some(token) = &providers.huggingface.token {
        if !token.starts_with("hf_") {
            warnings.push("Hugging Face token does not start with 'hf_'".to_string());
        }
        if token.chars().count() < 30 {
            warnings.push(format!(
                "Hugging Face token looks too short ({} chars)",
                token.chars().count()
            ));
        }
    }

    if providers.chain().is_empty() {
        warnings.push(format!(
            "No provider credentials found; set {} or {}. Every answer will be a canned fallback",
            ENV_GEMINI_API_KEY, ENV_HF_TOKEN
        ));
    } else if !providers.is_configured(providers.primary) {
        warnings.push(format!(
            "Primary provider {} has no credential, using {} only",
            providers.primary,
            providers.primary.other()
        ));
    }

    if config.generation.fallback_responses.is_empty() {
        warnings.push("generation.fallback_responses is empty, using built-in set".to_string());
    }

    warnings
}

/// Renders a secret as its first characters and length.
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 8 {
        return format!("**** ({} chars)", len);
    }
    let prefix: String = secret.chars().take(6).collect();
    format!("{}... ({} chars)", prefix, len)
}

/// Logs the startup status lines: which providers will be called and with
/// which (masked) credentials.
pub fn log_status(config: &Config) {
    let providers = &config.providers;
    let chain = providers.chain();

    match chain.first() {
        Some(primary) => info!("Primary provider: {}", primary),
        None => warn!("No provider configured, serving canned responses only"),
    }
    if let Some(secondary) = chain.get(1) {
        info!("Secondary provider: {}", secondary);
    }

    if let Some(key) = &providers.gemini.api_key {
        info!(
            "Gemini configured (key: {}, endpoint: {})",
            mask_secret(key),
            providers.gemini.url
        );
    }
    if let Some(token) = &providers.huggingface.token {
        info!(
            "Hugging Face configured (token: {}, endpoint: {})",
            mask_secret(token),
            providers.huggingface.url
        );
    }

    if config.server.diagnostics {
        warn!("Diagnostics routes enabled under /debug");
    }
}
