use super::client::{PromptStyle, Provider, ProviderError, truncate_chars};
use super::types::{GeminiRequest, GeminiResponse};
use crate::{
    Error,
    config::{GeminiConfig, SamplingParams},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Google Gemini `generateContent` REST endpoint.
pub struct GeminiProvider {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(config: &GeminiConfig) -> crate::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::config("Gemini provider requires an API key"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn prompt_style(&self) -> PromptStyle {
        PromptStyle::Instruction
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<String, ProviderError> {
        debug!("Sending Gemini request: {}", truncate_chars(prompt, 50));

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GeminiRequest::new(prompt, params))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        debug!(
            "Gemini status: {}, body: {}",
            status,
            truncate_chars(&body, 200)
        );

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, 500),
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedPayload(e.to_string()))?;

        parsed
            .first_text()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or(ProviderError::Empty)
    }
}
