use super::client::{ANSWER_MARKER, PromptStyle, Provider, ProviderError, truncate_chars};
use super::types::{HfGeneration, HfRequest};
use crate::{
    Error,
    config::{HuggingFaceConfig, SamplingParams},
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Hugging Face Inference API, text-generation task.
pub struct HuggingFaceProvider {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl HuggingFaceProvider {
    pub fn new(config: &HuggingFaceConfig) -> crate::Result<Self> {
        let token = config
            .token
            .clone()
            .ok_or_else(|| Error::config("Hugging Face provider requires a token"))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            token,
        })
    }
}

/// Completion models echo the prompt back. Drops the echo and anything up to
/// the last answer marker.
pub fn extract_answer(prompt: &str, generated: &str) -> String {
    let mut text = generated.strip_prefix(prompt).unwrap_or(generated);

    if let Some((_, after)) = text.rsplit_once(ANSWER_MARKER) {
        text = after;
    }

    text.trim().to_string()
}

#[async_trait]
impl Provider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    fn prompt_style(&self) -> PromptStyle {
        PromptStyle::Completion
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<String, ProviderError> {
        debug!("Sending Hugging Face request: {}", truncate_chars(prompt, 50));

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&HfRequest::new(prompt, params))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        debug!(
            "Hugging Face status: {}, body: {}",
            status,
            truncate_chars(&body, 200)
        );

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, 500),
            });
        }

        let generations: Vec<HfGeneration> = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedPayload(e.to_string()))?;

        let generated = generations.first().ok_or(ProviderError::Empty)?;
        let answer = extract_answer(prompt, &generated.generated_text);

        if answer.is_empty() {
            return Err(ProviderError::Empty);
        }

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_answer_strips_echo() {
        let prompt = "Jestem chatbotem. Pytanie: Hej\nOdpowiedź:";
        let generated = format!("{} Cześć, miło Cię widzieć!  ", prompt);

        assert_eq!(extract_answer(prompt, &generated), "Cześć, miło Cię widzieć!");
    }

    #[test]
    fn test_extract_answer_uses_last_marker() {
        let generated = "coś innego Odpowiedź: pierwsza Odpowiedź: druga";
        assert_eq!(extract_answer("prompt", generated), "druga");
    }

    #[test]
    fn test_extract_answer_without_echo() {
        assert_eq!(extract_answer("prompt", "  tylko tekst "), "tylko tekst");
    }

    #[test]
    fn test_requires_token() {
        assert!(HuggingFaceProvider::new(&HuggingFaceConfig::default()).is_err());
    }
}
