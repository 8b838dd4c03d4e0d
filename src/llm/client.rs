use crate::config::SamplingParams;
use async_trait::async_trait;
use thiserror::Error;

/// Marker that closes a completion-style prompt. Completion models continue
/// the text after it.
pub const ANSWER_MARKER: &str = "Odpowiedź:";

/// How the persona prompt has to be framed for a given model family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Full instructions followed by the question (chat/instruction models).
    Instruction,
    /// Short lead-in ending with [`ANSWER_MARKER`] (plain completion models).
    Completion,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("provider returned no text")]
    Empty,

    #[error("answer too short ({len} < {min} chars)")]
    TooShort { len: usize, min: usize },
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Transport(format!("request timed out: {}", e))
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// An external text-generation service.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    fn prompt_style(&self) -> PromptStyle;

    /// Sends `prompt` and returns the extracted, trimmed answer.
    async fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<String, ProviderError>;
}

/// Cuts `text` to at most `max` characters for log lines and error bodies.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("Cześć świecie", 5), "Cześć...");
        assert_eq!(truncate_chars("krótko", 20), "krótko");
    }

    #[test]
    fn test_error_messages() {
        let err = ProviderError::Status {
            status: 503,
            body: "loading".to_string(),
        };
        assert_eq!(err.to_string(), "provider returned status 503: loading");
        assert_eq!(
            ProviderError::TooShort { len: 2, min: 6 }.to_string(),
            "answer too short (2 < 6 chars)"
        );
    }
}
