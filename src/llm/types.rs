//! Wire envelopes of the supported providers.

use crate::config::SamplingParams;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiContent {
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HfRequest {
    pub inputs: String,
    pub parameters: HfParameters,
}

#[derive(Debug, Clone, Serialize)]
pub struct HfParameters {
    pub max_length: u32,
    pub temperature: f32,
    pub do_sample: bool,
    pub top_p: f32,
    pub pad_token_id: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HfGeneration {
    #[serde(default)]
    pub generated_text: String,
}

/// GPT-2 end-of-text token, used for padding.
const GPT2_EOS_TOKEN_ID: u32 = 50256;

impl GeminiRequest {
    pub fn new(prompt: &str, params: &SamplingParams) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: params.temperature,
                top_p: params.top_p,
                top_k: params.top_k,
                max_output_tokens: params.max_tokens,
            },
        }
    }
}

impl GeminiResponse {
    /// `candidates[0].content.parts[0].text`
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

impl HfRequest {
    pub fn new(prompt: &str, params: &SamplingParams) -> Self {
        Self {
            inputs: prompt.to_string(),
            parameters: HfParameters {
                max_length: params.max_tokens,
                temperature: params.temperature,
                do_sample: true,
                top_p: params.top_p,
                pad_token_id: GPT2_EOS_TOKEN_ID,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn params() -> SamplingParams {
        SamplingParams {
            temperature: 0.5,
            top_p: 0.75,
            top_k: Some(40),
            max_tokens: 200,
        }
    }

    #[test]
    fn test_gemini_request_shape() {
        let value = serde_json::to_value(GeminiRequest::new("Hej", &params())).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{"parts": [{"text": "Hej"}]}],
                "generationConfig": {
                    "temperature": 0.5,
                    "topP": 0.75,
                    "topK": 40,
                    "maxOutputTokens": 200
                }
            })
        );
    }

    #[test]
    fn test_gemini_first_text() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "Witaj!"}], "role": "model"}}]
        }))
        .unwrap();
        assert_eq!(response.first_text(), Some("Witaj!"));
    }

    #[test]
    fn test_gemini_first_text_missing_parts() {
        let response: GeminiResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert_eq!(response.first_text(), None);

        let response: GeminiResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(response.first_text(), None);
    }

    #[test]
    fn test_hf_request_shape() {
        let value = serde_json::to_value(HfRequest::new("Pytanie", &params())).unwrap();

        assert_eq!(value["inputs"], "Pytanie");
        assert_eq!(value["parameters"]["max_length"], 200);
        assert_eq!(value["parameters"]["do_sample"], true);
        assert_eq!(value["parameters"]["pad_token_id"], 50256);
    }
}
