use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub providers: ProvidersConfig,
    pub generation: GenerationConfig,
    pub persona: PersonaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Exposes the `/debug` routes. Never enable on a public deployment.
    #[serde(default)]
    pub diagnostics: bool,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "gemini")]
    Gemini,
    #[serde(rename = "huggingface")]
    HuggingFace,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_primary")]
    pub primary: ProviderKind,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub huggingface: HuggingFaceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_gemini_url")]
    pub url: String,
    #[serde(default = "default_gemini_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_gemini_sampling")]
    pub sampling: SamplingParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuggingFaceConfig {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_hf_url")]
    pub url: String,
    #[serde(default = "default_hf_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_hf_sampling")]
    pub sampling: SamplingParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    #[serde(default)]
    pub top_k: Option<u32>,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Answers with fewer characters than this are treated as a failed call.
    #[serde(default = "default_min_response_chars")]
    pub min_response_chars: usize,
    #[serde(default = "default_fallback_responses")]
    pub fallback_responses: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Full persona instructions for instruction-tuned models.
    #[serde(default = "default_instructions")]
    pub instructions: String,
    /// Short lead-in for plain completion models.
    #[serde(default = "default_preamble")]
    pub preamble: String,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::HuggingFace => "huggingface",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::Gemini => Self::HuggingFace,
            Self::HuggingFace => Self::Gemini,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "huggingface" | "hugging_face" | "hf" => Ok(Self::HuggingFace),
            other => Err(crate::Error::UnknownProvider {
                name: other.to_string(),
            }),
        }
    }
}

impl ProvidersConfig {
    pub fn is_configured(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Gemini => self.gemini.api_key.is_some(),
            ProviderKind::HuggingFace => self.huggingface.token.is_some(),
        }
    }

    /// Providers in call order: the primary first, then the other one.
    /// Providers without a credential are left out.
    pub fn chain(&self) -> Vec<ProviderKind> {
        [self.primary, self.primary.other()]
            .into_iter()
            .filter(|kind| self.is_configured(*kind))
            .collect()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            diagnostics: false,
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            gemini: GeminiConfig::default(),
            huggingface: HuggingFaceConfig::default(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: default_gemini_url(),
            timeout_secs: default_gemini_timeout(),
            sampling: default_gemini_sampling(),
        }
    }
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            token: None,
            url: default_hf_url(),
            timeout_secs: default_hf_timeout(),
            sampling: default_hf_sampling(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_response_chars: default_min_response_chars(),
            fallback_responses: default_fallback_responses(),
        }
    }
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            instructions: default_instructions(),
            preamble: default_preamble(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_primary() -> ProviderKind {
    ProviderKind::Gemini
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        .to_string()
}

fn default_gemini_timeout() -> u64 {
    15
}

fn default_gemini_sampling() -> SamplingParams {
    SamplingParams {
        temperature: 0.8,
        top_p: 0.9,
        top_k: Some(40),
        max_tokens: 200,
    }
}

fn default_hf_url() -> String {
    "https://api-inference.huggingface.co/models/openai-community/gpt2".to_string()
}

fn default_hf_timeout() -> u64 {
    10
}

fn default_hf_sampling() -> SamplingParams {
    SamplingParams {
        temperature: 0.7,
        top_p: 0.9,
        top_k: None,
        max_tokens: 150,
    }
}

fn default_min_response_chars() -> usize {
    6
}

pub fn default_fallback_responses() -> Vec<String> {
    [
        "Przepraszam, mam chwilową przerwę w myśleniu! 😅 Spróbuj ponownie za chwilę.",
        "Moment, muszę się skupić - za bardzo się śmieję z naszej rozmowy! 😄 Napisz ponownie.",
        "Oj, chyba jestem tak rozrywkowy, że zapomniałem jak mówić! 😊 Spróbuj jeszcze raz.",
        "Wybacz, ale nasze rozmowy są tak fajne, że nie mogę się skupić! 🤗",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_instructions() -> String {
    "Jesteś bardzo zabawnym, przyjaznym i pozytywnym chatbotem.\n\
     \n\
     Twoje zadanie:\n\
     - Odpowiadaj w sposób, który rozśmieszy, pocieszy i sprawi radość\n\
     - Używaj emotikonek i pozytywnych komentarzy\n\
     - Pisz po polsku jak do dobrej znajomej\n\
     - Odpowiedź powinna być krótka (1-3 zdania)"
        .to_string()
}

fn default_preamble() -> String {
    "Jestem przyjaznym i zabawnym chatbotem.".to_string()
}
