use crate::{
    config::PersonaConfig,
    llm::{ANSWER_MARKER, PromptStyle},
};

/// Persona prompt template. Wraps a user question into the text sent to a
/// provider.
#[derive(Debug, Clone)]
pub struct Persona {
    instructions: String,
    preamble: String,
}

impl Persona {
    pub fn new(instructions: impl Into<String>, preamble: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            preamble: preamble.into(),
        }
    }

    pub fn render(&self, style: PromptStyle, question: &str) -> String {
        match style {
            PromptStyle::Instruction => format!(
                "{}\n\nPytanie: {}\n\nOdpowiedz w sposób ciepły, zabawny i pozytywny:",
                self.instructions.trim(),
                question
            ),
            PromptStyle::Completion => format!(
                "{} Pytanie: {}\n{}",
                self.preamble.trim(),
                question,
                ANSWER_MARKER
            ),
        }
    }
}

impl From<&PersonaConfig> for Persona {
    fn from(config: &PersonaConfig) -> Self {
        Self::new(config.instructions.clone(), config.preamble.clone())
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::from(&PersonaConfig::default())
    }
}
