use async_trait::async_trait;
use persona_chat::{
    config::SamplingParams,
    llm::{PromptStyle, Provider, ProviderError},
};
use std::sync::{Arc, Mutex};

/// Scripted provider that records every prompt it receives.
#[derive(Debug)]
pub struct MockProvider {
    name: String,
    style: PromptStyle,
    reply: Result<String, ProviderError>,
    echo_prompt: bool,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    pub fn answering(name: &str, answer: &str) -> Self {
        Self {
            name: name.to_string(),
            style: PromptStyle::Instruction,
            reply: Ok(answer.to_string()),
            echo_prompt: false,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(name: &str, error: ProviderError) -> Self {
        Self {
            reply: Err(error),
            ..Self::answering(name, "")
        }
    }

    /// Replies with the prompt followed by the answer, like completion models do.
    pub fn echoing(name: &str, answer: &str) -> Self {
        Self {
            echo_prompt: true,
            ..Self::answering(name, answer)
        }
    }

    pub fn with_style(mut self, style: PromptStyle) -> Self {
        self.style = style;
        self
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn prompt_style(&self) -> PromptStyle {
        self.style
    }

    async fn generate(
        &self,
        prompt: &str,
        _params: &SamplingParams,
    ) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        match &self.reply {
            Ok(answer) if self.echo_prompt => Ok(format!("{} {}", prompt, answer)),
            Ok(answer) => Ok(answer.clone()),
            Err(e) => Err(e.clone()),
        }
    }
}
