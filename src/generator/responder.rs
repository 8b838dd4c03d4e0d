use super::{fallback::FallbackSet, persona::Persona};
use crate::{
    Result,
    config::{Config, SamplingParams},
    llm::{self, Provider, ProviderError, ProviderRoute, truncate_chars},
};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns a user question into a displayable answer.
///
/// Providers are tried in order; the first usable answer wins. When all of
/// them fail the answer is a canned response, so [`ResponseGenerator::generate`]
/// never fails.
pub struct ResponseGenerator {
    routes: Vec<ProviderRoute>,
    persona: Persona,
    fallback: FallbackSet,
    min_response_chars: usize,
}

impl ResponseGenerator {
    pub fn new(persona: Persona, fallback: FallbackSet, min_response_chars: usize) -> Self {
        Self {
            routes: Vec::new(),
            persona,
            fallback,
            min_response_chars,
        }
    }

    /// Builds the generator with HTTP providers for every configured credential.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut generator = Self::new(
            Persona::from(&config.persona),
            FallbackSet::new(config.generation.fallback_responses.clone()),
            config.generation.min_response_chars,
        );

        for (provider, params) in llm::build_chain(&config.providers)? {
            generator = generator.with_provider(provider, params);
        }

        info!(
            "Response generator ready with {} provider(s) and {} canned responses",
            generator.routes.len(),
            generator.fallback.len()
        );

        Ok(generator)
    }

    /// Appends a provider to the end of the chain.
    pub fn with_provider(mut self, provider: Arc<dyn Provider>, params: SamplingParams) -> Self {
        self.routes.push((provider, params));
        self
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.routes.iter().map(|(p, _)| p.name()).collect()
    }

    pub fn fallback(&self) -> &FallbackSet {
        &self.fallback
    }

    pub fn min_response_chars(&self) -> usize {
        self.min_response_chars
    }

    pub async fn generate(&self, question: &str) -> String {
        if let Some(answer) = self.try_providers(question).await {
            return answer;
        }

        let mut rng = rand::rng();
        self.fallback.pick(&mut rng).to_string()
    }

    /// Same as [`generate`](Self::generate) with an explicit random source for
    /// the fallback choice.
    pub async fn generate_with_rng<R>(&self, question: &str, rng: &mut R) -> String
    where
        R: Rng + Send + ?Sized,
    {
        match self.try_providers(question).await {
            Some(answer) => answer,
            None => self.fallback.pick(rng).to_string(),
        }
    }

    /// Walks the provider chain. `None` means every provider failed.
    pub async fn try_providers(&self, question: &str) -> Option<String> {
        for (provider, params) in &self.routes {
            match self.call(provider.as_ref(), params, question).await {
                Ok(answer) => {
                    debug!(
                        "Answer from {}: {}",
                        provider.name(),
                        truncate_chars(&answer, 100)
                    );
                    return Some(answer);
                }
                Err(e) => warn!("Provider {} failed: {}", provider.name(), e),
            }
        }

        if !self.routes.is_empty() {
            warn!("All providers failed, serving canned response");
        }
        None
    }

    /// Calls a single provider by name, bypassing the chain. `None` when no
    /// provider with that name is configured.
    pub async fn probe(
        &self,
        name: &str,
        question: &str,
    ) -> Option<std::result::Result<String, ProviderError>> {
        let (provider, params) = self.routes.iter().find(|(p, _)| p.name() == name)?;
        Some(self.call(provider.as_ref(), params, question).await)
    }

    async fn call(
        &self,
        provider: &dyn Provider,
        params: &SamplingParams,
        question: &str,
    ) -> std::result::Result<String, ProviderError> {
        let prompt = self.persona.render(provider.prompt_style(), question);
        let raw = provider.generate(&prompt, params).await?;
        let answer = raw.strip_prefix(prompt.as_str()).unwrap_or(&raw).trim();

        if answer.is_empty() {
            return Err(ProviderError::Empty);
        }

        let len = answer.chars().count();
        if len < self.min_response_chars {
            return Err(ProviderError::TooShort {
                len,
                min: self.min_response_chars,
            });
        }

        Ok(answer.to_string())
    }
}
