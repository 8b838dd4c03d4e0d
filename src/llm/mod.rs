mod client;
mod gemini;
mod huggingface;
mod types;

pub use client::*;
pub use gemini::GeminiProvider;
pub use huggingface::{HuggingFaceProvider, extract_answer};
pub use types::*;

use crate::{
    Result,
    config::{ProviderKind, ProvidersConfig, SamplingParams},
};
use std::sync::Arc;

/// A provider together with the sampling parameters it is called with.
pub type ProviderRoute = (Arc<dyn Provider>, SamplingParams);

/// Builds the configured providers in call order.
pub fn build_chain(config: &ProvidersConfig) -> Result<Vec<ProviderRoute>> {
    let mut routes = Vec::new();

    for kind in config.chain() {
        let route: ProviderRoute = match kind {
            ProviderKind::Gemini => {
                let provider: Arc<dyn Provider> = Arc::new(GeminiProvider::new(&config.gemini)?);
                (provider, config.gemini.sampling.clone())
            }
            ProviderKind::HuggingFace => {
                let provider: Arc<dyn Provider> =
                    Arc::new(HuggingFaceProvider::new(&config.huggingface)?);
                (provider, config.huggingface.sampling.clone())
            }
        };
        routes.push(route);
    }

    Ok(routes)
}
