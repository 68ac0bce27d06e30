//! Builtin embedding providers.

pub(crate) mod clova;
pub(crate) mod openai;

pub use clova::ClovaEmbedding;
pub use openai::OpenAiEmbedding;

use crate::config::{Settings, CLOVA_API_KEY_VAR, OPENAI_API_KEY_VAR};
use crate::embeddings::{model::EmbeddingModel, EmbedderError};
use tracing::info;

/// The supported embedding providers, each binding a fixed model and a
/// credential sourced from [`Settings`].
///
/// Embeddings from different providers are not comparable, so a provider is
/// bound to a vector store at load time and switching requires a fresh
/// store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProvider {
    Clova,
    OpenAi,
}

impl EmbeddingProvider {
    pub const ALL: [Self; 2] = [Self::Clova, Self::OpenAi];

    /// Display label, e.g. for a provider picker.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Clova => "clova",
            Self::OpenAi => "openai",
        }
    }

    /// Constructs the embedding client for this provider.
    ///
    /// Fails with [`EmbedderError::MissingCredential`] when the provider's
    /// key is absent from `settings`.
    pub fn build(self, settings: &Settings) -> Result<Box<dyn EmbeddingModel>, EmbedderError> {
        info!("Loading embedding client for {}", self.label());
        match self {
            Self::Clova => {
                let api_key = settings
                    .clova_api_key
                    .clone()
                    .ok_or(EmbedderError::MissingCredential(CLOVA_API_KEY_VAR))?;
                Ok(Box::new(ClovaEmbedding::new(api_key)))
            }
            Self::OpenAi => {
                let api_key = settings
                    .openai_api_key
                    .clone()
                    .ok_or(EmbedderError::MissingCredential(OPENAI_API_KEY_VAR))?;
                Ok(Box::new(OpenAiEmbedding::new(api_key)))
            }
        }
    }
}
