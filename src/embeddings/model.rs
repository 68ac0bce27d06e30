use crate::embeddings::EmbedderError;
use async_trait::async_trait;

/// A provider turning text into a fixed-length embedding vector.
#[async_trait]
pub trait EmbeddingModel: Send + Sync + std::fmt::Debug {
    async fn embed(&self, text: &str) -> Result<Vec<f64>, EmbedderError>;
}
