use crate::{embeddings::EmbedderError, vector_store::VectorStoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Embedder error")]
    Embedder(#[from] EmbedderError),
    #[error("VectorStore error")]
    VectorStore(#[from] VectorStoreError),
}

pub type Result<T> = std::result::Result<T, Error>;
