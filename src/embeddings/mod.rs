//! Text embeddings support.

pub mod model;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmbedderError {
    #[error("Missing credential, set the `{0}` environment variable")]
    MissingCredential(&'static str),
    #[error("Embedding request failed: {0}")]
    Request(String),
    #[error("Failed to parse provider response: {0}")]
    Parse(String),
    #[error("Provider returned an error: {0}")]
    Provider(String),
}
