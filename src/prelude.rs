pub use crate::config::Settings;
pub use crate::document::{Document, ScoredResult};
pub use crate::error::{Error, Result};
pub use crate::providers::EmbeddingProvider;
pub use crate::vector_store::{DocumentFilter, MmrOptions, VectorStore};
