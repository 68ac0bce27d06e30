//! # Embedding Playground
//!
//! A small library for testing text embedding providers against an
//! in-memory similarity search store. Pick a provider, load documents with
//! optional key/value metadata, then query two ways: plain top-k cosine
//! similarity and diversity-aware MMR retrieval.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedding_playground::prelude::*;
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut store = VectorStore::new(EmbeddingProvider::OpenAi, Settings::from_env());
//!     store.load()?;
//!
//!     store.add_document("cats are great", HashMap::new()).await?;
//!     store.add_document("stock markets crashed today", HashMap::new()).await?;
//!
//!     for hit in store.search("feline pets", 1, None).await? {
//!         println!("{:.3} {}", hit.score, hit.content);
//!     }
//!
//!     let diverse = store.retrieve("pets", 2, None, MmrOptions::default()).await?;
//!     println!("{} documents in MMR order", diverse.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Lifecycle
//!
//! A store moves `Uninitialized → load() → Ready → reset() → Uninitialized`.
//! Only `Ready` accepts data operations; everything else fails fast with a
//! not-initialized error. One store instance serves one session, and all
//! vectors in it come from the provider bound at load time.

/// Credential settings loaded from the environment.
pub mod config;

/// Document and search-result types.
pub mod document;

/// Text embeddings support.
pub mod embeddings;

/// Error types for all library operations.
pub mod error;

/// Convenience prelude exports.
pub mod prelude;

/// Builtin embedding model providers.
pub mod providers;

/// Vector storage and retrieval.
pub mod vector_store;
