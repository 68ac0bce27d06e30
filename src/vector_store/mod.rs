//! Vector storage and retrieval.
//!
//! [`VectorStore`] is a CRUD-plus-query facade over an embedding-backed
//! in-memory index. A store is created against one [`EmbeddingProvider`],
//! allocates its index at [`load`](VectorStore::load), and drops it again at
//! [`reset`](VectorStore::reset); every data operation outside the loaded
//! state fails with [`VectorStoreError::NotInitialized`].

pub mod filter;
pub mod mmr;

pub use filter::DocumentFilter;
pub use mmr::MmrOptions;

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::Settings;
use crate::document::{Document, ScoredResult};
use crate::embeddings::{model::EmbeddingModel, EmbedderError};
use crate::providers::EmbeddingProvider;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum VectorStoreError {
    #[error("Store not initialized, call `load` first")]
    NotInitialized,
    #[error("Embedder error: {0}")]
    Embedder(#[from] EmbedderError),
}

/// Cosine similarity between two vectors.
///
/// Returns `0.0` when either vector has zero magnitude.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut mag_a = 0.0;
    let mut mag_b = 0.0;

    for i in 0..a.len().min(b.len()) {
        dot += a[i] * b[i];
        mag_a += a[i] * a[i];
        mag_b += b[i] * b[i];
    }

    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

struct StoredDocument {
    document: Document,
    embedding: Vec<f64>,
}

/// The in-memory index: the bound embedding client plus the stored entries,
/// kept in insertion order.
struct Index {
    model: Box<dyn EmbeddingModel>,
    entries: Vec<StoredDocument>,
}

impl Index {
    /// Scores every entry passing the filter against the query embedding
    /// and returns the `k` best, descending.
    fn top_k(
        &self,
        query: &[f64],
        k: usize,
        filter: Option<&DocumentFilter>,
    ) -> Vec<(f64, &StoredDocument)> {
        let mut results: Vec<(f64, &StoredDocument)> = self
            .entries
            .iter()
            .filter(|e| filter.map_or(true, |f| f.matches(&e.document)))
            .map(|e| (cosine_similarity(query, &e.embedding), e))
            .collect();
        results.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        results.truncate(k);
        results
    }
}

/// An embedding-backed similarity store for one session.
///
/// All embeddings in one store come from the single provider bound at load
/// time; switching providers means constructing a fresh store. Mutating
/// operations take `&mut self`, so sharing a store across tasks is the
/// caller's problem to serialize.
pub struct VectorStore {
    provider: EmbeddingProvider,
    settings: Settings,
    index: Option<Index>,
}

impl VectorStore {
    /// Creates an unloaded store. No index is allocated and no embedding
    /// client is built until [`load`](Self::load).
    #[must_use]
    pub fn new(provider: EmbeddingProvider, settings: Settings) -> Self {
        Self {
            provider,
            settings,
            index: None,
        }
    }

    #[must_use]
    pub fn provider(&self) -> EmbeddingProvider {
        self.provider
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    /// Idempotent initializer: builds the provider's embedding client and an
    /// empty index on first call, does nothing when already loaded.
    ///
    /// Fails when the provider's credential is missing from the settings.
    pub fn load(&mut self) -> Result<(), VectorStoreError> {
        if self.index.is_none() {
            let model = self.provider.build(&self.settings)?;
            self.load_with(model);
        }
        Ok(())
    }

    /// Like [`load`](Self::load), but binds a caller-supplied embedding
    /// client instead of building the provider's. No-op when already loaded.
    pub fn load_with(&mut self, model: Box<dyn EmbeddingModel>) {
        if self.index.is_none() {
            self.index = Some(Index {
                model,
                entries: Vec::new(),
            });
        }
    }

    /// Embeds and inserts one document, returning its assigned id.
    pub async fn add_document(
        &mut self,
        text: impl Into<String>,
        metadata: HashMap<String, String>,
    ) -> Result<String, VectorStoreError> {
        let index = self.index.as_mut().ok_or(VectorStoreError::NotInitialized)?;
        let text = text.into();
        let embedding = index.model.embed(&text).await?;
        let id = Uuid::new_v4().to_string();
        index.entries.push(StoredDocument {
            document: Document::new(id.clone(), text, metadata),
            embedding,
        });
        Ok(id)
    }

    /// Batch insert without metadata, returning the assigned ids.
    pub async fn add_documents(
        &mut self,
        texts: Vec<String>,
    ) -> Result<Vec<String>, VectorStoreError> {
        let mut ids = Vec::with_capacity(texts.len());
        for text in texts {
            ids.push(self.add_document(text, HashMap::new()).await?);
        }
        Ok(ids)
    }

    /// Top-k cosine similarity search, shaped for presentation.
    ///
    /// Results are ordered by descending score; an empty result is a valid
    /// outcome, not an error. The optional filter narrows which documents
    /// are scored at all.
    pub async fn search(
        &self,
        query: &str,
        k: usize,
        filter: Option<&DocumentFilter>,
    ) -> Result<Vec<ScoredResult>, VectorStoreError> {
        let index = self.index.as_ref().ok_or(VectorStoreError::NotInitialized)?;
        let query_embedding = index.model.embed(query).await?;
        let mut hits = index.top_k(&query_embedding, k, filter);
        // top_k already yields descending scores; the descending contract
        // is asserted here regardless.
        hits.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        if hits.is_empty() {
            warn!("No appropriate document found for search term {query:?}");
            return Ok(Vec::new());
        }

        Ok(hits
            .into_iter()
            .map(|(score, entry)| {
                let result = ScoredResult::from_document(&entry.document, score);
                debug!(metadata = ?result.metadata);
                result
            })
            .collect())
    }

    /// Maximal-marginal-relevance retrieval.
    ///
    /// Fetches a candidate pool of `options.fetch_k` (defaulting to `k`,
    /// optionally narrowed by the filter), then greedily selects up to `k`
    /// documents balancing query relevance against redundancy with what was
    /// already selected. Documents come back raw, in selection order,
    /// without the presentation transform `search` applies.
    pub async fn retrieve(
        &self,
        query: &str,
        k: usize,
        filter: Option<&DocumentFilter>,
        options: MmrOptions,
    ) -> Result<Vec<Document>, VectorStoreError> {
        let index = self.index.as_ref().ok_or(VectorStoreError::NotInitialized)?;
        let query_embedding = index.model.embed(query).await?;
        let fetch_k = options.fetch_k.unwrap_or(k);
        let candidates = index
            .top_k(&query_embedding, fetch_k, filter)
            .into_iter()
            .map(|(relevance, entry)| mmr::Candidate {
                relevance,
                embedding: entry.embedding.as_slice(),
                payload: &entry.document,
            })
            .collect();
        Ok(mmr::select(candidates, k, options.lambda)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Every stored document with its id, in insertion order. The ordering
    /// is an implementation detail, not a documented guarantee.
    pub fn get_all_documents(&self) -> Result<Vec<(String, Document)>, VectorStoreError> {
        let index = self.index.as_ref().ok_or(VectorStoreError::NotInitialized)?;
        Ok(index
            .entries
            .iter()
            .map(|e| (e.document.id.clone(), e.document.clone()))
            .collect())
    }

    /// Removes one document by id. Deleting an unknown id is a no-op, so UI
    /// interactions stay idempotent.
    pub fn delete_document(&mut self, id: &str) -> Result<(), VectorStoreError> {
        let index = self.index.as_mut().ok_or(VectorStoreError::NotInitialized)?;
        let before = index.entries.len();
        index.entries.retain(|e| e.document.id != id);
        if index.entries.len() == before {
            debug!("Delete of unknown document id {id} ignored");
        }
        Ok(())
    }

    /// Drops the index and the bound embedding client. Every operation but
    /// `load` fails until the store is loaded again.
    pub fn reset(&mut self) {
        if self.index.take().is_some() {
            info!("Successfully cleaned up vector store");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SCORE_KEY;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct StubModel {
        table: HashMap<String, Vec<f64>>,
    }

    impl StubModel {
        fn new(entries: &[(&str, &[f64])]) -> Self {
            Self {
                table: entries
                    .iter()
                    .map(|(text, embedding)| (text.to_string(), embedding.to_vec()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl EmbeddingModel for StubModel {
        async fn embed(&self, text: &str) -> Result<Vec<f64>, EmbedderError> {
            self.table
                .get(text)
                .cloned()
                .ok_or_else(|| EmbedderError::Provider(format!("no stub embedding for {text:?}")))
        }
    }

    fn loaded_store(entries: &[(&str, &[f64])]) -> VectorStore {
        let mut store = VectorStore::new(EmbeddingProvider::OpenAi, Settings::default());
        store.load_with(Box::new(StubModel::new(entries)));
        store
    }

    #[tokio::test]
    async fn operations_fail_before_load() {
        let mut store = VectorStore::new(EmbeddingProvider::OpenAi, Settings::default());
        assert!(!store.is_loaded());

        let err = store.add_document("text", HashMap::new()).await.unwrap_err();
        assert_eq!(err, VectorStoreError::NotInitialized);
        let err = store.search("query", 1, None).await.unwrap_err();
        assert_eq!(err, VectorStoreError::NotInitialized);
        let err = store
            .retrieve("query", 1, None, MmrOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, VectorStoreError::NotInitialized);
        assert_eq!(
            store.get_all_documents().unwrap_err(),
            VectorStoreError::NotInitialized
        );
        assert_eq!(
            store.delete_document("id").unwrap_err(),
            VectorStoreError::NotInitialized
        );
    }

    #[test]
    fn load_without_credential_fails() {
        let mut store = VectorStore::new(EmbeddingProvider::Clova, Settings::default());
        let err = store.load().unwrap_err();
        assert!(matches!(
            err,
            VectorStoreError::Embedder(EmbedderError::MissingCredential(_))
        ));
        assert!(!store.is_loaded());
    }

    #[tokio::test]
    async fn load_is_idempotent_and_keeps_documents() {
        let mut store = loaded_store(&[("a", &[1.0, 0.0]), ("b", &[0.0, 1.0])]);
        store.add_document("a", HashMap::new()).await.unwrap();
        store.add_document("b", HashMap::new()).await.unwrap();

        // second load must neither rebuild the index nor need credentials
        store.load().unwrap();
        assert_eq!(store.get_all_documents().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn listed_documents_match_adds() {
        let mut store = loaded_store(&[("a", &[1.0, 0.0]), ("b", &[0.0, 1.0])]);
        let ids = store
            .add_documents(vec!["a".to_string(), "b".to_string(), "a".to_string()])
            .await
            .unwrap();
        assert_eq!(ids.len(), 3);

        let listed = store.get_all_documents().unwrap();
        assert_eq!(listed.len(), 3);
        let listed_ids: Vec<&String> = listed.iter().map(|(id, _)| id).collect();
        assert_eq!(listed_ids, ids.iter().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn delete_excludes_document_and_is_idempotent() {
        let mut store = loaded_store(&[("a", &[1.0, 0.0]), ("b", &[0.0, 1.0])]);
        let id_a = store.add_document("a", HashMap::new()).await.unwrap();
        let id_b = store.add_document("b", HashMap::new()).await.unwrap();

        store.delete_document(&id_a).unwrap();
        let remaining = store.get_all_documents().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].0, id_b);

        // deleting again is a no-op
        store.delete_document(&id_a).unwrap();
        assert_eq!(store.get_all_documents().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_on_empty_store_returns_empty() {
        let store = loaded_store(&[("query", &[1.0, 0.0])]);
        let results = store.search("query", 3, None).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn search_is_bounded_by_k_and_descending() {
        let mut store = loaded_store(&[
            ("close", &[1.0, 0.0]),
            ("closer", &[0.9, 0.1]),
            ("far", &[0.0, 1.0]),
            ("query", &[1.0, 0.1]),
        ]);
        store
            .add_documents(vec![
                "far".to_string(),
                "close".to_string(),
                "closer".to_string(),
            ])
            .await
            .unwrap();

        let results = store.search("query", 2, None).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn search_finds_the_cat_document() {
        let mut store = loaded_store(&[
            ("cats are great", &[0.9, 0.1]),
            ("stock markets crashed today", &[0.05, 0.95]),
            ("feline pets", &[1.0, 0.0]),
        ]);
        store
            .add_documents(vec![
                "cats are great".to_string(),
                "stock markets crashed today".to_string(),
            ])
            .await
            .unwrap();

        let results = store.search("feline pets", 1, None).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "cats are great");
        assert!(results[0].metadata.contains_key(SCORE_KEY));
    }

    #[tokio::test]
    async fn search_transform_leaves_stored_text_intact() {
        let mut store = loaded_store(&[("cats are great", &[1.0, 0.0])]);
        store
            .add_document("cats are great", HashMap::new())
            .await
            .unwrap();

        store.search("cats are great", 1, None).await.unwrap();
        let (_, doc) = &store.get_all_documents().unwrap()[0];
        assert_eq!(doc.text, "cats are great");
        assert!(!doc.metadata.contains_key(SCORE_KEY));

        // a second query still sees the original text
        let results = store.search("cats are great", 1, None).await.unwrap();
        assert_eq!(results[0].content, "cats are great");
    }

    #[tokio::test]
    async fn search_filter_restricts_results() {
        let mut store = loaded_store(&[
            ("cat facts", &[1.0, 0.0]),
            ("cat opinions", &[0.95, 0.05]),
            ("query", &[1.0, 0.0]),
        ]);
        store
            .add_document(
                "cat facts",
                HashMap::from([("kind".to_string(), "fact".to_string())]),
            )
            .await
            .unwrap();
        store
            .add_document(
                "cat opinions",
                HashMap::from([("kind".to_string(), "opinion".to_string())]),
            )
            .await
            .unwrap();

        let filter = DocumentFilter::metadata_equals("kind", "opinion");
        let results = store.search("query", 5, Some(&filter)).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "cat opinions");
    }

    #[tokio::test]
    async fn retrieve_is_bounded_by_k_and_respects_filter() {
        let mut store = loaded_store(&[
            ("a", &[1.0, 0.0, 0.0]),
            ("b", &[0.9, 0.1, 0.0]),
            ("c", &[0.0, 1.0, 0.0]),
            ("query", &[1.0, 0.0, 0.0]),
        ]);
        for text in ["a", "b", "c"] {
            store
                .add_document(
                    text,
                    HashMap::from([("name".to_string(), text.to_string())]),
                )
                .await
                .unwrap();
        }

        let results = store
            .retrieve("query", 2, None, MmrOptions::default())
            .await
            .unwrap();
        assert_eq!(results.len(), 2);

        let filter = DocumentFilter::custom(|d| d.text != "a");
        let results = store
            .retrieve("query", 3, Some(&filter), MmrOptions::default())
            .await
            .unwrap();
        assert!(results.iter().all(|d| d.text != "a"));
    }

    #[tokio::test]
    async fn retrieve_returns_raw_documents() {
        let mut store = loaded_store(&[("a", &[1.0, 0.0]), ("query", &[1.0, 0.0])]);
        store
            .add_document(
                "a",
                HashMap::from([("key".to_string(), "value".to_string())]),
            )
            .await
            .unwrap();

        let results = store
            .retrieve("query", 1, None, MmrOptions::default())
            .await
            .unwrap();
        assert_eq!(results[0].text, "a");
        assert!(!results[0].metadata.contains_key(SCORE_KEY));
    }

    #[tokio::test]
    async fn reset_returns_store_to_uninitialized() {
        let mut store = loaded_store(&[("a", &[1.0, 0.0])]);
        store.add_document("a", HashMap::new()).await.unwrap();

        store.reset();
        assert!(!store.is_loaded());
        let err = store.add_document("a", HashMap::new()).await.unwrap_err();
        assert_eq!(err, VectorStoreError::NotInitialized);

        // resetting an unloaded store stays quiet
        store.reset();
    }

    #[test]
    fn cosine_similarity_identical_vectors() {
        let v = [1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn cosine_similarity_orthogonal_vectors() {
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
    }

    #[test]
    fn cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
