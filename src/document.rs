use std::collections::HashMap;

/// Metadata key holding a search hit's original text.
pub const PAGE_CONTENT_KEY: &str = "page_content";
/// Metadata key holding a search hit's similarity score.
pub const SCORE_KEY: &str = "score";

/// A unit of text with optional string-to-string metadata.
///
/// The id is assigned by the vector store at insertion time and stays
/// stable until the document is deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub text: String,
    pub metadata: HashMap<String, String>,
}

impl Document {
    pub fn new(id: String, text: String, metadata: HashMap<String, String>) -> Self {
        Self { id, text, metadata }
    }
}

/// One similarity-search hit, shaped for presentation.
///
/// `metadata` carries the stored document's entries plus two derived keys,
/// [`PAGE_CONTENT_KEY`] and [`SCORE_KEY`], so a renderer can show score and
/// content from metadata alone. The transform is applied to this result
/// only; the store's copy of the document is never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    pub content: String,
    pub score: f64,
    pub metadata: HashMap<String, String>,
}

impl ScoredResult {
    pub(crate) fn from_document(document: &Document, score: f64) -> Self {
        let mut metadata = document.metadata.clone();
        metadata.insert(PAGE_CONTENT_KEY.to_string(), document.text.clone());
        metadata.insert(SCORE_KEY.to_string(), score.to_string());
        Self {
            content: document.text.clone(),
            score,
            metadata,
        }
    }
}
