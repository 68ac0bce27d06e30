use crate::document::Document;

/// A typed predicate over documents, used to narrow search and retrieval.
///
/// Filters are a closed grammar over metadata and content plus a
/// statically-compiled callback for anything beyond it. Nothing here
/// evaluates user-supplied code.
pub enum DocumentFilter {
    /// Metadata holds `key` with exactly `value`.
    MetadataEquals { key: String, value: String },
    /// Metadata holds `key`, whatever its value.
    MetadataExists { key: String },
    /// Document text contains the given fragment.
    ContentContains(String),
    /// Every inner filter matches.
    All(Vec<DocumentFilter>),
    /// Host-registered callback.
    Custom(Box<dyn Fn(&Document) -> bool + Send + Sync>),
}

impl DocumentFilter {
    #[must_use]
    pub fn metadata_equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::MetadataEquals {
            key: key.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn metadata_exists(key: impl Into<String>) -> Self {
        Self::MetadataExists { key: key.into() }
    }

    #[must_use]
    pub fn content_contains(fragment: impl Into<String>) -> Self {
        Self::ContentContains(fragment.into())
    }

    #[must_use]
    pub fn custom(predicate: impl Fn(&Document) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Box::new(predicate))
    }

    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Self::MetadataEquals { key, value } => {
                document.metadata.get(key).is_some_and(|v| v == value)
            }
            Self::MetadataExists { key } => document.metadata.contains_key(key),
            Self::ContentContains(fragment) => document.text.contains(fragment.as_str()),
            Self::All(filters) => filters.iter().all(|f| f.matches(document)),
            Self::Custom(predicate) => predicate(document),
        }
    }
}
