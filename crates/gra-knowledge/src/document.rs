//! Document and retrieval result types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String-to-string metadata attached to a document.
pub type Metadata = BTreeMap<String, String>;

/// A document in the corpus. Immutable once added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    pub metadata: Metadata,
}

/// One entry of a retrieval result. Lower `distance` is more relevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedContext {
    pub content: String,
    pub metadata: Metadata,
    pub distance: f64,
}

impl RetrievedContext {
    /// Metadata `source`, or `"unknown"` when absent.
    pub fn source(&self) -> &str {
        self.metadata.get("source").map(String::as_str).unwrap_or("unknown")
    }
}

/// Name and size of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub count: usize,
}

/// Build a metadata map from string pairs.
pub fn metadata<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Metadata {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
