//! Keyword-overlap retriever.
//!
//! Scores every document against the query with Jaccard similarity over
//! lowercase whitespace tokens. There is no index: retrieval is a linear scan,
//! which is fine for the handful of documents this store is meant to hold.

use std::collections::HashSet;

use crate::document::{CollectionInfo, Document, Metadata, RetrievedContext, metadata};

/// Default collection label.
pub const DEFAULT_COLLECTION: &str = "gra_knowledge";

struct Entry {
    document: Document,
    tokens: HashSet<String>,
}

/// Append-only in-memory document store with bag-of-words retrieval.
///
/// Not synchronized; callers sharing one instance across tasks must wrap it
/// in a lock (the gateway uses `tokio::sync::Mutex`).
pub struct SimpleRagRetriever {
    collection_name: String,
    entries: Vec<Entry>,
}

impl Default for SimpleRagRetriever {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTION)
    }
}

/// Lowercase and split on whitespace into a token set.
fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(String::from)
        .collect()
}

/// `|a ∩ b| / |a ∪ b|`, or 0 when both sets are empty.
fn overlap_score(query: &HashSet<String>, doc: &HashSet<String>) -> f64 {
    let overlap = query.intersection(doc).count();
    let union = query.len() + doc.len() - overlap;
    if union == 0 {
        0.0
    } else {
        overlap as f64 / union as f64
    }
}

impl SimpleRagRetriever {
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            entries: Vec::new(),
        }
    }

    /// Append documents to the corpus.
    ///
    /// Metadata defaults to `{source: "unknown"}` and ids to `doc_<n>`, where
    /// `n` is the corpus size before the call plus the document's position.
    /// Defaults also fill in when an explicit sequence is shorter than
    /// `documents`. Duplicate ids are accepted.
    pub fn add_documents(
        &mut self,
        documents: Vec<String>,
        metadatas: Option<Vec<Metadata>>,
        ids: Option<Vec<String>>,
    ) {
        let base = self.entries.len();
        let mut metadatas = metadatas.unwrap_or_default().into_iter();
        let mut ids = ids.unwrap_or_default().into_iter();

        self.entries.reserve(documents.len());
        for (i, content) in documents.into_iter().enumerate() {
            let id = ids.next().unwrap_or_else(|| format!("doc_{}", base + i));
            let metadata = metadatas
                .next()
                .unwrap_or_else(|| metadata([("source", "unknown")]));
            let tokens = tokenize(&content);
            self.entries.push(Entry {
                document: Document { id, content, metadata },
                tokens,
            });
        }

        tracing::debug!(
            "📚 Collection '{}' now holds {} document(s)",
            self.collection_name,
            self.entries.len()
        );
    }

    /// Return the `top_n` documents most similar to `query`.
    ///
    /// Sorted by score descending; equal scores keep insertion order.
    pub fn retrieve(&self, query: &str, top_n: usize) -> Vec<RetrievedContext> {
        if self.entries.is_empty() || top_n == 0 {
            return Vec::new();
        }

        let query_tokens = tokenize(query);
        let mut scored: Vec<(f64, &Document)> = self
            .entries
            .iter()
            .map(|e| (overlap_score(&query_tokens, &e.tokens), &e.document))
            .collect();

        // `sort_by` is stable, which gives the insertion-order tie-break.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_n);

        scored
            .into_iter()
            .map(|(score, doc)| RetrievedContext {
                content: doc.content.clone(),
                metadata: doc.metadata.clone(),
                distance: 1.0 - score,
            })
            .collect()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn info(&self) -> CollectionInfo {
        CollectionInfo {
            name: self.collection_name.clone(),
            count: self.entries.len(),
        }
    }

    /// Iterate over stored documents in insertion order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.entries.iter().map(|e| &e.document)
    }
}
