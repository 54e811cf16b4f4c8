//! # GRA Knowledge
//!
//! Minimal in-memory RAG: no vector DB, no embeddings.
//!
//! ## Design
//! - **Bag-of-words Jaccard** scoring between query and document token sets
//! - **Append-only corpus** held in process memory, cleared on restart
//! - **Prompt templates** that frame the retrieved context for a response
//!
//! ## How it works
//! ```text
//! User: "How do RAG systems retrieve documents?"
//!   ↓
//! SimpleRagRetriever::retrieve(query, 5)
//!   ↓ lowercase + whitespace split, |Q ∩ D| / |Q ∪ D|
//! Top 5 documents with distance = 1 - score
//!   ↓
//! PromptManager formats them as [Context i] blocks
//! ```

pub mod document;
pub mod ingestion;
pub mod prompts;
pub mod retriever;

pub use document::{CollectionInfo, Document, RetrievedContext};
pub use ingestion::{IngestionSummary, ingest_sample_data};
pub use prompts::{PromptManager, Template};
pub use retriever::SimpleRagRetriever;
