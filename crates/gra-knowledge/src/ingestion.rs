//! Sample corpus ingestion.

use serde::{Deserialize, Serialize};

use crate::document::metadata;
use crate::retriever::SimpleRagRetriever;

/// Outcome of an ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionSummary {
    pub ingested_count: usize,
    pub total_documents: usize,
}

/// (content, topic, category)
const SAMPLE_DOCS: &[(&str, &str, &str)] = &[
    (
        "GRA (Generative Retrieval-Augmented) systems combine the power of large language models with external knowledge retrieval. These systems first retrieve relevant documents from a knowledge base, then use those documents as context for generating responses.",
        "gra_overview",
        "systems",
    ),
    (
        "RAG systems work by first retrieving relevant documents from a knowledge base using vector similarity search, then using those documents as context for generation. This approach allows AI systems to access up-to-date information beyond their training data.",
        "rag_explanation",
        "ai",
    ),
    (
        "Simulation scenarios help test and validate AI system behavior under different conditions and constraints. Common scenarios include basic query testing, stress testing with multiple concurrent users, context switching between topics, and knowledge gap analysis.",
        "simulation",
        "testing",
    ),
    (
        "Prompt engineering is crucial for getting optimal performance from language models in specific domains. Different prompt templates like analytical, creative, technical, and summarization templates can be used to guide the model's response style and focus.",
        "prompt_engineering",
        "ai",
    ),
    (
        "Performance testing of AI systems involves measuring response times, success rates, throughput, and resource utilization under various load conditions. This helps identify bottlenecks and optimize system performance.",
        "performance_testing",
        "testing",
    ),
    (
        "Vector databases like ChromaDB, Pinecone, and Weaviate are designed to store and search high-dimensional embeddings efficiently. They enable semantic search capabilities that power RAG systems.",
        "vector_databases",
        "technology",
    ),
    (
        "FastAPI is a modern Python web framework that provides automatic API documentation, type validation, and high performance for building REST APIs. It's commonly used for deploying AI and machine learning models.",
        "fastapi",
        "technology",
    ),
    (
        "Deployment platforms like Railway, Render, and Heroku provide easy ways to deploy web applications to the cloud. They handle infrastructure management, scaling, and provide free tiers for prototyping.",
        "deployment",
        "devops",
    ),
];

/// Append the fixed sample corpus (ids `sample_0..sample_7`).
///
/// Repeated calls append the same documents again.
pub fn ingest_sample_data(retriever: &mut SimpleRagRetriever) -> IngestionSummary {
    let documents = SAMPLE_DOCS.iter().map(|(c, _, _)| c.to_string()).collect();
    let metadatas = SAMPLE_DOCS
        .iter()
        .map(|(_, topic, category)| {
            metadata([("source", "sample"), ("topic", *topic), ("category", *category)])
        })
        .collect();
    let ids = (0..SAMPLE_DOCS.len()).map(|i| format!("sample_{i}")).collect();

    retriever.add_documents(documents, Some(metadatas), Some(ids));

    let summary = IngestionSummary {
        ingested_count: SAMPLE_DOCS.len(),
        total_documents: retriever.info().count,
    };
    tracing::info!(
        "📥 Ingested {} sample document(s), corpus size {}",
        summary.ingested_count,
        summary.total_documents
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_sample() {
        let mut r = SimpleRagRetriever::default();
        let summary = ingest_sample_data(&mut r);
        assert_eq!(summary.ingested_count, 8);
        assert_eq!(summary.total_documents, 8);

        let ids: Vec<_> = r.documents().map(|d| d.id.clone()).collect();
        assert_eq!(ids.first().map(String::as_str), Some("sample_0"));
        assert_eq!(ids.last().map(String::as_str), Some("sample_7"));

        let first = r.documents().next().unwrap();
        assert_eq!(first.metadata["source"], "sample");
        assert_eq!(first.metadata["topic"], "gra_overview");
        assert_eq!(first.metadata["category"], "systems");
    }

    #[test]
    fn test_ingest_twice_appends_duplicates() {
        let mut r = SimpleRagRetriever::default();
        ingest_sample_data(&mut r);
        let summary = ingest_sample_data(&mut r);
        assert_eq!(summary.ingested_count, 8);
        assert_eq!(summary.total_documents, 16);
        assert_eq!(r.documents().filter(|d| d.id == "sample_0").count(), 2);
    }

    #[test]
    fn test_sample_query_ranks_rag_docs_first() {
        let mut r = SimpleRagRetriever::default();
        ingest_sample_data(&mut r);
        let results = r.retrieve("vector databases like pinecone", 1);
        assert_eq!(results[0].metadata["topic"], "vector_databases");
    }
}
