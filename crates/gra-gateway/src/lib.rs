//! # GRA Gateway
//!
//! Axum HTTP API over the retriever, the prompt templates, the farm advisors
//! and the optional LLM.

pub mod extract;
pub mod routes;
pub mod server;

pub use server::{AppState, build_router, start};
