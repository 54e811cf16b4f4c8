//! # GRA Core
//!
//! Shared configuration and error types used by every GRA crate.

pub mod config;
pub mod error;

pub use config::GraConfig;
pub use error::{GraError, Result};
