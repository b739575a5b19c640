//! Meeting AI abstraction layer for summarization providers.
//!
//! This crate provides trait-based abstractions for meeting AI workflows:
//! - Abstractive summarization of meeting transcripts
//!
//! The design is provider-agnostic, enabling applications to swap between
//! different hosted models (Hugging Face Inference API, self-hosted endpoints, etc.)
//! without changing application code.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::Error;
