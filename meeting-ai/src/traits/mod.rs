//! Provider traits.

pub mod summarization;
