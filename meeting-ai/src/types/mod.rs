//! Request and response types shared by providers.

pub mod summarization;
