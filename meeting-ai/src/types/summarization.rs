//! Types for summarization operations.

use serde::{Deserialize, Serialize};

/// Generation parameters sent along with a summarization request.
///
/// Lengths are in model tokens. Greedy decoding (`do_sample = false`) keeps the
/// output deterministic for a given transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    pub max_length: u32,
    pub min_length: u32,
    pub do_sample: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            max_length: 300,
            min_length: 100,
            do_sample: false,
        }
    }
}

/// A summarization request for a single transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Full transcript text.
    pub inputs: String,
    pub parameters: Parameters,
}

impl Config {
    /// Build a request for `transcript` with the default generation parameters.
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            inputs: transcript.into(),
            parameters: Parameters::default(),
        }
    }
}

/// One generated summary as returned by summarization pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub summary_text: String,
}
