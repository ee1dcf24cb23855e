//! Text analysis: meeting notes to a structured record
//!
//! [`TextAnalysisClient`] builds the extraction prompt, calls a
//! [`ports::CompletionBackend`] with bounded retries on rate limits, and
//! validates the reply at the parse boundary.

pub mod client;
pub mod ports;
pub mod prompt;
pub mod response;

pub use client::{AnalysisFailure, RetryPolicy, TextAnalysisClient};
pub use response::{parse_analysis, strip_code_fence};
