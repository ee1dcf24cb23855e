/// Google Gemini completion backend
///
/// `GeminiClient` implements [`minutesync_core::CompletionBackend`] with the
/// `models/{model}:generateContent` endpoint and a JSON response MIME type.
/// Quota exhaustion arrives either as HTTP 429 or as a `RESOURCE_EXHAUSTED`
/// error status; both surface as rate limits.
pub mod client;
pub(crate) mod types;

pub use client::GeminiClient;
