//! # MinuteSync Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with timeouts and retry
//! - LLM backends (Gemini, OpenAI) behind `CompletionBackend`
//! - The Cal.com adapter behind `SchedulingService`
//! - Configuration loading from the environment or a file
//! - The JSON state store with periodic backups
//!
//! ## Architecture
//! - Implements traits defined in `minutesync-core`
//! - Contains all "impure" code (network, file system, environment)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod store;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::HttpClient;
pub use integrations::calcom::CalcomClient;
pub use integrations::gemini::GeminiClient;
pub use integrations::openai::OpenAIClient;
pub use store::{JsonStateStore, StoredState};
