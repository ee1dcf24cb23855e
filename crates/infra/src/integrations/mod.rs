//! External service integrations

pub mod calcom;
pub(crate) mod completion;
pub mod gemini;
pub mod openai;
