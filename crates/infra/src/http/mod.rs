//! HTTP plumbing shared by the LLM and scheduling adapters

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
