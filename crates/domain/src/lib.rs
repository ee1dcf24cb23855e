//! # MinuteSync Domain
//!
//! Business domain types and models for MinuteSync.
//!
//! This crate contains:
//! - The meeting analysis record and its item types
//! - Scheduling-service resource types (event types, bookings)
//! - The synchronization report
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other MinuteSync crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
