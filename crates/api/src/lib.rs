//! # MinuteSync App
//!
//! Application layer: CLI commands, HTTP surface and entry point wiring.
//!
//! This crate contains:
//! - CLI definition and command handlers (analyze a file, process the inbox,
//!   check service connectivity)
//! - HTTP routes (`POST /analyze`, `POST /check/*`, `GET /health`)
//! - Application context (dependency injection)
//! - Logging bootstrap
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the adapters from `infra` into the `core` pipeline

pub mod cli;
pub mod commands;
pub mod context;
pub mod server;
pub mod utils;

// Re-export for convenience
pub use cli::{Cli, Command};
pub use context::AppContext;
pub use server::build_router;
