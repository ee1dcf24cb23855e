//! Shared utilities for core business logic

pub mod clock;
