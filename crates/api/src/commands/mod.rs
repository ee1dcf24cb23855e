//! CLI command handlers

pub mod analyze;
pub mod check;
pub mod inbox;

pub use analyze::{analyze_file, render_outcome};
pub use check::{check, CheckReport};
pub use inbox::{pending_files, process_file, run_once, watch, watch_until, ProcessedFile};
