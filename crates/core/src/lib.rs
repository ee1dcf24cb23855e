//! # MinuteSync Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the LLM and the scheduling service
//! - Text analysis: prompt construction, retry policy, response validation
//! - Synchronization: event-type resolution and booking creation
//! - Plain-text rendering of analysis records and sync reports
//!
//! ## Architecture Principles
//! - Only depends on `minutesync-domain`
//! - No HTTP, file-system or environment access
//! - All external dependencies via traits
//! - Time comes from an injected [`Clock`]

pub mod analysis;
pub mod pipeline;
pub mod summary;
pub mod sync;
pub mod utils;

pub use analysis::ports::{CompletionBackend, CompletionError};
pub use analysis::{AnalysisFailure, RetryPolicy, TextAnalysisClient};
pub use pipeline::{MeetingPipeline, PipelineOutcome};
pub use summary::{format_analysis, format_report, Summarize};
pub use sync::ports::SchedulingService;
pub use sync::{ScheduleResourceResolver, SyncEngine};
pub use utils::clock::{Clock, FixedClock, SystemClock};
