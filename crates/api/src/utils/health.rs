//! Health report served by `GET /health`
//!
//! Reports which external services have credentials configured. No service
//! is contacted to build it.

use serde::{Deserialize, Serialize};

/// # Example
/// ```
/// use minutesync_app::utils::health::HealthReport;
///
/// let report = HealthReport::new(true, false);
/// assert_eq!(report.status, "ok");
/// assert!(!report.scheduler_configured);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Always `"ok"` while the process is serving
    pub status: String,

    /// An LLM API key is present
    pub llm_configured: bool,

    /// A scheduling-service API key is present, so sync can run
    pub scheduler_configured: bool,
}

impl HealthReport {
    pub fn new(llm_configured: bool, scheduler_configured: bool) -> Self {
        Self { status: "ok".to_string(), llm_configured, scheduler_configured }
    }
}
