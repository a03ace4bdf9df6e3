use crate::client::{ApiResponse, Method};
use crate::runner::invoker::Invocation;
use serde_json::Value;

/// Step execution status
#[derive(Debug, Clone, PartialEq)]
pub enum StepStatus {
    Passed,
    Failed { error: String },
    Skipped { reason: String },
}

impl StepStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, StepStatus::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepStatus::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StepStatus::Skipped { .. })
    }
}

/// Result of a single test step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub name: String,
    pub method: Option<Method>,
    pub url: Option<String>,
    pub status_code: Option<u16>,
    pub status: StepStatus,
    /// Negative case: a failure here is what a healthy API returns
    pub expected_failure: bool,
    pub response: Option<ApiResponse>,
}

impl StepOutcome {
    pub fn skipped(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            method: None,
            url: None,
            status_code: None,
            status: StepStatus::Skipped {
                reason: reason.to_string(),
            },
            expected_failure: false,
            response: None,
        }
    }

    pub fn from_invocation(name: &str, invocation: Invocation, expected_failure: bool) -> Self {
        let status_code = invocation.response.as_ref().map(|r| r.status);
        let status = if invocation.verdict.is_pass() {
            StepStatus::Passed
        } else {
            StepStatus::Failed {
                error: invocation
                    .error
                    .unwrap_or_else(|| "request failed".to_string()),
            }
        };

        Self {
            name: name.to_string(),
            method: invocation.method,
            url: Some(invocation.url),
            status_code,
            status,
            expected_failure,
            response: invocation.response,
        }
    }

    /// Mark a call that went through but whose payload was unusable
    pub fn fail(mut self, error: impl Into<String>) -> Self {
        self.status = StepStatus::Failed {
            error: error.into(),
        };
        self
    }

    pub fn json(&self) -> Option<Value> {
        self.response.as_ref().and_then(ApiResponse::json)
    }
}

/// Outcomes of one flow execution, in run order
#[derive(Debug, Clone)]
pub struct FlowReport {
    pub flow_name: String,
    pub outcomes: Vec<StepOutcome>,
    pub notes: Vec<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlowSummary {
    pub total: u32,
    pub passed: u32,
    /// Failures not marked as expected
    pub failed: u32,
    pub expected_failures: u32,
    pub skipped: u32,
    pub duration_ms: u64,
}

impl FlowReport {
    pub fn summary(&self) -> FlowSummary {
        let mut summary = FlowSummary {
            duration_ms: self.duration_ms,
            ..Default::default()
        };

        for outcome in &self.outcomes {
            summary.total += 1;
            match outcome.status {
                StepStatus::Passed => summary.passed += 1,
                StepStatus::Failed { .. } if outcome.expected_failure => {
                    summary.expected_failures += 1
                }
                StepStatus::Failed { .. } => summary.failed += 1,
                StepStatus::Skipped { .. } => summary.skipped += 1,
            }
        }
        summary
    }

    pub fn outcome(&self, name: &str) -> Option<&StepOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }
}
