//! Authenticated user, order and admin endpoints

use super::{Harness, USER_ID};
use crate::runner::{Call, Captures, StepOutcome};

pub fn user_profile(h: &Harness, captures: &Captures) -> StepOutcome {
    const NAME: &str = "Get user profile";
    if let Err(skip) = h.require_session(NAME) {
        return skip;
    }
    let id = match h.require_capture(captures, USER_ID, NAME) {
        Ok(id) => id,
        Err(skip) => return skip,
    };
    h.call(
        Call::get(h.config.url(&format!("/api/users/{}", id)))
            .describe(NAME)
            .summarize(),
    )
}

pub fn orders(h: &Harness) -> StepOutcome {
    const NAME: &str = "Get user orders";
    if let Err(skip) = h.require_session(NAME) {
        return skip;
    }
    h.call(Call::get(h.config.url("/api/orders")).describe(NAME).summarize())
}

// Admin-gated: a 403 for a regular account is reported, not skipped.
pub fn admin_logs(h: &Harness) -> StepOutcome {
    const NAME: &str = "Get logs (admin only)";
    if let Err(skip) = h.require_session(NAME) {
        return skip;
    }
    h.call(Call::get(h.config.url("/admin/logs")).describe(NAME))
}

pub fn admin_dashboard(h: &Harness) -> StepOutcome {
    const NAME: &str = "Get dashboard stats (admin only)";
    if let Err(skip) = h.require_session(NAME) {
        return skip;
    }
    h.call(
        Call::get(h.config.url("/api/admin/statistics/dashboard"))
            .describe(NAME)
            .summarize(),
    )
}
