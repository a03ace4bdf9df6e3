//! Password change and reset steps

use super::Harness;
use crate::runner::{Call, StepOutcome};
use colored::Colorize;
use serde_json::json;

const INVALID_RESET_TOKEN: &str = "invalid-token-12345";
const THROWAWAY_PASSWORD: &str = "anothernewpassword";

/// Change the password and, on success, remember the new one so later
/// logins in the same run use it
pub fn change_password(h: &mut Harness) -> StepOutcome {
    const NAME: &str = "Change password";
    if let Err(skip) = h.require_session(NAME) {
        return skip;
    }

    let new_password = h.config.new_password.clone();
    let outcome = h.call(
        Call::post(
            h.config.auth_url("change-password"),
            json!({
                "oldPassword": h.credentials.password,
                "newPassword": new_password,
            }),
        )
        .describe(NAME),
    );

    if outcome.status.is_passed() {
        h.credentials.password = new_password;
        println!("{} Stored password updated", "🔐".green());
    }
    outcome
}

pub fn change_password_wrong_old(h: &Harness) -> StepOutcome {
    const NAME: &str = "Change password with wrong old password (expected failure)";
    if let Err(skip) = h.require_session(NAME) {
        return skip;
    }
    h.call(
        Call::post(
            h.config.auth_url("change-password"),
            json!({
                "oldPassword": "wrongoldpassword",
                "newPassword": THROWAWAY_PASSWORD,
            }),
        )
        .describe(NAME)
        .expect_failure(),
    )
}

/// Sent without the Authorization header even when a session is open
pub fn change_password_no_auth(h: &Harness) -> StepOutcome {
    h.call(
        Call::post(
            h.config.auth_url("change-password"),
            json!({
                "oldPassword": h.credentials.password,
                "newPassword": THROWAWAY_PASSWORD,
            }),
        )
        .describe("Change password without auth (expected failure)")
        .anonymous()
        .expect_failure(),
    )
}

pub fn forgot_password(h: &Harness) -> StepOutcome {
    let outcome = forgot_password_for(h, &h.config.email);
    println!("📧 Check the email inbox for the reset token");
    outcome
}

pub fn forgot_password_for(h: &Harness, email: &str) -> StepOutcome {
    h.call(
        Call::post(
            h.config.auth_url("forgot-password"),
            json!({ "email": email }),
        )
        .describe("Request password reset"),
    )
}

/// Reported as-is: the API may answer 200 to avoid revealing accounts
pub fn forgot_password_unknown_email(h: &Harness) -> StepOutcome {
    h.call(
        Call::post(
            h.config.auth_url("forgot-password"),
            json!({ "email": h.config.unknown_email }),
        )
        .describe("Request password reset for unknown email"),
    )
}

/// Needs the token from the reset email
pub fn reset_password(h: &Harness, token: Option<&str>, new_password: &str) -> StepOutcome {
    const NAME: &str = "Reset password with token";
    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        let skip = h.skip(NAME, "no reset token provided");
        println!("   Request a reset first and take the token from the email");
        return skip;
    };

    h.call(
        Call::post(
            h.config.auth_url("reset-password"),
            json!({
                "token": token,
                "newPassword": new_password,
            }),
        )
        .describe(NAME),
    )
}

pub fn reset_password_invalid_token(h: &Harness) -> StepOutcome {
    h.call(
        Call::post(
            h.config.auth_url("reset-password"),
            json!({
                "token": INVALID_RESET_TOKEN,
                "newPassword": h.config.reset_password,
            }),
        )
        .describe("Reset password with invalid token (expected failure)")
        .expect_failure(),
    )
}
