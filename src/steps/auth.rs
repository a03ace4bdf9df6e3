//! Registration, login and account verification steps

use super::{capture, Harness, USER_ID};
use crate::report::classifier::mask_secret;
use crate::runner::{Call, Captures, StepOutcome};
use colored::Colorize;
use serde::Deserialize;
use serde_json::json;

/// Served by the user controller, not under the auth prefix
const CURRENT_USER_PATH: &str = "/api/auth/me";

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

pub fn register(h: &Harness) -> StepOutcome {
    h.call(
        Call::post(
            h.config.auth_url("register"),
            json!({
                "username": h.credentials.username,
                "email": h.config.email,
                "password": h.credentials.password,
            }),
        )
        .describe("Register user"),
    )
}

/// Same username, different email; a healthy API rejects it
pub fn register_duplicate(h: &Harness) -> StepOutcome {
    h.call(
        Call::post(
            h.config.auth_url("register"),
            json!({
                "username": h.credentials.username,
                "email": format!("another_{}", h.config.email),
                "password": h.credentials.password,
            }),
        )
        .describe("Register duplicate username (expected failure)")
        .expect_failure(),
    )
}

/// Log in with the stored credentials and open the session on success.
///
/// A failed login, or a 2xx without a usable token, leaves any existing
/// session as it was.
pub fn login(h: &mut Harness) -> StepOutcome {
    let outcome = h.call(
        Call::post(
            h.config.auth_url("login"),
            json!({
                "username": h.credentials.username,
                "password": h.credentials.password,
            }),
        )
        .describe("Login"),
    );

    if !outcome.status.is_passed() {
        return outcome;
    }

    let token = outcome
        .json()
        .and_then(|body| serde_json::from_value::<LoginResponse>(body).ok())
        .and_then(|body| body.token);

    match h.session.set_session(token.as_deref()) {
        Ok(()) => {
            if let Some(token) = h.session.token() {
                println!("{} Token stored: {}", "🔑".green(), mask_secret(token));
            }
            outcome
        }
        Err(e) => {
            println!("{} Login failed: {}", "✗".red(), e);
            outcome.fail("login response carried no token")
        }
    }
}

pub fn login_invalid(h: &Harness) -> StepOutcome {
    h.call(
        Call::post(
            h.config.auth_url("login"),
            json!({
                "username": h.credentials.username,
                "password": "wrongpassword",
            }),
        )
        .describe("Login with invalid credentials (expected failure)")
        .expect_failure(),
    )
}

/// Profile of the logged-in user; captures its id
pub fn current_user(h: &Harness, captures: &mut Captures) -> StepOutcome {
    const NAME: &str = "Get current user";
    if let Err(skip) = h.require_session(NAME) {
        return skip;
    }
    let outcome = h.call(
        Call::get(h.config.url(CURRENT_USER_PATH))
            .describe(NAME)
            .summarize(),
    );
    capture(&outcome, captures, USER_ID, "id", "Current user ID");
    outcome
}

pub fn resend_verification(h: &Harness) -> StepOutcome {
    let outcome = h.call(
        Call::post(
            h.config.auth_url("resend-verification"),
            json!({ "email": h.config.email }),
        )
        .describe("Resend verification email"),
    );
    println!("📧 Check the email inbox for the verification token");
    outcome
}

/// Needs the token from the verification email
pub fn verify_email(h: &Harness, token: Option<&str>) -> StepOutcome {
    const NAME: &str = "Verify email with token";
    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        return h.skip(NAME, "no verification token provided; get it from the email");
    };
    let url = h
        .config
        .url_with_query(&format!("{}/verify-email", h.config.auth_prefix), &[("token", token)]);
    h.call(Call::new("POST", url).describe(NAME))
}
