//! Flow orchestrators: fixed, ordered scenarios built from test steps

use crate::runner::Flow;
use crate::steps::{account, auth, password, public};

/// Every public, auth and password endpoint, including the negative cases.
///
/// Resetting with a real token is left to `reset-complete`, since the token
/// only arrives by email.
pub fn full_suite() -> Flow {
    Flow::new("full suite")
        .section("PUBLIC ENDPOINTS")
        .step("welcome", |h, _| public::welcome(h))
        .step("health", |h, _| public::health(h))
        .section("AUTHENTICATION TESTS")
        .step("register", |h, _| auth::register(h))
        .step("register_duplicate", |h, _| auth::register_duplicate(h))
        .step("login", |h, _| auth::login(h))
        .step("login_invalid", |h, _| auth::login_invalid(h))
        .section("PASSWORD MANAGEMENT TESTS")
        .step("change_password", |h, _| password::change_password(h))
        .step("change_password_wrong_old", |h, _| {
            password::change_password_wrong_old(h)
        })
        .step("change_password_no_auth", |h, _| {
            password::change_password_no_auth(h)
        })
        .step("forgot_password", |h, _| password::forgot_password(h))
        .step("forgot_password_unknown_email", |h, _| {
            password::forgot_password_unknown_email(h)
        })
        .step("reset_password_invalid_token", |h, _| {
            password::reset_password_invalid_token(h)
        })
        .note("\n📝 To reset the password with a valid token:")
        .note("   1. Check the email inbox for the reset token")
        .note("   2. Run: smoke-tester reset-complete --token <TOKEN>")
}

/// Minimal happy path
pub fn basic_flow() -> Flow {
    Flow::new("basic flow")
        .step("welcome", |h, _| public::welcome(h))
        .step("register", |h, _| auth::register(h))
        .step("login", |h, _| auth::login(h))
        .step("change_password", |h, _| password::change_password(h))
}

/// First phase of a reset: request the email, then stop
pub fn password_reset_flow(email: Option<String>) -> Flow {
    Flow::new("password reset flow")
        .step("forgot_password", move |h, _| {
            let email = email.clone().unwrap_or_else(|| h.config.email.clone());
            password::forgot_password_for(h, &email)
        })
        .note("\n📧 Check your email for the reset token")
        .note("   Then run: smoke-tester reset-complete --token <TOKEN> --new-password <PASSWORD>")
        .note("\n⏸  PASSWORD RESET FLOW PAUSED")
}

/// Second phase of a reset, with the token from the email
pub fn complete_password_reset(token: Option<String>, new_password: Option<String>) -> Flow {
    Flow::new("password reset completion").step("reset_password", move |h, _| {
        let new_password = new_password
            .clone()
            .unwrap_or_else(|| h.config.reset_password.clone());
        password::reset_password(h, token.as_deref(), &new_password)
    })
}

/// First phase of email verification
pub fn email_verification_flow() -> Flow {
    Flow::new("email verification flow")
        .step("resend_verification", |h, _| auth::resend_verification(h))
        .note("\n   Then run: smoke-tester verify-complete --token <TOKEN>")
        .note("\n⏸  EMAIL VERIFICATION FLOW PAUSED")
}

pub fn complete_email_verification(token: Option<String>) -> Flow {
    Flow::new("email verification completion").step("verify_email", move |h, _| {
        auth::verify_email(h, token.as_deref())
    })
}

/// Walk of the whole endpoint catalogue: public reads, then the
/// authenticated and admin-gated ones, using ids captured along the way
pub fn api_catalog() -> Flow {
    Flow::new("api catalog")
        .section("1. Public endpoints")
        .step("welcome", |h, _| public::welcome(h))
        .step("health", |h, _| public::health(h))
        .section("2. Menu endpoints (public)")
        .step("categories", |h, c| public::categories(h, c))
        .step("active_categories", |h, _| public::active_categories(h))
        .step("menu_items", |h, _| public::menu_items(h))
        .step("featured_items", |h, _| public::featured_items(h))
        .step("top_rated_items", |h, _| public::top_rated_items(h))
        .step("popular_items", |h, _| public::popular_items(h))
        .step("search_menu", |h, _| public::search_menu(h))
        .step("filter_by_price", |h, _| public::filter_by_price(h))
        .step("payment_methods", |h, _| public::payment_methods(h))
        .section("3. Logging in")
        .step("login", |h, _| auth::login(h))
        .section("4. Authenticated endpoints")
        .step("current_user", |h, c| auth::current_user(h, c))
        .step("user_profile", |h, c| account::user_profile(h, c))
        .step("menu_sample_page", |h, c| public::menu_sample_page(h, c))
        .step("menu_item_by_id", |h, c| public::menu_item_by_id(h, c))
        .step("category_by_id", |h, c| public::category_by_id(h, c))
        .step("menu_by_category", |h, c| public::menu_by_category(h, c))
        .step("orders", |h, _| account::orders(h))
        .section("5. Admin endpoints")
        .step("admin_logs", |h, _| account::admin_logs(h))
        .step("admin_dashboard", |h, _| account::admin_dashboard(h))
}

/// Every flow with placeholder arguments, for listing
pub fn catalogue() -> Vec<(&'static str, Flow)> {
    vec![
        ("suite", full_suite()),
        ("basic", basic_flow()),
        ("catalog", api_catalog()),
        ("reset-request", password_reset_flow(None)),
        ("reset-complete", complete_password_reset(None, None)),
        ("verify-request", email_verification_flow()),
        ("verify-complete", complete_email_verification(None)),
    ]
}
