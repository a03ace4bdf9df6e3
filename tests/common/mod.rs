//! In-process mock of the Roors API for integration tests.
//!
//! Keeps just enough state (accounts and issued tokens) for the smoke flows
//! to see realistic successes and rejections.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use smoke_tester::utils::ReportStyle;
use smoke_tester::{Harness, HarnessConfig, HttpTransport};

pub const VALID_RESET_TOKEN: &str = "valid-reset-token";
pub const VALID_VERIFY_TOKEN: &str = "valid-verify-token";

#[derive(Debug, Clone)]
struct Account {
    id: u64,
    email: String,
    password: String,
    admin: bool,
}

#[derive(Default)]
struct MockState {
    accounts: HashMap<String, Account>,
    tokens: HashMap<String, String>,
    issued: u64,
}

type Shared = Arc<Mutex<MockState>>;

/// Handle to a running mock; the server lives until the test process exits
pub struct MockApi {
    pub base_url: String,
    state: Shared,
}

impl MockApi {
    pub fn start() -> Self {
        let state = Shared::default();
        let app = router(state.clone());

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock api");
        listener.set_nonblocking(true).expect("non-blocking listener");
        let addr = listener.local_addr().expect("mock api address");

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("tokio runtime");
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                axum::serve(listener, app.into_make_service())
                    .await
                    .expect("mock api server");
            });
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// Seed an account directly, bypassing registration
    pub fn seed_account(&self, username: &str, password: &str, admin: bool) {
        let mut state = self.state.lock().unwrap();
        let id = state.accounts.len() as u64 + 1;
        state.accounts.insert(
            username.to_string(),
            Account {
                id,
                email: format!("{}@example.com", username),
                password: password.to_string(),
                admin,
            },
        );
    }

    pub fn password_of(&self, username: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.accounts.get(username).map(|a| a.password.clone())
    }

    pub fn config(&self) -> HarnessConfig {
        HarnessConfig {
            base_url: self.base_url.clone(),
            report_style: ReportStyle::Compact,
            ..HarnessConfig::default()
        }
    }

    pub fn harness(&self) -> Harness {
        self.harness_with(self.config())
    }

    pub fn harness_with(&self, config: HarnessConfig) -> Harness {
        let transport = HttpTransport::new().expect("http transport");
        Harness::new(config, Box::new(transport))
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/", get(|| async { "Welcome to Roors API!" }))
        .route("/health", get(|| async { Json(json!({ "status": "UP" })) }))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/api/auth/me", get(me))
        .route("/auth/change-password", post(change_password))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
        .route("/auth/resend-verification", post(forgot_password))
        .route("/auth/verify-email", post(verify_email))
        .route("/api/categories", get(categories))
        .route("/api/categories/active", get(categories))
        .route("/api/categories/:id", get(category_by_id))
        .route("/api/menu", get(menu_page))
        .route("/api/menu/featured", get(menu_list))
        .route("/api/menu/top-rated", get(menu_list))
        .route("/api/menu/popular", get(menu_list))
        .route("/api/menu/search", get(menu_list))
        .route("/api/menu/filter/price", get(menu_list))
        .route("/api/menu/category/:id", get(menu_list))
        .route("/api/menu/:id", get(menu_item_by_id))
        .route("/api/payments/methods", get(payment_methods))
        .route("/api/users/:id", get(user_by_id))
        .route("/api/orders", get(orders))
        .route("/admin/logs", get(admin_only))
        .route("/api/admin/statistics/dashboard", get(admin_only))
        .with_state(state)
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "status": status.as_u16(), "message": message })),
    )
        .into_response()
}

/// Username behind the bearer token, if any
fn bearer_user(state: &MockState, headers: &HeaderMap) -> Option<String> {
    let header = headers.get("authorization")?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    state.tokens.get(token).cloned()
}

fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name).and_then(Value::as_str).unwrap_or_default()
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let username = field(&body, "username").to_string();
    if username.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Username is required");
    }
    if state.accounts.contains_key(&username) {
        return error(StatusCode::BAD_REQUEST, "Username is already taken");
    }

    let id = state.accounts.len() as u64 + 1;
    state.accounts.insert(
        username.clone(),
        Account {
            id,
            email: field(&body, "email").to_string(),
            password: field(&body, "password").to_string(),
            admin: false,
        },
    );
    (
        StatusCode::CREATED,
        Json(json!({ "id": id, "username": username, "message": "User registered" })),
    )
        .into_response()
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let username = field(&body, "username");
    let matches = state
        .accounts
        .get(username)
        .is_some_and(|a| a.password == field(&body, "password"));
    if !matches {
        return error(StatusCode::UNAUTHORIZED, "Invalid username or password");
    }

    state.issued += 1;
    let token = format!("mock.jwt.{}.{}", username, state.issued);
    state.tokens.insert(token.clone(), username.to_string());
    Json(json!({ "token": token, "type": "Bearer", "username": username })).into_response()
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    let Some(username) = bearer_user(&state, &headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let account = &state.accounts[&username];
    Json(json!({ "id": account.id, "username": username, "email": account.email }))
        .into_response()
}

async fn change_password(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(username) = bearer_user(&state, &headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let Some(account) = state.accounts.get_mut(&username) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    if account.password != field(&body, "oldPassword") {
        return error(StatusCode::BAD_REQUEST, "Old password is incorrect");
    }
    account.password = field(&body, "newPassword").to_string();
    Json(json!({ "message": "Password changed successfully" })).into_response()
}

async fn forgot_password(Json(_body): Json<Value>) -> Response {
    Json(json!({ "message": "If the email exists, a message has been sent" })).into_response()
}

async fn reset_password(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if field(&body, "token") != VALID_RESET_TOKEN {
        return error(StatusCode::BAD_REQUEST, "Invalid or expired reset token");
    }
    let mut state = state.lock().unwrap();
    let new_password = field(&body, "newPassword").to_string();
    for account in state.accounts.values_mut() {
        account.password = new_password.clone();
    }
    Json(json!({ "message": "Password has been reset" })).into_response()
}

async fn verify_email(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("token").map(String::as_str) {
        Some(VALID_VERIFY_TOKEN) => Json(json!({ "message": "Email verified" })).into_response(),
        _ => error(StatusCode::BAD_REQUEST, "Invalid verification token"),
    }
}

async fn categories() -> Json<Value> {
    Json(json!([
        { "id": 3, "name": "Pizza", "active": true },
        { "id": 4, "name": "Drinks", "active": true }
    ]))
}

async fn category_by_id(Path(id): Path<u64>) -> Response {
    Json(json!({ "id": id, "name": "Pizza" })).into_response()
}

async fn menu_list() -> Json<Value> {
    Json(json!([{ "id": 11, "name": "Margherita", "price": 12.5 }]))
}

async fn menu_page() -> Json<Value> {
    Json(json!({
        "content": [
            { "id": 11, "name": "Margherita", "price": 12.5 },
            { "id": 12, "name": "Pepperoni", "price": 14.0 }
        ],
        "totalElements": 2
    }))
}

async fn menu_item_by_id(Path(id): Path<u64>) -> Response {
    if id == 11 || id == 12 {
        Json(json!({ "id": id, "name": "Margherita" })).into_response()
    } else {
        error(StatusCode::NOT_FOUND, "Menu item not found")
    }
}

async fn payment_methods() -> Json<Value> {
    Json(json!(["CASH", "CARD"]))
}

async fn user_by_id(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<u64>) -> Response {
    let state = state.lock().unwrap();
    if bearer_user(&state, &headers).is_none() {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    match state.accounts.iter().find(|(_, a)| a.id == id) {
        Some((username, account)) => {
            Json(json!({ "id": id, "username": username, "email": account.email })).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn orders(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    if bearer_user(&state, &headers).is_none() {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    Json(json!({ "content": [], "totalElements": 0 })).into_response()
}

async fn admin_only(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    let Some(username) = bearer_user(&state, &headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    if state.accounts[&username].admin {
        Json(json!({ "totalOrders": 0, "totalUsers": state.accounts.len() })).into_response()
    } else {
        error(StatusCode::FORBIDDEN, "Forbidden")
    }
}
