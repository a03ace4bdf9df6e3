use crate::error::{HarnessError, HarnessResult};
use std::collections::BTreeMap;

pub const AUTHORIZATION: &str = "Authorization";

/// Token and the header derived from it, always replaced together
#[derive(Debug, Clone, PartialEq)]
struct ActiveToken {
    token: String,
    header: String,
}

/// Bearer session captured by a login step and read by every later call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    active: Option<ActiveToken>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token issued by login.
    ///
    /// A missing or blank token is rejected and the current session, if any,
    /// is left as it was.
    pub fn set_session(&mut self, token: Option<&str>) -> HarnessResult<()> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(HarnessError::InvalidToken)?;

        self.active = Some(ActiveToken {
            token: token.to_string(),
            header: format!("Bearer {}", token),
        });
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.token.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Headers to attach to an outgoing request; empty without a session
    pub fn current_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        if let Some(active) = &self.active {
            headers.insert(AUTHORIZATION.to_string(), active.header.clone());
        }
        headers
    }
}

/// The test account, updated in place when a password change succeeds
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}
