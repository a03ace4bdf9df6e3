use crate::error::{HarnessError, HarnessResult};

/// How much of each response the transcript shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportStyle {
    /// Full report: headers, request body, response body, verdict
    Detailed,
    /// One status line plus a summary of the response shape
    Compact,
}

/// Harness configuration, fixed for the lifetime of a run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Root of the API under test, e.g. `http://localhost:8080`
    pub base_url: String,

    /// Path prefix of the auth controller (`/auth` or `/api/auth`)
    pub auth_prefix: String,

    /// Test account
    pub username: String,
    pub password: String,
    pub email: String,

    /// Password set by the change-password step
    pub new_password: String,

    /// Password set when completing a reset with an emailed token
    pub reset_password: String,

    /// Address that should not belong to any account
    pub unknown_email: String,

    pub search_keyword: String,
    pub min_price: u32,
    pub max_price: u32,

    pub report_style: ReportStyle,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            auth_prefix: "/auth".to_string(),
            username: "smoke_user".to_string(),
            password: "testpassword123".to_string(),
            email: "smoke_user@example.com".to_string(),
            new_password: "newpassword456".to_string(),
            reset_password: "resetpassword123".to_string(),
            unknown_email: "nonexistent@example.com".to_string(),
            search_keyword: "pizza".to_string(),
            min_price: 10,
            max_price: 50,
            report_style: ReportStyle::Detailed,
        }
    }
}

impl HarnessConfig {
    /// Apply `SMOKE_*` overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fields: [(&str, &mut String); 6] = [
            ("SMOKE_BASE_URL", &mut self.base_url),
            ("SMOKE_AUTH_PREFIX", &mut self.auth_prefix),
            ("SMOKE_USERNAME", &mut self.username),
            ("SMOKE_PASSWORD", &mut self.password),
            ("SMOKE_EMAIL", &mut self.email),
            ("SMOKE_NEW_PASSWORD", &mut self.new_password),
        ];

        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = value;
            }
        }
        self
    }

    pub fn validate(&self) -> HarnessResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(HarnessError::Config(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if !self.auth_prefix.starts_with('/') {
            return Err(HarnessError::Config(format!(
                "auth prefix must start with '/', got '{}'",
                self.auth_prefix
            )));
        }
        if self.min_price > self.max_price {
            return Err(HarnessError::Config(format!(
                "min price {} is above max price {}",
                self.min_price, self.max_price
            )));
        }
        Ok(())
    }

    /// Absolute URL for a path on the API under test
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Absolute URL with form-encoded query parameters
    pub fn url_with_query(&self, path: &str, params: &[(&str, &str)]) -> String {
        let url = self.url(path);
        match reqwest::Url::parse_with_params(&url, params) {
            Ok(parsed) => parsed.to_string(),
            Err(e) => {
                log::warn!("Could not build query for {}: {}", url, e);
                let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                format!("{}?{}", url, query.join("&"))
            }
        }
    }

    /// Absolute URL for an auth controller operation, e.g. `login`
    pub fn auth_url(&self, operation: &str) -> String {
        self.url(&format!(
            "{}/{}",
            self.auth_prefix.trim_end_matches('/'),
            operation.trim_start_matches('/')
        ))
    }
}
