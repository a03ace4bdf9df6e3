//! Uniform wrapper around a single API call
//!
//! The invoker never returns an error: unsupported methods, transport faults
//! and unexpected statuses all come back as a failed [`Invocation`] after the
//! problem has been printed to the transcript.

use crate::client::{ApiRequest, ApiResponse, Method, Transport};
use crate::report::{self, Verdict};
use crate::runner::session::Session;
use crate::utils::ReportStyle;
use colored::Colorize;
use serde_json::Value;

/// Description of one call, before session headers are attached
#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub url: String,
    pub body: Option<Value>,
    pub expected_status: Option<u16>,
    pub description: String,
    /// Send without the session's Authorization header
    pub anonymous: bool,
    /// Print the response-shape summary in compact mode
    pub summarize: bool,
    pub expected_failure: bool,
}

impl Call {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body: None,
            expected_status: None,
            description: String::new(),
            anonymous: false,
            summarize: false,
            expected_failure: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::new("POST", url).body(body)
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn expect(mut self, status: u16) -> Self {
        self.expected_status = Some(status);
        self
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    pub fn summarize(mut self) -> Self {
        self.summarize = true;
        self
    }

    pub fn expect_failure(mut self) -> Self {
        self.expected_failure = true;
        self
    }
}

/// What happened to a call
#[derive(Debug, Clone)]
pub struct Invocation {
    /// `None` when the method string was not recognised
    pub method: Option<Method>,
    pub url: String,
    pub verdict: Verdict,
    pub response: Option<ApiResponse>,
    pub error: Option<String>,
}

impl Invocation {
    fn failed(method: Option<Method>, url: &str, error: String) -> Self {
        Self {
            method,
            url: url.to_string(),
            verdict: Verdict::Fail,
            response: None,
            error: Some(error),
        }
    }
}

pub struct Invoker {
    transport: Box<dyn Transport>,
    style: ReportStyle,
}

impl Invoker {
    pub fn new(transport: Box<dyn Transport>, style: ReportStyle) -> Self {
        Self { transport, style }
    }

    pub fn invoke(&self, session: &Session, call: &Call) -> Invocation {
        let method = match call.method.parse::<Method>() {
            Ok(m) => m,
            Err(e) => {
                println!("{} {}", "✗".red(), e);
                return Invocation::failed(None, &call.url, e.to_string());
            }
        };

        let headers = if call.anonymous {
            Default::default()
        } else {
            session.current_headers()
        };
        let request = ApiRequest::new(method, call.url.as_str())
            .with_headers(headers)
            .with_body(call.body.clone());

        log::debug!(
            "→ {} {} (auth: {})",
            method,
            call.url,
            request.headers.contains_key(crate::runner::session::AUTHORIZATION)
        );

        let response = match self.transport.send(&request) {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Transport fault: {}", e);
                println!(
                    "{} {} {} - Error: {}",
                    "✗".red(),
                    method,
                    call.url,
                    e
                );
                return Invocation::failed(Some(method), &call.url, e.to_string());
            }
        };

        let verdict = report::classify(&response, call.expected_status);
        let response = match self.style {
            ReportStyle::Detailed => {
                report::report(response, &call.description, call.expected_status, None)
            }
            ReportStyle::Compact => {
                println!(
                    "{}",
                    report::render_compact(
                        &response,
                        &call.description,
                        call.expected_status,
                        call.summarize
                    )
                );
                response
            }
        };

        let error = match (verdict, call.expected_status) {
            (Verdict::Pass, _) => None,
            (Verdict::Fail, Some(code)) => {
                Some(format!("expected HTTP {}, got {}", code, response.status))
            }
            (Verdict::Fail, None) => Some(format!("HTTP {}", response.status)),
        };

        Invocation {
            method: Some(method),
            url: call.url.clone(),
            verdict,
            response: Some(response),
            error,
        }
    }
}
