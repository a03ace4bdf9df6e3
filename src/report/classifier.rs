//! Response classification and per-call transcript rendering

use super::shape::BodyShape;
use crate::client::ApiResponse;
use crate::runner::session::AUTHORIZATION;
use crate::utils::truncate;
use colored::Colorize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write;

const ERROR_PREVIEW_CHARS: usize = 200;

/// Pass/fail judgment for a single call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    /// Exact match against `expected` when given, otherwise any 2xx passes
    pub fn from_status(status: u16, expected: Option<u16>) -> Self {
        let pass = match expected {
            Some(code) => status == code,
            None => (200..300).contains(&status),
        };
        if pass {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

pub fn classify(response: &ApiResponse, expected: Option<u16>) -> Verdict {
    Verdict::from_status(response.status, expected)
}

/// Shorten a bearer value to a fixed prefix and suffix
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 30 {
        return value.to_string();
    }
    let head: String = chars[..20].iter().collect();
    let tail: String = chars[chars.len() - 10..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn sanitize_headers(headers: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(k, v)| {
            if k.eq_ignore_ascii_case(AUTHORIZATION) {
                (k.clone(), mask_secret(v))
            } else {
                (k.clone(), v.clone())
            }
        })
        .collect()
}

fn indented(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Pretty-print text that may or may not be JSON
fn pretty_text(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => pretty_json(&value),
        Err(_) => {
            log::debug!("Body is not JSON, showing raw text");
            text.to_string()
        }
    }
}

fn verdict_marker(verdict: Verdict) -> String {
    match verdict {
        Verdict::Pass => "✅ PASSED".green().bold().to_string(),
        Verdict::Fail => "❌ FAILED".red().bold().to_string(),
    }
}

/// Full multi-line report for one call.
///
/// Request headers are the ones recorded on `response.request`; the HTTP
/// transport records its own `User-Agent` and `Accept` there too.
/// `request_body` overrides the body recorded on the request, for callers
/// that serialized the payload themselves.
pub fn render_report(
    response: &ApiResponse,
    name: &str,
    expected: Option<u16>,
    request_body: Option<&str>,
) -> String {
    let request = &response.request;
    let mut out = String::new();

    let _ = writeln!(out, "\n[{}]", name.bold());
    let _ = writeln!(out, "URL: {} {}", request.method, request.url);

    let headers = serde_json::to_value(sanitize_headers(&request.headers)).unwrap_or_default();
    let _ = writeln!(out, "\nRequest Headers:");
    let _ = writeln!(out, "{}", indented(&pretty_json(&headers)));

    let body = match (request_body, &request.body) {
        (Some(raw), _) => Some(pretty_text(raw)),
        (None, Some(value)) => Some(pretty_json(value)),
        (None, None) => None,
    };
    if let Some(body) = body {
        let _ = writeln!(out, "\nRequest Body:");
        let _ = writeln!(out, "{}", indented(&body));
    }

    let _ = writeln!(out, "\nStatus Code: {}", response.status);
    if let Some(code) = expected {
        let _ = writeln!(out, "Expected Status: {}", code);
    }

    let _ = writeln!(out, "\nResponse Body:");
    let _ = writeln!(out, "{}", indented(&pretty_text(&response.text)));

    let _ = write!(out, "{}", verdict_marker(classify(response, expected)));
    out
}

/// One status line, then either the body shape (on success) or a truncated
/// error body (on 4xx/5xx)
pub fn render_compact(
    response: &ApiResponse,
    description: &str,
    expected: Option<u16>,
    summarize: bool,
) -> String {
    let request = &response.request;
    let marker = match classify(response, expected) {
        Verdict::Pass => "✓".green(),
        Verdict::Fail => "✗".red(),
    };

    let mut out = format!(
        "{} {} {} - {} {}",
        marker, request.method, request.url, response.status, description
    );

    if response.status >= 400 {
        let _ = write!(
            out,
            "\n    Error: {}",
            truncate(&response.text, ERROR_PREVIEW_CHARS)
        );
    } else if summarize {
        let _ = write!(out, "\n    {}", BodyShape::of_text(&response.text));
    }
    out
}

/// Print the full report and hand the response back to the caller
pub fn report(
    response: ApiResponse,
    name: &str,
    expected: Option<u16>,
    request_body: Option<&str>,
) -> ApiResponse {
    println!("{}", render_report(&response, name, expected, request_body));
    response
}
