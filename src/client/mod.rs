//! HTTP transport seam used by the endpoint invoker

#[cfg(test)]
pub mod testing;

use crate::error::{HarnessError, HarnessResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// HTTP verbs the harness knows how to dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// GET and DELETE are sent without a body, whatever the caller passes
    pub fn carries_body(&self) -> bool {
        !matches!(self, Method::Get | Method::Delete)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            _ => Err(HarnessError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A fully resolved outgoing request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_body(mut self, body: Option<Value>) -> Self {
        if self.method.carries_body() {
            if body.is_some() {
                self.headers
                    .insert("Content-Type".to_string(), "application/json".to_string());
            }
            self.body = body;
        }
        self
    }
}

/// A completed response, together with the request that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub request: ApiRequest,
    pub status: u16,
    pub text: String,
}

impl ApiResponse {
    /// Parse the body as JSON, `None` when it is not valid JSON
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.text).ok()
    }
}

/// Sends a request and waits for the complete response
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> HarnessResult<ApiResponse>;
}

const USER_AGENT: &str = concat!("smoke-tester/", env!("CARGO_PKG_VERSION"));

/// Blocking reqwest transport with the client's default timeouts
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    /// Sent on every request unless the caller set the same header
    default_headers: BTreeMap<String, String>,
}

impl HttpTransport {
    pub fn new() -> HarnessResult<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        let default_headers = BTreeMap::from([
            ("Accept".to_string(), "*/*".to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ]);
        Ok(Self {
            client,
            default_headers,
        })
    }

    /// The request exactly as it goes on the wire, so reports show every
    /// header sent
    fn outgoing(&self, request: &ApiRequest) -> ApiRequest {
        let mut outgoing = request.clone();
        for (name, value) in &self.default_headers {
            let already_set = outgoing
                .headers
                .keys()
                .any(|k| k.eq_ignore_ascii_case(name));
            if !already_set {
                outgoing.headers.insert(name.clone(), value.clone());
            }
        }
        outgoing
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> HarnessResult<ApiResponse> {
        let request = self.outgoing(request);
        let mut req = self
            .client
            .request(request.method.into(), request.url.as_str());

        for (k, v) in &request.headers {
            req = req.header(k.as_str(), v.as_str());
        }

        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let failed = |e: reqwest::Error| HarnessError::RequestFailed {
            method: request.method.to_string(),
            url: request.url.clone(),
            reason: describe_fault(&e),
        };

        let res = req.send().map_err(failed)?;
        let status = res.status().as_u16();
        let text = res.text().map_err(failed)?;

        Ok(ApiResponse {
            request,
            status,
            text,
        })
    }
}

/// Short classification of a reqwest fault for the transcript
fn describe_fault(e: &reqwest::Error) -> String {
    let kind = if e.is_connect() {
        "connection failed"
    } else if e.is_timeout() {
        "timed out"
    } else if e.is_decode() || e.is_body() {
        "malformed response"
    } else {
        "request error"
    };
    format!("{}: {}", kind, e)
}
