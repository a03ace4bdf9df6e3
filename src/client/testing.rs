//! Scripted transport for unit tests

use super::{ApiRequest, ApiResponse, Method, Transport};
use crate::error::{HarnessError, HarnessResult};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

#[derive(Debug, Clone)]
enum Reply {
    Status(u16, String),
    Fault(String),
}

/// Replays canned replies keyed by method and path, recording every request.
///
/// Each route holds a queue; the last reply of a queue is reused once the
/// earlier ones are consumed. Unrouted requests get a 404.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    routes: Rc<RefCell<HashMap<(Method, String), VecDeque<Reply>>>>,
    sent: Rc<RefCell<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.push(method, path, Reply::Status(status, body.to_string()));
        self
    }

    pub fn fault(self, method: Method, path: &str, reason: &str) -> Self {
        self.push(method, path, Reply::Fault(reason.to_string()));
        self
    }

    fn push(&self, method: Method, path: &str, reply: Reply) {
        self.routes
            .borrow_mut()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
    }

    /// Requests seen so far, in order
    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.borrow().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

fn path_of(url: &str) -> String {
    let without_scheme = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    let path = without_scheme
        .find('/')
        .map(|i| &without_scheme[i..])
        .unwrap_or("/");
    path.split('?').next().unwrap_or("/").to_string()
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &ApiRequest) -> HarnessResult<ApiResponse> {
        self.sent.borrow_mut().push(request.clone());

        let key = (request.method, path_of(&request.url));
        let reply = {
            let mut routes = self.routes.borrow_mut();
            match routes.get_mut(&key) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply.unwrap_or_else(|| Reply::Status(404, r#"{"error":"Not Found"}"#.to_string())) {
            Reply::Status(status, text) => Ok(ApiResponse {
                request: request.clone(),
                status,
                text,
            }),
            Reply::Fault(reason) => Err(HarnessError::RequestFailed {
                method: request.method.to_string(),
                url: request.url.clone(),
                reason,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_of_strips_host_and_query() {
        assert_eq!(path_of("http://localhost:8080/api/menu?page=0"), "/api/menu");
        assert_eq!(path_of("http://localhost:8080"), "/");
        assert_eq!(path_of("http://localhost:8080/"), "/");
    }

    #[test]
    fn test_route_queue_reuses_last_reply() {
        let transport = ScriptedTransport::new()
            .route(Method::Post, "/auth/register", 201, "{}")
            .route(Method::Post, "/auth/register", 400, "{}");
        let req = ApiRequest::new(Method::Post, "http://h/auth/register");

        assert_eq!(transport.send(&req).unwrap().status, 201);
        assert_eq!(transport.send(&req).unwrap().status, 400);
        assert_eq!(transport.send(&req).unwrap().status, 400);
        assert_eq!(transport.sent_count(), 3);
    }
}
