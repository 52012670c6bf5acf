//! Response value written into the request context.

use std::collections::HashMap;

use crate::error::RouterError;

/// A response produced by a middleware or an action.
///
/// The router does not serialize responses; the transport layer reads this
/// back out of the context after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a new response with the given status.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a 200 OK response.
    #[must_use]
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Creates a response with plain text content.
    pub fn text(body: impl Into<String>) -> Self {
        let body: String = body.into();
        Self::ok()
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(body)
    }

    /// Creates a response with JSON content.
    pub fn json<T: serde::Serialize>(data: &T) -> Self {
        match serde_json::to_vec(data) {
            Ok(body) => Self::ok()
                .header("Content-Type", "application/json")
                .body(body),
            Err(_) => Self::new(500).body("Internal Server Error"),
        }
    }

    /// Creates the response a transport would send for a routing error.
    #[must_use]
    pub fn from_error(err: &RouterError) -> Self {
        let res = Self::new(err.status_hint());
        let text = res.status_text();
        res.body(text)
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Returns the status text for the current status code.
    pub fn status_text(&self) -> &'static str {
        match self.status {
            200 => "OK",
            204 => "No Content",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            409 => "Conflict",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_json() {
        let res = Response::json(&serde_json::json!({"id": 7}));
        assert_eq!(res.status, 200);
        assert_eq!(
            res.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(res.body_string(), Some(r#"{"id":7}"#.to_string()));
    }

    #[test]
    fn test_response_from_error() {
        let err = RouterError::NoHandlerBound {
            path: "/users".to_string(),
        };
        let res = Response::from_error(&err);
        assert_eq!(res.status, 405);
        assert_eq!(res.body_string(), Some("Method Not Allowed".to_string()));
    }
}
