//! Per-request context threaded through middleware and the action.

use std::collections::HashMap;

use serde_json::Value;

use crate::response::Response;

/// A request context the router can dispatch on its own.
pub trait Context {
    /// The request path to resolve.
    fn path(&self) -> &str;
}

/// The default request context.
///
/// Carries the request path, a bag of JSON attributes middleware can read
/// and write, and an optional response. Setting a response is how a
/// middleware tells later handlers that the request has been answered.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Request path.
    pub path: String,
    attributes: HashMap<String, Value>,
    response: Option<Response>,
}

impl RequestContext {
    /// Creates a context for the given path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets an attribute, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.attributes.insert(key.into(), value.into())
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Gets an attribute and deserializes it.
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Returns true if the attribute is set.
    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Stores the response for this request.
    pub fn respond(&mut self, response: Response) {
        self.response = Some(response);
    }

    /// Returns true once a response has been stored.
    pub const fn is_responded(&self) -> bool {
        self.response.is_some()
    }

    /// Returns the stored response.
    pub const fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// Takes the stored response out of the context.
    pub fn take_response(&mut self) -> Option<Response> {
        self.response.take()
    }
}

impl Context for RequestContext {
    fn path(&self) -> &str {
        &self.path
    }
}
