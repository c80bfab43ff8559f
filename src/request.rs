//! Incoming HTTP request type.

use std::collections::HashMap;

use crate::method::Method;

/// An incoming HTTP request with its body fully read.
///
/// The server builds one per hyper request; tests build them directly with
/// [`Request::new`] and hand them to [`Router::respond`](crate::Router::respond).
#[derive(Debug)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Vec<u8>,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            method,
            path: path.into(),
            body: body.into(),
            params: HashMap::new(),
        }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Returns a named path parameter.
    ///
    /// For a route `/foo/{id}`, `req.param("id")` on `/foo/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
