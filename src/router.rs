//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. A miss is classified so
//! the caller gets the right answer: 301 when only a trailing slash is in the
//! way, 405 when another method owns the path, 404 otherwise.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

/// Result of matching a method + path against the route table.
pub(crate) enum Lookup {
    Found(BoxedHandler, HashMap<String, String>),
    /// The path exists, but only under these methods.
    MethodNotAllowed(Vec<Method>),
    /// The path only matches without its trailing slash.
    Redirect(String),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if the path is not a valid route or conflicts with one already
    /// registered for the same method. Routes are fixed at startup, so this is
    /// a programming error rather than a runtime condition.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::Delete, path, handler)
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Lookup {
        if let Some(matched) = self.routes.get(&method).and_then(|tree| tree.at(path).ok()) {
            let handler = Arc::clone(matched.value);
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Lookup::Found(handler, params);
        }

        if path.len() > 1 && path.ends_with('/') {
            let trimmed = path.trim_end_matches('/');
            let trimmed = if trimmed.is_empty() { "/" } else { trimmed };
            if self.routes.values().any(|tree| tree.at(trimmed).is_ok()) {
                return Lookup::Redirect(trimmed.to_owned());
            }
        }

        let allowed: Vec<Method> = self.allowed(path)
            .into_iter()
            .filter(|m| *m != method)
            .collect();
        if !allowed.is_empty() {
            return Lookup::MethodNotAllowed(allowed);
        }

        Lookup::NotFound
    }

    /// Methods registered for `path`, in a stable order.
    fn allowed(&self, path: &str) -> Vec<Method> {
        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(m, _)| *m)
            .collect();
        allowed.sort();
        allowed
    }

    /// Answers a request whose method is outside [`Method`]: 405 with
    /// `Allow` when the path is routed, 404 when it is not.
    pub(crate) fn respond_unsupported(&self, path: &str) -> Response {
        let allowed = self.allowed(path);
        if allowed.is_empty() {
            not_found()
        } else {
            method_not_allowed(&allowed)
        }
    }

    /// Routes one request and produces one response.
    ///
    /// This is everything the server does per request after reading the body,
    /// so tests can drive the full routing and handler stack without a socket.
    pub async fn respond(&self, mut req: Request) -> Response {
        match self.lookup(req.method, &req.path) {
            Lookup::Found(handler, params) => {
                req.params = params;
                handler.call(req).await
            }
            Lookup::MethodNotAllowed(allowed) => {
                debug!(method = %req.method, path = %req.path, "method not allowed");
                method_not_allowed(&allowed)
            }
            Lookup::Redirect(location) => Response::builder()
                .status(Status::MovedPermanently)
                .header("location", &location)
                .no_body(),
            Lookup::NotFound => not_found(),
        }
    }
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed.iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    Response::builder()
        .status(Status::MethodNotAllowed)
        .header("allow", &allow)
        .json(error_body("method not allowed"))
}

fn not_found() -> Response {
    Response::builder()
        .status(Status::NotFound)
        .json(error_body("no such route"))
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

/// The body every error response carries: `{"error": "<message>"}`.
pub(crate) fn error_body(message: &str) -> Vec<u8> {
    serde_json::json!({ "error": message }).to_string().into_bytes()
}
