//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers build a [`Response`] and return it; the server turns it into a
//! hyper response. Nothing else happens here.

use bytes::Bytes;
use http_body_util::Full;
use serde::Serialize;

use crate::status::Status;

const APPLICATION_JSON: &str = "application/json";

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use foo_api::{Response, Status};
///
/// Response::json(br#"{"id":"1"}"#.to_vec());
/// Response::status(Status::NoContent);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use foo_api::{Response, Status};
///
/// Response::builder()
///     .status(Status::MovedPermanently)
///     .header("location", "/foo")
///     .no_body();
/// ```
#[derive(Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: u16,
}

impl Response {
    /// `200 OK` with an `application/json` body.
    pub fn json(body: Vec<u8>) -> Self {
        Self::builder().json(body)
    }

    /// Response with no body. Still tagged `application/json`: every answer
    /// this service gives is JSON or nothing.
    pub fn status(code: Status) -> Self {
        Self {
            body: Vec::new(),
            headers: vec![("content-type".to_owned(), APPLICATION_JSON.to_owned())],
            status: code.into(),
        }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: Status::Ok.into() }
    }

    pub fn status_code(&self) -> u16 { self.status }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Converts into the hyper response written to the connection.
    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut builder = http::Response::builder().status(self.status);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        match builder.body(Full::new(Bytes::from(self.body))) {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!("invalid response head: {e}");
                let mut resp = http::Response::new(Full::new(Bytes::new()));
                *resp.status_mut() = Status::InternalServerError.into();
                resp
            }
        }
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `Status::Ok` (200).
/// Terminated by a typed body method.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: u16,
}

impl ResponseBuilder {
    pub fn status(mut self, code: Status) -> Self {
        self.status = code.into();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: Vec<u8>) -> Response {
        let mut headers = vec![("content-type".to_owned(), APPLICATION_JSON.to_owned())];
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }

    /// Terminate with no body (e.g. `Status::NoContent`, `Status::MovedPermanently`).
    pub fn no_body(self) -> Response {
        self.json(Vec::new())
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

/// Return a [`Status`] directly from a handler: `return Status::NotFound`
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::status(self) }
}

impl<T: IntoResponse, E: IntoResponse> IntoResponse for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(v) => v.into_response(),
            Err(e) => e.into_response(),
        }
    }
}

/// `200 OK` with `T` serialised by serde_json.
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => Response::json(bytes),
            Err(e) => {
                tracing::error!("response serialisation failed: {e}");
                Response::status(Status::InternalServerError)
            }
        }
    }
}
