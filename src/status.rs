//! HTTP status codes the service answers with, as a typed enum.
//!
//! Use [`Status`] anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use foo_api::{Response, Status};
//!
//! // status-only, no body
//! Response::status(Status::NoContent);
//!
//! Response::builder()
//!     .status(Status::NotFound)
//!     .json(br#"{"error":"not found"}"#.to_vec());
//! ```

/// Status codes produced by the router and the Foo handlers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200
    NoContent,           // 204

    // ── 3xx Redirection ───────────────────────────────────────────────────────
    MovedPermanently,    // 301

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::NoContent           => 204,
            Status::MovedPermanently    => 301,
            Status::BadRequest          => 400,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::InternalServerError => 500,
        }
    }
}

impl From<Status> for http::StatusCode {
    fn from(s: Status) -> http::StatusCode {
        match s {
            Status::Ok                  => http::StatusCode::OK,
            Status::NoContent           => http::StatusCode::NO_CONTENT,
            Status::MovedPermanently    => http::StatusCode::MOVED_PERMANENTLY,
            Status::BadRequest          => http::StatusCode::BAD_REQUEST,
            Status::NotFound            => http::StatusCode::NOT_FOUND,
            Status::MethodNotAllowed    => http::StatusCode::METHOD_NOT_ALLOWED,
            Status::InternalServerError => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
