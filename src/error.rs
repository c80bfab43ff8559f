//! Unified error type.

/// The error type returned by foo-api's fallible infrastructure operations.
///
/// Request-level failures (400, 404, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values through [`ApiError`](crate::ApiError),
/// not as `Error`s. This type surfaces startup failures: reading the
/// configuration, binding to a port, or accepting a connection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(String),
}
