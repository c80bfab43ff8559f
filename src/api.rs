//! Foo endpoints: create, read, and delete over the in-memory store.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | `POST` | `/foo` | 200, the new record | 400 malformed JSON, 404 missing `name` |
//! | `GET` | `/foo/{id}` | 200, the record | 404 unknown id |
//! | `DELETE` | `/foo/{id}` | 204, no body | 404 unknown id |
//!
//! A missing `name` answers 404, not 400.

use serde_json::Value;
use tracing::{debug, error};

use crate::health;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::{Router, error_body};
use crate::state::AppState;
use crate::status::Status;
use crate::store::Foo;

/// Request-level failures of the Foo handlers, each mapped to one status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body is not a JSON object shaped like a record (400).
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// `name` absent or empty (404).
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// No record under this id (404).
    #[error("foo `{0}` not found")]
    NotFound(String),

    /// Encoding the response body failed (500).
    #[error("serialization failure: {0}")]
    SerializationFailure(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::MalformedInput(_) => Status::BadRequest,
            ApiError::MissingField(_) | ApiError::NotFound(_) => Status::NotFound,
            ApiError::SerializationFailure(_) => Status::InternalServerError,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == Status::InternalServerError {
            error!("{self}");
        } else {
            debug!("{self}");
        }
        Response::builder()
            .status(status)
            .json(error_body(&self.to_string()))
    }
}

/// Builds the service's route table around `state`.
pub fn routes(state: AppState) -> Router {
    let (create, read, remove) = (state.clone(), state.clone(), state);
    Router::new()
        .post("/foo", move |req| create_foo(create.clone(), req))
        .get("/foo/{id}", move |req| get_foo(read.clone(), req))
        .delete("/foo/{id}", move |req| delete_foo(remove.clone(), req))
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}

/// `POST /foo`
pub async fn create_foo(state: AppState, req: Request) -> Result<Response, ApiError> {
    let name = parse_name(req.body())?;
    let foo = state.store.lock().await.create(name);
    to_json(&foo)
}

/// `GET /foo/{id}`
pub async fn get_foo(state: AppState, req: Request) -> Result<Response, ApiError> {
    let id = req.param("id").unwrap_or_default();
    let store = state.store.lock().await;
    let foo = store.get(id).ok_or_else(|| ApiError::NotFound(id.to_owned()))?;
    to_json(foo)
}

/// `DELETE /foo/{id}`
pub async fn delete_foo(state: AppState, req: Request) -> Result<Status, ApiError> {
    let id = req.param("id").unwrap_or_default();
    let removed = state.store.lock().await.remove(id);
    removed
        .map(|_| Status::NoContent)
        .ok_or_else(|| ApiError::NotFound(id.to_owned()))
}

/// Pulls `name` out of a create payload. A caller-supplied `id` and any
/// other fields are ignored.
///
/// The key matches exactly first, then ASCII case-insensitively, so
/// `{"Name":"Al"}` is accepted.
fn parse_name(body: &[u8]) -> Result<String, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::MalformedInput(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(ApiError::MalformedInput("expected a JSON object".to_owned()));
    };
    let name = fields.get("name").or_else(|| {
        fields.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("name"))
            .map(|(_, value)| value)
    });
    match name {
        None | Some(Value::Null) => Err(ApiError::MissingField("name")),
        Some(Value::String(name)) if name.is_empty() => Err(ApiError::MissingField("name")),
        Some(Value::String(name)) => Ok(name.clone()),
        Some(other) => Err(ApiError::MalformedInput(format!(
            "`name` must be a string, got {other}"
        ))),
    }
}

fn to_json(foo: &Foo) -> Result<Response, ApiError> {
    serde_json::to_vec(foo)
        .map(Response::json)
        .map_err(|e| ApiError::SerializationFailure(e.to_string()))
}
