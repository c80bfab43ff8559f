//! # foo-api
//!
//! An HTTP service holding `Foo` records (a name and a generated id) in
//! memory, with create, read, and delete endpoints.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | `POST` | `/foo` | 200, JSON record with generated id | 400 malformed JSON, 404 missing `name` |
//! | `GET` | `/foo/{id}` | 200, JSON record | 404 unknown id |
//! | `DELETE` | `/foo/{id}` | 204, no body | 404 unknown id |
//! | `GET` | `/healthz`, `/readyz` | 200 | |
//!
//! Records live only as long as the process.
//!
//! ## Running it in-process
//!
//! ```rust,no_run
//! use foo_api::{AppState, Config, Server, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), foo_api::Error> {
//!     let config = Config::from_env()?;
//!     let app = api::routes(AppState::new());
//!     Server::bind(config.addr).await?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod state;
mod status;

pub mod api;
pub mod config;
pub mod health;
pub mod store;

pub use api::ApiError;
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use state::AppState;
pub use status::Status;
pub use store::{Foo, FooStore};
