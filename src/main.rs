//! Binary entrypoint for the foo-api HTTP server.
//!
//! Configuration comes from the environment (see [`foo_api::config`]);
//! log verbosity from `RUST_LOG` (default `info`).

use foo_api::{AppState, Config, Error, Server, api};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let state = match config.seed_name.as_deref() {
        Some(name) => {
            let (state, seed) = AppState::with_seed(name);
            info!(id = %seed.id, name = %seed.name, "seeded store");
            state
        }
        None => AppState::new(),
    };

    Server::bind(config.addr)
        .await?
        .serve(api::routes(state))
        .await
}
