//! Liveness and readiness probe handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can it serve traffic? Failure → pulled from load-balancer. |
//!
//! The store is in memory and built before the listener binds, so the
//! service is ready as soon as it answers at all.

use serde::Serialize;

use crate::request::Request;
use crate::response::Json;

#[derive(Serialize)]
pub struct Probe {
    pub status: &'static str,
}

/// Always `200 OK` with `{"status":"ok"}`.
pub async fn liveness(_req: Request) -> Json<Probe> {
    Json(Probe { status: "ok" })
}

/// Always `200 OK` with `{"status":"ready"}`.
pub async fn readiness(_req: Request) -> Json<Probe> {
    Json(Probe { status: "ready" })
}
