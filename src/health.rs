//! Liveness check.
//!
//! `GET /test` answers `200 {"status": "ok"}` as long as the process can
//! serve HTTP. It never touches the store, so a database outage does not
//! fail the check.

use crate::{Request, Response};

const STATUS_OK: &[u8] = br#"{"status": "ok"}"#;

pub async fn status<S>(_req: Request, _state: S) -> Response {
    Response::json(STATUS_OK)
}
