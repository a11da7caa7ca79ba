//! Process-level error type.

use crate::stuff::StoreError;

/// Failures that stop the service from starting or serving.
///
/// Per-request failures never surface here; handlers turn them into HTTP
/// responses through [`ApiError`](crate::stuff::ApiError).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("store: {0}")]
    Store(#[from] StoreError),
}
