//! Persistence seam for `Stuff` records.

use async_trait::async_trait;

use super::id::StuffId;
use super::model::Stuff;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("mongodb: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Failure reported by a backend other than MongoDB.
    #[error("backend: {0}")]
    Backend(String),
}

/// The four primitives the handlers need. Each call is one round trip; no
/// retries, no transactions.
///
/// Implementations are shared by every in-flight request and must be safe
/// for concurrent use.
#[async_trait]
pub trait StuffStore: Send + Sync {
    /// Every record, in store-defined order.
    async fn find_all(&self) -> Result<Vec<Stuff>, StoreError>;

    async fn find_by_id(&self, id: StuffId) -> Result<Option<Stuff>, StoreError>;

    async fn insert(&self, stuff: &Stuff) -> Result<(), StoreError>;

    /// Returns the number of records removed (0 or 1).
    async fn delete_by_id(&self, id: StuffId) -> Result<u64, StoreError>;
}
