//! In-process [`StuffStore`], insertion ordered. Nothing is persisted.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::id::StuffId;
use super::model::Stuff;
use super::store::{StoreError, StuffStore};

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Stuff>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl StuffStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Stuff>, StoreError> {
        Ok(self.records.read().clone())
    }

    async fn find_by_id(&self, id: StuffId) -> Result<Option<Stuff>, StoreError> {
        Ok(self.records.read().iter().find(|s| s.id == id).cloned())
    }

    async fn insert(&self, stuff: &Stuff) -> Result<(), StoreError> {
        let mut records = self.records.write();
        if records.iter().any(|s| s.id == stuff.id) {
            return Err(StoreError::Backend(format!("duplicate id {}", stuff.id)));
        }
        records.push(stuff.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: StuffId) -> Result<u64, StoreError> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|s| s.id != id);
        Ok((before - records.len()) as u64)
    }
}
