//! The hosted store as seen from the cache: create/update and delete by id.

use crate::local::Entity;
use async_trait::async_trait;
use dashmap::DashMap;
use pilot_core::{PilotError, PilotResult};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

#[async_trait]
pub trait RemoteStore<T: Entity>: Send + Sync + 'static {
    /// Insert or replace the row with `entity.id()`.
    async fn put(&self, entity: &T) -> PilotResult<()>;

    async fn delete(&self, id: &str) -> PilotResult<()>;
}

/// DashMap-backed store for tests and offline runs. Can be switched into a
/// failing mode to exercise rollback.
pub struct InMemoryRemote<T: Entity> {
    rows: DashMap<String, T>,
    failing: AtomicBool,
}

impl<T: Entity> InMemoryRemote<T> {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.rows.get(id).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check(&self) -> PilotResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(PilotError::Remote("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl<T: Entity> Default for InMemoryRemote<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> RemoteStore<T> for InMemoryRemote<T> {
    async fn put(&self, entity: &T) -> PilotResult<()> {
        self.check()?;
        debug!(id = entity.id(), "Remote put");
        self.rows.insert(entity.id().to_string(), entity.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> PilotResult<()> {
        self.check()?;
        debug!(id = id, "Remote delete");
        self.rows.remove(id);
        Ok(())
    }
}
