//! Local entity cache. Queries read the DashMap directly; commands mutate it
//! and enqueue the matching remote write for the [`SyncWorker`].

use crate::sync::{SyncEvent, SyncWorker, WriteOp};
use dashmap::DashMap;
use parking_lot::Mutex;
use pilot_core::config::CacheConfig;
use pilot_core::{AbTest, Campaign, PilotError, PilotResult};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::debug;

/// A server-owned row addressed by an opaque string id.
pub trait Entity: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

impl Entity for Campaign {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for AbTest {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Value an id held before an unconfirmed command touched it.
pub(crate) struct Pending<T> {
    pub id: String,
    pub prior: Option<T>,
}

pub(crate) struct Shared<T> {
    pub store: DashMap<String, T>,
    /// seq -> pending write, in enqueue order.
    pub pending: Mutex<BTreeMap<u64, Pending<T>>>,
}

pub struct EntityCache<T: Entity> {
    shared: Arc<Shared<T>>,
    queue: mpsc::UnboundedSender<WriteOp<T>>,
    events: broadcast::Sender<SyncEvent>,
    next_seq: Mutex<u64>,
    max_entries: usize,
}

impl<T: Entity> EntityCache<T> {
    /// Build a cache and the worker that drains its write queue. The caller
    /// decides where the worker runs; see [`EntityCache::spawn`].
    pub fn new<R>(config: &CacheConfig, remote: Arc<R>) -> (Self, SyncWorker<T, R>)
    where
        R: crate::remote::RemoteStore<T>,
    {
        let shared = Arc::new(Shared {
            store: DashMap::new(),
            pending: Mutex::new(BTreeMap::new()),
        });
        let (queue, receiver) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(1024);

        let worker = SyncWorker::new(shared.clone(), remote, receiver, events.clone());
        let cache = Self {
            shared,
            queue,
            events,
            next_seq: Mutex::new(0),
            max_entries: config.max_entries,
        };
        (cache, worker)
    }

    /// Build a cache with its worker running on the current tokio runtime.
    pub fn spawn<R>(config: &CacheConfig, remote: Arc<R>) -> Self
    where
        R: crate::remote::RemoteStore<T>,
    {
        let (cache, worker) = Self::new(config, remote);
        tokio::spawn(worker.run());
        cache
    }

    /// Seed rows already known to be on the server. No remote write is queued.
    pub fn hydrate(&self, rows: impl IntoIterator<Item = T>) {
        for row in rows {
            self.shared.store.insert(row.id().to_string(), row);
        }
    }

    // ─── Queries ───────────────────────────────────────────────────────────

    pub fn get(&self, id: &str) -> Option<T> {
        self.shared.store.get(id).map(|r| r.value().clone())
    }

    pub fn list(&self) -> Vec<T> {
        self.shared.store.iter().map(|r| r.value().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.shared.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.store.is_empty()
    }

    /// Number of commands whose remote write has not been confirmed yet.
    pub fn pending_writes(&self) -> usize {
        self.shared.pending.lock().len()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    // ─── Commands ──────────────────────────────────────────────────────────

    pub fn create(&self, entity: T) -> PilotResult<u64> {
        let id = entity.id().to_string();
        if self.shared.store.contains_key(&id) {
            return Err(PilotError::Validation(format!("{id} already exists")));
        }
        if self.shared.store.len() >= self.max_entries {
            return Err(PilotError::Validation(format!(
                "cache is full ({} entries)",
                self.max_entries
            )));
        }
        metrics::counter!("cache.command.create").increment(1);
        self.apply(id, Some(entity))
    }

    pub fn update(&self, entity: T) -> PilotResult<u64> {
        let id = entity.id().to_string();
        if !self.shared.store.contains_key(&id) {
            return Err(PilotError::NotFound(id));
        }
        metrics::counter!("cache.command.update").increment(1);
        self.apply(id, Some(entity))
    }

    pub fn delete(&self, id: &str) -> PilotResult<u64> {
        if !self.shared.store.contains_key(id) {
            return Err(PilotError::NotFound(id.to_string()));
        }
        metrics::counter!("cache.command.delete").increment(1);
        self.apply(id.to_string(), None)
    }

    /// Apply locally, remember the prior value, and queue the remote write.
    /// `next_seq` is held throughout so queue order matches local order.
    /// The store write and the pending record share one `pending` critical
    /// section so a concurrent rollback always sees this command.
    fn apply(&self, id: String, next: Option<T>) -> PilotResult<u64> {
        let mut seq_guard = self.next_seq.lock();
        let seq = *seq_guard;

        {
            let mut pending = self.shared.pending.lock();
            let prior = match &next {
                Some(entity) => self.shared.store.insert(id.clone(), entity.clone()),
                None => self.shared.store.remove(&id).map(|(_, v)| v),
            };
            pending.insert(
                seq,
                Pending {
                    id: id.clone(),
                    prior,
                },
            );
        }

        let op = match next {
            Some(entity) => WriteOp::Put { seq, entity },
            None => WriteOp::Delete {
                seq,
                id: id.clone(),
            },
        };
        if self.queue.send(op).is_err() {
            // Worker is gone; nothing will ever confirm this write.
            crate::sync::rollback(&self.shared, seq);
            return Err(PilotError::Remote("sync worker stopped".to_string()));
        }

        *seq_guard += 1;
        debug!(id = %id, seq = seq, "Command queued");
        Ok(seq)
    }
}
