//! Background worker that replays queued commands against the remote store
//! and reconciles the local cache with the outcome.

use crate::local::{Entity, Shared};
use crate::remote::RemoteStore;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};

/// A remote write queued by a cache command.
#[derive(Debug, Clone)]
pub enum WriteOp<T> {
    Put { seq: u64, entity: T },
    Delete { seq: u64, id: String },
}

impl<T: Entity> WriteOp<T> {
    pub fn seq(&self) -> u64 {
        match self {
            WriteOp::Put { seq, .. } | WriteOp::Delete { seq, .. } => *seq,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            WriteOp::Put { entity, .. } => entity.id(),
            WriteOp::Delete { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Committed {
        seq: u64,
        id: String,
    },
    /// The remote write failed. `restored` is false when a later command on
    /// the same id is still pending; that command inherits the rollback target.
    RolledBack {
        seq: u64,
        id: String,
        reason: String,
        restored: bool,
    },
}

pub struct SyncWorker<T: Entity, R> {
    shared: Arc<Shared<T>>,
    remote: Arc<R>,
    receiver: mpsc::UnboundedReceiver<WriteOp<T>>,
    events: broadcast::Sender<SyncEvent>,
}

impl<T, R> SyncWorker<T, R>
where
    T: Entity,
    R: RemoteStore<T>,
{
    pub(crate) fn new(
        shared: Arc<Shared<T>>,
        remote: Arc<R>,
        receiver: mpsc::UnboundedReceiver<WriteOp<T>>,
        events: broadcast::Sender<SyncEvent>,
    ) -> Self {
        Self {
            shared,
            remote,
            receiver,
            events,
        }
    }

    /// Process writes until every cache handle is dropped.
    pub async fn run(mut self) {
        info!("Cache sync worker started");
        while let Some(op) = self.receiver.recv().await {
            self.process(op).await;
        }
        info!("Cache sync worker stopped");
    }

    /// Process whatever is queued right now and return how many writes ran.
    pub async fn run_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(op) = self.receiver.try_recv() {
            self.process(op).await;
            processed += 1;
        }
        processed
    }

    async fn process(&self, op: WriteOp<T>) {
        let seq = op.seq();
        let id = op.id().to_string();
        let result = match &op {
            WriteOp::Put { entity, .. } => self.remote.put(entity).await,
            WriteOp::Delete { id, .. } => self.remote.delete(id).await,
        };

        let event = match result {
            Ok(()) => {
                self.shared.pending.lock().remove(&seq);
                metrics::counter!("cache.sync.committed").increment(1);
                SyncEvent::Committed { seq, id }
            }
            Err(e) => {
                let restored = rollback(&self.shared, seq);
                metrics::counter!("cache.sync.rolled_back").increment(1);
                warn!(id = %id, seq = seq, error = %e, restored, "Remote write failed");
                SyncEvent::RolledBack {
                    seq,
                    id,
                    reason: e.to_string(),
                    restored,
                }
            }
        };

        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

/// Undo pending write `seq`. If a later write to the same id is still pending
/// the local value is left alone and that write inherits the prior value.
/// Returns whether the local cache was restored.
pub(crate) fn rollback<T: Entity>(shared: &Shared<T>, seq: u64) -> bool {
    let mut pending = shared.pending.lock();
    let Some(failed) = pending.remove(&seq) else {
        return false;
    };

    if let Some((_, later)) = pending
        .range_mut(seq + 1..)
        .find(|(_, p)| p.id == failed.id)
    {
        later.prior = failed.prior;
        return false;
    }

    match failed.prior {
        Some(prior) => {
            shared.store.insert(failed.id, prior);
        }
        None => {
            shared.store.remove(&failed.id);
        }
    }
    true
}
