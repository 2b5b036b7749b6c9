#![warn(clippy::unwrap_used)]

//! Client-side mirror of server-owned rows. Reads are served locally;
//! writes go through named commands that queue a remote write and roll the
//! local copy back if that write fails.

pub mod local;
pub mod remote;
pub mod sync;

pub use local::{Entity, EntityCache};
pub use remote::{InMemoryRemote, RemoteStore};
pub use sync::{SyncEvent, SyncWorker, WriteOp};
