//! Per-queue mutual exclusion for position assignment.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per queue id, created on first use.
///
/// Holding the guard for a queue excludes every other position assignment in
/// that queue; different queues do not contend.
#[derive(Debug, Default)]
pub struct PositionLocks {
    locks: DashMap<i32, Arc<Mutex<()>>>,
}

impl PositionLocks {
    pub fn new() -> Self { Self::default() }

    pub async fn acquire(&self, queue_id: i32) -> OwnedMutexGuard<()> {
        // Clone out of the map so no shard lock is held across the await.
        let lock = Arc::clone(self.locks.entry(queue_id).or_default().value());
        lock.lock_owned().await
    }

    /// Drop the entry of a deleted queue. A holder keeps its own handle.
    pub fn forget(&self, queue_id: i32) {
        self.locks.remove(&queue_id);
    }

    pub fn len(&self) -> usize { self.locks.len() }

    pub fn is_empty(&self) -> bool { self.locks.is_empty() }
}
