//! Notification store contract and in-memory implementation.
//!
//! # Responsibility
//! - Hold pending notifications in arrival order for FIFO delivery.
//! - Expose each mutation as one self-contained unit of work.
//!
//! # Invariants
//! - No two live records share an id.
//! - `pop_oldest` returns the earliest-inserted surviving record.
//! - Arrival order is tracked explicitly, never derived from map iteration.

use crate::model::notification::{NotificationId, NotificationRecord};
use log::{debug, warn};
use std::collections::{HashMap, VecDeque};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard};

pub type StoreResult<T> = Result<T, StoreError>;

/// Contract violations reported by store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `pop_oldest` was called on an empty store.
    Empty,
    /// `insert` collided with a live record.
    DuplicateId(NotificationId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "notification store is empty"),
            Self::DuplicateId(id) => write!(f, "notification id already pending: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Store interface shared by the dispatcher and the presentation layer.
///
/// Every method is atomic: callers never observe a partially-applied
/// mutation, even when called from different threads.
pub trait NotificationStore {
    fn insert(&self, record: NotificationRecord) -> StoreResult<()>;
    /// Removes any record with the same id, then appends `record`.
    fn replace(&self, record: NotificationRecord);
    fn pop_oldest(&self) -> StoreResult<NotificationRecord>;
    /// Returns whether a record was removed; absent ids are a no-op.
    fn remove(&self, id: NotificationId) -> bool;
    fn clear(&self);
    fn is_empty(&self) -> bool;
    fn len(&self) -> usize;
    fn get(&self, id: NotificationId) -> Option<NotificationRecord>;
    /// Snapshot of live ids, oldest first.
    fn ids(&self) -> Vec<NotificationId>;
}

#[derive(Debug, Default)]
struct StoreState {
    order: VecDeque<NotificationId>,
    records: HashMap<NotificationId, NotificationRecord>,
}

impl StoreState {
    fn detach(&mut self, id: NotificationId) -> Option<NotificationRecord> {
        let record = self.records.remove(&id)?;
        if let Some(position) = self.order.iter().position(|queued| *queued == id) {
            self.order.remove(position);
        }
        Some(record)
    }

    fn append(&mut self, record: NotificationRecord) {
        self.order.push_back(record.id());
        self.records.insert(record.id(), record);
    }
}

/// Process-wide in-memory store. Cloning yields another handle to the same
/// records.
#[derive(Debug, Clone, Default)]
pub struct MemoryNotificationStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // Each mutation completes before its guard drops, so state behind a
        // poisoned lock is still consistent.
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("event=store_lock_poisoned module=store status=recovered");
            poisoned.into_inner()
        })
    }
}

impl NotificationStore for MemoryNotificationStore {
    fn insert(&self, record: NotificationRecord) -> StoreResult<()> {
        let mut state = self.lock();
        let id = record.id();
        if state.records.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }
        state.append(record);
        debug!(
            "event=store_insert module=store status=ok id={id} pending={}",
            state.order.len()
        );
        Ok(())
    }

    fn replace(&self, record: NotificationRecord) {
        let mut state = self.lock();
        let id = record.id();
        let replaced = state.detach(id).is_some();
        state.append(record);
        debug!(
            "event=store_replace module=store status=ok id={id} replaced={replaced} pending={}",
            state.order.len()
        );
    }

    fn pop_oldest(&self) -> StoreResult<NotificationRecord> {
        let mut state = self.lock();
        while let Some(id) = state.order.pop_front() {
            if let Some(record) = state.records.remove(&id) {
                debug!(
                    "event=store_pop module=store status=ok id={id} pending={}",
                    state.order.len()
                );
                return Ok(record);
            }
        }
        Err(StoreError::Empty)
    }

    fn remove(&self, id: NotificationId) -> bool {
        let removed = self.lock().detach(id).is_some();
        debug!("event=store_remove module=store status=ok id={id} removed={removed}");
        removed
    }

    fn clear(&self) {
        let mut state = self.lock();
        let dropped = state.records.len();
        state.order.clear();
        state.records.clear();
        debug!("event=store_clear module=store status=ok dropped={dropped}");
    }

    fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    fn len(&self) -> usize {
        self.lock().records.len()
    }

    fn get(&self, id: NotificationId) -> Option<NotificationRecord> {
        self.lock().records.get(&id).cloned()
    }

    fn ids(&self) -> Vec<NotificationId> {
        self.lock().order.iter().copied().collect()
    }
}
