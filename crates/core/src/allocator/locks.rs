//! Per-event run serialization
//!
//! Two overlapping allocation runs for the same event would both read
//! fresh occupancy and could jointly overstep a zone's capacity. Each
//! run must hold its event's lock for the whole read-compute-write span.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use uuid::Uuid;

/// Hands out one mutex per event id
#[derive(Debug, Default)]
pub struct EventLocks {
    inner: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl EventLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock guarding an event's allocation runs
    pub fn for_event(&self, event_id: Uuid) -> Arc<Mutex<()>> {
        let mut map = match self.inner.lock() {
            Ok(map) => map,
            Err(poisoned) => poisoned.into_inner(),
        };
        map.entry(event_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Lock an event mutex. Poisoning is recovered: the guarded section
/// keeps no in-memory state across runs.
pub fn hold(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
