//! Per-id async locks for summaries being generated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slot = Arc<AsyncMutex<()>>;

/// Table of ids currently being summarized.
///
/// Entries are created on demand and removed by the last guard holder.
#[derive(Default)]
pub(super) struct InFlight {
    slots: Mutex<HashMap<String, Slot>>,
}

impl InFlight {
    /// Wait until no other caller holds `id`, then hold it until the guard drops.
    pub(super) async fn lock(&self, id: &str) -> InFlightGuard<'_> {
        let slot = {
            let mut slots = self.slots.lock().unwrap();
            Arc::clone(slots.entry(id.to_string()).or_default())
        };

        let guard = Arc::clone(&slot).lock_owned().await;

        InFlightGuard {
            table: self,
            id: id.to_string(),
            slot,
            _guard: guard,
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.slots.lock().unwrap().len()
    }
}

pub(super) struct InFlightGuard<'a> {
    table: &'a InFlight,
    id: String,
    slot: Slot,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut slots = self.table.slots.lock().unwrap();
        // Held by the table, `slot` and `_guard`; anything more is a waiter.
        if Arc::strong_count(&self.slot) <= 3 {
            slots.remove(&self.id);
        }
    }
}
