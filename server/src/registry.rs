//! In-memory registry of in-flight scans, keyed by the caller-chosen scan id.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct ActiveScans {
    scans: Arc<DashMap<Uuid, CancellationToken>>,
}

impl ActiveScans {
    /// Records `cancel` under `scan_id`. Returns `None` if that id is already in flight.
    ///
    /// The entry lives as long as the returned [`Registration`].
    pub fn register(&self, scan_id: Uuid, cancel: CancellationToken) -> Option<Registration> {
        match self.scans.entry(scan_id) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(cancel);
                debug!(%scan_id, "scan registered");
                Some(Registration {
                    scan_id,
                    scans: Arc::clone(&self.scans),
                })
            }
        }
    }

    /// Cancels the scan registered under `scan_id`. Returns `false` for an unknown id.
    pub fn cancel(&self, scan_id: Uuid) -> bool {
        match self.scans.get(&scan_id) {
            Some(entry) => {
                entry.value().cancel();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) -> usize {
        let mut cancelled = 0;
        for entry in self.scans.iter() {
            entry.value().cancel();
            cancelled += 1;
        }
        cancelled
    }

    pub fn contains(&self, scan_id: Uuid) -> bool {
        self.scans.contains_key(&scan_id)
    }

    pub fn len(&self) -> usize {
        self.scans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scans.is_empty()
    }
}

/// Removes its scan from the registry when dropped.
#[derive(Debug)]
pub struct Registration {
    scan_id: Uuid,
    scans: Arc<DashMap<Uuid, CancellationToken>>,
}

impl Registration {
    pub fn scan_id(&self) -> Uuid {
        self.scan_id
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.scans.remove(&self.scan_id);
        debug!(scan_id = %self.scan_id, "scan unregistered");
    }
}
