use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::snapshot::CatalogSnapshot;

/// Shared handle to the current catalog snapshot.
///
/// A refresh swaps the whole `Arc` under the lock; searches that already
/// hold a snapshot keep reading the one they started with.
pub struct CatalogHandle {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl CatalogHandle {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Atomically replace the snapshot.
    pub fn replace(&self, snapshot: CatalogSnapshot) {
        let snapshot = Arc::new(snapshot);
        info!(
            flights = snapshot.stats().total_flights,
            "replacing catalog snapshot"
        );
        *self.current.write() = snapshot;
    }
}
