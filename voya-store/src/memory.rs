use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

use crate::store::{ResultStore, StoreError};

struct MemoryEntry {
    value: Vec<u8>,
    deadline: Instant,
    seq: u64,
}

/// In-memory TTL store. Serves as the test double for the Redis store and
/// as the default when no external store is configured.
///
/// Entries are dropped lazily when their deadline passes, or eagerly
/// oldest-deadline-first once `max_entries` is exceeded.
pub struct MemoryStore {
    entries: DashMap<String, MemoryEntry>,
    deadlines: Mutex<BTreeMap<(Instant, u64), String>>,
    seq: AtomicU64,
    max_entries: usize,
}

impl MemoryStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            deadlines: Mutex::new(BTreeMap::new()),
            seq: AtomicU64::new(0),
            max_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sweep_expired(&self) {
        let now = Instant::now();
        let mut deadlines = self.deadlines.lock();
        while let Some((&(deadline, _), _)) = deadlines.first_key_value() {
            if deadline > now {
                break;
            }
            if let Some(((_, seq), key)) = deadlines.pop_first() {
                // An overwritten key leaves a stale index entry behind;
                // only remove the live entry it still describes.
                self.entries.remove_if(&key, |_, entry| entry.seq == seq);
            }
        }
    }

    fn evict_to_capacity(&self) {
        let mut deadlines = self.deadlines.lock();
        while self.entries.len() > self.max_entries {
            match deadlines.pop_first() {
                Some(((_, seq), key)) => {
                    self.entries.remove_if(&key, |_, entry| entry.seq == seq);
                }
                None => break,
            }
        }
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.sweep_expired();
        let now = Instant::now();
        let hit = self
            .entries
            .get(key)
            .and_then(|entry| (entry.deadline > now).then(|| entry.value.clone()));
        if hit.is_none() {
            self.entries.remove_if(key, |_, entry| entry.deadline <= now);
        }
        Ok(hit)
    }

    async fn put(&self, key: &str, value: Vec<u8>, ttl_seconds: u64) -> Result<(), StoreError> {
        self.sweep_expired();
        let deadline = Instant::now() + Duration::from_secs(ttl_seconds);
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(
            key.to_string(),
            MemoryEntry {
                value,
                deadline,
                seq,
            },
        );
        self.deadlines.lock().insert((deadline, seq), key.to_string());
        self.evict_to_capacity();
        Ok(())
    }
}
