use std::sync::Arc;

use tracing::{debug, warn};
use voya_core::{Fingerprint, TripCombination};
use voya_store::ResultStore;

/// Memoizes full ranked result sets by query fingerprint.
///
/// Strictly best-effort: any store failure degrades to a miss on read and a
/// no-op on write, so a broken cache only costs the speed-up. Writes are
/// plain check-then-insert; two concurrent identical queries may both miss
/// and both recompute, which is tolerated rather than deduplicated.
pub struct ResultCache {
    store: Arc<dyn ResultStore>,
    ttl_seconds: u64,
}

impl ResultCache {
    pub fn new(store: Arc<dyn ResultStore>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    pub async fn get(&self, fingerprint: &Fingerprint) -> Option<Vec<TripCombination>> {
        match self.store.get(fingerprint.as_str()).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(trips) => {
                    debug!(key = %fingerprint, "cache hit");
                    Some(trips)
                }
                Err(err) => {
                    warn!(key = %fingerprint, %err, "discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(key = %fingerprint, %err, "cache unavailable, falling through to search");
                None
            }
        }
    }

    pub async fn put(&self, fingerprint: &Fingerprint, trips: &[TripCombination]) {
        let bytes = match serde_json::to_vec(trips) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(key = %fingerprint, %err, "could not encode search result for caching");
                return;
            }
        };
        if let Err(err) = self.store.put(fingerprint.as_str(), bytes, self.ttl_seconds).await {
            warn!(key = %fingerprint, %err, "cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use voya_core::{HotelOffer, LegSummary, TripQuery};
    use voya_store::{MemoryStore, StoreError};

    /// Store whose backend is always unreachable.
    struct FailingStore;

    #[async_trait::async_trait]
    impl ResultStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }

        async fn put(
            &self,
            _key: &str,
            _value: Vec<u8>,
            _ttl_seconds: u64,
        ) -> Result<(), StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
    }

    fn trips() -> Vec<TripCombination> {
        let leg = |cost: f64| LegSummary {
            cities: vec!["JFK".to_string(), "LAX".to_string()],
            flight_ids: vec!["F1".to_string()],
            hop_prices: vec![cost],
            cost,
            departure_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            stop_count: 0,
        };
        vec![TripCombination::new(
            "LAX",
            leg(409.0),
            leg(459.0),
            HotelOffer {
                id: "H1".to_string(),
                name: "Grand Plaza".to_string(),
                city_code: "LAX".to_string(),
                stars: 4,
                rating: 7.0,
                price_per_night: 150.0,
                amenities: vec!["wifi".to_string()],
            },
            5,
        )]
    }

    #[tokio::test]
    async fn test_round_trip_preserves_the_result_set() {
        let cache = ResultCache::new(Arc::new(MemoryStore::new(16)), 3600);
        let fingerprint = Fingerprint::of(&TripQuery::new("JFK", 5, 2000.0));

        assert!(cache.get(&fingerprint).await.is_none());

        let original = trips();
        cache.put(&fingerprint, &original).await;

        let cached = cache.get(&fingerprint).await.expect("expected a hit");
        assert_eq!(cached.len(), original.len());
        assert_eq!(cached[0].id, original[0].id);
        assert_eq!(cached[0].total_cost, original[0].total_cost);
    }

    #[tokio::test]
    async fn test_expired_entries_read_as_misses() {
        let cache = ResultCache::new(Arc::new(MemoryStore::new(16)), 1);
        let fingerprint = Fingerprint::of(&TripQuery::new("JFK", 5, 2000.0));

        cache.put(&fingerprint, &trips()).await;
        assert!(cache.get(&fingerprint).await.is_some());

        tokio::time::sleep(std::time::Duration::from_millis(1200)).await;
        assert!(cache.get(&fingerprint).await.is_none());
    }

    #[tokio::test]
    async fn test_store_failures_never_propagate() {
        let cache = ResultCache::new(Arc::new(FailingStore), 3600);
        let fingerprint = Fingerprint::of(&TripQuery::new("JFK", 5, 2000.0));

        // Both paths fail open: miss on read, silent drop on write.
        assert!(cache.get(&fingerprint).await.is_none());
        cache.put(&fingerprint, &trips()).await;
        assert!(cache.get(&fingerprint).await.is_none());
    }

    #[tokio::test]
    async fn test_garbage_payload_reads_as_miss() {
        let store: Arc<dyn ResultStore> = Arc::new(MemoryStore::new(16));
        let cache = ResultCache::new(Arc::clone(&store), 3600);
        let fingerprint = Fingerprint::of(&TripQuery::new("JFK", 5, 2000.0));

        store
            .put(fingerprint.as_str(), b"not json".to_vec(), 3600)
            .await
            .unwrap();
        assert!(cache.get(&fingerprint).await.is_none());
    }
}
