use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use tokio::task;
use tracing::{debug, info, warn};
use voya_catalog::{CatalogHandle, CatalogSnapshot};
use voya_core::{Fingerprint, QueryError, TripCombination, TripQuery};
use voya_store::{AppConfig, ResultStore, SearchConfig};

use crate::cache::ResultCache;
use crate::combine::combine;
use crate::hotel::eligible_hotels;
use crate::route::{RouteFinder, RouteLimits, RoutePath};
use crate::score::TripScorer;
use crate::stats::SearchStats;

/// Coordinates one search end to end: cache lookup, route finding for both
/// legs, hotel filtering, combination, scoring, ranking, caching.
pub struct TripSearchEngine {
    catalog: Arc<CatalogHandle>,
    cache: ResultCache,
    scorer: TripScorer,
    config: SearchConfig,
    stats: Arc<SearchStats>,
}

impl TripSearchEngine {
    pub fn new(catalog: Arc<CatalogHandle>, store: Arc<dyn ResultStore>, config: AppConfig) -> Self {
        Self {
            catalog,
            cache: ResultCache::new(store, config.cache.default_ttl_seconds),
            scorer: TripScorer::new(config.scoring),
            config: config.search,
            stats: Arc::new(SearchStats::default()),
        }
    }

    pub fn stats(&self) -> Arc<SearchStats> {
        Arc::clone(&self.stats)
    }

    /// Run a search. An empty list means no trip fits the constraints;
    /// only a rejected query is an error.
    pub async fn search(&self, query: &TripQuery) -> Result<Vec<TripCombination>, QueryError> {
        let started = Instant::now();
        query.validate()?;

        let snapshot = self.catalog.snapshot();
        if !snapshot.knows_city(&query.origin) {
            return Err(QueryError::UnknownOrigin(query.origin.clone()));
        }

        let fingerprint = Fingerprint::of(query);
        if let Some(cached) = self.cache.get(&fingerprint).await {
            info!(origin = %query.origin, trips = cached.len(), "serving search from cache");
            self.record(query, &cached, started);
            return Ok(cached);
        }

        info!(
            origin = %query.origin,
            nights = query.nights,
            budget = query.budget,
            "starting search"
        );

        let limits = RouteLimits {
            budget: query.budget,
            max_hops: query.max_stops.unwrap_or(self.config.max_hops_per_leg),
            max_routes: self.config.max_routes_per_leg,
        };

        let mut combinations = Vec::new();
        for dest in snapshot.destinations_from(&query.origin) {
            let (outbound, return_paths) =
                self.find_legs(&snapshot, &query.origin, &dest, limits).await;
            if outbound.is_empty() || return_paths.is_empty() {
                debug!(%dest, "skipping destination without round-trip routes");
                continue;
            }

            let hotels = eligible_hotels(
                &snapshot,
                &dest,
                query.nights,
                query.budget,
                query.min_hotel_rating,
            );
            if hotels.is_empty() {
                debug!(%dest, "no eligible hotels");
                continue;
            }

            let combos = combine(
                &dest,
                &outbound,
                &return_paths,
                &hotels,
                query.nights,
                query.budget,
            );
            debug!(%dest, combinations = combos.len(), "destination evaluated");
            combinations.extend(combos);
        }

        self.scorer.score_all(&mut combinations, snapshot.stats());

        let mut ranked = rank(combinations);
        ranked.truncate(query.result_limit.min(self.config.max_results));

        self.cache.put(&fingerprint, &ranked).await;
        info!(origin = %query.origin, trips = ranked.len(), "search complete");
        self.record(query, &ranked, started);
        Ok(ranked)
    }

    /// Run the outbound and return leg searches as independent tasks over
    /// the shared snapshot, joining before combination.
    async fn find_legs(
        &self,
        snapshot: &Arc<CatalogSnapshot>,
        origin: &str,
        dest: &str,
        limits: RouteLimits,
    ) -> (Vec<RoutePath>, Vec<RoutePath>) {
        let out_task = {
            let snapshot = Arc::clone(snapshot);
            let origin = origin.to_string();
            let dest = dest.to_string();
            task::spawn_blocking(move || {
                RouteFinder::new(&snapshot, limits).depth_first(&origin, &dest)
            })
        };
        let ret_task = {
            let snapshot = Arc::clone(snapshot);
            let origin = origin.to_string();
            let dest = dest.to_string();
            task::spawn_blocking(move || {
                RouteFinder::new(&snapshot, limits).depth_first(&dest, &origin)
            })
        };

        match tokio::join!(out_task, ret_task) {
            (Ok(outbound), Ok(return_paths)) => (outbound, return_paths),
            _ => {
                warn!(origin, dest, "leg search task aborted");
                (Vec::new(), Vec::new())
            }
        }
    }

    fn record(&self, query: &TripQuery, trips: &[TripCombination], started: Instant) {
        let mut destinations: Vec<String> = Vec::new();
        for trip in trips {
            if !destinations.contains(&trip.destination) {
                destinations.push(trip.destination.clone());
            }
        }
        self.stats.record_search(
            &query.origin,
            &destinations,
            query.budget,
            !trips.is_empty(),
            started.elapsed().as_secs_f64() * 1000.0,
        );
    }
}

/// Deterministic ranking: score descending, then total cost ascending, then
/// discovery order.
fn rank(combinations: Vec<TripCombination>) -> Vec<TripCombination> {
    let mut indexed: Vec<(usize, TripCombination)> =
        combinations.into_iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| {
        b.score
            .final_score
            .partial_cmp(&a.score.final_score)
            .unwrap_or(Ordering::Equal)
            .then(
                a.total_cost
                    .partial_cmp(&b.total_cost)
                    .unwrap_or(Ordering::Equal),
            )
            .then(ia.cmp(ib))
    });
    indexed.into_iter().map(|(_, combo)| combo).collect()
}
