use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde::Serialize;

#[derive(Debug, Default, Clone)]
struct RouteSample {
    searches: usize,
    total_duration_ms: f64,
    total_budget: f64,
}

/// Run-wide search counters, updated by the engine after every search.
#[derive(Debug, Default)]
pub struct SearchStats {
    total_searches: AtomicUsize,
    successful_searches: AtomicUsize,
    failed_searches: AtomicUsize,
    origins: Mutex<HashMap<String, usize>>,
    destinations: Mutex<HashMap<String, usize>>,
    routes: Mutex<HashMap<String, RouteSample>>,
}

impl SearchStats {
    /// Record one finished search. A search that produced no trips counts
    /// as failed, matching what the caller reports upstream.
    pub fn record_search(
        &self,
        origin: &str,
        destinations: &[String],
        budget: f64,
        success: bool,
        duration_ms: f64,
    ) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful_searches.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_searches.fetch_add(1, Ordering::Relaxed);
        }

        *self
            .origins
            .lock()
            .entry(origin.to_string())
            .or_insert(0) += 1;

        let mut dest_counts = self.destinations.lock();
        let mut routes = self.routes.lock();
        for dest in destinations {
            *dest_counts.entry(dest.clone()).or_insert(0) += 1;
            let sample = routes.entry(format!("{origin}-{dest}")).or_default();
            sample.searches += 1;
            sample.total_duration_ms += duration_ms;
            sample.total_budget += budget;
        }
    }

    pub fn report(&self) -> StatsReport {
        let total = self.total_searches.load(Ordering::Relaxed);
        let successful = self.successful_searches.load(Ordering::Relaxed);
        let failed = self.failed_searches.load(Ordering::Relaxed);

        let top = |counts: &HashMap<String, usize>, n: usize| -> Vec<(String, usize)> {
            let mut pairs: Vec<(String, usize)> =
                counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
            pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            pairs.truncate(n);
            pairs
        };

        let mut routes: Vec<RouteReport> = self
            .routes
            .lock()
            .iter()
            .map(|(route, sample)| RouteReport {
                route: route.clone(),
                searches: sample.searches,
                avg_time_ms: round2(sample.total_duration_ms / sample.searches as f64),
                avg_budget: round2(sample.total_budget / sample.searches as f64),
            })
            .collect();
        routes.sort_by(|a, b| b.searches.cmp(&a.searches).then_with(|| a.route.cmp(&b.route)));
        routes.truncate(10);

        StatsReport {
            total_searches: total,
            successful_searches: successful,
            failed_searches: failed,
            success_rate: if total > 0 {
                round2(successful as f64 / total as f64 * 100.0)
            } else {
                0.0
            },
            popular_origins: top(&self.origins.lock(), 5),
            popular_destinations: top(&self.destinations.lock(), 5),
            routes,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub route: String,
    pub searches: usize,
    pub avg_time_ms: f64,
    pub avg_budget: f64,
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub total_searches: usize,
    pub successful_searches: usize,
    pub failed_searches: usize,
    pub success_rate: f64,
    pub popular_origins: Vec<(String, usize)>,
    pub popular_destinations: Vec<(String, usize)>,
    pub routes: Vec<RouteReport>,
}
