use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use chrono::NaiveTime;
use voya_catalog::CatalogSnapshot;
use voya_core::{FlightOffer, LegSummary};

/// An acyclic chain of flight offers from one city to another.
///
/// Always holds at least one hop; a path is only materialized once the
/// traversal reaches its destination.
#[derive(Debug, Clone)]
pub struct RoutePath {
    hops: Vec<Arc<FlightOffer>>,
    total_cost: f64,
}

impl RoutePath {
    fn new(hops: Vec<Arc<FlightOffer>>) -> Self {
        let total_cost = hops.iter().map(|h| h.price).sum();
        Self { hops, total_cost }
    }

    pub fn hops(&self) -> &[Arc<FlightOffer>] {
        &self.hops
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Ordered cities along the path, starting city first.
    pub fn cities(&self) -> Vec<String> {
        let mut cities = vec![self.hops[0].origin.clone()];
        cities.extend(self.hops.iter().map(|h| h.destination.clone()));
        cities
    }

    /// Connections on this leg: intrinsic stops within each offer plus the
    /// connections introduced by chaining offers together.
    pub fn stop_count(&self) -> usize {
        let intrinsic: usize = self.hops.iter().map(|h| h.intrinsic_stops()).sum();
        intrinsic + self.hops.len().saturating_sub(1)
    }

    pub fn departure_time(&self) -> NaiveTime {
        self.hops[0].departure_time
    }

    pub fn summary(&self) -> LegSummary {
        LegSummary {
            cities: self.cities(),
            flight_ids: self.hops.iter().map(|h| h.id.clone()).collect(),
            hop_prices: self.hops.iter().map(|h| h.price).collect(),
            cost: self.total_cost,
            departure_time: self.departure_time(),
            stop_count: self.stop_count(),
        }
    }
}

/// Bounds applied to one leg's traversal.
#[derive(Debug, Clone, Copy)]
pub struct RouteLimits {
    pub budget: f64,
    pub max_hops: usize,
    pub max_routes: usize,
}

/// One step of the explicit depth-first traversal. `Unmark` is pushed
/// beneath a frame's children so the visited-set undo runs exactly when
/// that frame's subtree has been exhausted.
enum TraversalOp {
    Expand {
        city: String,
        cost: f64,
        path: Vec<Arc<FlightOffer>>,
    },
    Unmark {
        city: String,
    },
}

/// Enumerates simple paths between two cities under budget and hop limits.
pub struct RouteFinder<'a> {
    snapshot: &'a CatalogSnapshot,
    limits: RouteLimits,
}

impl<'a> RouteFinder<'a> {
    pub fn new(snapshot: &'a CatalogSnapshot, limits: RouteLimits) -> Self {
        Self { snapshot, limits }
    }

    /// Depth-first enumeration. Maximizes path diversity; emission order is
    /// discovery order, nothing more.
    pub fn depth_first(&self, origin: &str, destination: &str) -> Vec<RoutePath> {
        let mut routes = Vec::new();
        if self.limits.budget <= 0.0 || origin == destination {
            return routes;
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut stack = vec![TraversalOp::Expand {
            city: origin.to_string(),
            cost: 0.0,
            path: Vec::new(),
        }];

        while let Some(op) = stack.pop() {
            match op {
                TraversalOp::Unmark { city } => {
                    visited.remove(&city);
                }
                TraversalOp::Expand { city, cost, path } => {
                    if city == destination && !path.is_empty() {
                        routes.push(RoutePath::new(path));
                        if routes.len() >= self.limits.max_routes {
                            break;
                        }
                        continue;
                    }
                    if cost > self.limits.budget {
                        // Budget-exceeded terminal for this branch; not an error.
                        continue;
                    }
                    if path.len() >= self.limits.max_hops {
                        continue;
                    }

                    visited.insert(city.clone());
                    stack.push(TraversalOp::Unmark { city: city.clone() });

                    for offer in self.snapshot.flights_from(&city) {
                        if visited.contains(&offer.destination) {
                            continue;
                        }
                        let next_cost = cost + offer.price;
                        if next_cost > self.limits.budget {
                            continue;
                        }
                        let mut next_path = path.clone();
                        next_path.push(Arc::clone(offer));
                        stack.push(TraversalOp::Expand {
                            city: offer.destination.clone(),
                            cost: next_cost,
                            path: next_path,
                        });
                    }
                }
            }
        }

        routes
    }

    /// Breadth-first enumeration. Same admission rules as `depth_first`,
    /// but minimum-hop paths surface first; each partial path carries its
    /// own visited set so the two traversals emit the same path set.
    pub fn breadth_first(&self, origin: &str, destination: &str) -> Vec<RoutePath> {
        let mut routes = Vec::new();
        if self.limits.budget <= 0.0 || origin == destination {
            return routes;
        }

        struct Partial {
            city: String,
            cost: f64,
            hops: Vec<Arc<FlightOffer>>,
            visited: HashSet<String>,
        }

        let mut queue = VecDeque::new();
        queue.push_back(Partial {
            city: origin.to_string(),
            cost: 0.0,
            hops: Vec::new(),
            visited: HashSet::from([origin.to_string()]),
        });

        while let Some(partial) = queue.pop_front() {
            if partial.city == destination && !partial.hops.is_empty() {
                routes.push(RoutePath::new(partial.hops));
                if routes.len() >= self.limits.max_routes {
                    break;
                }
                continue;
            }
            if partial.hops.len() >= self.limits.max_hops {
                continue;
            }

            for offer in self.snapshot.flights_from(&partial.city) {
                if partial.visited.contains(&offer.destination) {
                    continue;
                }
                let next_cost = partial.cost + offer.price;
                if next_cost > self.limits.budget {
                    continue;
                }
                let mut visited = partial.visited.clone();
                visited.insert(offer.destination.clone());
                let mut hops = partial.hops.clone();
                hops.push(Arc::clone(offer));
                queue.push_back(Partial {
                    city: offer.destination.clone(),
                    cost: next_cost,
                    hops,
                    visited,
                });
            }
        }

        routes
    }
}
