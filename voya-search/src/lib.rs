pub mod cache;
pub mod combine;
pub mod engine;
pub mod hotel;
pub mod route;
pub mod score;
pub mod stats;

pub use cache::ResultCache;
pub use combine::combine;
pub use engine::TripSearchEngine;
pub use hotel::eligible_hotels;
pub use route::{RouteFinder, RouteLimits, RoutePath};
pub use score::TripScorer;
pub use stats::{SearchStats, StatsReport};
