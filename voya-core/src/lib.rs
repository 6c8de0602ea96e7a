pub mod models;
pub mod query;
pub mod trip;

pub use models::{FlightOffer, HotelOffer};
pub use query::{Fingerprint, QueryError, TripQuery};
pub use trip::{LegSummary, ScoreBreakdown, TripCombination};

/// Hard ceiling on the number of trips a single search may return.
pub const MAX_SEARCH_RESULTS: usize = 50;

pub const MIN_NIGHTS: u32 = 1;
pub const MAX_NIGHTS: u32 = 30;
