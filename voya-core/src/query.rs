use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{MAX_NIGHTS, MAX_SEARCH_RESULTS, MIN_NIGHTS};

/// A validated trip search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripQuery {
    pub origin: String,
    pub nights: u32,
    pub budget: f64,
    pub result_limit: usize,
    pub min_hotel_rating: Option<f64>,
    pub max_stops: Option<usize>,
}

impl TripQuery {
    pub fn new(origin: impl Into<String>, nights: u32, budget: f64) -> Self {
        Self {
            origin: origin.into().to_ascii_uppercase(),
            nights,
            budget,
            result_limit: MAX_SEARCH_RESULTS,
            min_hotel_rating: None,
            max_stops: None,
        }
    }

    pub fn with_min_hotel_rating(mut self, rating: f64) -> Self {
        self.min_hotel_rating = Some(rating);
        self
    }

    pub fn with_max_stops(mut self, stops: usize) -> Self {
        self.max_stops = Some(stops);
        self
    }

    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit.min(MAX_SEARCH_RESULTS);
        self
    }

    /// Check the request bounds. Origin existence is checked against the
    /// catalog by the engine, not here.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.budget <= 0.0 {
            return Err(QueryError::BudgetNotPositive(self.budget));
        }
        if self.nights < MIN_NIGHTS || self.nights > MAX_NIGHTS {
            return Err(QueryError::NightsOutOfRange {
                nights: self.nights,
                min: MIN_NIGHTS,
                max: MAX_NIGHTS,
            });
        }
        Ok(())
    }
}

/// Rejected-request conditions. Everything else a search can run into
/// degrades to an empty result list instead of an error.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("budget must be positive, got {0}")]
    BudgetNotPositive(f64),

    #[error("nights must be within {min}..={max}, got {nights}")]
    NightsOutOfRange { nights: u32, min: u32, max: u32 },

    #[error("origin {0} is not present in the catalog")]
    UnknownOrigin(String),
}

/// Deterministic cache key for a query.
///
/// Fields are emitted in a fixed order with normalized formatting, so two
/// equal queries produce byte-equal keys no matter how the caller assembled
/// its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(query: &TripQuery) -> Self {
        let rating = query
            .min_hotel_rating
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "-".to_string());
        let stops = query
            .max_stops
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        Fingerprint(format!(
            "search:v1:{}:n{}:b{:.2}:l{}:r{}:s{}",
            query.origin.to_ascii_uppercase(),
            query.nights,
            query.budget,
            query.result_limit,
            rating,
            stops,
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
