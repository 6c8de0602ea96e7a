use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{hhmm, HotelOffer};

/// Per-factor scores for one trip, each clamped to [0, 100].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub flight: f64,
    pub price: f64,
    pub hotel: f64,
    pub destination: f64,
    pub final_score: f64,
}

/// One directional journey: the cities and offers it chains together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegSummary {
    /// Ordered cities, starting city first.
    pub cities: Vec<String>,
    pub flight_ids: Vec<String>,
    pub hop_prices: Vec<f64>,
    pub cost: f64,
    #[serde(with = "hhmm")]
    pub departure_time: NaiveTime,
    /// Intrinsic stops summed over hops plus the chaining connections.
    pub stop_count: usize,
}

impl LegSummary {
    pub fn hop_count(&self) -> usize {
        self.flight_ids.len()
    }
}

/// A scored outbound + return + hotel package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripCombination {
    pub id: Uuid,
    pub destination: String,
    pub outbound: LegSummary,
    #[serde(rename = "return")]
    pub return_leg: LegSummary,
    pub hotel: HotelOffer,
    pub nights: u32,
    pub total_cost: f64,
    pub score: ScoreBreakdown,
}

impl TripCombination {
    pub fn new(
        destination: impl Into<String>,
        outbound: LegSummary,
        return_leg: LegSummary,
        hotel: HotelOffer,
        nights: u32,
    ) -> Self {
        let total_cost = outbound.cost + return_leg.cost + hotel.stay_cost(nights);
        Self {
            id: Uuid::new_v4(),
            destination: destination.into(),
            outbound,
            return_leg,
            hotel,
            nights,
            total_cost,
            score: ScoreBreakdown::default(),
        }
    }

    /// Canonical itinerary identity: the ordered cities of both legs plus
    /// the hotel. Two discoveries of the same itinerary collapse to one.
    pub fn canonical_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.outbound.cities.join("-"),
            self.return_leg.cities.join("-"),
            self.hotel.id,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(cities: &[&str], cost: f64) -> LegSummary {
        LegSummary {
            cities: cities.iter().map(|c| c.to_string()).collect(),
            flight_ids: vec!["F1".to_string()],
            hop_prices: vec![cost],
            cost,
            departure_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            stop_count: 0,
        }
    }

    fn hotel() -> HotelOffer {
        HotelOffer {
            id: "H1".to_string(),
            name: "Grand Plaza".to_string(),
            city_code: "LAX".to_string(),
            stars: 4,
            rating: 7.0,
            price_per_night: 150.0,
            amenities: vec!["wifi".into(), "pool".into(), "gym".into()],
        }
    }

    #[test]
    fn test_total_cost_includes_hotel_stay() {
        let combo = TripCombination::new(
            "LAX",
            leg(&["JFK", "LAX"], 409.0),
            leg(&["LAX", "JFK"], 459.0),
            hotel(),
            5,
        );
        assert_eq!(combo.total_cost, 409.0 + 459.0 + 750.0);
    }

    #[test]
    fn test_canonical_key_ignores_discovery_details() {
        let a = TripCombination::new(
            "LAX",
            leg(&["JFK", "LAX"], 409.0),
            leg(&["LAX", "JFK"], 459.0),
            hotel(),
            5,
        );
        let b = TripCombination::new(
            "LAX",
            leg(&["JFK", "LAX"], 409.0),
            leg(&["LAX", "JFK"], 459.0),
            hotel(),
            5,
        );
        assert_ne!(a.id, b.id);
        assert_eq!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    fn test_combination_serde_round_trip() {
        let combo = TripCombination::new(
            "LAX",
            leg(&["JFK", "LAX"], 409.0),
            leg(&["LAX", "JFK"], 459.0),
            hotel(),
            5,
        );
        let bytes = serde_json::to_vec(&combo).unwrap();
        let back: TripCombination = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back.id, combo.id);
        assert_eq!(back.total_cost, combo.total_cost);
        assert_eq!(back.return_leg.cities, combo.return_leg.cities);
    }
}
