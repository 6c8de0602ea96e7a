use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Serde helper for the "HH:MM" time format used by the flight feed.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// A single bookable flight between two cities.
///
/// An offer may already contain connections of its own (`stops`); chaining
/// several offers into a route adds further connections on top of those.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOffer {
    pub id: String,
    #[serde(rename = "from")]
    pub origin: String,
    #[serde(rename = "to")]
    pub destination: String,
    #[serde(with = "hhmm")]
    pub departure_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub arrival_time: NaiveTime,
    pub price: f64,
    #[serde(default)]
    pub stops: Vec<String>,
    #[serde(default)]
    pub airline_rating: f64,
    #[serde(default)]
    pub aircraft: String,
}

impl FlightOffer {
    /// Connections already baked into this single offer.
    pub fn intrinsic_stops(&self) -> usize {
        self.stops.len()
    }

    pub fn is_direct(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn departure_hour(&self) -> u32 {
        self.departure_time.hour()
    }
}

/// A hotel offer for a given city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelOffer {
    pub id: String,
    pub name: String,
    pub city_code: String,
    pub stars: u8,
    pub rating: f64,
    pub price_per_night: f64,
    pub amenities: Vec<String>,
}

impl HotelOffer {
    pub fn amenity_count(&self) -> usize {
        self.amenities.len()
    }

    /// Total hotel cost for a stay of the given length.
    pub fn stay_cost(&self, nights: u32) -> f64 {
        self.price_per_night * nights as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flight_offer_deserialization() {
        let json = r#"
            {
                "id": "F1",
                "from": "JFK",
                "to": "LAX",
                "departure_time": "08:00",
                "arrival_time": "11:30",
                "price": 409.0,
                "stops": []
            }
        "#;
        let flight: FlightOffer = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(flight.origin, "JFK");
        assert_eq!(flight.destination, "LAX");
        assert_eq!(flight.departure_hour(), 8);
        assert!(flight.is_direct());
    }

    #[test]
    fn test_flight_time_round_trip() {
        let json = r#"
            {
                "id": "F2",
                "from": "JFK",
                "to": "MIA",
                "departure_time": "16:45",
                "arrival_time": "19:20",
                "price": 250.0,
                "stops": ["ATL"]
            }
        "#;
        let flight: FlightOffer = serde_json::from_str(json).unwrap();
        assert_eq!(flight.intrinsic_stops(), 1);

        let out = serde_json::to_value(&flight).unwrap();
        assert_eq!(out["departure_time"], "16:45");
        assert_eq!(out["arrival_time"], "19:20");
    }

    #[test]
    fn test_hotel_stay_cost() {
        let hotel = HotelOffer {
            id: "H1".to_string(),
            name: "Grand Plaza".to_string(),
            city_code: "LAX".to_string(),
            stars: 4,
            rating: 7.0,
            price_per_night: 150.0,
            amenities: vec!["wifi".to_string(), "pool".to_string(), "gym".to_string()],
        };
        assert_eq!(hotel.stay_cost(5), 750.0);
        assert_eq!(hotel.amenity_count(), 3);
    }
}
