use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};
use voya_core::{FlightOffer, HotelOffer};

/// Market-wide statistics computed once when a snapshot is built. The
/// scorer reads these instead of re-scanning the catalog per search.
#[derive(Debug, Clone, Default)]
pub struct MarketStats {
    pub max_flight_price: f64,
    pub max_hotel_price: f64,
    pub total_flights: usize,
    pub destination_inbound: HashMap<String, usize>,
}

impl MarketStats {
    /// Fraction of all catalog flights that arrive at `city`, in [0, 1].
    pub fn inbound_share(&self, city: &str) -> f64 {
        if self.total_flights == 0 {
            return 0.0;
        }
        *self.destination_inbound.get(city).unwrap_or(&0) as f64 / self.total_flights as f64
    }
}

/// Immutable, indexed view over the flight and hotel offers.
///
/// Built once from raw records; concurrent searches share it through `Arc`
/// clones, so a refresh never mutates a snapshot in place.
pub struct CatalogSnapshot {
    flights_by_origin: HashMap<String, Vec<Arc<FlightOffer>>>,
    flights_by_route: HashMap<(String, String), Vec<Arc<FlightOffer>>>,
    hotels_by_city: HashMap<String, Vec<Arc<HotelOffer>>>,
    stats: MarketStats,
}

impl CatalogSnapshot {
    pub fn from_records(flights: Vec<FlightOffer>, hotels: Vec<HotelOffer>) -> Self {
        let mut flights_by_origin: HashMap<String, Vec<Arc<FlightOffer>>> = HashMap::new();
        let mut flights_by_route: HashMap<(String, String), Vec<Arc<FlightOffer>>> =
            HashMap::new();
        let mut stats = MarketStats::default();

        for flight in flights {
            if flight.price <= 0.0 || flight.origin.is_empty() || flight.destination.is_empty() {
                warn!(flight_id = %flight.id, "skipping malformed flight record");
                continue;
            }
            let flight = Arc::new(flight);
            stats.total_flights += 1;
            if flight.price > stats.max_flight_price {
                stats.max_flight_price = flight.price;
            }
            *stats
                .destination_inbound
                .entry(flight.destination.clone())
                .or_insert(0) += 1;

            flights_by_origin
                .entry(flight.origin.clone())
                .or_default()
                .push(Arc::clone(&flight));
            flights_by_route
                .entry((flight.origin.clone(), flight.destination.clone()))
                .or_default()
                .push(flight);
        }

        let mut hotels_by_city: HashMap<String, Vec<Arc<HotelOffer>>> = HashMap::new();
        for hotel in hotels {
            if hotel.price_per_night <= 0.0 || hotel.city_code.is_empty() {
                warn!(hotel_id = %hotel.id, "skipping malformed hotel record");
                continue;
            }
            if hotel.price_per_night > stats.max_hotel_price {
                stats.max_hotel_price = hotel.price_per_night;
            }
            hotels_by_city
                .entry(hotel.city_code.clone())
                .or_default()
                .push(Arc::new(hotel));
        }

        debug!(
            routes = flights_by_route.len(),
            cities = hotels_by_city.len(),
            flights = stats.total_flights,
            "catalog snapshot built"
        );

        Self {
            flights_by_origin,
            flights_by_route,
            hotels_by_city,
            stats,
        }
    }

    /// All offers departing from `origin`. Missing cities yield an empty
    /// slice, not an error.
    pub fn flights_from(&self, origin: &str) -> &[Arc<FlightOffer>] {
        self.flights_by_origin
            .get(origin)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn flights_on_route(&self, origin: &str, destination: &str) -> &[Arc<FlightOffer>] {
        self.flights_by_route
            .get(&(origin.to_string(), destination.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn hotels_in(&self, city: &str) -> &[Arc<HotelOffer>] {
        self.hotels_by_city
            .get(city)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Cities reachable by at least one offer from `origin`, sorted so
    /// search discovery order is deterministic.
    pub fn destinations_from(&self, origin: &str) -> Vec<String> {
        let mut destinations: Vec<String> = self
            .flights_from(origin)
            .iter()
            .map(|f| f.destination.clone())
            .collect();
        destinations.sort();
        destinations.dedup();
        destinations
    }

    /// Whether the city appears anywhere in the flight network.
    pub fn knows_city(&self, city: &str) -> bool {
        self.flights_by_origin.contains_key(city)
            || self.stats.destination_inbound.contains_key(city)
    }

    pub fn stats(&self) -> &MarketStats {
        &self.stats
    }
}
