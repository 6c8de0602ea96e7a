use std::collections::HashSet;
use std::sync::Arc;

use voya_core::{HotelOffer, TripCombination};

use crate::route::RoutePath;

/// Cross outbound and return paths with eligible hotels, keeping only
/// combinations whose total cost fits the budget.
///
/// Two discoveries of the same itinerary (same cities on both legs, same
/// hotel) collapse to one entry; survivors keep discovery order so the
/// final ranking can break ties deterministically.
pub fn combine(
    destination: &str,
    outbound: &[RoutePath],
    return_paths: &[RoutePath],
    hotels: &[Arc<HotelOffer>],
    nights: u32,
    budget: f64,
) -> Vec<TripCombination> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut combinations = Vec::new();

    for hotel in hotels {
        let stay_cost = hotel.stay_cost(nights);
        if stay_cost > budget {
            continue;
        }
        for out in outbound {
            if out.total_cost() + stay_cost > budget {
                continue;
            }
            for ret in return_paths {
                let total = out.total_cost() + ret.total_cost() + stay_cost;
                if total > budget {
                    continue;
                }

                let combo = TripCombination::new(
                    destination,
                    out.summary(),
                    ret.summary(),
                    hotel.as_ref().clone(),
                    nights,
                );
                if seen.insert(combo.canonical_key()) {
                    combinations.push(combo);
                }
            }
        }
    }

    combinations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{RouteFinder, RouteLimits};
    use chrono::NaiveTime;
    use voya_catalog::CatalogSnapshot;
    use voya_core::FlightOffer;

    fn flight(id: &str, origin: &str, dest: &str, price: f64) -> FlightOffer {
        FlightOffer {
            id: id.to_string(),
            origin: origin.to_string(),
            destination: dest.to_string(),
            departure_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            price,
            stops: Vec::new(),
            airline_rating: 0.0,
            aircraft: String::new(),
        }
    }

    fn hotel(id: &str, nightly: f64) -> Arc<HotelOffer> {
        Arc::new(HotelOffer {
            id: id.to_string(),
            name: format!("Hotel {id}"),
            city_code: "LAX".to_string(),
            stars: 4,
            rating: 7.0,
            price_per_night: nightly,
            amenities: vec!["wifi".to_string()],
        })
    }

    fn legs(budget: f64) -> (Vec<RoutePath>, Vec<RoutePath>) {
        // Direct JFK -> LAX plus a pricier routing through DEN.
        let snapshot = CatalogSnapshot::from_records(
            vec![
                flight("F1", "JFK", "LAX", 409.0),
                flight("F2", "JFK", "DEN", 200.0),
                flight("F3", "DEN", "LAX", 400.0),
                flight("F4", "LAX", "JFK", 459.0),
            ],
            Vec::new(),
        );
        let limits = RouteLimits {
            budget,
            max_hops: 3,
            max_routes: 64,
        };
        let finder = RouteFinder::new(&snapshot, limits);
        (
            finder.depth_first("JFK", "LAX"),
            finder.depth_first("LAX", "JFK"),
        )
    }

    #[test]
    fn test_never_exceeds_budget() {
        let budget = 2000.0;
        let (outbound, return_paths) = legs(budget);
        let hotels = vec![hotel("H1", 150.0), hotel("H2", 280.0)];

        let combos = combine("LAX", &outbound, &return_paths, &hotels, 5, budget);
        assert!(!combos.is_empty());
        for combo in &combos {
            assert!(combo.total_cost <= budget, "{} over budget", combo.total_cost);
        }
        // DEN routing (600) + 459 + 1400 for H2 = 2459 > 2000 must be absent.
        assert!(!combos
            .iter()
            .any(|c| c.hotel.id == "H2" && c.outbound.hop_count() == 2));
    }

    #[test]
    fn test_accepts_the_documented_scenario() {
        // 409 + 459 + 5 * 150 = 1618 <= 2000.
        let (outbound, return_paths) = legs(2000.0);
        let hotels = vec![hotel("H1", 150.0)];
        let combos = combine("LAX", &outbound, &return_paths, &hotels, 5, 2000.0);
        assert!(combos
            .iter()
            .any(|c| (c.total_cost - 1618.0).abs() < 1e-9));
    }

    #[test]
    fn test_deduplicates_equivalent_itineraries() {
        let (outbound, return_paths) = legs(2000.0);
        let hotels = vec![hotel("H1", 150.0)];

        // Feed the outbound set twice: the duplicate discoveries must
        // collapse onto the same canonical itineraries.
        let mut doubled = outbound.clone();
        doubled.extend(outbound.iter().cloned());
        let combos = combine("LAX", &doubled, &return_paths, &hotels, 5, 2000.0);
        let baseline = combine("LAX", &outbound, &return_paths, &hotels, 5, 2000.0);
        assert_eq!(combos.len(), baseline.len());
    }

    #[test]
    fn test_is_idempotent() {
        let (outbound, return_paths) = legs(2000.0);
        let hotels = vec![hotel("H1", 150.0), hotel("H2", 90.0)];

        let first = combine("LAX", &outbound, &return_paths, &hotels, 5, 2000.0);
        let second = combine("LAX", &outbound, &return_paths, &hotels, 5, 2000.0);

        let keys = |combos: &[TripCombination]| -> Vec<String> {
            combos.iter().map(|c| c.canonical_key()).collect()
        };
        assert_eq!(keys(&first), keys(&second));
    }

    #[test]
    fn test_no_hotels_means_no_combinations() {
        let (outbound, return_paths) = legs(2000.0);
        let combos = combine("LAX", &outbound, &return_paths, &[], 5, 2000.0);
        assert!(combos.is_empty());
    }
}
