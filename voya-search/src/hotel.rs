use std::sync::Arc;

use voya_catalog::CatalogSnapshot;
use voya_core::HotelOffer;

/// Hotels in `city` whose stay fits the budget and rating threshold.
///
/// Pure filter over the snapshot; an empty result simply means no eligible
/// hotel, which downstream turns into zero combinations for that city.
pub fn eligible_hotels(
    snapshot: &CatalogSnapshot,
    city: &str,
    nights: u32,
    budget: f64,
    min_rating: Option<f64>,
) -> Vec<Arc<HotelOffer>> {
    snapshot
        .hotels_in(city)
        .iter()
        .filter(|hotel| hotel.stay_cost(nights) <= budget)
        .filter(|hotel| min_rating.map_or(true, |threshold| hotel.rating >= threshold))
        .cloned()
        .collect()
}
