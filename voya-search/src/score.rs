use voya_catalog::MarketStats;
use voya_core::{LegSummary, ScoreBreakdown, TripCombination};
use voya_store::ScoringConfig;

/// Weighted multi-factor scoring over trip combinations.
///
/// All knobs come from the `ScoringConfig` value handed in at construction,
/// so tests can override weights without touching shared state.
///
/// The price factor divides by a market-derived reference maximum
/// (2 x max flight price + max hotel price x nights); the 1.2 aggregate
/// multiplier is the only post-weighting scaling applied.
pub struct TripScorer {
    config: ScoringConfig,
}

impl TripScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score every combination in place. Each breakdown is computed once;
    /// the ranking sort reads the stored values afterwards.
    pub fn score_all(&self, combinations: &mut [TripCombination], stats: &MarketStats) {
        for combo in combinations.iter_mut() {
            combo.score = self.score(combo, stats);
        }
    }

    pub fn score(&self, combo: &TripCombination, stats: &MarketStats) -> ScoreBreakdown {
        let flight = self.clamp(
            (self.leg_score(&combo.outbound) + self.leg_score(&combo.return_leg)) / 2.0,
        );
        let hotel = self.hotel_score(combo);
        let price = self.price_score(combo.total_cost, combo.nights, stats);
        let destination = self.clamp(stats.inbound_share(&combo.destination) * 100.0);

        let weighted = flight * self.config.flight_weight
            + price * self.config.price_weight
            + hotel * self.config.hotel_weight
            + destination * self.config.destination_weight;
        let final_score = round2(self.clamp(weighted * self.config.final_multiplier));

        ScoreBreakdown {
            flight,
            price,
            hotel,
            destination,
            final_score,
        }
    }

    /// Departure-window base score minus the per-stop penalty, floored at 0.
    fn leg_score(&self, leg: &LegSummary) -> f64 {
        use chrono::Timelike;
        let base = self.window_score(leg.departure_time.hour());
        (base - self.config.stop_penalty * leg.stop_count as f64).max(0.0)
    }

    fn window_score(&self, hour: u32) -> f64 {
        for window in &self.config.time_windows {
            if hour >= window.from_hour && hour < window.to_hour {
                return window.score;
            }
        }
        self.config.off_hours_score
    }

    fn hotel_score(&self, combo: &TripCombination) -> f64 {
        let raw = combo.hotel.stars as f64 * self.config.stars_multiplier
            + combo.hotel.rating * self.config.rating_multiplier
            + combo.hotel.amenity_count() as f64 * self.config.amenity_multiplier;
        self.clamp(raw)
    }

    fn price_score(&self, total_cost: f64, nights: u32, stats: &MarketStats) -> f64 {
        let reference_max =
            2.0 * stats.max_flight_price + stats.max_hotel_price * nights as f64;
        if reference_max <= 0.0 {
            return 0.0;
        }
        self.clamp(100.0 * (1.0 - total_cost / reference_max))
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(0.0, self.config.max_component_score)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
