use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub redis_url: String,
    pub default_ttl_seconds: u64,
    /// Capacity of the in-memory store when Redis is not configured.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379/0".to_string(),
            default_ttl_seconds: 3600,
            max_entries: 1024,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub max_results: usize,
    pub max_hops_per_leg: usize,
    pub max_routes_per_leg: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 50,
            max_hops_per_leg: 3,
            max_routes_per_leg: 64,
        }
    }
}

/// One departure-hour window and the base score it grants. Windows are
/// evaluated in order; the first match wins.
#[derive(Debug, Deserialize, Clone)]
pub struct TimeWindowScore {
    pub from_hour: u32,
    pub to_hour: u32,
    pub score: f64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScoringConfig {
    pub flight_weight: f64,
    pub price_weight: f64,
    pub hotel_weight: f64,
    pub destination_weight: f64,
    pub stop_penalty: f64,
    pub final_multiplier: f64,
    pub stars_multiplier: f64,
    pub rating_multiplier: f64,
    pub amenity_multiplier: f64,
    pub max_component_score: f64,
    pub time_windows: Vec<TimeWindowScore>,
    pub off_hours_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            flight_weight: 0.40,
            price_weight: 0.35,
            hotel_weight: 0.20,
            destination_weight: 0.05,
            stop_penalty: 40.0,
            final_multiplier: 1.2,
            stars_multiplier: 18.0,
            rating_multiplier: 10.0,
            amenity_multiplier: 7.0,
            max_component_score: 100.0,
            time_windows: vec![
                TimeWindowScore { from_hour: 8, to_hour: 11, score: 100.0 },
                TimeWindowScore { from_hour: 11, to_hour: 16, score: 80.0 },
                TimeWindowScore { from_hour: 6, to_hour: 8, score: 60.0 },
                TimeWindowScore { from_hour: 16, to_hour: 21, score: 50.0 },
            ],
            off_hours_score: 20.0,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `VOYA__CACHE__DEFAULT_TTL_SECONDS=600`
            .add_source(config::Environment::with_prefix("VOYA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
