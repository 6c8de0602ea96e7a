pub mod app_config;
pub mod memory;
pub mod redis_store;
pub mod store;

pub use app_config::{AppConfig, CacheConfig, ScoringConfig, SearchConfig, TimeWindowScore};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use store::{ResultStore, StoreError};
