pub mod handle;
pub mod snapshot;

pub use handle::CatalogHandle;
pub use snapshot::{CatalogSnapshot, MarketStats};
