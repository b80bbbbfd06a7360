pub mod freshness;
pub mod store;

pub use freshness::{file_is_outdated, is_outdated, is_outdated_at};
pub use store::{CacheState, CacheStore};
