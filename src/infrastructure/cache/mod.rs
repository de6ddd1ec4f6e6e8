//! Cache infrastructure - Result cache implementations

mod factory;
mod in_memory;

pub use factory::CacheFactory;
pub use in_memory::{InMemoryCacheConfig, InMemoryResultCache};
