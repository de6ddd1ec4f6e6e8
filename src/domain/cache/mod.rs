//! Cache domain - keying and the result cache abstraction

mod key;
mod repository;

pub use key::{normalize, NormalizedKey};
pub use repository::{CacheStats, ResultCache};

#[cfg(test)]
pub use repository::mock::FailingCache;
