//! Shared test infrastructure for the products workspace.
//!
//! - `TestDatabase`: PostgreSQL container with the schema migrated (feature `postgres`)
//! - `TestDataBuilder`: deterministic names and prices derived from the test name
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!     let name = builder.product_name("monitor");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Deterministic test data, seeded from the test name.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Product name unique to this test, always within the 100 character limit.
    pub fn product_name(&self, label: &str) -> String {
        let mut name = format!("{} {}", label, self.seed % 1_000_000);
        name.truncate(100);
        name
    }

    /// Positive price with two decimals, between 1.00 and 1000.99.
    pub fn price(&self) -> f64 {
        (100 + self.seed % 100_000) as f64 / 100.0
    }
}
