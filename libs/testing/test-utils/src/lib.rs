//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup
//! - `TestDataBuilder`: Deterministic test data generation
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!
//!     let db = mongo.lazy_database(&builder.database_name());
//!     let titulo = builder.titulo("Feira");
//! }
//! ```

mod mongo;

pub use mongo::TestMongo;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_event");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Database name unique to this seed, so tests sharing a container stay isolated.
    ///
    /// MongoDB caps database names at 64 bytes; this stays well under.
    pub fn database_name(&self) -> String {
        format!("test_{:016x}", self.seed)
    }

    /// An 8-digit registration number derived from the seed.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let n = TestDataBuilder::new(7).n_registro();
    /// assert_eq!(n.len(), 8);
    /// assert!(n.chars().all(|c| c.is_ascii_digit()));
    /// ```
    pub fn n_registro(&self) -> String {
        format!("{:08}", self.seed % 100_000_000)
    }

    /// A title that is unique per seed but keeps a readable prefix.
    pub fn titulo(&self, prefix: &str) -> String {
        format!("{} {}", prefix, self.seed % 10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.database_name(), builder2.database_name());
        assert_eq!(builder1.titulo("Feira"), builder2.titulo("Feira"));
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.database_name(), builder2.database_name());
    }

    #[test]
    fn test_n_registro_is_zero_padded() {
        assert_eq!(TestDataBuilder::new(42).n_registro(), "00000042");
        assert_eq!(TestDataBuilder::new(123_456_789).n_registro(), "23456789");
    }

    #[test]
    fn test_database_name_is_short() {
        let name = TestDataBuilder::new(u64::MAX).database_name();
        assert_eq!(name, "test_ffffffffffffffff");
        assert!(name.len() < 64);
    }
}
