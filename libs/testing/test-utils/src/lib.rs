//! Shared test utilities for domain testing
//!
//! This crate provides reusable test infrastructure for the domain crates:
//! - `TestDataBuilder`: Deterministic test data generation
//! - `assertions`: Custom assertion helpers
//!
//! # Usage
//!
//! ```rust
//! use test_utils::TestDataBuilder;
//!
//! let builder = TestDataBuilder::from_test_name("create_and_fetch");
//!
//! let name = builder.name("item", "main");
//! let price = builder.price();
//! let date = builder.purchase_date();
//! assert!(price > 0);
//! assert_eq!(date.len(), 10);
//! # let _ = name;
//! ```

use chrono::{Days, NaiveDate};

const BRANDS: [&str; 6] = ["ROLEX", "HERMES", "CARTIER", "OMEGA", "CHANEL", "TIFFANY"];

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
    /// let builder = TestDataBuilder::from_test_name("test_create_item");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Generate a unique name for testing
    ///
    /// # Example
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(12345);
    /// assert_eq!(builder.name("item", "main"), "test-item-12345-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Brand picked from a fixed list
    pub fn brand(&self) -> String {
        BRANDS[(self.seed % BRANDS.len() as u64) as usize].to_string()
    }

    /// Positive price in the smallest currency unit
    pub fn price(&self) -> i64 {
        (self.seed % 9_000_000) as i64 + 1_000
    }

    /// `YYYY-MM-DD` date between 2020-01-01 and the end of 2023
    pub fn purchase_date(&self) -> String {
        let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
        base.checked_add_days(Days::new(self.seed % 1_460))
            .unwrap_or(base)
            .format("%Y-%m-%d")
            .to_string()
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::fmt::Debug;

    /// Assert that an optional value is Some
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }

    /// Assert that `earlier <= later` with a nice error message
    pub fn assert_not_before<T: PartialOrd + Debug>(later: T, earlier: T, context: &str) {
        assert!(
            later >= earlier,
            "{}: expected {:?} to not be before {:?}",
            context,
            later,
            earlier
        );
    }
}
