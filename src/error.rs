//! Error types for the cachex library.
//!
//! - [`ConfigError`]: returned by fallible constructors and policy parsing
//!   when configuration parameters are invalid (zero capacity, unknown
//!   policy tag).
//! - [`InvariantError`]: returned by the debug-only `check_invariants`
//!   walk on [`Cache`](crate::Cache) when internal data-structure
//!   invariants are violated.
//!
//! Cache misses and at-capacity inserts are normal control flow and never
//! surface as errors.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`Cache::new`](crate::Cache::new) and by parsing a
/// [`Policy`](crate::Policy) from a string tag. Fatal to construction; a
/// cache is never created in a partially-configured state.
///
/// # Example
///
/// ```
/// use cachex::{Cache, ConfigError, Policy};
///
/// let err = Cache::<u64, u64>::new(0, Policy::Lru).unwrap_err();
/// assert_eq!(err, ConfigError::ZeroCapacity);
///
/// let err: ConfigError = "arc".parse::<Policy>().unwrap_err();
/// assert!(err.to_string().contains("arc"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Capacity must be at least 1. Eviction is defined as "remove one
    /// entry, then insert", which cannot hold for a zero-slot cache.
    ZeroCapacity,
    /// The requested policy tag is not one of `lru`, `mru`, `lfu`.
    UnsupportedPolicy(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => f.write_str("cache capacity must be greater than zero"),
            ConfigError::UnsupportedPolicy(tag) => {
                write!(f, "unsupported eviction policy: {tag:?}")
            },
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by the debug-only
/// [`Cache::check_invariants`](crate::Cache::check_invariants). Carries a
/// human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_display_names_the_bad_tag() {
        let err = ConfigError::UnsupportedPolicy("fifo".to_string());
        assert!(err.to_string().contains("fifo"));
    }

    #[test]
    fn config_zero_capacity_display() {
        let err = ConfigError::ZeroCapacity;
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn config_clone_and_eq() {
        let a = ConfigError::UnsupportedPolicy("x".to_string());
        let b = a.clone();
        assert_eq!(a, b);
        assert_ne!(a, ConfigError::ZeroCapacity);
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
    }

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("index/order length mismatch");
        assert_eq!(err.to_string(), "index/order length mismatch");
        assert_eq!(err.message(), "index/order length mismatch");
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }
}
