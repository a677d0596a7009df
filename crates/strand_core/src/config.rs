//! # Growth Configuration
//!
//! How a [`Vector`](crate::Vector) picks its next capacity when an append or
//! a growing resize runs out of room.
//!
//! Configs are plain data, deserialised once (usually from TOML) and then
//! copied into every vector built from them:
//!
//! ```toml
//! min_capacity = 8
//!
//! [growth]
//! kind = "factor"
//! numerator = 3
//! denominator = 2
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{VectorError, VectorResult};

/// Capacity growth policy applied when the buffer is full.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrowthPolicy {
    /// Grow to exactly the required capacity.
    ///
    /// Every append into a full buffer reallocates, so a run of appends is
    /// quadratic. Kept for comparison benchmarks.
    Exact,
    /// Double the current capacity, or jump straight to the requirement if
    /// doubling is not enough.
    #[default]
    Doubling,
    /// Multiply the current capacity by `numerator / denominator`.
    Factor {
        /// Growth factor numerator.
        numerator: u32,
        /// Growth factor denominator.
        denominator: u32,
    },
}

impl GrowthPolicy {
    /// The golden-ratio policy, approximated as 8/5.
    pub const GOLDEN: Self = Self::Factor {
        numerator: 8,
        denominator: 5,
    };

    /// Computes the capacity to grow to from `current` so that at least
    /// `required` slots are available.
    ///
    /// The result is never smaller than `required`.
    #[must_use]
    pub fn next_capacity(self, current: usize, required: usize) -> usize {
        let grown = match self {
            Self::Exact => required,
            Self::Doubling => current.saturating_mul(2),
            Self::Factor {
                numerator,
                denominator,
            } => {
                let scaled =
                    current as u128 * u128::from(numerator) / u128::from(denominator.max(1));
                usize::try_from(scaled).unwrap_or(usize::MAX)
            }
        };
        grown.max(required)
    }

    fn validate(self) -> VectorResult<()> {
        match self {
            Self::Factor {
                numerator,
                denominator,
            } if denominator == 0 || numerator <= denominator => {
                Err(VectorError::InvalidConfig(format!(
                    "growth factor {numerator}/{denominator} must be greater than one"
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Per-vector growth configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Smallest capacity chosen by policy-driven growth.
    ///
    /// Explicit [`reserve`](crate::Vector::reserve) calls are exact and
    /// ignore this floor.
    pub min_capacity: usize,
    /// Policy used when an append or growing resize needs more room.
    pub growth: GrowthPolicy,
}

impl VectorConfig {
    /// Default minimum capacity for policy-driven growth.
    pub const DEFAULT_MIN_CAPACITY: usize = 4;

    /// Grow-by-exactly-what-is-needed configuration with no capacity floor.
    #[must_use]
    pub const fn exact() -> Self {
        Self {
            min_capacity: 0,
            growth: GrowthPolicy::Exact,
        }
    }

    /// Parses and validates a configuration from TOML text.
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidConfig`] if the text is not valid TOML
    /// for this schema or the resulting values fail [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> VectorResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|err| VectorError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        tracing::debug!(
            growth = ?config.growth,
            min_capacity = config.min_capacity,
            "vector config loaded"
        );
        Ok(config)
    }

    /// Checks the configuration for values that would stall growth.
    ///
    /// # Errors
    ///
    /// Returns [`VectorError::InvalidConfig`] for a growth factor that is not
    /// strictly greater than one.
    pub fn validate(&self) -> VectorResult<()> {
        self.growth.validate()
    }

    /// Capacity to grow to from `current` so that `required` slots fit.
    #[must_use]
    pub fn next_capacity(&self, current: usize, required: usize) -> usize {
        self.growth
            .next_capacity(current, required)
            .max(self.min_capacity)
    }
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            min_capacity: Self::DEFAULT_MIN_CAPACITY,
            growth: GrowthPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubling_jumps_to_requirement() {
        let policy = GrowthPolicy::Doubling;
        assert_eq!(policy.next_capacity(8, 9), 16);
        assert_eq!(policy.next_capacity(8, 100), 100);
        assert_eq!(policy.next_capacity(0, 1), 1);
    }

    #[test]
    fn test_exact_grows_by_requirement_only() {
        assert_eq!(GrowthPolicy::Exact.next_capacity(8, 9), 9);
    }

    #[test]
    fn test_factor_always_makes_progress() {
        let policy = GrowthPolicy::GOLDEN;
        assert_eq!(policy.next_capacity(1, 2), 2);
        assert_eq!(policy.next_capacity(10, 11), 16);
        assert_eq!(policy.next_capacity(usize::MAX / 2, usize::MAX / 2 + 1), usize::MAX);
    }

    #[test]
    fn test_min_capacity_floor() {
        let config = VectorConfig::default();
        assert_eq!(config.next_capacity(0, 1), 4);
        assert_eq!(config.next_capacity(4, 5), 8);
        assert_eq!(VectorConfig::exact().next_capacity(0, 1), 1);
    }

    #[test]
    fn test_from_toml() {
        let config = VectorConfig::from_toml_str(
            r#"
            min_capacity = 8

            [growth]
            kind = "factor"
            numerator = 3
            denominator = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.min_capacity, 8);
        assert_eq!(
            config.growth,
            GrowthPolicy::Factor {
                numerator: 3,
                denominator: 2
            }
        );
    }

    #[test]
    fn test_from_toml_defaults() {
        let config = VectorConfig::from_toml_str("").unwrap();
        assert_eq!(config, VectorConfig::default());

        let config = VectorConfig::from_toml_str("growth = { kind = \"exact\" }").unwrap();
        assert_eq!(config.growth, GrowthPolicy::Exact);
        assert_eq!(config.min_capacity, VectorConfig::DEFAULT_MIN_CAPACITY);
    }

    #[test]
    fn test_rejects_stalling_factor() {
        let err = VectorConfig::from_toml_str(
            "growth = { kind = \"factor\", numerator = 2, denominator = 2 }",
        )
        .unwrap_err();
        assert!(matches!(err, VectorError::InvalidConfig(_)));

        let err = VectorConfig::from_toml_str("growth = { kind = \"tripling\" }").unwrap_err();
        assert!(matches!(err, VectorError::InvalidConfig(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = VectorConfig {
            growth: GrowthPolicy::GOLDEN,
            min_capacity: 16,
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(VectorConfig::from_toml_str(&text).unwrap(), config);
    }
}
