//! Array configuration parameters.

use contig_core::{ConfigError, GrowthPolicy};

/// Configuration for a [`DynArray`](crate::DynArray).
///
/// Controls the growth policy and an optional capacity ceiling.
/// Validated at construction; immutable for the lifetime of the array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArrayConfig {
    /// How capacity grows when an insertion finds the buffer full.
    ///
    /// Default: [`GrowthPolicy::Doubling`].
    pub growth: GrowthPolicy,

    /// Upper bound on capacity, in elements.
    ///
    /// Default: `None` (bounded only by the allocator and `isize::MAX`
    /// bytes). When set, geometric growth is clamped to this value and
    /// any operation that needs more fails with
    /// [`ArrayError::CapacityExceeded`](contig_core::ArrayError::CapacityExceeded).
    pub max_capacity: Option<usize>,
}

impl ArrayConfig {
    /// Doubling growth with no ceiling.
    pub const fn new() -> Self {
        Self {
            growth: GrowthPolicy::Doubling,
            max_capacity: None,
        }
    }

    /// Replace the growth policy.
    #[must_use]
    pub const fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    /// Set a capacity ceiling, in elements.
    #[must_use]
    pub const fn with_max_capacity(mut self, max_capacity: usize) -> Self {
        self.max_capacity = Some(max_capacity);
        self
    }

    /// Check the growth policy and ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.growth.validate()?;
        if self.max_capacity == Some(0) {
            return Err(ConfigError::ZeroMaxCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded_doubling() {
        let config = ArrayConfig::default();
        assert_eq!(config.growth, GrowthPolicy::Doubling);
        assert_eq!(config.max_capacity, None);
        assert_eq!(config, ArrayConfig::new());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_setters() {
        let config = ArrayConfig::new()
            .with_growth(GrowthPolicy::ONE_AND_A_HALF)
            .with_max_capacity(64);
        assert_eq!(config.growth, GrowthPolicy::ONE_AND_A_HALF);
        assert_eq!(config.max_capacity, Some(64));
    }

    #[test]
    fn zero_ceiling_rejected() {
        let config = ArrayConfig::new().with_max_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxCapacity));
    }

    #[test]
    fn invalid_growth_rejected() {
        let config = ArrayConfig::new().with_growth(GrowthPolicy::Factor {
            numerator: 1,
            denominator: 1,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GrowthFactorTooSmall { .. })
        ));
    }
}
