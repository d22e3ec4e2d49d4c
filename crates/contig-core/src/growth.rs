//! Capacity growth policy.
//!
//! Growth is always geometric so that `push_back` stays amortized O(1):
//! over N insertions from empty the total number of relocated elements
//! is bounded by a constant multiple of N.

use crate::error::ConfigError;

/// How an array computes its next capacity when it runs out of room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Double the current capacity, starting from 1.
    #[default]
    Doubling,
    /// Multiply the current capacity by `numerator / denominator`,
    /// rounding up. The ratio must be at least 3/2.
    Factor {
        /// Factor numerator.
        numerator: u32,
        /// Factor denominator.
        denominator: u32,
    },
}

impl GrowthPolicy {
    /// The golden-ish 3/2 factor used by several C++ standard libraries.
    pub const ONE_AND_A_HALF: Self = Self::Factor {
        numerator: 3,
        denominator: 2,
    };

    /// Check that the policy is geometric with a ratio of at least 3/2.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Doubling => Ok(()),
            Self::Factor {
                numerator,
                denominator,
            } => {
                if denominator == 0 {
                    return Err(ConfigError::ZeroDenominator);
                }
                // num/den >= 3/2  <=>  2*num >= 3*den
                if 2 * u64::from(numerator) < 3 * u64::from(denominator) {
                    return Err(ConfigError::GrowthFactorTooSmall {
                        numerator,
                        denominator,
                    });
                }
                Ok(())
            }
        }
    }

    /// Capacity to grow to from `current` so that at least `required`
    /// elements fit.
    ///
    /// The result is always at least `required`, at least `current + 1`
    /// and at least 1. Saturates at `usize::MAX`; the caller's layout
    /// computation rejects sizes that cannot be allocated.
    pub fn next_capacity(&self, current: usize, required: usize) -> usize {
        let grown = match *self {
            Self::Doubling => current.saturating_mul(2),
            Self::Factor {
                numerator,
                denominator,
            } => {
                let den = u128::from(denominator.max(1));
                let scaled = (current as u128 * u128::from(numerator)).div_ceil(den);
                usize::try_from(scaled).unwrap_or(usize::MAX)
            }
        };
        grown
            .max(current.saturating_add(1))
            .max(required)
            .max(1)
    }
}
