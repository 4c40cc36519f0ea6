//! Variable random amounts
//!
//! A [`VariableAmount`] is an immutable sampling strategy producing `f64`
//! values from a random source. Populators use these for per-chunk counts,
//! heights and attempt budgets, so a single config value can mean "exactly 4",
//! "10 ± 3" or "2, plus up to 5 more one time in ten".
//!
//! Constructors validate their parameters eagerly and return a typed error,
//! so a misconfigured generator fails at build time instead of producing
//! nonsensical samples deep inside chunk generation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors raised when constructing an amount from invalid parameters
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum AmountError {
    #[error("variance must be finite and non-negative, got {0}")]
    InvalidVariance(f64),
    #[error("addition must be finite and non-negative, got {0}")]
    InvalidAddition(f64),
    #[error("chance must be within [0, 1], got {0}")]
    InvalidChance(f64),
}

/// A random amount sampling strategy
///
/// Construct through the named functions below; they validate parameters.
/// Values are plain data: cheap to copy, serializable, and safe to share
/// across threads (sampling only mutates the supplied random source).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum VariableAmount {
    /// Always the same value
    Fixed(f64),
    /// `base ± r` with `r` uniform in `[0, variance)`
    BaseWithVariance { base: f64, variance: f64 },
    /// `base + r` with `r` uniform in `[0, addition)`
    BaseWithRandomAddition { base: f64, addition: f64 },
    /// With probability `chance` behaves as `BaseWithVariance`, else `base`
    BaseWithOptionalVariance {
        base: f64,
        variance: f64,
        chance: f64,
    },
    /// With probability `chance` behaves as `BaseWithRandomAddition`, else `base`
    BaseWithOptionalAddition {
        base: f64,
        addition: f64,
        chance: f64,
    },
}

fn check_variance(variance: f64) -> Result<f64, AmountError> {
    if variance.is_finite() && variance >= 0.0 {
        Ok(variance)
    } else {
        Err(AmountError::InvalidVariance(variance))
    }
}

fn check_addition(addition: f64) -> Result<f64, AmountError> {
    if addition.is_finite() && addition >= 0.0 {
        Ok(addition)
    } else {
        Err(AmountError::InvalidAddition(addition))
    }
}

fn check_chance(chance: f64) -> Result<f64, AmountError> {
    if (0.0..=1.0).contains(&chance) {
        Ok(chance)
    } else {
        Err(AmountError::InvalidChance(chance))
    }
}

impl VariableAmount {
    /// A fixed amount; sampling always returns `value`
    pub fn fixed(value: f64) -> Self {
        Self::Fixed(value)
    }

    /// `base` plus or minus a random amount below `variance`
    pub fn base_with_variance(base: f64, variance: f64) -> Result<Self, AmountError> {
        Ok(Self::BaseWithVariance {
            base,
            variance: check_variance(variance)?,
        })
    }

    /// `base` plus a random amount below `addition`
    pub fn base_with_random_addition(base: f64, addition: f64) -> Result<Self, AmountError> {
        Ok(Self::BaseWithRandomAddition {
            base,
            addition: check_addition(addition)?,
        })
    }

    /// `base` with a `chance` to apply a random variance
    pub fn base_with_optional_variance(
        base: f64,
        variance: f64,
        chance: f64,
    ) -> Result<Self, AmountError> {
        Ok(Self::BaseWithOptionalVariance {
            base,
            variance: check_variance(variance)?,
            chance: check_chance(chance)?,
        })
    }

    /// `base` with a `chance` to apply a random addition
    pub fn base_with_optional_addition(
        base: f64,
        addition: f64,
        chance: f64,
    ) -> Result<Self, AmountError> {
        Ok(Self::BaseWithOptionalAddition {
            base,
            addition: check_addition(addition)?,
            chance: check_chance(chance)?,
        })
    }

    /// Draw one sample from this amount
    pub fn get_amount<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Fixed(value) => value,
            Self::BaseWithVariance { base, variance } => {
                base + variance * (rng.gen::<f64>() * 2.0 - 1.0)
            }
            Self::BaseWithRandomAddition { base, addition } => base + addition * rng.gen::<f64>(),
            Self::BaseWithOptionalVariance {
                base,
                variance,
                chance,
            } => {
                if rng.gen::<f64>() < chance {
                    base + variance * (rng.gen::<f64>() * 2.0 - 1.0)
                } else {
                    base
                }
            }
            Self::BaseWithOptionalAddition {
                base,
                addition,
                chance,
            } => {
                if rng.gen::<f64>() < chance {
                    base + addition * rng.gen::<f64>()
                } else {
                    base
                }
            }
        }
    }

    /// Draw one sample and floor it toward negative infinity
    ///
    /// Floor, not truncation: `fixed(-1.5)` floors to `-2`.
    pub fn get_floored_amount<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.get_amount(rng).floor() as i64
    }
}

// Hash must agree with PartialEq; f64 fields hash by bit pattern.
impl Hash for VariableAmount {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match *self {
            Self::Fixed(value) => value.to_bits().hash(state),
            Self::BaseWithVariance { base, variance } => {
                base.to_bits().hash(state);
                variance.to_bits().hash(state);
            }
            Self::BaseWithRandomAddition { base, addition } => {
                base.to_bits().hash(state);
                addition.to_bits().hash(state);
            }
            Self::BaseWithOptionalVariance {
                base,
                variance,
                chance,
            } => {
                base.to_bits().hash(state);
                variance.to_bits().hash(state);
                chance.to_bits().hash(state);
            }
            Self::BaseWithOptionalAddition {
                base,
                addition,
                chance,
            } => {
                base.to_bits().hash(state);
                addition.to_bits().hash(state);
                chance.to_bits().hash(state);
            }
        }
    }
}
