//! Seeded variable amounts
//!
//! A [`SeededVariableAmount<S>`] samples like a [`VariableAmount`] but is
//! additionally handed a seed/context object of type `S` at sampling time.
//! Ground cover uses this to let a layer's depth depend on the block being
//! laid. Today the only strategy is the wrapped one, which ignores the seed;
//! the closed strategy set leaves room for a seed-dependent strategy without
//! touching the sampling entry points.

use crate::amount::{AmountError, VariableAmount};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A random amount that may additionally vary with a seed object of type `S`
///
/// Equality and hashing are defined solely by the sampling strategy; the seed
/// type parameter does not participate.
pub struct SeededVariableAmount<S> {
    kind: Kind,
    _seed: PhantomData<fn(&S)>,
}

/// Closed set of sampling strategies
enum Kind {
    /// Delegates to a seed-independent inner amount; the seed is ignored
    Wrapped(VariableAmount),
}

impl<S> SeededVariableAmount<S> {
    fn from_kind(kind: Kind) -> Self {
        Self {
            kind,
            _seed: PhantomData,
        }
    }

    /// Wrap a seed-independent amount
    pub fn wrapping(inner: VariableAmount) -> Self {
        Self::from_kind(Kind::Wrapped(inner))
    }

    /// A fixed amount; sampling always returns `value` for every seed
    pub fn fixed(value: f64) -> Self {
        Self::wrapping(VariableAmount::fixed(value))
    }

    /// `base` plus or minus a random amount below `variance`
    pub fn base_with_variance(base: f64, variance: f64) -> Result<Self, AmountError> {
        Ok(Self::wrapping(VariableAmount::base_with_variance(
            base, variance,
        )?))
    }

    /// `base` plus a random amount below `addition`
    ///
    /// Wraps the addition primitive directly, so samples span exactly
    /// `[base, base + addition)`.
    pub fn base_with_random_addition(base: f64, addition: f64) -> Result<Self, AmountError> {
        Ok(Self::wrapping(VariableAmount::base_with_random_addition(
            base, addition,
        )?))
    }

    /// `base` with a `chance` to apply a random variance
    pub fn base_with_optional_variance(
        base: f64,
        variance: f64,
        chance: f64,
    ) -> Result<Self, AmountError> {
        Ok(Self::wrapping(VariableAmount::base_with_optional_variance(
            base, variance, chance,
        )?))
    }

    /// `base` with a `chance` to apply a random addition
    pub fn base_with_optional_addition(
        base: f64,
        addition: f64,
        chance: f64,
    ) -> Result<Self, AmountError> {
        Ok(Self::wrapping(VariableAmount::base_with_optional_addition(
            base, addition, chance,
        )?))
    }

    /// Draw one sample given the random source and the seed object
    pub fn get_amount<R: Rng + ?Sized>(&self, rng: &mut R, seed: &S) -> f64 {
        let _ = seed;
        match self.kind {
            Kind::Wrapped(inner) => inner.get_amount(rng),
        }
    }

    /// Draw one sample and floor it toward negative infinity
    pub fn get_floored_amount<R: Rng + ?Sized>(&self, rng: &mut R, seed: &S) -> i64 {
        self.get_amount(rng, seed).floor() as i64
    }

    /// The wrapped inner amount, if this is the wrapped strategy
    pub fn as_wrapped(&self) -> Option<&VariableAmount> {
        match &self.kind {
            Kind::Wrapped(inner) => Some(inner),
        }
    }
}

// Manual impls keep `S` free of Clone/Eq/Hash bounds; only the strategy counts.

impl<S> Clone for SeededVariableAmount<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SeededVariableAmount<S> {}

impl<S> fmt::Debug for SeededVariableAmount<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Wrapped(inner) => f.debug_tuple("Wrapped").field(inner).finish(),
        }
    }
}

impl<S> PartialEq for SeededVariableAmount<S> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (Kind::Wrapped(a), Kind::Wrapped(b)) => a == b,
        }
    }
}

impl<S> Hash for SeededVariableAmount<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.kind {
            Kind::Wrapped(inner) => {
                0u8.hash(state);
                inner.hash(state);
            }
        }
    }
}

impl Clone for Kind {
    fn clone(&self) -> Self {
        *self
    }
}

impl Copy for Kind {}

// Serialized as the wrapped inner amount; a seed-dependent strategy will need
// a tagged representation when it arrives.
impl<S> Serialize for SeededVariableAmount<S> {
    fn serialize<Se: Serializer>(&self, serializer: Se) -> Result<Se::Ok, Se::Error> {
        match &self.kind {
            Kind::Wrapped(inner) => inner.serialize(serializer),
        }
    }
}

impl<'de, S> Deserialize<'de> for SeededVariableAmount<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::wrapping(VariableAmount::deserialize(deserializer)?))
    }
}
