//! Unit newtypes for the quantities the screening engine speaks.
//!
//! The engine works with exactly two kinds of scalar: power magnitudes in
//! megawatts (ratings, flows, redispatch budgets) and loadings normalized by
//! a branch rating (per-unit). Wrapping them prevents accidentally feeding a
//! loading where a rating is expected at the public surface; the hot loops
//! below the surface unwrap to `f64`.
//!
//! All types are `#[repr(transparent)]` and serialize as bare numbers.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// Epsilon added to rating denominators so a zero rating yields a very
/// large but finite ratio instead of a division fault.
pub const RATING_EPS: f64 = 1e-20;

macro_rules! impl_unit {
    ($type:ty) => {
        impl $type {
            /// Wrap a raw value.
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Absolute value.
            #[inline]
            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }

            /// Minimum of two values.
            #[inline]
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }

            /// Maximum of two values.
            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }
        }

        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }
    };
}

/// Active power in megawatts (MW).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Megawatts(pub f64);

impl_unit!(Megawatts);

impl Megawatts {
    /// Normalize against a rating, guarding the zero-rating case.
    #[inline]
    pub fn per_unit_of(self, rating: Megawatts) -> PerUnit {
        PerUnit(self.0 / (rating.0 + RATING_EPS))
    }
}

/// Branch loading normalized by a rating (per-unit).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct PerUnit(pub f64);

impl_unit!(PerUnit);

impl PerUnit {
    /// One per-unit (flow exactly at rating).
    pub const ONE: Self = Self(1.0);

    /// Zero per-unit.
    pub const ZERO: Self = Self(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_unit_of_rating() {
        let loading = Megawatts(125.0).per_unit_of(Megawatts(100.0));
        assert!((loading.0 - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_zero_rating_is_finite() {
        let loading = Megawatts(50.0).per_unit_of(Megawatts(0.0));
        assert!(loading.0.is_finite());
        assert!(loading.0 > 1e12);
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Megawatts(140.0)).unwrap();
        assert_eq!(json, "140.0");
    }
}
