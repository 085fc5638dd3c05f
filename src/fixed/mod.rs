//! Fixed-point arithmetic (scale 16384 = 1.0)
//!
//! Every ratio, multiplier and sub-unit distance in the balance core is an
//! [`Fp`]. The raw value `v` represents `v / 16384`.
//!
//! Rules that keep two machines in lockstep:
//! - Products use a 128-bit intermediate, then rescale: `(a * b) / SCALE`
//! - Division truncates toward zero (Rust integer semantics)
//! - Results saturate to the `i64` range instead of wrapping
//! - Floats are only used to *construct* values, never in per-tick math

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::constants::{FP_SCALE, FP_SHIFT};

/// Scaled-integer number, `raw / 16384`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fp(i64);

const fn saturate(value: i128) -> i64 {
    if value > i64::MAX as i128 {
        i64::MAX
    } else if value < i64::MIN as i128 {
        i64::MIN
    } else {
        value as i64
    }
}

impl Fp {
    pub const ZERO: Fp = Fp(0);
    pub const ONE: Fp = Fp(FP_SCALE);
    pub const HALF: Fp = Fp(FP_SCALE / 2);
    pub const MAX: Fp = Fp(i64::MAX);
    pub const MIN: Fp = Fp(i64::MIN);

    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    pub const fn from_int(n: i64) -> Self {
        Self(saturate(n as i128 * FP_SCALE as i128))
    }

    /// `num / den` built with integer math only (truncating).
    ///
    /// A zero denominator saturates the same way [`Fp::div`] does.
    pub const fn from_ratio(num: i64, den: i64) -> Self {
        if den == 0 {
            return if num >= 0 { Self::MAX } else { Self::MIN };
        }
        Self(saturate((num as i128 * FP_SCALE as i128) / den as i128))
    }

    /// Construction from a float (authoring/config only, rounds to nearest).
    pub fn from_float(f: f64) -> Self {
        if f.is_nan() {
            return Self::ZERO;
        }
        let scaled = (f * FP_SCALE as f64).round();
        if scaled >= i64::MAX as f64 {
            Self::MAX
        } else if scaled <= i64::MIN as f64 {
            Self::MIN
        } else {
            Self(scaled as i64)
        }
    }

    /// `(a * b) / SCALE`, truncating toward zero
    pub const fn mul(self, rhs: Fp) -> Fp {
        Fp(saturate((self.0 as i128 * rhs.0 as i128) / FP_SCALE as i128))
    }

    /// `(a * SCALE) / b`. Division by zero saturates to `MAX` for a
    /// non-negative numerator and `MIN` otherwise.
    pub const fn div(self, rhs: Fp) -> Fp {
        if rhs.0 == 0 {
            return if self.0 >= 0 { Self::MAX } else { Self::MIN };
        }
        Fp(saturate(((self.0 as i128) << FP_SHIFT) / rhs.0 as i128))
    }

    pub const fn mul_int(self, n: i64) -> Fp {
        Fp(saturate(self.0 as i128 * n as i128))
    }

    pub const fn div_int(self, n: i64) -> Fp {
        if n == 0 {
            return if self.0 >= 0 { Self::MAX } else { Self::MIN };
        }
        Fp(saturate(self.0 as i128 / n as i128))
    }

    /// `self^exp` by repeated [`Fp::mul`], so truncation happens after
    /// every factor exactly like a chain of percentage bonuses.
    pub fn pow(self, exp: u32) -> Fp {
        if self == Self::ONE || exp == 0 {
            return Self::ONE;
        }
        let mut acc = Self::ONE;
        for _ in 0..exp {
            acc = acc.mul(self);
            // Fixed points of the iteration: nothing further can change
            if acc == Self::ZERO || acc == Self::MAX || acc == Self::MIN {
                break;
            }
        }
        acc
    }

    /// Square root by integer Newton iteration; non-positive input yields 0.
    pub fn sqrt(self) -> Fp {
        if self.0 <= 0 {
            return Self::ZERO;
        }
        // sqrt(v / S) * S == sqrt(v * S)
        let n = self.0 as i128 * FP_SCALE as i128;
        let mut x = n;
        let mut y = (x + 1) >> 1;
        while y < x {
            x = y;
            y = (x + n / x) >> 1;
        }
        Fp(saturate(x))
    }

    /// `floor(base * self)` for an integer base
    pub const fn apply_to(self, base: i64) -> i64 {
        Fp::from_int(base).mul(self).floor_to_int()
    }

    pub const fn floor_to_int(self) -> i64 {
        self.0.div_euclid(FP_SCALE)
    }

    /// Floor, with negative values clamped to zero
    pub const fn floor_to_u64(self) -> u64 {
        let floored = self.floor_to_int();
        if floored < 0 {
            0
        } else {
            floored as u64
        }
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn saturating_add(self, rhs: Fp) -> Fp {
        Fp(self.0.saturating_add(rhs.0))
    }

    pub const fn saturating_sub(self, rhs: Fp) -> Fp {
        Fp(self.0.saturating_sub(rhs.0))
    }

    /// Display/debug only; never feed the result back into game math.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FP_SCALE as f64
    }
}

impl Add for Fp {
    type Output = Fp;

    fn add(self, rhs: Fp) -> Fp {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Fp {
    fn add_assign(&mut self, rhs: Fp) {
        *self = *self + rhs;
    }
}

impl Sub for Fp {
    type Output = Fp;

    fn sub(self, rhs: Fp) -> Fp {
        self.saturating_sub(rhs)
    }
}

impl SubAssign for Fp {
    fn sub_assign(&mut self, rhs: Fp) {
        *self = *self - rhs;
    }
}

impl Neg for Fp {
    type Output = Fp;

    fn neg(self) -> Fp {
        Fp(self.0.saturating_neg())
    }
}

impl Sum for Fp {
    fn sum<I: Iterator<Item = Fp>>(iter: I) -> Fp {
        iter.fold(Fp::ZERO, |acc, v| acc + v)
    }
}

impl fmt::Display for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.to_f64())
    }
}
