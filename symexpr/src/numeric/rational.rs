//! Exact fractions with an explicit sign.

use crate::error::{
    binary_error,
    kind::{DivisionByZero, IntegerOverflow, ZeroDenominator},
    Error,
};
use std::{cmp::Ordering, fmt::{self, Display, Formatter}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The sign of a [`Rational`]. Zero is always [`Sign::Positive`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// Returns the opposite sign.
    pub fn flip(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }

    /// The sign of the product of two values with signs `self` and `other`.
    pub fn product(self, other: Self) -> Self {
        if self == other {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// Euclid's algorithm.
fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// A reduced fraction `sign * numerator / denominator`.
///
/// Every constructor and arithmetic operation upholds two invariants:
///
/// - `gcd(numerator, denominator) == 1`
/// - `denominator > 0`
///
/// and zero is always represented as `+0/1`, so derived equality is value equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(u64, u64, Sign)", into = "(u64, u64, Sign)"))]
pub struct Rational {
    numerator: u64,
    denominator: u64,
    sign: Sign,
}

impl Rational {
    /// Creates a new rational from its magnitude and sign, reducing it to lowest terms.
    ///
    /// Returns an error if the denominator is zero.
    pub fn new(numerator: u64, denominator: u64, sign: Sign) -> Result<Self, Error> {
        if denominator == 0 {
            let prefix = if sign == Sign::Negative { "-" } else { "" };
            let src = format!("{}{}/{}", prefix, numerator, denominator);
            let start = src.len() - 1;
            return Err(Error::new(src.clone(), vec![start..src.len()], ZeroDenominator));
        }

        let g = gcd(numerator as u128, denominator as u128) as u64;
        Ok(Self::normalized(numerator / g, denominator / g, sign))
    }

    /// Creates a new rational from a signed numerator and denominator. The sign of the result is
    /// the sign of the quotient.
    pub fn from_signed(numerator: i64, denominator: i64) -> Result<Self, Error> {
        let sign = if (numerator < 0) != (denominator < 0) {
            Sign::Negative
        } else {
            Sign::Positive
        };
        Self::new(numerator.unsigned_abs(), denominator.unsigned_abs(), sign)
    }

    /// Builds a rational from parts that are already reduced, fixing the sign of zero.
    fn normalized(numerator: u64, denominator: u64, sign: Sign) -> Self {
        if numerator == 0 {
            Self { numerator: 0, denominator: 1, sign: Sign::Positive }
        } else {
            Self { numerator, denominator, sign }
        }
    }

    /// Reduces a fraction computed in 128 bits and narrows it back into 64 bits.
    fn reduce_wide(numerator: u128, denominator: u128, sign: Sign) -> Option<Self> {
        let g = gcd(numerator, denominator);
        let numerator = u64::try_from(numerator / g).ok()?;
        let denominator = u64::try_from(denominator / g).ok()?;
        Some(Self::normalized(numerator, denominator, sign))
    }

    /// The magnitude of the numerator.
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    /// The denominator, always greater than zero.
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// The sign of the value.
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Returns true if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Returns true if the value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Negative
    }

    /// Returns true if the denominator is one.
    pub fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    /// The signed numerator, if it fits in an [`i64`].
    pub fn signed_numerator(&self) -> Option<i64> {
        match self.sign {
            Sign::Positive => i64::try_from(self.numerator).ok(),
            Sign::Negative => 0i64.checked_sub_unsigned(self.numerator),
        }
    }

    /// Converts to the nearest [`f64`].
    pub fn to_f64(&self) -> f64 {
        let magnitude = self.numerator as f64 / self.denominator as f64;
        match self.sign {
            Sign::Positive => magnitude,
            Sign::Negative => -magnitude,
        }
    }

    /// Returns the additive inverse.
    pub fn neg(&self) -> Self {
        Self::normalized(self.numerator, self.denominator, self.sign.flip())
    }

    /// Returns the multiplicative inverse, or an error if the value is zero.
    pub fn recip(&self) -> Result<Self, Error> {
        Self::new(self.denominator, self.numerator, self.sign)
    }

    /// Adds two rationals by cross-multiplying their denominators.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, Error> {
        let lhs_part = self.numerator as u128 * rhs.denominator as u128;
        let rhs_part = rhs.numerator as u128 * self.denominator as u128;
        let denominator = self.denominator as u128 * rhs.denominator as u128;

        let (numerator, sign) = if self.sign == rhs.sign {
            match lhs_part.checked_add(rhs_part) {
                Some(sum) => (sum, self.sign),
                None => return Err(binary_error(self, "+", rhs, IntegerOverflow { op: "+" })),
            }
        } else if lhs_part >= rhs_part {
            (lhs_part - rhs_part, self.sign)
        } else {
            (rhs_part - lhs_part, rhs.sign)
        };

        Self::reduce_wide(numerator, denominator, sign)
            .ok_or_else(|| binary_error(self, "+", rhs, IntegerOverflow { op: "+" }))
    }

    /// Subtracts `rhs` from `self`.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, Error> {
        self.checked_add(&rhs.neg())
            .map_err(|_| binary_error(self, "-", rhs, IntegerOverflow { op: "-" }))
    }

    /// Multiplies numerators and denominators, then reduces.
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, Error> {
        let numerator = self.numerator as u128 * rhs.numerator as u128;
        let denominator = self.denominator as u128 * rhs.denominator as u128;
        Self::reduce_wide(numerator, denominator, self.sign.product(rhs.sign))
            .ok_or_else(|| binary_error(self, "*", rhs, IntegerOverflow { op: "*" }))
    }

    /// Multiplies `self` by the inverse of `rhs`.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, Error> {
        if rhs.is_zero() {
            return Err(binary_error(self, "/", rhs, DivisionByZero));
        }

        let numerator = self.numerator as u128 * rhs.denominator as u128;
        let denominator = self.denominator as u128 * rhs.numerator as u128;
        Self::reduce_wide(numerator, denominator, self.sign.product(rhs.sign))
            .ok_or_else(|| binary_error(self, "/", rhs, IntegerOverflow { op: "/" }))
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        let sign = if n < 0 { Sign::Negative } else { Sign::Positive };
        Self::normalized(n.unsigned_abs(), 1, sign)
    }
}

impl TryFrom<(u64, u64, Sign)> for Rational {
    type Error = Error;

    fn try_from((numerator, denominator, sign): (u64, u64, Sign)) -> Result<Self, Self::Error> {
        Self::new(numerator, denominator, sign)
    }
}

impl From<Rational> for (u64, u64, Sign) {
    fn from(r: Rational) -> Self {
        (r.numerator, r.denominator, r.sign)
    }
}

/// Compares against a raw integer without building a [`Rational`] for it.
impl PartialEq<i64> for Rational {
    fn eq(&self, other: &i64) -> bool {
        if self.denominator != 1 {
            return false;
        }

        let other_sign = if *other < 0 { Sign::Negative } else { Sign::Positive };
        self.numerator == other.unsigned_abs() && (self.numerator == 0 || self.sign == other_sign)
    }
}

impl PartialEq<Rational> for i64 {
    fn eq(&self, other: &Rational) -> bool {
        other == self
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.sign, other.sign) {
            (Sign::Positive, Sign::Negative) => Ordering::Greater,
            (Sign::Negative, Sign::Positive) => Ordering::Less,
            (sign, _) => {
                let lhs = self.numerator as u128 * other.denominator as u128;
                let rhs = other.numerator as u128 * self.denominator as u128;
                match sign {
                    Sign::Positive => lhs.cmp(&rhs),
                    Sign::Negative => rhs.cmp(&lhs),
                }
            },
        }
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        write!(f, "{}", self.numerator)?;
        if self.denominator > 1 {
            write!(f, "/{}", self.denominator)?;
        }
        Ok(())
    }
}
