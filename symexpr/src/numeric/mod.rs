//! The numeric tower: exact integers, exact rationals, and floating-point reals.
//!
//! Binary arithmetic between two [`Number`]s promotes both operands to the wider of their two
//! representations (`Integer < Rational < Real`) and computes the result there. Results are never
//! narrowed implicitly; [`Number::normalize`] does that explicitly for rationals with a
//! denominator of one.

pub mod rational;

pub use rational::{Rational, Sign};

use crate::error::{
    binary_error,
    kind::{DivisionByZero, IntegerOverflow, VariantMismatch},
    value_error,
    Error,
};
use std::{cmp::Ordering, fmt::{self, Display, Formatter}};
use tracing::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The representation a [`Number`] is stored in, ordered from narrowest to widest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumberTag {
    Integer,
    Rational,
    Real,
}

impl Display for NumberTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "an integer"),
            Self::Rational => write!(f, "a rational"),
            Self::Real => write!(f, "a real"),
        }
    }
}

/// A type that a [`Number`] can be read as with [`Number::get`].
pub trait Representation: Sized {
    /// The tag of the representation.
    const TAG: NumberTag;

    /// Reads the number as this representation, returning [`None`] if the number's representation
    /// is wider than this one.
    fn from_number(number: &Number) -> Option<Self>;
}

impl Representation for i64 {
    const TAG: NumberTag = NumberTag::Integer;

    fn from_number(number: &Number) -> Option<Self> {
        match number {
            Number::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl Representation for Rational {
    const TAG: NumberTag = NumberTag::Rational;

    fn from_number(number: &Number) -> Option<Self> {
        match number {
            Number::Integer(n) => Some(Rational::from(*n)),
            Number::Rational(r) => Some(*r),
            Number::Real(_) => None,
        }
    }
}

impl Representation for f64 {
    const TAG: NumberTag = NumberTag::Real;

    fn from_number(number: &Number) -> Option<Self> {
        Some(number.to_f64())
    }
}

/// A numeric value in one of the three representations of the tower.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Number {
    /// A signed 64-bit integer.
    Integer(i64),

    /// An exact fraction.
    Rational(Rational),

    /// A double-precision floating-point number.
    Real(f64),
}

/// The four arithmetic operations of the tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arith {
    Add,
    Sub,
    Mul,
    Div,
}

impl Arith {
    fn token(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl Number {
    /// The integer zero.
    pub fn zero() -> Self {
        Self::Integer(0)
    }

    /// The integer one.
    pub fn one() -> Self {
        Self::Integer(1)
    }

    /// Returns the representation the number is stored in.
    pub fn tag(&self) -> NumberTag {
        match self {
            Self::Integer(_) => NumberTag::Integer,
            Self::Rational(_) => NumberTag::Rational,
            Self::Real(_) => NumberTag::Real,
        }
    }

    /// Reads the number as the representation `T`.
    ///
    /// Fails with a conversion error if `T` is narrower than the number's own representation.
    ///
    /// ```
    /// use symexpr::numeric::{Number, Rational};
    ///
    /// let n = Number::Integer(3);
    /// assert_eq!(n.get::<Rational>()?, Rational::from(3i64));
    /// assert_eq!(n.get::<f64>()?, 3.0);
    /// assert!(Number::Real(0.5).get::<i64>().is_err());
    /// # Ok::<(), symexpr::Error>(())
    /// ```
    pub fn get<T: Representation>(&self) -> Result<T, Error> {
        T::from_number(self).ok_or_else(|| {
            value_error(self, VariantMismatch { expected: T::TAG, found: self.tag() })
        })
    }

    /// Returns true if the number is exactly zero. Reals are never exactly zero in this sense, so
    /// division by a real zero follows floating-point rules.
    pub fn is_exact_zero(&self) -> bool {
        match self {
            Self::Integer(n) => *n == 0,
            Self::Rational(r) => r.is_zero(),
            Self::Real(_) => false,
        }
    }

    /// Converts the number to the nearest [`f64`].
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Integer(n) => *n as f64,
            Self::Rational(r) => r.to_f64(),
            Self::Real(x) => *x,
        }
    }

    /// Narrows a rational with a denominator of one to an integer. Every other number is returned
    /// as-is.
    pub fn normalize(self) -> Self {
        match self {
            Self::Rational(r) if r.is_integer() => match r.signed_numerator() {
                Some(n) => Self::Integer(n),
                None => self,
            },
            _ => self,
        }
    }

    /// Returns the additive inverse of the number.
    pub fn checked_neg(&self) -> Result<Self, Error> {
        match self {
            Self::Integer(n) => n
                .checked_neg()
                .map(Self::Integer)
                .ok_or_else(|| value_error(format!("-({})", n), IntegerOverflow { op: "-" })),
            Self::Rational(r) => Ok(Self::Rational(r.neg())),
            Self::Real(x) => Ok(Self::Real(-x)),
        }
    }

    /// Adds two numbers, promoting to the wider representation.
    pub fn checked_add(&self, rhs: &Self) -> Result<Self, Error> {
        self.arith(rhs, Arith::Add)
    }

    /// Subtracts `rhs` from `self`, promoting to the wider representation.
    pub fn checked_sub(&self, rhs: &Self) -> Result<Self, Error> {
        self.arith(rhs, Arith::Sub)
    }

    /// Multiplies two numbers, promoting to the wider representation.
    pub fn checked_mul(&self, rhs: &Self) -> Result<Self, Error> {
        self.arith(rhs, Arith::Mul)
    }

    /// Divides `self` by `rhs`, promoting to the wider representation.
    ///
    /// Dividing by an exact zero is an error. Dividing two integers yields an integer when the
    /// division is exact and a reduced rational otherwise.
    ///
    /// ```
    /// use symexpr::numeric::{Number, Rational};
    ///
    /// assert_eq!(Number::Integer(6).checked_div(&Number::Integer(3))?, Number::Integer(2));
    /// assert_eq!(
    ///     Number::Integer(1).checked_div(&Number::Integer(2))?,
    ///     Number::Rational(Rational::from_signed(1, 2)?),
    /// );
    /// assert!(Number::Integer(1).checked_div(&Number::zero()).is_err());
    /// # Ok::<(), symexpr::Error>(())
    /// ```
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, Error> {
        self.arith(rhs, Arith::Div)
    }

    /// Dispatches a binary operation on the common representation of both operands.
    fn arith(&self, rhs: &Self, op: Arith) -> Result<Self, Error> {
        let tag = self.tag().max(rhs.tag());
        trace!(lhs = %self, rhs = %rhs, op = op.token(), ?tag, "numeric operation");

        match tag {
            NumberTag::Integer => {
                let (lhs, rhs) = (self.get::<i64>()?, rhs.get::<i64>()?);
                integer_arith(lhs, rhs, op)
            },
            NumberTag::Rational => {
                let (lhs, rhs) = (self.get::<Rational>()?, rhs.get::<Rational>()?);
                let result = match op {
                    Arith::Add => lhs.checked_add(&rhs),
                    Arith::Sub => lhs.checked_sub(&rhs),
                    Arith::Mul => lhs.checked_mul(&rhs),
                    Arith::Div => lhs.checked_div(&rhs),
                }?;
                Ok(Self::Rational(result))
            },
            NumberTag::Real => {
                if op == Arith::Div && rhs.is_exact_zero() {
                    return Err(binary_error(self, op.token(), rhs, DivisionByZero));
                }

                let (lhs, rhs) = (self.get::<f64>()?, rhs.get::<f64>()?);
                Ok(Self::Real(match op {
                    Arith::Add => lhs + rhs,
                    Arith::Sub => lhs - rhs,
                    Arith::Mul => lhs * rhs,
                    Arith::Div => lhs / rhs,
                }))
            },
        }
    }

    /// Compares two numbers by value after promotion. Real values are ordered with
    /// [`f64::total_cmp`], so the ordering is total.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match self.tag().max(other.tag()) {
            NumberTag::Integer | NumberTag::Rational => {
                // both fit in a rational, so neither read can fail
                match (Rational::from_number(self), Rational::from_number(other)) {
                    (Some(lhs), Some(rhs)) => lhs.cmp(&rhs),
                    _ => self.to_f64().total_cmp(&other.to_f64()),
                }
            },
            NumberTag::Real => self.to_f64().total_cmp(&other.to_f64()),
        }
    }

    /// A hash of the numeric value that depends on its representation.
    ///
    /// - Integer: its two's complement bit pattern.
    /// - Rational: `(n ^ (d << 1)) << 1`, with the top bit flipped for negative values.
    /// - Real: `bits << 1 | 1`.
    pub fn hash_code(&self) -> u64 {
        match self {
            Self::Integer(n) => *n as u64,
            Self::Rational(r) => {
                let hash = (r.numerator() ^ (r.denominator() << 1)) << 1;
                if r.is_negative() {
                    hash ^ (1 << 63)
                } else {
                    hash
                }
            },
            Self::Real(x) => (x.to_bits() << 1) | 1,
        }
    }
}

/// Integer arithmetic with overflow checks. Inexact division produces a rational.
fn integer_arith(lhs: i64, rhs: i64, op: Arith) -> Result<Number, Error> {
    let overflow = || binary_error(lhs, op.token(), rhs, IntegerOverflow { op: op.token() });
    match op {
        Arith::Add => lhs.checked_add(rhs).map(Number::Integer).ok_or_else(overflow),
        Arith::Sub => lhs.checked_sub(rhs).map(Number::Integer).ok_or_else(overflow),
        Arith::Mul => lhs.checked_mul(rhs).map(Number::Integer).ok_or_else(overflow),
        Arith::Div => {
            if rhs == 0 {
                Err(binary_error(lhs, op.token(), rhs, DivisionByZero))
            } else {
                match lhs.checked_rem(rhs).ok_or_else(overflow)? {
                    0 => lhs.checked_div(rhs).map(Number::Integer).ok_or_else(overflow),
                    _ => Rational::from_signed(lhs, rhs).map(Number::Rational),
                }
            }
        },
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Self::Integer(n.into())
    }
}

impl From<Rational> for Number {
    fn from(r: Rational) -> Self {
        Self::Rational(r)
    }
}

impl From<f64> for Number {
    fn from(x: f64) -> Self {
        Self::Real(x)
    }
}

/// Numbers are equal if their values are equal after promotion to a common representation.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Integer(a), Self::Rational(b)) | (Self::Rational(b), Self::Integer(a)) => b == a,
            (Self::Rational(a), Self::Rational(b)) => a == b,
            _ => self.to_f64() == other.to_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.tag().max(other.tag()) {
            NumberTag::Real => self.to_f64().partial_cmp(&other.to_f64()),
            _ => Some(self.total_cmp(other)),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{}", n),
            Self::Rational(r) => write!(f, "{}", r),
            Self::Real(x) => write!(f, "{}", x),
        }
    }
}
