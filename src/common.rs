use std::fmt::{self, Write};
pub use vec1::vec1;

/// Integer type for die faces and interval ends.
pub type Int = i64;

/// Value type for every roll, bound and fixed value.
pub type Float = f64;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// Divisors closer to zero than this are treated as zero.
pub(crate) const EPSILON: Float = 0.0001;

pub(crate) fn is_zero(x: Float) -> bool {
    x.abs() < EPSILON
}

/// Formats `x` rounded to at most one decimal place, without a trailing `.0`.
///
/// Halves round away from zero and a negative zero prints as `0`.
pub fn short_decimal(x: Float) -> String {
    let rounded = (x * 10.0).round() / 10.0;
    if rounded == 0.0 {
        "0".to_owned()
    } else if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

/// How a link combines the running value of a chain with its own pool.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operation {
    Plus,
    Minus,
    Multiply,
    Divide,
    /// Adds the pool value once for every roll of the previous pool.
    EachPlus,
    /// Subtracts the pool value once for every roll of the previous pool.
    EachMinus,
}

impl Operation {
    pub const ALL: [Self; 6] = [
        Self::Plus,
        Self::Minus,
        Self::Multiply,
        Self::Divide,
        Self::EachPlus,
        Self::EachMinus,
    ];

    pub const fn is_each(self) -> bool {
        matches!(self, Self::EachPlus | Self::EachMinus)
    }

    /// The operator character, with the each variants downgraded to `+` and `-`.
    pub const fn symbol(self) -> char {
        match self {
            Self::Plus | Self::EachPlus => '+',
            Self::Minus | Self::EachMinus => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    pub const fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// The each variant of `self`, if there is one.
    pub const fn to_each(self) -> Option<Self> {
        match self {
            Self::Plus | Self::EachPlus => Some(Self::EachPlus),
            Self::Minus | Self::EachMinus => Some(Self::EachMinus),
            Self::Multiply | Self::Divide => None,
        }
    }

    /// Folds `right` into the running value `left`.
    ///
    /// `left_count` is the number of rolls that produced `left`; only the each
    /// variants use it. Dividing by zero yields `0`.
    pub fn combine(self, left: Float, right: Float, left_count: Float) -> Float {
        match self {
            Self::Plus => left + right,
            Self::Minus => left - right,
            Self::Multiply => left * right,
            Self::Divide if is_zero(right) => 0.0,
            Self::Divide => left / right,
            Self::EachPlus => left + left_count * right,
            Self::EachMinus => left - left_count * right,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}
