use super::{Roller, ValueProvider};
use crate::common::{Float, Int};
use crate::error::{DiceError, DiceResult};
use crate::parse::{ParseError, ParseErrorKind, TokenKind};
use logos::Logos;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A die that always rolls the same value.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedDie {
    value: Float,
}

impl FixedDie {
    pub const ZERO: Self = Self { value: 0.0 };
    pub const ONE: Self = Self { value: 1.0 };
    pub const MINUS_ONE: Self = Self { value: -1.0 };

    pub fn new(value: Float) -> DiceResult<Self> {
        if value.is_finite() {
            Ok(Self { value })
        } else {
            Err(DiceError::invalid_argument(format!(
                "fixed value must be finite, got {}",
                value
            )))
        }
    }

    pub const fn value(&self) -> Float {
        self.value
    }
}

impl From<i32> for FixedDie {
    fn from(value: i32) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl ValueProvider for FixedDie {
    fn minimum(&self) -> Float {
        self.value
    }

    fn maximum(&self) -> Float {
        self.value
    }

    fn roll(&self, _roller: &mut dyn Roller) -> DiceResult<Float> {
        Ok(self.value)
    }
}

/// A die rolling every integer in `min..=max` with equal probability.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "UniformDieRecord")
)]
pub struct UniformDie {
    min: Int,
    max: Int,
}

impl UniformDie {
    pub fn new(min: Int, max: Int) -> DiceResult<Self> {
        if min > max {
            Err(DiceError::invalid_argument(format!(
                "interval [{}, {}] is empty",
                min, max
            )))
        } else if max == Int::MAX {
            Err(DiceError::invalid_argument("interval is too large"))
        } else {
            Ok(Self { min, max })
        }
    }

    /// A die numbered `1..=faces`.
    pub fn with_faces(faces: Int) -> DiceResult<Self> {
        if faces < 1 {
            Err(DiceError::invalid_argument(format!(
                "a die needs at least one face, got {}",
                faces
            )))
        } else {
            Self::new(1, faces)
        }
    }

    const fn standard(faces: Int) -> Self {
        Self { min: 1, max: faces }
    }

    pub const fn min(&self) -> Int {
        self.min
    }

    pub const fn max(&self) -> Int {
        self.max
    }
}

impl ValueProvider for UniformDie {
    fn minimum(&self) -> Float {
        self.min as Float
    }

    fn maximum(&self) -> Float {
        self.max as Float
    }

    fn roll(&self, roller: &mut dyn Roller) -> DiceResult<Float> {
        Ok(roller.next_int(self.min..self.max + 1) as Float)
    }
}

pub const D2: UniformDie = UniformDie::standard(2);
pub const D3: UniformDie = UniformDie::standard(3);
pub const D4: UniformDie = UniformDie::standard(4);
pub const D6: UniformDie = UniformDie::standard(6);
pub const D8: UniformDie = UniformDie::standard(8);
pub const D10: UniformDie = UniformDie::standard(10);
pub const D12: UniformDie = UniformDie::standard(12);
pub const D20: UniformDie = UniformDie::standard(20);
pub const D100: UniformDie = UniformDie::standard(100);

/// Parses `d<faces>` or `[<min>, <max>]`.
impl FromStr for UniformDie {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<_> = TokenKind::lexer(s).collect();
        match tokens.as_slice() {
            [TokenKind::Die(faces)] => Self::with_faces(*faces),
            [TokenKind::Interval((min, max))] => Self::new(*min, *max),
            _ => Err(ParseError::new(ParseErrorKind::UnknownNode, 0..s.len(), s).into()),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct UniformDieRecord {
    min: Int,
    max: Int,
}

#[cfg(feature = "serde")]
impl TryFrom<UniformDieRecord> for UniformDie {
    type Error = DiceError;

    fn try_from(record: UniformDieRecord) -> Result<Self, Self::Error> {
        Self::new(record.min, record.max)
    }
}

/// Wraps a caller-defined provider so it can sit inside pools and chains.
///
/// Custom providers are not serialized.
#[derive(Clone)]
pub struct CustomDie(Arc<dyn ValueProvider + Send + Sync>);

impl CustomDie {
    pub fn new(provider: impl ValueProvider + Send + Sync + 'static) -> DiceResult<Self> {
        let (min, max) = (provider.minimum(), provider.maximum());
        if !min.is_finite() || !max.is_finite() {
            Err(DiceError::invalid_argument(format!(
                "bounds of {} must be finite",
                provider
            )))
        } else if min > max {
            Err(DiceError::invalid_argument(format!(
                "minimum of {} exceeds its maximum",
                provider
            )))
        } else {
            Ok(Self(Arc::new(provider)))
        }
    }
}

impl ValueProvider for CustomDie {
    fn minimum(&self) -> Float {
        self.0.minimum()
    }

    fn maximum(&self) -> Float {
        self.0.maximum()
    }

    fn roll(&self, roller: &mut dyn Roller) -> DiceResult<Float> {
        if self.minimum() > self.maximum() {
            return Err(DiceError::invalid_operation(format!(
                "minimum of {} exceeds its maximum",
                self
            )));
        }
        self.0.roll(roller)
    }
}

impl fmt::Display for CustomDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for CustomDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CustomDie")
            .field(&format_args!("{}", self.0))
            .finish()
    }
}

impl PartialEq for CustomDie {
    fn eq(&self, other: &Self) -> bool {
        Arc::as_ptr(&self.0) as *const () == Arc::as_ptr(&other.0) as *const ()
    }
}
