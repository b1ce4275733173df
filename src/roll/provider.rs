use super::{Chain, ChainLink, CustomDie, FixedDie, Pool, Roller, UniformDie};
use crate::common::Float;
use crate::error::DiceResult;
use std::fmt;

/// Anything that can be rolled: a die, a pool of dice, or a whole chain.
///
/// `minimum` and `maximum` bound every value `roll` returns.
#[enum_dispatch::enum_dispatch]
pub trait ValueProvider: fmt::Display {
    fn minimum(&self) -> Float;

    fn maximum(&self) -> Float;

    fn roll(&self, roller: &mut dyn Roller) -> DiceResult<Float>;

    /// Lazily rolls `count` values. Every call draws fresh values.
    fn roll_many<'a>(
        &'a self,
        count: usize,
        roller: &'a mut dyn Roller,
    ) -> Box<dyn Iterator<Item = DiceResult<Float>> + 'a> {
        Box::new((0..count).map(move |_| self.roll(roller)))
    }
}

/// Every kind of provider that can appear inside a pool or a chain.
#[enum_dispatch::enum_dispatch(ValueProvider)]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Die {
    Fixed(FixedDie),
    Uniform(UniformDie),
    Pool(Pool),
    Link(ChainLink),
    Chain(Chain),
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(CustomDie),
}

impl Die {
    pub fn as_fixed(&self) -> Option<FixedDie> {
        match self {
            Self::Fixed(fixed) => Some(*fixed),
            _ => None,
        }
    }

    /// Whether every value this provider can roll is an integer. Custom
    /// providers are assumed not to be.
    pub(crate) fn rolls_integers(&self) -> bool {
        match self {
            Self::Fixed(x) => x.value().fract() == 0.0,
            Self::Uniform(_) => true,
            Self::Pool(x) => x.rolls_integers(),
            Self::Link(x) => x.rolls_integers(),
            Self::Chain(x) => x.last_link().rolls_integers(),
            Self::Custom(_) => false,
        }
    }
}

impl From<i32> for Die {
    fn from(value: i32) -> Self {
        Self::Fixed(value.into())
    }
}
