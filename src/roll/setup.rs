use super::{Chain, Die, FixedDie, Operation, Pool, UniformDie};
use crate::common::{Float, Int};
use crate::error::DiceResult;

/// A link waiting to learn what its dice roll.
///
/// Created by [`crate::dice::take`] and the `*_take` methods of [`Chain`];
/// finishing it with [`d`](Self::d), [`interval`](Self::interval),
/// [`fixed`](Self::fixed) or [`die`](Self::die) yields the chain.
#[derive(Debug, Clone)]
#[must_use = "a chain setup does nothing until its dice are chosen"]
pub struct ChainSetup {
    previous: Option<Chain>,
    operation: Operation,
    amount: Die,
}

impl ChainSetup {
    pub(crate) fn new(previous: Option<Chain>, operation: Operation, amount: Die) -> Self {
        Self {
            previous,
            operation,
            amount,
        }
    }

    /// Rolls dice numbered `1..=faces`.
    pub fn d(self, faces: Int) -> DiceResult<Chain> {
        self.die(UniformDie::with_faces(faces)?)
    }

    /// Rolls dice uniform over `min..=max`.
    pub fn interval(self, min: Int, max: Int) -> DiceResult<Chain> {
        self.die(UniformDie::new(min, max)?)
    }

    pub fn fixed(self, value: Float) -> DiceResult<Chain> {
        self.die(FixedDie::new(value)?)
    }

    pub fn die(self, value: impl Into<Die>) -> DiceResult<Chain> {
        let pool = Pool::with_count(value, self.amount)?;
        Ok(match self.previous {
            Some(chain) => chain.append(self.operation, pool),
            None => Chain::new(pool),
        })
    }
}
