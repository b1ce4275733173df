use super::{ChainSetup, Die, Pool, Roller, ValueProvider};
use crate::common::{Float, NonEmpty, Operation, EPSILON};
use crate::error::{DiceError, DiceResult};
use std::str::FromStr;
use std::sync::Arc;

/// One pool folded into the running value of a chain.
///
/// Links are immutable. Appending to a chain allocates a new link pointing at
/// the old tail, so every previously taken link stays a valid snapshot.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainLink {
    operation: Operation,
    pool: Pool,
    previous: Option<Arc<ChainLink>>,
}

impl ChainLink {
    pub fn new(operation: Operation, pool: Pool, previous: Option<Arc<ChainLink>>) -> Self {
        Self {
            operation,
            pool,
            previous,
        }
    }

    /// A head link, which seeds the chain with its pool.
    pub fn first(pool: Pool) -> Self {
        Self::new(Operation::Plus, pool, None)
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn previous(&self) -> Option<&ChainLink> {
        self.previous.as_deref()
    }

    /// This link and every link before it, head first.
    pub fn links(&self) -> Vec<&ChainLink> {
        let mut links = vec![];
        let mut link = Some(self);
        while let Some(current) = link {
            links.push(current);
            link = current.previous();
        }
        links.reverse();
        links
    }

    /// Whether every value this link can produce is an integer.
    pub(crate) fn rolls_integers(&self) -> bool {
        self.links()
            .iter()
            .all(|link| link.operation != Operation::Divide && link.pool.rolls_integers())
    }

    /// Pool values worth trying when looking for the extremes of this link.
    ///
    /// The fold is monotonic in the pool value except across zero for
    /// division. There the divisors nearest zero that are not treated as zero
    /// also need checking: `1` for pools rolling integers, the zero threshold
    /// otherwise.
    fn operand_candidates(&self) -> Vec<Float> {
        let (min, max) = (self.pool.minimum(), self.pool.maximum());
        let mut candidates = vec![min, max];
        if self.operation == Operation::Divide {
            let nearest = if self.pool.rolls_integers() { 1.0 } else { EPSILON };
            if max >= nearest {
                candidates.push(min.max(nearest));
            }
            if min <= -nearest {
                candidates.push(max.min(-nearest));
            }
            if min < EPSILON && max > -EPSILON {
                candidates.push(0.0);
            }
        }
        candidates
    }

    /// `(minimum, maximum)` of this link alone, over every combination of the
    /// extremes of the previous value, the previous roll count and the pool.
    fn fold_bounds(&self, previous: (Float, Float), counts: (Float, Float)) -> (Float, Float) {
        let candidates = self.operand_candidates();
        let mut bounds = (Float::INFINITY, Float::NEG_INFINITY);
        for prev in [previous.0, previous.1] {
            for count in [counts.0, counts.1] {
                for &value in &candidates {
                    let x = self.operation.combine(prev, value, count);
                    bounds = (bounds.0.min(x), bounds.1.max(x));
                }
            }
        }
        bounds
    }

    fn bounds(&self) -> (Float, Float) {
        let mut bounds = (0.0, 0.0);
        let mut counts = (1.0, 1.0);
        for link in self.links() {
            bounds = link.fold_bounds(bounds, counts);
            counts = (link.pool.minimum_count(), link.pool.maximum_count());
        }
        bounds
    }
}

impl ValueProvider for ChainLink {
    fn minimum(&self) -> Float {
        self.bounds().0
    }

    fn maximum(&self) -> Float {
        self.bounds().1
    }

    fn roll(&self, roller: &mut dyn Roller) -> DiceResult<Float> {
        let mut total = 0.0;
        let mut count = 1;
        for link in self.links() {
            let (value, rolled) = link.pool.roll_counted(roller)?;
            let next = link.operation.combine(total, value, count as Float);
            log::trace!(
                "{} {:?} {} over {} roll(s) = {}",
                total,
                link.operation,
                value,
                count,
                next
            );
            total = next;
            count = rolled;
        }
        Ok(total)
    }
}

impl PartialEq for ChainLink {
    fn eq(&self, other: &Self) -> bool {
        let (ours, theirs) = (self.links(), other.links());
        ours.len() == theirs.len()
            && ours
                .iter()
                .zip(&theirs)
                .all(|(a, b)| a.operation == b.operation && a.pool == b.pool)
    }
}

/// Unlinks uniquely owned predecessors one at a time, so dropping a long
/// chain does not recurse once per link.
impl Drop for ChainLink {
    fn drop(&mut self) {
        let mut previous = self.previous.take();
        while let Some(link) = previous {
            previous = match Arc::try_unwrap(link) {
                Ok(mut link) => link.previous.take(),
                Err(_) => None,
            };
        }
    }
}

/// A left-to-right sequence of pools joined by operations.
///
/// ```
/// use dice_chain::{roll::{Chain, D6}, ValueProvider};
///
/// let chain = Chain::of(D6).multiply(2).each_plus(1);
/// assert_eq!(chain.to_string(), "d6*2(+1)");
/// assert_eq!((chain.minimum(), chain.maximum()), (3.0, 13.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chain {
    last: Arc<ChainLink>,
}

macro_rules! builder_ops {
    ($($op:ident: $name:ident, $take:ident;)*) => {$(
        #[doc = concat!("Appends a link applying [`Operation::", stringify!($op), "`] with `value`.")]
        pub fn $name(self, value: impl Into<Die>) -> Self {
            self.append(Operation::$op, Pool::new(value))
        }

        #[doc = concat!("Starts a [`Operation::", stringify!($op), "`] link rolling `amount` dice, chosen with the returned setup.")]
        pub fn $take(self, amount: impl Into<Die>) -> ChainSetup {
            ChainSetup::new(Some(self), Operation::$op, amount.into())
        }
    )*};
}

impl Chain {
    pub fn new(pool: Pool) -> Self {
        Self {
            last: Arc::new(ChainLink::first(pool)),
        }
    }

    /// A chain rolling `value` once.
    pub fn of(value: impl Into<Die>) -> Self {
        Self::new(Pool::new(value))
    }

    pub fn append(self, operation: Operation, pool: Pool) -> Self {
        Self {
            last: Arc::new(ChainLink::new(operation, pool, Some(self.last))),
        }
    }

    builder_ops! {
        Plus: plus, plus_take;
        Minus: minus, minus_take;
        Multiply: multiply, multiply_take;
        Divide: divide, divide_take;
        EachPlus: each_plus, each_plus_take;
        EachMinus: each_minus, each_minus_take;
    }

    pub fn last_link(&self) -> &ChainLink {
        &self.last
    }

    pub fn first_link(&self) -> &ChainLink {
        let mut link = self.last_link();
        while let Some(previous) = link.previous() {
            link = previous;
        }
        link
    }

    /// Every link, head first.
    pub fn links(&self) -> Vec<&ChainLink> {
        self.last.links()
    }

    pub fn len(&self) -> usize {
        self.links().len()
    }

    /// Rolls every pool separately and keeps a record of each link.
    pub fn roll_step_by_step(&self, roller: &mut dyn Roller) -> DiceResult<SteppedRoll> {
        let steps = self
            .links()
            .into_iter()
            .map(|link| -> DiceResult<ChainRollStep> {
                let rolls = link.pool().roll_separately(roller)?;
                Ok(ChainRollStep::new(rolls, link.operation()))
            })
            .collect::<DiceResult<Vec<_>>>()?;

        let mut total = 0.0;
        let mut previous_count = 1;
        for step in &steps {
            total = step
                .operation
                .combine(total, step.total, previous_count as Float);
            previous_count = step.rolls.len();
        }
        Ok(SteppedRoll { total, steps })
    }
}

impl ValueProvider for Chain {
    fn minimum(&self) -> Float {
        self.last.minimum()
    }

    fn maximum(&self) -> Float {
        self.last.maximum()
    }

    fn roll(&self, roller: &mut dyn Roller) -> DiceResult<Float> {
        self.last.roll(roller)
    }
}

impl From<Pool> for Chain {
    fn from(pool: Pool) -> Self {
        Self::new(pool)
    }
}

impl FromStr for Chain {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

/// The rolls of one link, taken by [`Chain::roll_step_by_step`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainRollStep {
    rolls: NonEmpty<Float>,
    total: Float,
    operation: Operation,
}

impl ChainRollStep {
    pub fn new(rolls: NonEmpty<Float>, operation: Operation) -> Self {
        let total = rolls.iter().sum();
        Self {
            rolls,
            total,
            operation,
        }
    }

    pub fn rolls(&self) -> &NonEmpty<Float> {
        &self.rolls
    }

    pub fn total(&self) -> Float {
        self.total
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SteppedRoll {
    pub total: Float,
    pub steps: Vec<ChainRollStep>,
}
