use super::{Die, Roller, ValueProvider};
use crate::common::{Float, NonEmpty};
use crate::error::{DiceError, DiceResult};
use std::sync::Arc;

/// A value provider rolled a number of times, with the number itself rolled
/// from an optional count provider.
///
/// A pool without a count rolls its value provider exactly once.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PoolRecord")
)]
pub struct Pool {
    value: Arc<Die>,
    count: Option<Arc<Die>>,
}

impl Pool {
    /// The most dice a single pool may roll at once.
    pub const MAX_ROLLS: usize = 1_000_000;

    pub fn new(value: impl Into<Die>) -> Self {
        Self {
            value: Arc::new(value.into()),
            count: None,
        }
    }

    /// Fails unless every count the provider can roll truncates to at least 1.
    pub fn with_count(value: impl Into<Die>, count: impl Into<Die>) -> DiceResult<Self> {
        Self::from_parts(Arc::new(value.into()), Some(Arc::new(count.into())))
    }

    fn from_parts(value: Arc<Die>, count: Option<Arc<Die>>) -> DiceResult<Self> {
        if let Some(count) = &count {
            if count.minimum().trunc() < 1.0 {
                return Err(DiceError::invalid_argument(format!(
                    "count {} can roll fewer than one die",
                    count
                )));
            }
        }
        Ok(Self { value, count })
    }

    pub fn value(&self) -> &Die {
        &self.value
    }

    pub fn count(&self) -> Option<&Die> {
        self.count.as_deref()
    }

    fn value_bounds(&self) -> (Float, Float) {
        (self.value.minimum(), self.value.maximum())
    }

    pub(crate) fn rolls_integers(&self) -> bool {
        self.value.rolls_integers()
    }

    pub fn minimum_count(&self) -> Float {
        self.count.as_ref().map_or(1.0, |c| c.minimum().trunc())
    }

    pub fn maximum_count(&self) -> Float {
        self.count.as_ref().map_or(1.0, |c| c.maximum().trunc())
    }

    fn resolve_count(&self, roller: &mut dyn Roller) -> DiceResult<usize> {
        let count = match &self.count {
            Some(count) => count.roll(roller)?.trunc(),
            None => return Ok(1),
        };
        if count > Self::MAX_ROLLS as Float {
            Err(DiceError::invalid_operation(format!(
                "{} rolled a count of {}, more than {} dice",
                self,
                count,
                Self::MAX_ROLLS
            )))
        } else if count >= 1.0 {
            Ok(count as usize)
        } else {
            Err(DiceError::invalid_operation(format!(
                "{} rolled a count of {}",
                self, count
            )))
        }
    }

    /// Rolls the pool and keeps every roll.
    pub fn roll_separately(&self, roller: &mut dyn Roller) -> DiceResult<NonEmpty<Float>> {
        let count = self.resolve_count(roller)?;
        let rolls = self
            .value
            .roll_many(count, roller)
            .collect::<DiceResult<Vec<_>>>()?;
        log::debug!("{} rolled {:?}", self, rolls);
        NonEmpty::try_from_vec(rolls)
            .map_err(|_| DiceError::invalid_operation(format!("{} rolled no dice", self)))
    }

    /// Rolls the pool, returning the sum and the number of rolls summed.
    pub(crate) fn roll_counted(&self, roller: &mut dyn Roller) -> DiceResult<(Float, usize)> {
        let count = self.resolve_count(roller)?;
        let sum = self
            .value
            .roll_many(count, roller)
            .sum::<DiceResult<Float>>()?;
        log::debug!("{} rolled {} die(s) totaling {}", self, count, sum);
        Ok((sum, count))
    }
}

impl ValueProvider for Pool {
    fn minimum(&self) -> Float {
        let (min, _) = self.value_bounds();
        Float::min(self.minimum_count() * min, self.maximum_count() * min)
    }

    fn maximum(&self) -> Float {
        let (_, max) = self.value_bounds();
        Float::max(self.minimum_count() * max, self.maximum_count() * max)
    }

    fn roll(&self, roller: &mut dyn Roller) -> DiceResult<Float> {
        self.roll_counted(roller).map(|(sum, _)| sum)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PoolRecord {
    value: Arc<Die>,
    count: Option<Arc<Die>>,
}

#[cfg(feature = "serde")]
impl TryFrom<PoolRecord> for Pool {
    type Error = DiceError;

    fn try_from(record: PoolRecord) -> Result<Self, Self::Error> {
        Self::from_parts(record.value, record.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::roller::StepRoller;
    use crate::roll::{FixedDie, UniformDie, D4, D6};
    use crate::test_utils::{sample, Statistics};

    #[test]
    fn test_bounds() {
        let pool = Pool::with_count(D6, 3).unwrap();
        assert_eq!((pool.minimum_count(), pool.maximum_count()), (3.0, 3.0));
        assert_eq!((pool.minimum(), pool.maximum()), (3.0, 18.0));

        let pool = Pool::with_count(D6, D4).unwrap();
        assert_eq!((pool.minimum_count(), pool.maximum_count()), (1.0, 4.0));
        assert_eq!((pool.minimum(), pool.maximum()), (1.0, 24.0));

        let pool = Pool::new(D6);
        assert_eq!((pool.minimum_count(), pool.maximum_count()), (1.0, 1.0));
        assert_eq!((pool.minimum(), pool.maximum()), (1.0, 6.0));
    }

    #[test]
    fn test_negative_value_bounds() {
        let pool = Pool::with_count(UniformDie::new(-3, 2).unwrap(), D4).unwrap();
        assert_eq!((pool.minimum(), pool.maximum()), (-12.0, 8.0));
        let stats = Statistics::of(&sample(&pool, 100_000, 3));
        assert!(stats.min >= -12.0 && stats.max <= 8.0, "{:?}", stats);
    }

    #[test]
    fn test_fractional_count() {
        let pool = Pool::with_count(D6, FixedDie::new(2.7).unwrap()).unwrap();
        assert_eq!((pool.minimum(), pool.maximum()), (2.0, 12.0));
        let mut roller = StepRoller::new(1, 1);
        assert_eq!(pool.roll_separately(&mut roller).unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_count() {
        assert!(matches!(
            Pool::with_count(D6, 0),
            Err(DiceError::InvalidArgument(_))
        ));
        assert!(Pool::with_count(D6, FixedDie::new(0.9).unwrap()).is_err());
        assert!(Pool::with_count(D6, UniformDie::new(0, 3).unwrap()).is_err());
    }

    #[test]
    fn test_too_many_rolls() {
        let pool = Pool::with_count(D6, FixedDie::new(1e18).unwrap()).unwrap();
        let mut roller = StepRoller::new(1, 1);
        assert!(matches!(pool.roll(&mut roller), Err(DiceError::InvalidOperation(_))));
        assert!(matches!(
            pool.roll_separately(&mut roller),
            Err(DiceError::InvalidOperation(_))
        ));

        let limit = FixedDie::new(Pool::MAX_ROLLS as Float).unwrap();
        let pool = Pool::with_count(1, limit).unwrap();
        assert_eq!(pool.roll(&mut roller), Ok(Pool::MAX_ROLLS as Float));
    }

    #[test]
    fn test_rolls_integers() {
        assert!(Pool::with_count(D6, D4).unwrap().rolls_integers());
        assert!(Pool::with_count(D6, FixedDie::new(2.5).unwrap()).unwrap().rolls_integers());
        assert!(!Pool::new(FixedDie::new(2.5).unwrap()).rolls_integers());
    }

    #[test]
    fn test_roll() {
        let pool = Pool::with_count(D6, 3).unwrap();
        let mut roller = StepRoller::new(2, 1);
        assert_eq!(pool.roll(&mut roller), Ok(2.0 + 3.0 + 4.0));
        assert_eq!(pool.roll_separately(&mut roller).unwrap().as_slice(), &[5.0, 6.0, 1.0]);
    }

    #[test]
    fn test_rolled_count() {
        let pool = Pool::with_count(D6, D4).unwrap();
        // The count is drawn first: the max roller rolls four sixes.
        let mut roller = StepRoller::new(0, 0);
        assert_eq!(pool.roll_counted(&mut roller), Ok((24.0, 4)));
        let mut roller = StepRoller::new(1, 0);
        assert_eq!(pool.roll_counted(&mut roller), Ok((1.0, 1)));
    }

    #[test]
    fn test_rolls_in_range() {
        let pool = Pool::with_count(D6, D4).unwrap();
        let stats = Statistics::of(&sample(&pool, 100_000, 9));
        assert_eq!((stats.min, stats.max), (1.0, 24.0));
        assert!((stats.mean - 8.75).abs() < 0.1, "{:?}", stats);
    }
}
