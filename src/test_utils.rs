use crate::common::Float;
use crate::error::DiceResult;
use crate::roll::ValueProvider;
use rand::{rngs::StdRng, SeedableRng};

/// Rolls `provider` `count` times with a generator seeded from `seed`.
pub(crate) fn sample(provider: &dyn ValueProvider, count: usize, seed: u64) -> Vec<Float> {
    let mut rng = StdRng::seed_from_u64(seed);
    provider
        .roll_many(count, &mut rng)
        .collect::<DiceResult<_>>()
        .unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Statistics {
    pub min: Float,
    pub max: Float,
    pub mean: Float,
    pub variance: Float,
    pub skewness: Float,
    pub excess_kurtosis: Float,
}

impl Statistics {
    pub fn of(samples: &[Float]) -> Self {
        let n = samples.len() as Float;
        let mean = samples.iter().sum::<Float>() / n;
        let moment = |k: i32| samples.iter().map(|x| (x - mean).powi(k)).sum::<Float>() / n;
        let variance = moment(2);
        Self {
            min: samples.iter().copied().fold(Float::INFINITY, Float::min),
            max: samples.iter().copied().fold(Float::NEG_INFINITY, Float::max),
            mean,
            variance,
            skewness: moment(3) / variance.powf(1.5),
            excess_kurtosis: moment(4) / (variance * variance) - 3.0,
        }
    }
}

pub(crate) mod strategies {
    use crate::common::{Float, Operation};
    use crate::roll::{Chain, FixedDie, Pool, UniformDie};
    use proptest::prelude::*;

    pub fn uniform() -> impl Strategy<Value = UniformDie> {
        prop_oneof![
            (1..=20i64).prop_map(|faces| UniformDie::with_faces(faces).unwrap()),
            (-20..=20i64, 0..=20i64).prop_map(|(min, span)| UniformDie::new(min, min + span).unwrap()),
        ]
    }

    /// Pools that print in a form the built-in parser reads back.
    pub fn pool() -> impl Strategy<Value = Pool> {
        prop_oneof![
            (-20..=20i32).prop_map(Pool::new),
            uniform().prop_map(Pool::new),
            (2..=4i32, uniform()).prop_map(|(count, die)| Pool::with_count(die, count).unwrap()),
            (10..50u32, uniform()).prop_map(|(tenths, die)| {
                let count = FixedDie::new(Float::from(tenths) / 10.0).unwrap();
                Pool::with_count(die, count).unwrap()
            }),
            (1..=4i64, uniform()).prop_map(|(faces, die)| {
                Pool::with_count(die, UniformDie::with_faces(faces).unwrap()).unwrap()
            }),
        ]
    }

    pub fn operation() -> impl Strategy<Value = Operation> {
        proptest::sample::select(Operation::ALL.to_vec())
    }

    pub fn chain() -> impl Strategy<Value = Chain> {
        (pool(), proptest::collection::vec((operation(), pool()), 0..4)).prop_map(
            |(first, links)| {
                links
                    .into_iter()
                    .fold(Chain::new(first), |chain, (op, pool)| chain.append(op, pool))
            },
        )
    }
}
