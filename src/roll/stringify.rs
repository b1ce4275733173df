//! Textual notation of every provider, the inverse of [`crate::parse`].

use super::{Chain, ChainLink, ChainRollStep, Die, FixedDie, Pool, UniformDie};
use crate::common::short_decimal;
use std::fmt;

impl fmt::Display for FixedDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&short_decimal(self.value()))
    }
}

impl fmt::Display for UniformDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min() == 1 {
            write!(f, "d{}", self.max())
        } else {
            write!(f, "[{}, {}]", self.min(), self.max())
        }
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(x) => fmt::Display::fmt(x, f),
            Self::Uniform(x) => fmt::Display::fmt(x, f),
            Self::Pool(x) => fmt::Display::fmt(x, f),
            Self::Link(x) => fmt::Display::fmt(x, f),
            Self::Chain(x) => fmt::Display::fmt(x, f),
            Self::Custom(x) => fmt::Display::fmt(x, f),
        }
    }
}

/// Fixed counts print as the number of dice actually rolled, and a count of
/// one is left out: `d6`, not `1d6`.
impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.count() {
            Some(Die::Fixed(count)) if count.value().trunc() <= 1.0 => {}
            Some(Die::Fixed(count)) => write!(f, "{}", count.value().trunc())?,
            Some(count) => fmt::Display::fmt(count, f)?,
            None => {}
        }
        fmt::Display::fmt(self.value(), f)
    }
}

impl fmt::Display for ChainLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.links().into_iter().enumerate() {
            match link.operation() {
                _ if i == 0 => fmt::Display::fmt(link.pool(), f)?,
                op if op.is_each() => write!(f, "({}{})", op, link.pool())?,
                op => write!(f, "{}{}", op, link.pool())?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.last_link(), f)
    }
}

impl fmt::Display for ChainRollStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} roll(s) totaling {}",
            self.rolls().len(),
            short_decimal(self.total())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{vec1, Operation};
    use crate::dice::{self, D10, D4, D6, D8};
    use crate::roll::ValueProvider;

    #[test]
    fn test_dice() {
        assert_eq!(D6.to_string(), "d6");
        assert_eq!(UniformDie::new(2, 5).unwrap().to_string(), "[2, 5]");
        assert_eq!(UniformDie::new(-100, -10).unwrap().to_string(), "[-100, -10]");
        assert_eq!(FixedDie::from(40).to_string(), "40");
        assert_eq!(FixedDie::new(2.25).unwrap().to_string(), "2.3");
        assert_eq!(FixedDie::new(-0.5).unwrap().to_string(), "-0.5");
    }

    #[test]
    fn test_pools() {
        assert_eq!(Pool::new(D6).to_string(), "d6");
        assert_eq!(Pool::with_count(D6, 1).unwrap().to_string(), "d6");
        assert_eq!(Pool::with_count(D6, 3).unwrap().to_string(), "3d6");
        assert_eq!(Pool::with_count(D6, D4).unwrap().to_string(), "d4d6");
        let almost_two = FixedDie::new(1.96).unwrap();
        assert_eq!(Pool::with_count(D6, almost_two).unwrap().to_string(), "d6");
        let pool = Pool::with_count(D6, FixedDie::new(3.5).unwrap()).unwrap();
        assert_eq!(pool.to_string(), "3d6");
        let interval = UniformDie::new(2, 3).unwrap();
        assert_eq!(Pool::with_count(interval, interval).unwrap().to_string(), "[2, 3][2, 3]");
    }

    #[test]
    fn test_chains() {
        let chain = dice::take(2).d(20).unwrap().multiply_take(D4).d(4).unwrap().plus(40);
        assert_eq!(chain.to_string(), "2d20*d4d4+40");

        let chain = dice::take(3).d(8).unwrap().each_plus(3);
        assert_eq!(chain.to_string(), "3d8(+3)");

        let chain = dice::take(D10).d(100).unwrap().each_minus(50).plus(10);
        assert_eq!(chain.to_string(), "d10d100(-50)+10");

        let chain = Chain::of(D8).minus(-3).divide(FixedDie::new(1.5).unwrap());
        assert_eq!(chain.to_string(), "d8--3/1.5");
    }

    #[test]
    fn test_fractional_count_reparses() {
        let chain = dice::take(FixedDie::new(1.96).unwrap()).d(6).unwrap();
        let parsed = crate::parse(&chain.to_string()).unwrap();
        assert_eq!((parsed.minimum(), parsed.maximum()), (1.0, 6.0));
        assert_eq!((chain.minimum(), chain.maximum()), (1.0, 6.0));

        let chain = Chain::of(D4).each_plus_take(FixedDie::new(2.9).unwrap()).d(6).unwrap();
        assert_eq!(chain.to_string(), "d4(+2d6)");
        let parsed = crate::parse(&chain.to_string()).unwrap();
        assert_eq!((parsed.minimum(), parsed.maximum()), (chain.minimum(), chain.maximum()));
    }

    #[test]
    fn test_step() {
        let step = ChainRollStep::new(vec1![3.0, 4.5], Operation::Plus);
        assert_eq!(step.to_string(), "2 roll(s) totaling 7.5");
    }
}
