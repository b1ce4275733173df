use crate::common::Int;
use rand::Rng;
use std::ops::Range;

/// A source of uniformly distributed integers.
pub trait Roller {
    /// Draws an integer from the half-open `range`. An empty range yields `range.start`.
    fn next_int(&mut self, range: Range<Int>) -> Int;

    /// Rolls a single die numbered `1..=faces`.
    fn roll_die(&mut self, faces: Int) -> Int {
        self.next_int(1..faces.max(1) + 1)
    }

    /// Rolls `count` dice numbered `1..=faces` and sums them.
    fn roll_dice(&mut self, count: usize, faces: Int) -> Int {
        (0..count).map(|_| self.roll_die(faces)).sum()
    }

    /// Returns `true` with a probability of one in `chance`.
    fn one_in(&mut self, chance: Int) -> bool {
        self.next_int(0..chance.max(1)) == 0
    }
}

impl<R: Rng> Roller for R {
    fn next_int(&mut self, range: Range<Int>) -> Int {
        if range.is_empty() {
            range.start
        } else {
            self.gen_range(range)
        }
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;

#[cfg(test)]
mod step {
    use super::*;

    /// Walks through every range in order: the n-th draw is
    /// `start + (initial + n * step - 1) mod len`.
    ///
    /// `StepRoller::new(1, 0)` always yields the low end of a range and
    /// `StepRoller::new(0, 0)` always yields the high end.
    pub(crate) struct StepRoller {
        current: Int,
        step: Int,
    }

    impl StepRoller {
        pub fn new(initial: Int, step: Int) -> Self {
            Self {
                current: initial,
                step,
            }
        }
    }

    impl Roller for StepRoller {
        fn next_int(&mut self, range: Range<Int>) -> Int {
            let len = (range.end - range.start).max(1);
            let ret = range.start + (self.current - 1).rem_euclid(len);
            self.current += self.step;
            ret
        }
    }
}
