//! Injected roll sources for attribute checks.
//!
//! Checks never reach for a global generator. Callers pass a
//! [`RollSource`]: a seeded [`StdRng`](rand::rngs::StdRng) in play,
//! [`FixedRolls`] or a closure in tests.

use std::collections::VecDeque;

use rand::Rng;

/// Sides on the check die.
pub const CHECK_DIE: u32 = 10;

/// Something that produces d10 rolls.
///
/// Implementations are expected to return values in `1..=10`; the resolver
/// rejects anything else.
pub trait RollSource {
    /// Roll the check die once.
    fn roll_d10(&mut self) -> u32;
}

impl<R: Rng> RollSource for R {
    fn roll_d10(&mut self) -> u32 {
        self.random_range(1..=CHECK_DIE)
    }
}

/// Canned rolls, returned in order.
///
/// Once exhausted, every further roll is 1.
#[derive(Debug, Clone, Default)]
pub struct FixedRolls {
    rolls: VecDeque<u32>,
}

impl FixedRolls {
    /// A source that returns `rolls` in order.
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RollSource for FixedRolls {
    fn roll_d10(&mut self) -> u32 {
        self.rolls.pop_front().unwrap_or(1)
    }
}

/// Adapts a closure into a [`RollSource`].
pub struct RollFn<F>(pub F);

impl<F: FnMut() -> u32> RollSource for RollFn<F> {
    fn roll_d10(&mut self) -> u32 {
        (self.0)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rng_rolls_stay_on_the_die() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let roll = rng.roll_d10();
            assert!((1..=CHECK_DIE).contains(&roll));
        }
    }

    #[test]
    fn seeded_rolls_repeat() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first: Vec<u32> = (0..10).map(|_| a.roll_d10()).collect();
        let second: Vec<u32> = (0..10).map(|_| b.roll_d10()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn fixed_rolls_in_order() {
        let mut rolls = FixedRolls::new([3, 9]);
        assert_eq!(rolls.remaining(), 2);
        assert_eq!(rolls.roll_d10(), 3);
        assert_eq!(rolls.roll_d10(), 9);
        assert_eq!(rolls.roll_d10(), 1);
    }

    #[test]
    fn closure_source() {
        let mut calls = 0;
        {
            let mut source = RollFn(|| {
                calls += 1;
                7
            });
            assert_eq!(source.roll_d10(), 7);
            assert_eq!(source.roll_d10(), 7);
        }
        assert_eq!(calls, 2);
    }
}
