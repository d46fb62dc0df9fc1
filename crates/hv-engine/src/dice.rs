use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The engine's only source of randomness.
///
/// Seeded from [`EngineConfig::seed`](crate::config::EngineConfig::seed) so
/// runs are reproducible. Tests can queue forced outcomes, which are
/// consumed before the RNG is consulted.
#[derive(Debug, Clone)]
pub struct Dice {
    rng: StdRng,
    forced: VecDeque<u32>,
}

impl Dice {
    /// Create dice from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            forced: VecDeque::new(),
        }
    }

    /// Queue rolls to be returned, in order, before any random ones.
    pub fn force(&mut self, rolls: &[u32]) {
        self.forced.extend(rolls.iter().copied());
    }

    /// Roll a die with `sides` faces, returning 1..=sides.
    pub fn roll(&mut self, sides: u32) -> u32 {
        let sides = sides.max(1);
        match self.forced.pop_front() {
            Some(forced) => forced.clamp(1, sides),
            None => self.rng.random_range(1..=sides),
        }
    }

    /// A one-in-`sides` chance.
    pub fn roll_success(&mut self, sides: u32) -> bool {
        self.roll(sides) == 1
    }

    /// Pick one entry of a slice.
    pub fn choose<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        if options.is_empty() {
            return None;
        }
        let index = self.roll(options.len() as u32) as usize - 1;
        options.get(index)
    }
}
