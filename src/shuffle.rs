//! Injectable ordering randomness for the distribution engine.

use rand::prelude::SliceRandom;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Reorders a slice in place. Every random decision the engine makes goes
/// through this trait.
pub trait Shuffler {
    fn shuffle<T>(&mut self, items: &mut [T]);
}

impl<S: Shuffler> Shuffler for &mut S {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        (**self).shuffle(items)
    }
}

#[derive(Debug, Clone)]
pub struct RandomShuffler {
    rng: SmallRng,
}

impl RandomShuffler {
    /// Same seed, same sequence of orders.
    pub fn seeded(seed: u64) -> RandomShuffler {
        RandomShuffler { rng: SmallRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> RandomShuffler {
        RandomShuffler { rng: SmallRng::from_entropy() }
    }
}

impl Default for RandomShuffler {
    fn default() -> Self {
        RandomShuffler::from_entropy()
    }
}

impl Shuffler for RandomShuffler {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        SliceRandom::shuffle(items, &mut self.rng);
    }
}

/// Leaves every order as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityShuffler;

impl Shuffler for IdentityShuffler {
    fn shuffle<T>(&mut self, _items: &mut [T]) {}
}
