//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical deals and opponent picks
//! - **Forkable**: Each restart forks a fresh, reproducible stream
//! - **Context streams**: Dealing and opponent choices draw from independent
//!   sequences, so changing one never perturbs the other
//!
//! ```
//! use pile_match::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut next_game = rng.fork();
//!
//! // Original and fork produce different sequences
//! assert_ne!(
//!     (0..8).map(|_| rng.gen_range_usize(0..1000)).collect::<Vec<_>>(),
//!     (0..8).map(|_| next_game.gen_range_usize(0..1000)).collect::<Vec<_>>(),
//! );
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Context name of the stream used by the deck generator.
pub const DEAL_CONTEXT: &str = "deal";

/// Context name of the stream used by the automated opponent.
pub const OPPONENT_CONTEXT: &str = "opponent";

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    /// Used once per game generation.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);

        Self::new(hasher.finish())
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rng: &mut GameRng) -> Vec<usize> {
        (0..10).map(|_| rng.gen_range_usize(0..1000)).collect()
    }

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        assert_eq!(sample(&mut rng1), sample(&mut rng2));
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        assert_ne!(sample(&mut rng1), sample(&mut rng2));
    }

    #[test]
    fn test_fork_is_deterministic_and_distinct() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let first1 = rng1.fork();
        let first2 = rng2.fork();
        assert_eq!(first1.seed(), first2.seed());

        let second1 = rng1.fork();
        assert_ne!(first1.seed(), second1.seed());
    }

    #[test]
    fn test_contexts_are_independent() {
        let rng = GameRng::new(42);
        let mut deal = rng.for_context(DEAL_CONTEXT);
        let mut opponent = rng.for_context(OPPONENT_CONTEXT);

        assert_ne!(sample(&mut deal), sample(&mut opponent));

        let mut deal_again = GameRng::new(42).for_context(DEAL_CONTEXT);
        let mut deal = rng.for_context(DEAL_CONTEXT);
        assert_eq!(sample(&mut deal), sample(&mut deal_again));
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut data: Vec<u32> = (1..=20).collect();
        let original = data.clone();

        rng.shuffle(&mut data);
        assert_ne!(data, original);

        data.sort_unstable();
        assert_eq!(data, original);
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let items = [1, 2, 3, 4, 5];

        let chosen = rng.choose(&items).copied();
        assert!(chosen.is_some_and(|c| items.contains(&c)));

        let empty: [i32; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
