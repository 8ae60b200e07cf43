//! Seeded randomness for dealing and the Easy tier.
//!
//! A session derives one stream per purpose from its seed, so the deal does
//! not shift when the AI consumes random choices and vice versa. Streams are
//! ChaCha8, which gives the same sequence on every platform.
//!
//! ```
//! use trunfo::core::GameRng;
//!
//! let mut deal = GameRng::new(42).for_context("deal");
//! let mut deal_again = GameRng::new(42).for_context("deal");
//!
//! let mut a: Vec<u32> = (1..=11).collect();
//! let mut b = a.clone();
//! deal.shuffle(&mut a);
//! deal_again.shuffle(&mut b);
//! assert_eq!(a, b);
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;

/// A seeded random stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeded when `seed` is given, entropy-seeded otherwise.
    #[must_use]
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or_else(rand::random))
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive the stream for `context` ("deal", "ai", ...).
    ///
    /// Depends only on this stream's seed and the context name, never on
    /// how much of this stream has been consumed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Uniform pick; `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }
}
