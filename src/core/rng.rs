//! Deterministic random number generation for symbol draws.
//!
//! Same seed, same sequence.
//!
//! ```
//! use recall_engine::core::{Alphabet, GameRng};
//!
//! let alphabet = Alphabet::default();
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! assert_eq!(a.draw_symbol(&alphabet), b.draw_symbol(&alphabet));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::symbol::{Alphabet, Symbol};

/// Deterministic RNG backing the sequence generator.
///
/// Uses ChaCha8 for speed while maintaining good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a symbol uniformly from the alphabet.
    ///
    /// Draws are independent; the same symbol may come up repeatedly.
    pub fn draw_symbol(&mut self, alphabet: &Alphabet) -> Symbol {
        Symbol(self.inner.gen_range(0..alphabet.len()) as u8)
    }
}
