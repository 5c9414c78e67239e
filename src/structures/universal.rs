//! Universal hash family `h(k) = ((a * k + b) mod P) mod m`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::traits::hash::HASH_PRIME;

/// One member of the family, fixed by its parameters `a` and `b`.
///
/// A table draws its member once at construction and keeps it for its
/// whole lifetime, growth included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniversalHash {
    a: u64,
    b: u64,
}

impl UniversalHash {
    /// Draw `a` in `[1, P-1]` and `b` in `[0, P-1]` from `rng`.
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            a: rng.gen_range(1..HASH_PRIME),
            b: rng.gen_range(0..HASH_PRIME),
        }
    }

    /// Deterministic parameters derived from `seed`.
    ///
    /// # Example
    ///
    /// ```
    /// use polytab::UniversalHash;
    ///
    /// assert_eq!(UniversalHash::seeded(7), UniversalHash::seeded(7));
    /// ```
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    /// Parameters drawn from the thread-local entropy-seeded generator.
    pub fn from_entropy() -> Self {
        Self::from_rng(&mut rand::thread_rng())
    }

    /// Explicit parameters. Returns `None` unless `1 <= a < P` and `b < P`.
    pub fn with_params(a: u64, b: u64) -> Option<Self> {
        if a == 0 || a >= HASH_PRIME || b >= HASH_PRIME {
            return None;
        }
        Some(Self { a, b })
    }

    /// The multiplier `a`.
    pub const fn a(&self) -> u64 {
        self.a
    }

    /// The offset `b`.
    pub const fn b(&self) -> u64 {
        self.b
    }

    /// Map a structural hash to a bucket in `[0, capacity)`.
    #[inline]
    pub fn bucket(&self, key_hash: u64, capacity: usize) -> usize {
        debug_assert!(capacity > 0);
        let mixed = (u128::from(self.a) * u128::from(key_hash) + u128::from(self.b))
            % u128::from(HASH_PRIME);
        (mixed % capacity as u128) as usize
    }
}
