/// Prime modulus shared by key folding and the universal hash family.
pub const HASH_PRIME: u64 = 1_000_000_007;

const _: () = assert!(is_prime(HASH_PRIME));

/// Multiplier of the string-hash style recurrence `acc * 31 + part`.
pub const HASH_BASE: u64 = 31;

/// A key that can be reduced to an integer by walking its structure.
///
/// The result must lie in `[0, HASH_PRIME)` and must agree for any two
/// keys that compare equal. Tables feed it through their own randomized
/// [`UniversalHash`](crate::structures::universal::UniversalHash) to pick
/// a bucket, so implementations need not mix bits themselves.
pub trait StructuralHash {
    /// Fold this key into an accumulator in `[0, HASH_PRIME)`.
    fn structural_hash(&self) -> u64;
}

/// One step of the recurrence: `(acc * 31 + part) mod HASH_PRIME`.
///
/// Negative parts are reduced to their non-negative residue first.
#[inline]
pub fn fold(acc: u64, part: i64) -> u64 {
    let part = part.rem_euclid(HASH_PRIME as i64) as u64;
    ((acc % HASH_PRIME) * HASH_BASE + part) % HASH_PRIME
}

/// Trial division by 2, 3 and then `6k ± 1`.
const fn is_prime(n: u64) -> bool {
    match n {
        0 | 1 => false,
        2 | 3 => true,
        _ if n % 2 == 0 || n % 3 == 0 => false,
        _ => {
            let mut d = 5;
            while d * d <= n {
                if n % d == 0 || n % (d + 2) == 0 {
                    return false;
                }
                d += 6;
            }
            true
        }
    }
}

macro_rules! impl_integer_hash {
    ($($t:ty),*) => {
        $(
            impl StructuralHash for $t {
                #[inline]
                fn structural_hash(&self) -> u64 {
                    (*self as i128).rem_euclid(HASH_PRIME as i128) as u64
                }
            }
        )*
    };
}

impl_integer_hash!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl StructuralHash for str {
    fn structural_hash(&self) -> u64 {
        self.bytes().fold(0, |acc, b| fold(acc, i64::from(b)))
    }
}

impl StructuralHash for String {
    fn structural_hash(&self) -> u64 {
        self.as_str().structural_hash()
    }
}

impl<T: StructuralHash + ?Sized> StructuralHash for &T {
    fn structural_hash(&self) -> u64 {
        (**self).structural_hash()
    }
}
