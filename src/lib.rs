//! # polytab
//!
//! Polynomials in `x`, `y`, `z` kept in a unique canonical form, and an
//! open-addressing hash table that can be keyed by them.
//!
//! - [`Term`]: one monomial with a packed decimal degree
//! - [`Polynomial`]: parsing, canonicalization, merge-based arithmetic
//! - [`HashTable`]: linear probing, tombstones, growth under load, and a
//!   randomized [`UniversalHash`] over each key's [`StructuralHash`]
//!
//! ```
//! use polytab::{HashTable, Polynomial};
//!
//! let p: Polynomial = "x^3 + x + 1".parse()?;
//! let q: Polynomial = "x^2 + 1".parse()?;
//! let product = p.checked_mul(&q)?;
//! assert_eq!(product.to_string(), "x^5+2x^3+x^2+x+1");
//!
//! let mut table = HashTable::new();
//! table.insert(product.clone(), "p*q")?;
//! assert_eq!(table.find(&product)?, &"p*q");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod structures;
pub mod traits;
pub mod utils;

pub use traits::hash::{StructuralHash, HASH_PRIME};
pub use traits::store::{Store, TableError};

pub use structures::hash_table::{HashTable, Iter, IterMut, DEFAULT_CAPACITY, LOAD_FACTOR};
pub use structures::poly::Polynomial;
pub use structures::term::{PolyError, Term, MAX_EXPONENT};
pub use structures::universal::UniversalHash;
pub use utils::TOLERANCE;
