//! Random identifiers used as collection name suffixes.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

/// Length of keys generated when the caller does not pick one.
pub const DEFAULT_KEY_LENGTH: usize = 8;

/// Generate a lowercase ASCII string of `length` letters.
///
/// With a `seed` the result is reproducible; without one it comes from the
/// thread-local RNG.
pub fn random_key(length: usize, seed: Option<u64>) -> String {
    match seed {
        Some(seed) => letters(&mut StdRng::seed_from_u64(seed), length),
        None => letters(&mut thread_rng(), length),
    }
}

fn letters<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect()
}
