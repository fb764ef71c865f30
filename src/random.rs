//! Seeded random number generation.
//!
//! Every run owns exactly one generator, created here and threaded through
//! strategy initialization and steps. There is no hidden global generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Creates a reproducible generator from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from fresh entropy when `None`.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Uniform draw in `[lo, hi]`. Tolerates `lo == hi`.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    (lo + (hi - lo) * rng.random::<f64>()).min(hi)
}

/// Standard normal draw.
#[inline]
pub fn normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.sample(StandardNormal)
}

/// Draws `count` distinct indices from `0..pool_size`, never `exclude`.
///
/// # Panics
/// Panics in debug builds when the pool is too small.
pub fn distinct_indices<R: Rng + ?Sized>(
    exclude: usize,
    count: usize,
    pool_size: usize,
    rng: &mut R,
) -> Vec<usize> {
    debug_assert!(count < pool_size, "pool too small for {count} distinct indices");
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let idx = rng.random_range(0..pool_size);
        if idx != exclude && !out.contains(&idx) {
            out.push(idx);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..10 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_uniform_degenerate_range() {
        let mut rng = create_rng(1);
        assert_eq!(uniform(&mut rng, 3.0, 3.0), 3.0);
        for _ in 0..100 {
            let v = uniform(&mut rng, -2.0, 5.0);
            assert!((-2.0..=5.0).contains(&v));
        }
    }

    #[test]
    fn test_distinct_indices() {
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let idx = distinct_indices(2, 3, 5, &mut rng);
            assert_eq!(idx.len(), 3);
            assert!(!idx.contains(&2));
            assert!(idx[0] != idx[1] && idx[1] != idx[2] && idx[0] != idx[2]);
        }
    }
}
