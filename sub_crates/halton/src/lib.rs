//! Radical inverse permutation tables for scrambled Halton sampling.
//!
//! The Halton sequence uses one prime base per dimension.  Scrambling each
//! base's digits with a random permutation decorrelates the dimensions and
//! removes the visible structure of the plain sequence in high bases.  This
//! crate builds those permutations: one uniformly random permutation of
//! `[0, p)` for each of the first `PRIME_TABLE_SIZE` primes `p`, all packed
//! into a single flat buffer suitable for uploading to the GPU.

#![allow(clippy::unreadable_literal)]

use rand::Rng;

// This `include` provides `PRIME_TABLE_SIZE`, `PRIME_SUM`, `PRIMES` and
// `PRIME_OFFSETS`.  See the build.rs file for how this included file is
// generated.
include!(concat!(env!("OUT_DIR"), "/primes.inc"));

/// The largest f32 below 1.0.
pub const ONE_MINUS_EPSILON: f32 = 0.99999994;

/// A flat table holding one digit permutation per prime base.
///
/// The permutation for the prime at index `i` of `PRIMES` lives at
/// `PRIME_OFFSETS[i]..PRIME_OFFSETS[i] + PRIMES[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable {
    perms: Vec<u32>,
}

impl PermutationTable {
    /// Builds a new table of random permutations, drawing all randomness
    /// from `rng`.
    ///
    /// The result is fully determined by the random stream, so a seeded
    /// generator gives a reproducible table.
    pub fn build<R: Rng + ?Sized>(rng: &mut R) -> PermutationTable {
        let mut perms = vec![0u32; PRIME_SUM];

        let mut offset = 0;
        for &prime in PRIMES.iter() {
            let sub = &mut perms[offset..(offset + prime as usize)];
            for (j, n) in sub.iter_mut().enumerate() {
                *n = j as u32;
            }
            shuffle(sub, &mut *rng);
            offset += prime as usize;
        }
        debug_assert_eq!(offset, PRIME_SUM);

        PermutationTable { perms: perms }
    }

    /// Builds a table where every permutation is the identity.  Scrambled
    /// radical inverses computed with it match the plain radical inverse.
    pub fn identity() -> PermutationTable {
        let mut perms = Vec::with_capacity(PRIME_SUM);
        for &prime in PRIMES.iter() {
            perms.extend(0..prime);
        }

        PermutationTable { perms: perms }
    }

    /// The permutation for the prime base at `base_index`.
    #[inline]
    pub fn permutation(&self, base_index: usize) -> &[u32] {
        let start = PRIME_OFFSETS[base_index];
        &self.perms[start..(start + PRIMES[base_index] as usize)]
    }

    /// The whole table, all permutations concatenated in prime order.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.perms[..]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.perms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.perms.is_empty()
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.perms
    }

    /// Computes the radical inverse of `a` in the prime base at
    /// `base_index`, with each digit mapped through that base's
    /// permutation.
    pub fn scrambled_radical_inverse(&self, base_index: usize, mut a: u64) -> f32 {
        let perm = self.permutation(base_index);
        let base = PRIMES[base_index] as u64;
        let inv_base = 1.0 / base as f64;

        let mut reversed_digits: u64 = 0;
        let mut inv_base_n = 1.0f64;
        while a != 0 {
            let next = a / base;
            let digit = a - next * base;
            reversed_digits = reversed_digits * base + perm[digit as usize] as u64;
            inv_base_n *= inv_base;
            a = next;
        }

        // The infinite tail of digits that are all zero before
        // permutation contributes a geometric series of `perm[0]`.
        let tail = inv_base * perm[0] as f64 / (1.0 - inv_base);
        let v = inv_base_n * (reversed_digits as f64 + tail);
        (v as f32).min(ONE_MINUS_EPSILON)
    }
}

/// Computes the radical inverse of `a` in the prime base at `base_index`.
pub fn radical_inverse(base_index: usize, mut a: u64) -> f32 {
    let base = PRIMES[base_index] as u64;
    let inv_base = 1.0 / base as f64;

    let mut reversed_digits: u64 = 0;
    let mut inv_base_n = 1.0f64;
    while a != 0 {
        let next = a / base;
        let digit = a - next * base;
        reversed_digits = reversed_digits * base + digit;
        inv_base_n *= inv_base;
        a = next;
    }

    ((reversed_digits as f64 * inv_base_n) as f32).min(ONE_MINUS_EPSILON)
}

/// Unbiased in-place Fisher-Yates shuffle.
///
/// Each position draws its partner uniformly from the not-yet-placed
/// remainder of the slice, so every permutation is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(values: &mut [T], rng: &mut R) {
    let n = values.len();
    for i in 0..n {
        let other = rng.gen_range(i..n);
        values.swap(i, other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn is_permutation(perm: &[u32]) -> bool {
        let mut seen = vec![false; perm.len()];
        for &n in perm {
            if n as usize >= perm.len() || seen[n as usize] {
                return false;
            }
            seen[n as usize] = true;
        }
        true
    }

    #[test]
    fn prime_table() {
        assert_eq!(PRIMES.len(), PRIME_TABLE_SIZE);
        assert_eq!(&PRIMES[..10], &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert_eq!(PRIMES[PRIME_TABLE_SIZE - 1], 7919);
        assert_eq!(PRIME_OFFSETS[0], 0);
        assert_eq!(PRIME_OFFSETS[1], 2);
        assert_eq!(PRIME_OFFSETS[2], 5);
        assert_eq!(
            PRIME_SUM,
            PRIMES.iter().map(|&p| p as usize).sum::<usize>()
        );
    }

    #[test]
    fn table_size() {
        let mut rng = SmallRng::seed_from_u64(1);
        let table = PermutationTable::build(&mut rng);
        assert_eq!(table.len(), PRIME_SUM);
    }

    #[test]
    fn every_sub_table_is_a_permutation() {
        let mut rng = SmallRng::seed_from_u64(42);
        let table = PermutationTable::build(&mut rng);
        for i in 0..PRIME_TABLE_SIZE {
            let perm = table.permutation(i);
            assert_eq!(perm.len(), PRIMES[i] as usize);
            assert!(is_permutation(perm), "base index {} is not a permutation", i);
        }
    }

    #[test]
    fn seeded_build_is_deterministic() {
        let a = PermutationTable::build(&mut SmallRng::seed_from_u64(7));
        let b = PermutationTable::build(&mut SmallRng::seed_from_u64(7));
        let c = PermutationTable::build(&mut SmallRng::seed_from_u64(8));
        assert_eq!(a, b);
        assert!(a != c);
    }

    #[test]
    fn shuffle_has_no_fixed_point_bias() {
        // For an unbiased shuffle, each element stays in place with
        // probability 1/p.  Check that no position exceeds that by more
        // than a generous margin.
        const RUNS: usize = 20000;
        let mut rng = SmallRng::seed_from_u64(0xdeadbeef);
        for &p in PRIMES[..6].iter() {
            let p = p as usize;
            let mut stays = vec![0usize; p];
            let mut perm: Vec<u32> = (0..p as u32).collect();
            for _ in 0..RUNS {
                for (j, n) in perm.iter_mut().enumerate() {
                    *n = j as u32;
                }
                shuffle(&mut perm[..], &mut rng);
                for (j, &n) in perm.iter().enumerate() {
                    if n as usize == j {
                        stays[j] += 1;
                    }
                }
            }

            let expected = 1.0 / p as f64;
            let sigma = (expected * (1.0 - expected) / RUNS as f64).sqrt();
            for (j, &count) in stays.iter().enumerate() {
                let freq = count as f64 / RUNS as f64;
                assert!(
                    freq < expected + 5.0 * sigma,
                    "prime {}, position {}: stayed with frequency {}",
                    p,
                    j,
                    freq
                );
            }
        }
    }

    #[test]
    fn radical_inverse_base_2() {
        assert_eq!(radical_inverse(0, 0), 0.0);
        assert_eq!(radical_inverse(0, 1), 0.5);
        assert_eq!(radical_inverse(0, 2), 0.25);
        assert_eq!(radical_inverse(0, 3), 0.75);
        assert_eq!(radical_inverse(0, 4), 0.125);
    }

    #[test]
    fn radical_inverse_base_3() {
        assert!((radical_inverse(1, 1) - 1.0 / 3.0).abs() < 0.000001);
        assert!((radical_inverse(1, 2) - 2.0 / 3.0).abs() < 0.000001);
        assert!((radical_inverse(1, 3) - 1.0 / 9.0).abs() < 0.000001);
    }

    #[test]
    fn identity_scrambling_matches_plain() {
        let table = PermutationTable::identity();
        for base_index in 0..8 {
            for a in 0..100 {
                let plain = radical_inverse(base_index, a);
                let scrambled = table.scrambled_radical_inverse(base_index, a);
                assert!((plain - scrambled).abs() < 0.000001);
            }
        }
    }

    #[test]
    fn scrambled_stays_in_unit_interval() {
        let table = PermutationTable::build(&mut SmallRng::seed_from_u64(3));
        for base_index in 0..16 {
            for a in 0..1000 {
                let v = table.scrambled_radical_inverse(base_index, a);
                assert!(v >= 0.0 && v < 1.0);
            }
        }
    }
}
