#[macro_use]
extern crate proptest;
extern crate halton;
extern crate rand;

use halton::{shuffle, PermutationTable, PRIMES, PRIME_TABLE_SIZE};
use proptest::test_runner::Config;
use rand::{rngs::SmallRng, SeedableRng};

/// Checks that `perm` holds every integer in `[0, perm.len())` exactly once.
fn is_permutation(perm: &[u32]) -> bool {
    let mut sorted = perm.to_vec();
    sorted.sort_unstable();
    sorted.iter().enumerate().all(|(i, &n)| n as usize == i)
}

proptest! {
    // Each case builds a full table, so keep the case count modest.
    #![proptest_config(Config::with_cases(16))]

    #[test]
    fn pt_table_holds_permutations(seed in proptest::num::u64::ANY) {
        let table = PermutationTable::build(&mut SmallRng::seed_from_u64(seed));
        for i in 0..PRIME_TABLE_SIZE {
            let perm = table.permutation(i);
            prop_assert_eq!(perm.len(), PRIMES[i] as usize);
            prop_assert!(is_permutation(perm));
        }
    }

    #[test]
    fn pt_table_is_reproducible(seed in proptest::num::u64::ANY) {
        let a = PermutationTable::build(&mut SmallRng::seed_from_u64(seed));
        let b = PermutationTable::build(&mut SmallRng::seed_from_u64(seed));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn pt_scrambled_in_unit_interval(seed in proptest::num::u64::ANY, base_index in 0usize..64) {
        let table = PermutationTable::build(&mut SmallRng::seed_from_u64(seed));
        for a in 0..10_000u64 {
            let v = table.scrambled_radical_inverse(base_index, a * 97);
            prop_assert!(v >= 0.0 && v < 1.0);
        }
    }
}

proptest! {
    #[test]
    fn pt_shuffle_keeps_elements(seed in proptest::num::u64::ANY, len in 0usize..500) {
        let mut values: Vec<u32> = (0..len as u32).collect();
        shuffle(&mut values[..], &mut SmallRng::seed_from_u64(seed));
        prop_assert!(is_permutation(&values));
    }
}
