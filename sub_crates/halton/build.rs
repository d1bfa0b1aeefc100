//! This file generates the table of prime bases used by this crate's
//! radical inverse permutations.

use std::{env, fs::File, io::Write, path::Path};

/// How many primes to generate.
const NUM_PRIMES: usize = 1000;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("primes.inc");
    let mut f = File::create(&dest_path).unwrap();

    let primes = first_primes(NUM_PRIMES);
    let sum: usize = primes.iter().sum();

    // Write table size and the summed length of all permutations.
    f.write_all(format!("pub const PRIME_TABLE_SIZE: usize = {};\n", NUM_PRIMES).as_bytes())
        .unwrap();
    f.write_all(format!("pub const PRIME_SUM: usize = {};\n", sum).as_bytes())
        .unwrap();

    // Write the primes.
    f.write_all(format!("pub const PRIMES: [u32; {}] = [\n", NUM_PRIMES).as_bytes())
        .unwrap();
    for p in primes.iter() {
        f.write_all(format!("    {},\n", p).as_bytes()).unwrap();
    }
    f.write_all("];\n".as_bytes()).unwrap();

    // Write the offset of each prime's permutation in a concatenated table.
    f.write_all(format!("pub const PRIME_OFFSETS: [usize; {}] = [\n", NUM_PRIMES).as_bytes())
        .unwrap();
    let mut offset = 0;
    for p in primes.iter() {
        f.write_all(format!("    {},\n", offset).as_bytes()).unwrap();
        offset += p;
    }
    f.write_all("];\n".as_bytes()).unwrap();
}

/// Returns the first `n` primes, by trial division against the primes
/// found so far.
fn first_primes(n: usize) -> Vec<usize> {
    let mut primes: Vec<usize> = Vec::with_capacity(n);
    let mut candidate = 2;
    while primes.len() < n {
        if primes
            .iter()
            .take_while(|&&p| p * p <= candidate)
            .all(|&p| candidate % p != 0)
        {
            primes.push(candidate);
        }
        candidate += 1;
    }
    primes
}
