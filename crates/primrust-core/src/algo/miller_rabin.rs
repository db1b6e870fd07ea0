use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config;
use crate::{Natural, Verdict};

/// Computes `base^exp mod modulus` by binary exponentiation.
///
/// The running value is reduced modulo `modulus` at every squaring step, so
/// operand size stays bounded by the modulus regardless of the exponent.
///
/// # Arguments
///
/// * `base` - The base of the exponentiation.
/// * `exp` - The exponent.
/// * `modulus` - The modulus; must be nonzero.
///
/// # Example
///
/// ```
/// use primrust_core::algo::mod_pow;
/// use primrust_core::Natural;
///
/// let r = mod_pow(&Natural::from(2u32), &Natural::from(10u32), &Natural::from(17u32));
/// assert_eq!(r, Natural::from(4u32)); // 1024 mod 17
/// ```
pub fn mod_pow(base: &Natural, exp: &Natural, modulus: &Natural) -> Natural {
    let zero = Natural::from(0u8);
    let one = Natural::from(1u8);
    let two = Natural::from(2u8);
    let mut result = one.clone();
    let mut base = base % modulus;
    let mut exp = exp.clone();
    while exp > zero {
        if &exp % &two == one {
            result = result * &base % modulus;
        }
        exp /= &two;
        base = &base * &base % modulus;
    }
    result
}

/// One Miller–Rabin round for witness `a`, with `n - 1 = 2^s * d`, `d` odd.
///
/// Returns `true` when the witness is consistent with `n` being prime:
/// `a^d == 1 (mod n)`, or `a^(2^r * d) == n-1 (mod n)` for some `r < s`.
/// Hitting `1` during the squaring chain (without having seen `n-1`) proves a
/// nontrivial square root of unity and fails the round.
fn passes(a: &Natural, d: &Natural, n: &Natural) -> bool {
    let one = Natural::from(1u8);
    let n_minus_one = n - &one;
    let mut x = mod_pow(a, d, n);
    if x == one || x == n_minus_one {
        return true;
    }
    // t runs through d, 2d, 4d, ... and lands exactly on n-1 after s doublings.
    let mut t = d.clone();
    while t != n_minus_one {
        x = &x * &x % n;
        t <<= 1;
        if x == one {
            return false;
        }
        if x == n_minus_one {
            return true;
        }
    }
    false
}

/// Classifies `n` as `Composite`, `Prime`, or `ProbablyPrime`.
///
/// For `n` below the largest tabulated threshold the verdict is exact: the
/// witness sets in [`config::witnesses::TABLE`] have zero false positives
/// below their bounds. Beyond the table, `amax = 2 * bit_len(n)^2` bounds the
/// witnesses examined:
///
/// - `fast == false`: every integer witness in `2..amax` is tested.
///   Deterministic but O(amax) modular exponentiations.
/// - `fast == true`: the 13 largest tabulated witnesses plus
///   [`config::witnesses::RANDOM_ROUNDS`] witnesses drawn uniformly from
///   `[41, amax)`. The verdict is [`Verdict::ProbablyPrime`], signaling
///   reduced certainty. The generator is reseeded from the wall clock on
///   every invocation, so repeated calls on the same `n` may examine
///   different witnesses.
///
/// Any failing witness short-circuits to `Composite` without evaluating the
/// remaining witnesses.
///
/// # Example
///
/// ```
/// use primrust_core::{classify, Natural, Verdict};
///
/// assert_eq!(classify(&Natural::from(97u32), false), Verdict::Prime);
/// assert_eq!(classify(&Natural::from(4u32), false), Verdict::Composite);
/// ```
pub fn classify(n: &Natural, fast: bool) -> Verdict {
    let one = Natural::from(1u8);
    if *n <= one || *n == Natural::from(4u8) {
        return Verdict::Composite;
    }
    if *n <= Natural::from(3u8) {
        return Verdict::Prime;
    }

    // n - 1 = 2^s * d with d odd
    let zero = Natural::from(0u8);
    let two = Natural::from(2u8);
    let mut d = n - &one;
    while &d % &two == zero {
        d /= &two;
    }

    for &(bound, set) in config::witnesses::TABLE {
        if *n < Natural::from(bound) {
            for &a in set {
                if !passes(&Natural::from(a), &d, n) {
                    return Verdict::Composite;
                }
            }
            return Verdict::Prime;
        }
    }

    beyond_table(n, &d, fast)
}

/// Witness selection above the last tabulated threshold.
fn beyond_table(n: &Natural, d: &Natural, fast: bool) -> Verdict {
    let bits = n.bit_len() as u64;
    let amax = config::amax::FACTOR * bits * bits;

    if !fast {
        for a in 2..amax {
            if !passes(&Natural::from(a), d, n) {
                return Verdict::Composite;
            }
        }
        return Verdict::Prime;
    }

    for &a in config::witnesses::EXTENDED {
        if !passes(&Natural::from(a), d, n) {
            return Verdict::Composite;
        }
    }
    let amin = config::witnesses::EXTENDED[config::witnesses::EXTENDED.len() - 1];
    let mut rng = StdRng::seed_from_u64(clock_seed());
    for _ in 0..config::witnesses::RANDOM_ROUNDS {
        let a = rng.gen_range(amin..amax.max(amin + 1));
        if !passes(&Natural::from(a), d, n) {
            return Verdict::Composite;
        }
    }
    Verdict::ProbablyPrime
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
