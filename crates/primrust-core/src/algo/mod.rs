//! Algorithm module containing the number-theoretic engines.
//!
//! # Strategies
//!
//! - **Miller–Rabin (`miller_rabin`)**: primality classification. Exact
//!   witness tables make the test deterministic for every input below the
//!   largest tabulated threshold; beyond that a heuristic bound
//!   $a_{max} = 2 \cdot \log_2(n)^2$ selects between an exhaustive
//!   deterministic sweep and a cheap probabilistic sample.
//! - **Trial division (`trial_division`)**: factorization by repeated
//!   smallest-divisor search, $O(\sqrt{x})$ per scan. Adequate for moderately
//!   sized composites; large semiprimes cost seconds, not milliseconds.

pub mod miller_rabin;
pub mod trial_division;

pub use miller_rabin::{classify, mod_pow};
pub use trial_division::factors;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Natural, Verdict};

    #[test]
    fn classify_and_factor_agree() {
        for n in [2u32, 4, 12, 97, 221, 561, 7919] {
            let n = Natural::from(n);
            let fs = factors(&n);
            match classify(&n, true) {
                Verdict::Composite => assert!(!fs.is_empty(), "{} has factors", n),
                _ => assert!(fs.is_empty(), "{} is prime, no proper factors", n),
            }
        }
    }

    #[test]
    fn factor_product_restores_input() {
        let n = Natural::from(2u32 * 2 * 3 * 5 * 7 * 7 * 11);
        let product = factors(&n)
            .iter()
            .fold(Natural::from(1u8), |acc, f| acc * f);
        assert_eq!(product, n);
    }
}
