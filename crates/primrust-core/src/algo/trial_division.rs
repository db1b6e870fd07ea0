use crate::algo::miller_rabin::classify;
use crate::{Natural, Verdict};

/// Factorizes `x` into primes by trial division.
///
/// Returns the prime factors in ascending order, with multiplicities
/// represented by repetition (`factors(12) == [2, 2, 3]`). A prime or
/// probably-prime input has no proper factors to report and yields an empty
/// vector, as do `0` and `1`.
///
/// Each step scans `i = 2, 3, ...` while $i^2 \le \text{remaining}$ for the
/// smallest divisor; when none exists the remaining value is itself prime and
/// is emitted last. The scan is $O(\sqrt{x})$: fast for moderately sized
/// composites, seconds or worse for large semiprimes.
///
/// # Example
///
/// ```
/// use primrust_core::{factors, Natural};
///
/// let fs = factors(&Natural::from(12u32));
/// let expected: Vec<Natural> = [2u32, 2, 3].iter().map(|&f| Natural::from(f)).collect();
/// assert_eq!(fs, expected);
/// assert!(factors(&Natural::from(97u32)).is_empty());
/// ```
pub fn factors(x: &Natural) -> Vec<Natural> {
    let mut result = Vec::new();
    if classify(x, true) != Verdict::Composite {
        return result;
    }
    let zero = Natural::from(0u8);
    let one = Natural::from(1u8);
    let mut z = x.clone();
    while z > one {
        let mut i = Natural::from(2u8);
        let mut divisor = None;
        while &i * &i <= z {
            if &z % &i == zero {
                divisor = Some(i);
                break;
            }
            i += &one;
        }
        // No divisor up to sqrt(z): z itself is prime.
        let p = divisor.unwrap_or_else(|| z.clone());
        z /= &p;
        result.push(p);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nat(n: u128) -> Natural {
        Natural::from(n)
    }

    fn nats(ns: &[u128]) -> Vec<Natural> {
        ns.iter().map(|&n| nat(n)).collect()
    }

    #[test]
    fn factors_of_primes_and_units_are_empty() {
        assert!(factors(&nat(0)).is_empty());
        assert!(factors(&nat(1)).is_empty());
        assert!(factors(&nat(2)).is_empty());
        assert!(factors(&nat(97)).is_empty());
        assert!(factors(&nat(7919)).is_empty());
    }

    #[test]
    fn factors_known_values() {
        assert_eq!(factors(&nat(4)), nats(&[2, 2]));
        assert_eq!(factors(&nat(12)), nats(&[2, 2, 3]));
        assert_eq!(factors(&nat(221)), nats(&[13, 17]));
        assert_eq!(factors(&nat(561)), nats(&[3, 11, 17]));
        assert_eq!(factors(&nat(1024)), nats(&[2; 10]));
    }

    #[test]
    fn factors_are_ascending() {
        for n in [360u128, 9699690, 1234567890] {
            let fs = factors(&nat(n));
            for pair in fs.windows(2) {
                assert!(pair[0] <= pair[1], "factors of {} not ascending", n);
            }
        }
    }

    #[test]
    fn factors_product_restores_input() {
        for n in [4u128, 12, 360, 104_729 * 2, 999_983 * 3] {
            let n = nat(n);
            let product = factors(&n)
                .iter()
                .fold(Natural::from(1u8), |acc, f| acc * f);
            assert_eq!(product, n);
        }
    }

    #[test]
    fn factors_semiprime() {
        // 104723 and 104729 are consecutive primes.
        let n = nat(104_723 * 104_729);
        assert_eq!(factors(&n), nats(&[104_723, 104_729]));
    }

    #[test]
    fn factors_trailing_prime_remainder() {
        // 2 * 3 * 1000003: the scan stops at sqrt and emits the prime rest.
        let n = nat(2 * 3 * 1_000_003);
        assert_eq!(factors(&n), nats(&[2, 3, 1_000_003]));
    }
}
