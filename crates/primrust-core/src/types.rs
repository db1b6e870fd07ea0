use std::fmt::{self, Display};

/// Arbitrary-precision natural number used throughout the crate.
///
/// Inputs and factor values are never narrowed to a fixed-width integer:
/// request values may exceed 64/128 bits, and the decimal string
/// representation round-trips exactly.
pub type Natural = ibig::UBig;

/// Outcome of a primality classification.
///
/// `Prime` and `Composite` are certain. `ProbablyPrime` is produced by the
/// probabilistic witness selection for inputs beyond the deterministic
/// witness tables and carries a negligibly small, witness-count-dependent
/// chance of a false positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The number has a nontrivial divisor.
    Composite,
    /// The number is certainly prime.
    Prime,
    /// The number passed every probabilistic witness round.
    ProbablyPrime,
}

impl Verdict {
    /// Collapses the verdict into a boolean, counting `ProbablyPrime` as
    /// prime.
    ///
    /// # Example
    ///
    /// ```
    /// use primrust_core::Verdict;
    ///
    /// assert!(Verdict::Prime.is_prime());
    /// assert!(Verdict::ProbablyPrime.is_prime());
    /// assert!(!Verdict::Composite.is_prime());
    /// ```
    #[inline]
    pub fn is_prime(self) -> bool {
        !matches!(self, Verdict::Composite)
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Composite => write!(f, "composite"),
            Verdict::Prime => write!(f, "prime"),
            Verdict::ProbablyPrime => write!(f, "probably prime"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_boolean_collapse() {
        assert!(Verdict::Prime.is_prime());
        assert!(Verdict::ProbablyPrime.is_prime());
        assert!(!Verdict::Composite.is_prime());
    }

    #[test]
    fn verdict_display() {
        assert_eq!(Verdict::Prime.to_string(), "prime");
        assert_eq!(Verdict::ProbablyPrime.to_string(), "probably prime");
        assert_eq!(Verdict::Composite.to_string(), "composite");
    }
}
