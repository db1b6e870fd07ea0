//! Witness tables and tuning parameters for the primality test.
//!
//! This module centralizes the deterministic Miller–Rabin witness tables and
//! the constants governing the probabilistic fallback, to keep the
//! correctness-critical literals in one place.

/// Deterministic witness sets for bounded input ranges.
pub mod witnesses {
    /// The largest tabulated witness set.
    ///
    /// Also the deterministic backbone of the probabilistic fallback for
    /// inputs beyond the last tabulated threshold.
    pub const EXTENDED: &[u64] = &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

    /// Ordered table of `(exclusive upper bound, witness set)` pairs.
    ///
    /// For `n` below a bound, testing exactly the paired witness bases is
    /// *exact*: zero false positives for every `n` below that bound. The
    /// entries are the published minimal witness bases for 64-bit-class
    /// inputs and must be reproduced literally.
    pub const TABLE: &[(u128, &[u64])] = &[
        (2_047, &[2]),
        (1_373_653, &[2, 3]),
        (9_080_191, &[31, 73]),
        (25_326_001, &[2, 3, 5]),
        (3_215_031_751, &[2, 3, 5, 7]),
        (4_759_123_141, &[2, 7, 61]),
        (1_122_004_669_633, &[2, 13, 23, 1_662_803]),
        (2_152_302_898_747, &[2, 3, 5, 7, 11]),
        (3_474_749_660_383, &[2, 3, 5, 7, 11, 13]),
        (341_550_071_728_321, &[2, 3, 5, 7, 11, 13, 17]),
        (3_825_123_056_546_413_051, &[2, 3, 5, 7, 11, 13, 17, 19, 23]),
        // 2^64
        (
            18_446_744_073_709_551_616,
            &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37],
        ),
        (
            318_665_857_834_031_151_167_461,
            &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37],
        ),
        (3_317_044_064_679_887_385_961_981, EXTENDED),
    ];

    /// Number of pseudo-random witnesses added per invocation in fast mode.
    pub const RANDOM_ROUNDS: usize = 5;
}

/// Heuristic deterministic witness bound for unbounded inputs.
pub mod amax {
    /// `amax = FACTOR * bit_len(n)^2`.
    ///
    /// Exhausting every witness below `amax` is deterministic but costs
    /// O(amax) modular exponentiations, which is why fast mode samples from
    /// `[largest tabulated witness, amax)` instead.
    pub const FACTOR: u64 = 2;
}
