//! Integration tests for the PrimRust CLI binary.
//!
//! These tests verify the CLI behavior by running the actual binary and
//! checking its output and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

/// Returns a Command configured to run the primrust CLI binary.
fn primrust_cmd() -> Command {
    Command::cargo_bin("primrust").unwrap()
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn cli_classifies_prime() {
    primrust_cmd()
        .arg("97")
        .assert()
        .success()
        .stdout(predicate::str::contains("97 is prime"));
}

#[test]
fn cli_classifies_composite() {
    primrust_cmd()
        .arg("96")
        .assert()
        .success()
        .stdout(predicate::str::contains("96 is composite"));
}

#[test]
fn cli_reports_mode() {
    primrust_cmd()
        .arg("97")
        .assert()
        .success()
        .stdout(predicate::str::contains("deterministic"));

    primrust_cmd()
        .args(["97", "--fast"])
        .assert()
        .success()
        .stdout(predicate::str::contains("near-deterministic"));
}

#[test]
fn cli_handles_huge_numbers() {
    // 2^128: echoed exactly, classified composite.
    primrust_cmd()
        .arg("340282366920938463463374607431768211456")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "340282366920938463463374607431768211456 is composite",
        ));
}

// ============================================================================
// Factorization
// ============================================================================

#[test]
fn cli_factors_composite() {
    primrust_cmd()
        .args(["factor", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 = 2 x 2 x 3"));
}

#[test]
fn cli_factor_of_prime_reports_none() {
    primrust_cmd()
        .args(["factor", "97"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no proper factors"));
}

// ============================================================================
// Input validation
// ============================================================================

#[test]
fn cli_rejects_non_numbers() {
    primrust_cmd()
        .arg("abc")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a non-negative integer"));
}

#[test]
fn cli_rejects_negative_numbers() {
    primrust_cmd()
        .args(["factor", "-12"])
        .assert()
        .failure();
}

#[test]
fn cli_without_arguments_prints_help() {
    primrust_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}
