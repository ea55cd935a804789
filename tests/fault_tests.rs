//! Unit tests for Fault and FaultKind.
//!
//! FaultKind is the category handle the typed combinators match against.
//! Matching is subtype-aware: Any accepts everything, Contract accepts its
//! derived precondition/postcondition categories, and every other category
//! accepts only itself.

use rstest::rstest;
use settle::fault::{Fault, FaultKind, contract};

// =============================================================================
// Category Matching
// =============================================================================

#[rstest]
#[case(FaultKind::Generic)]
#[case(FaultKind::NotFound)]
#[case(FaultKind::Contract)]
#[case(FaultKind::PreCondition)]
#[case(FaultKind::PostCondition)]
fn any_accepts_every_category(#[case] kind: FaultKind) {
    let fault = Fault::new(kind, "message");
    assert!(fault.is(FaultKind::Any));
}

#[rstest]
fn precondition_fault_matches_contract_descriptor() {
    let fault = Fault::precondition("abc");
    assert!(fault.is(FaultKind::PreCondition));
    assert!(fault.is(FaultKind::Contract));
}

#[rstest]
fn plain_fault_does_not_match_derived_descriptor() {
    let fault = Fault::generic("abc");
    assert!(!fault.is(FaultKind::PreCondition));
    assert!(!fault.is(FaultKind::Contract));
}

#[rstest]
fn sibling_categories_do_not_match_each_other() {
    let fault = Fault::not_found("missing");
    assert!(!fault.is(FaultKind::Generic));
    assert!(!fault.is(FaultKind::PostCondition));
}

// =============================================================================
// Fault Values
// =============================================================================

#[rstest]
fn fault_preserves_kind_and_message() {
    let fault = Fault::postcondition("sum drifted");
    assert_eq!(fault.kind(), FaultKind::PostCondition);
    assert_eq!(fault.message(), "sum drifted");
}

#[rstest]
fn fault_display_names_the_category() {
    assert_eq!(
        format!("{}", Fault::not_found("no such key")),
        "not found: no such key"
    );
    assert_eq!(
        format!("{}", Fault::contract("broken invariant")),
        "contract violation: broken invariant"
    );
}

#[rstest]
fn fault_clones_compare_equal() {
    let fault = Fault::precondition("abc");
    assert_eq!(fault.clone(), fault);
}

// =============================================================================
// Contract Checks
// =============================================================================

#[rstest]
fn require_produces_precondition_fault() {
    assert!(contract::require(1 < 2, "ordering").is_ok());

    let fault = contract::require(2 < 1, "ordering").unwrap_err();
    assert_eq!(fault.kind(), FaultKind::PreCondition);
    assert!(fault.is(FaultKind::Contract));
}

#[rstest]
fn ensure_produces_postcondition_fault() {
    let fault = contract::ensure(false, "balance must be non-negative").unwrap_err();
    assert_eq!(fault.kind(), FaultKind::PostCondition);
    assert!(fault.is(FaultKind::Contract));
}

#[rstest]
fn found_reports_absence_as_not_found() {
    assert_eq!(contract::found(Some(9), "missing entry"), Ok(9));

    let absent: Option<i32> = None;
    let fault = contract::found(absent, "missing entry").unwrap_err();
    assert_eq!(fault.kind(), FaultKind::NotFound);
    assert_eq!(fault.message(), "missing entry");
}

#[rstest]
fn contract_checks_are_independent_calls() {
    // Two violations of the same check produce independent, equal faults.
    let first = contract::require(false, "same message").unwrap_err();
    let second = contract::require(false, "same message").unwrap_err();
    assert_eq!(first, second);
}
