//! Integration tests for the deferred AsyncOutcome variant.
//!
//! A deferred outcome settles at most once; its handlers run at settlement,
//! exactly once, no matter how many times the outcome is awaited afterward.
//! Re-awaiting only re-reads the settled result.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rstest::rstest;
use settle::fault::{Fault, FaultKind};
use settle::outcome::{AsyncOutcome, Outcome};

// =============================================================================
// Settlement
// =============================================================================

#[rstest]
#[tokio::test]
async fn value_settles_to_the_wrapped_value() {
    assert_eq!(AsyncOutcome::value(42).await, Ok(42));
}

#[rstest]
#[tokio::test]
async fn fault_settles_to_the_identical_fault() {
    let fault = Fault::generic("abc");
    let outcome: AsyncOutcome<i32> = AsyncOutcome::fault(fault.clone());
    assert_eq!(outcome.await, Err(fault));
}

#[rstest]
#[tokio::test]
async fn defer_settles_with_the_wrapped_future() {
    let outcome = AsyncOutcome::defer(async {
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok::<_, Fault>("late")
    });
    assert_eq!(outcome.await, Ok("late"));
}

#[rstest]
#[tokio::test]
async fn new_defers_the_closure_until_first_await() {
    let started = Arc::new(AtomicUsize::new(0));
    let started_clone = started.clone();

    let outcome = AsyncOutcome::new(move || {
        started_clone.fetch_add(1, Ordering::SeqCst);
        async { Ok::<_, Fault>(1) }
    });
    assert_eq!(started.load(Ordering::SeqCst), 0);

    assert_eq!(outcome.await, Ok(1));
    assert_eq!(started.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn settlement_is_monotonic_across_repeated_awaits() {
    let runs = Arc::new(AtomicUsize::new(0));
    let runs_clone = runs.clone();

    let outcome = AsyncOutcome::defer(async move {
        runs_clone.fetch_add(1, Ordering::SeqCst);
        Ok::<_, Fault>(7)
    });

    assert_eq!(outcome.settle().await, Ok(7));
    assert_eq!(outcome.settle().await, Ok(7));
    assert_eq!(outcome.settle().await, Ok(7));
    // The wrapped computation ran exactly once.
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn clones_observe_the_same_settlement() {
    let runs = Arc::new(AtomicUsize::new(0));
    let runs_clone = runs.clone();

    let outcome = AsyncOutcome::defer(async move {
        runs_clone.fetch_add(1, Ordering::SeqCst);
        Ok::<_, Fault>("shared")
    });
    let sibling = outcome.clone();

    assert_eq!(outcome.await, Ok("shared"));
    assert_eq!(sibling.await, Ok("shared"));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

// =============================================================================
// then / map
// =============================================================================

#[rstest]
#[tokio::test]
async fn then_on_fault_never_invokes_the_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();

    let outcome = AsyncOutcome::<i32>::fault(Fault::generic("abc")).then(move |_| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        Ok("hello")
    });

    assert_eq!(outcome.settle().await.unwrap_err().message(), "abc");
    assert_eq!(outcome.settle().await.unwrap_err().message(), "abc");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test]
async fn map_and_then_run_at_settlement_in_chain_order() {
    let outcome = AsyncOutcome::defer(async { Ok::<_, Fault>(10) })
        .map(|n| n * 2)
        .then(|n| Ok(n + 1));
    assert_eq!(outcome.await, Ok(21));
}

#[rstest]
#[tokio::test]
async fn then_deferred_chains_a_second_deferred_computation() {
    let outcome = AsyncOutcome::value(20)
        .then_deferred(|n| AsyncOutcome::defer(async move { Ok(n + 2) }));
    assert_eq!(outcome.await, Ok(22));
}

#[rstest]
#[tokio::test]
async fn branch_runs_exactly_one_handler_at_settlement() {
    let recovered = AsyncOutcome::<i32>::fault(Fault::generic("e")).branch(
        |n| Ok(n),
        |fault| Ok(i32::try_from(fault.message().len()).unwrap()),
    );
    assert_eq!(recovered.await, Ok(1));
}

// =============================================================================
// on_value side effects
// =============================================================================

#[rstest]
#[tokio::test]
async fn on_value_side_effect_runs_once_across_three_awaits() {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();

    let outcome = AsyncOutcome::value(1_usize).on_value(move |value| {
        counter_clone.fetch_add(*value, Ordering::SeqCst);
        Ok(())
    });

    assert_eq!(outcome.settle().await, Ok(1));
    assert_eq!(outcome.settle().await, Ok(1));
    assert_eq!(outcome.settle().await, Ok(1));
    // Each await yields 1, but the handler contributed only once.
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn failing_on_value_handler_becomes_the_outcome() {
    let outcome =
        AsyncOutcome::value(1).on_value(|_| Err(Fault::generic("observer broke")));
    assert_eq!(outcome.await.unwrap_err().message(), "observer broke");
}

// =============================================================================
// catch
// =============================================================================

#[rstest]
#[tokio::test]
async fn catch_all_matches_a_derived_category() {
    let outcome = AsyncOutcome::<usize>::fault(Fault::precondition("abc"))
        .catch(|fault| Ok(fault.message().len()));
    assert_eq!(outcome.await, Ok(3));
}

#[rstest]
#[tokio::test]
async fn unmatched_typed_catch_keeps_the_original_fault() {
    let original = Fault::precondition("def");
    let outcome = AsyncOutcome::<i32>::fault(original.clone())
        .catch_kind(FaultKind::NotFound, |_| Ok(20));
    assert_eq!(outcome.await, Err(original));
}

#[rstest]
#[tokio::test]
async fn catch_never_runs_on_a_value() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();

    let outcome = AsyncOutcome::value(5).catch(move |fault| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        Err(fault)
    });
    assert_eq!(outcome.await, Ok(5));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// on_error / convert_error
// =============================================================================

#[rstest]
#[tokio::test]
async fn on_error_observes_at_settlement_without_swallowing() {
    let observed = Arc::new(AtomicUsize::new(0));
    let observed_clone = observed.clone();
    let original = Fault::not_found("gone");

    let outcome = AsyncOutcome::<i32>::fault(original.clone()).on_error(move |_| {
        observed_clone.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert_eq!(outcome.settle().await, Err(original.clone()));
    assert_eq!(outcome.settle().await, Err(original));
    assert_eq!(observed.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn convert_error_on_a_value_never_invokes_the_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();

    let outcome = AsyncOutcome::value(11).convert_error(move |fault| {
        calls_clone.fetch_add(1, Ordering::SeqCst);
        fault
    });
    assert_eq!(outcome.await, Ok(11));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[rstest]
#[tokio::test]
async fn convert_error_always_results_in_a_fault() {
    let outcome = AsyncOutcome::<i32>::fault(Fault::not_found("row 3"))
        .convert_error(|fault| Fault::generic(format!("lookup failed: {}", fault.message())));
    let fault = outcome.await.unwrap_err();
    assert_eq!(fault.kind(), FaultKind::Generic);
    assert_eq!(fault.message(), "lookup failed: row 3");
}

#[rstest]
#[tokio::test]
async fn convert_error_kind_leaves_other_categories_untouched() {
    let original = Fault::precondition("bad");
    let outcome = AsyncOutcome::<i32>::fault(original.clone())
        .convert_error_kind(FaultKind::NotFound, |_| Fault::generic("rewritten"));
    assert_eq!(outcome.await, Err(original));
}

// =============================================================================
// finally
// =============================================================================

#[rstest]
#[tokio::test]
async fn finally_runs_cleanup_on_the_value_path() {
    let cleaned = Arc::new(AtomicUsize::new(0));
    let cleaned_clone = cleaned.clone();

    let outcome = AsyncOutcome::value(42).finally(move || {
        let counter = cleaned_clone.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    assert_eq!(outcome.await, Ok(42));
    assert_eq!(cleaned.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn finally_runs_cleanup_on_the_fault_path_and_preserves_the_fault() {
    let cleaned = Arc::new(AtomicUsize::new(0));
    let cleaned_clone = cleaned.clone();
    let original = Fault::generic("broken");

    let outcome = AsyncOutcome::<i32>::fault(original.clone()).finally(move || {
        let counter = cleaned_clone.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    assert_eq!(outcome.await, Err(original));
    assert_eq!(cleaned.load(Ordering::SeqCst), 1);
}

#[rstest]
#[tokio::test]
async fn finally_cleanup_runs_once_across_repeated_awaits() {
    let cleaned = Arc::new(AtomicUsize::new(0));
    let cleaned_clone = cleaned.clone();

    let outcome = AsyncOutcome::value(1).finally(move || {
        let counter = cleaned_clone.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });
    assert_eq!(outcome.settle().await, Ok(1));
    assert_eq!(outcome.settle().await, Ok(1));
    assert_eq!(cleaned.load(Ordering::SeqCst), 1);
}

// =============================================================================
// tick
// =============================================================================

#[rstest]
#[tokio::test]
async fn tick_settles_to_unit() {
    assert_eq!(AsyncOutcome::tick().await, Ok(()));
}

#[rstest]
#[tokio::test]
async fn tick_lets_scheduled_work_run_before_resuming() {
    let progressed = Arc::new(AtomicUsize::new(0));
    let progressed_clone = progressed.clone();

    let handle = tokio::spawn(async move {
        progressed_clone.fetch_add(1, Ordering::SeqCst);
    });

    // At least one suspension point lets the spawned task get scheduled.
    while progressed.load(Ordering::SeqCst) == 0 {
        AsyncOutcome::tick().settle().await.unwrap();
    }
    handle.await.unwrap();
    assert_eq!(progressed.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Lifting from the eager variant
// =============================================================================

#[rstest]
#[tokio::test]
async fn eager_outcome_lifts_into_a_pre_settled_deferred_one() {
    let lifted: AsyncOutcome<i32> = Outcome::value(5).into();
    assert_eq!(lifted.await, Ok(5));

    let failed: AsyncOutcome<i32> = Outcome::fault(Fault::generic("e")).into();
    assert!(failed.await.is_err());
}
