//! Stateless contract checks.
//!
//! These free functions are the construction surface for contract faults.
//! They hold no process-wide state; each call independently produces a
//! `Result` that can be fed into an outcome chain with `?`.

use super::{Fault, FaultKind};

/// Checks a precondition, producing a [`FaultKind::PreCondition`] fault
/// when it does not hold.
///
/// # Errors
///
/// Returns a precondition fault carrying `message` when `condition` is
/// false.
///
/// # Examples
///
/// ```rust
/// use settle::fault::{FaultKind, contract};
///
/// assert!(contract::require(true, "must be positive").is_ok());
///
/// let fault = contract::require(false, "must be positive").unwrap_err();
/// assert!(fault.is(FaultKind::Contract));
/// ```
pub fn require(condition: bool, message: impl Into<String>) -> Result<(), Fault> {
    if condition {
        Ok(())
    } else {
        Err(Fault::new(FaultKind::PreCondition, message))
    }
}

/// Checks a postcondition, producing a [`FaultKind::PostCondition`] fault
/// when it does not hold.
///
/// # Errors
///
/// Returns a postcondition fault carrying `message` when `condition` is
/// false.
pub fn ensure(condition: bool, message: impl Into<String>) -> Result<(), Fault> {
    if condition {
        Ok(())
    } else {
        Err(Fault::new(FaultKind::PostCondition, message))
    }
}

/// Unwraps an expected-present value, producing a [`FaultKind::NotFound`]
/// fault when it is absent.
///
/// This is the adapter lookup code uses to report absence through an
/// outcome chain instead of panicking.
///
/// # Errors
///
/// Returns a not-found fault carrying `message` when `option` is `None`.
///
/// # Examples
///
/// ```rust
/// use settle::fault::{FaultKind, contract};
///
/// assert_eq!(contract::found(Some(7), "missing key"), Ok(7));
///
/// let missing: Option<i32> = None;
/// let fault = contract::found(missing, "missing key").unwrap_err();
/// assert!(fault.is(FaultKind::NotFound));
/// assert_eq!(fault.message(), "missing key");
/// ```
pub fn found<T>(option: Option<T>, message: impl Into<String>) -> Result<T, Fault> {
    option.ok_or_else(|| Fault::new(FaultKind::NotFound, message.into()))
}
