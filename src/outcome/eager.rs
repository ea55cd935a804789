//! Eagerly-settled outcomes.
//!
//! An [`Outcome`] represents a computation whose result is already known.
//! The computation supplied to [`Outcome::run`] executes immediately, at
//! construction, and the outcome - value or fault - is frozen from then on.
//! Every combinator executes inline on the caller's stack; the entire chain
//! runs before the constructing statement returns.
//!
//! # Examples
//!
//! ```rust
//! use settle::fault::Fault;
//! use settle::outcome::Outcome;
//!
//! let outcome = Outcome::run(|| Ok::<_, Fault>(21)).map(|n| n * 2);
//! assert_eq!(outcome.into_result(), Ok(42));
//! ```

use std::future::{Ready, ready};
use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::fault::{Fault, FaultKind};

use super::AsyncOutcome;

/// An eagerly-settled outcome: exactly one of a value or a fault.
///
/// `Outcome<T>` is born settled - there is no pending state. It is immutable
/// after construction; combinators consume it and produce a new settled
/// outcome.
///
/// # Examples
///
/// ```rust
/// use settle::fault::Fault;
/// use settle::outcome::Outcome;
///
/// let ok = Outcome::value(1);
/// assert!(ok.is_value());
///
/// let failed: Outcome<i32> = Outcome::fault(Fault::generic("boom"));
/// assert!(failed.is_fault());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    settled: Result<T, Fault>,
}

// =============================================================================
// Construction
// =============================================================================

impl<T> Outcome<T> {
    /// Runs a computation immediately and captures its outcome.
    ///
    /// Side effects inside `action` happen exactly once, at this call.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::Fault;
    /// use settle::outcome::Outcome;
    ///
    /// let mut calls = 0;
    /// let outcome = Outcome::run(|| {
    ///     calls += 1;
    ///     Ok::<_, Fault>("done")
    /// });
    /// assert_eq!(calls, 1);
    /// assert_eq!(outcome.into_result(), Ok("done"));
    /// ```
    pub fn run<F>(action: F) -> Self
    where
        F: FnOnce() -> Result<T, Fault>,
    {
        Self { settled: action() }
    }

    /// Runs a computation that may panic, converting a panic into a
    /// generic fault.
    ///
    /// This is the boundary adapter for host code that signals failure by
    /// panicking. Code written against this library should return faults
    /// directly through [`Outcome::run`] instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::FaultKind;
    /// use settle::outcome::Outcome;
    ///
    /// let outcome = Outcome::capture(|| "fine");
    /// assert_eq!(outcome.into_result(), Ok("fine"));
    ///
    /// let panicked: Outcome<i32> = Outcome::capture(|| panic!("oops"));
    /// let fault = panicked.into_result().unwrap_err();
    /// assert!(fault.is(FaultKind::Generic));
    /// assert_eq!(fault.message(), "oops");
    /// ```
    pub fn capture<F>(action: F) -> Self
    where
        F: FnOnce() -> T,
    {
        match catch_unwind(AssertUnwindSafe(action)) {
            Ok(value) => Self::value(value),
            Err(panic_info) => {
                let message = if let Some(text) = panic_info.downcast_ref::<&str>() {
                    (*text).to_string()
                } else if let Some(text) = panic_info.downcast_ref::<String>() {
                    text.clone()
                } else {
                    "unknown panic".to_string()
                };
                Self::fault(Fault::generic(message))
            }
        }
    }

    /// Wraps a known value without running any code.
    pub const fn value(value: T) -> Self {
        Self { settled: Ok(value) }
    }

    /// Wraps a known fault without running any code.
    pub const fn fault(fault: Fault) -> Self {
        Self { settled: Err(fault) }
    }

    /// Converts a lookup result, producing the given fault when absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::{Fault, FaultKind};
    /// use settle::outcome::Outcome;
    ///
    /// let hit = Outcome::from_option(Some(3), || Fault::not_found("missing"));
    /// assert_eq!(hit.into_result(), Ok(3));
    ///
    /// let miss: Outcome<i32> = Outcome::from_option(None, || Fault::not_found("missing"));
    /// assert!(miss.fault_ref().unwrap().is(FaultKind::NotFound));
    /// ```
    pub fn from_option<F>(option: Option<T>, fault: F) -> Self
    where
        F: FnOnce() -> Fault,
    {
        Self {
            settled: option.ok_or_else(fault),
        }
    }
}

// =============================================================================
// Extraction
// =============================================================================

impl<T> Outcome<T> {
    /// Extracts the settled outcome.
    ///
    /// Extraction triggers no additional execution; the computation already
    /// ran at construction.
    ///
    /// # Errors
    ///
    /// Returns the contained fault when the outcome settled as a failure.
    #[inline]
    pub fn into_result(self) -> Result<T, Fault> {
        self.settled
    }

    /// Returns a reference to the contained value, if any.
    #[inline]
    pub const fn value_ref(&self) -> Option<&T> {
        match &self.settled {
            Ok(value) => Some(value),
            Err(_) => None,
        }
    }

    /// Returns a reference to the contained fault, if any.
    #[inline]
    pub const fn fault_ref(&self) -> Option<&Fault> {
        match &self.settled {
            Ok(_) => None,
            Err(fault) => Some(fault),
        }
    }

    /// Returns `true` if the outcome settled as a value.
    #[inline]
    pub const fn is_value(&self) -> bool {
        self.settled.is_ok()
    }

    /// Returns `true` if the outcome settled as a fault.
    #[inline]
    pub const fn is_fault(&self) -> bool {
        self.settled.is_err()
    }
}

// =============================================================================
// Value Combinators
// =============================================================================

impl<T> Outcome<T> {
    /// Transforms the contained value; a fault passes through unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::Fault;
    /// use settle::outcome::Outcome;
    ///
    /// let outcome = Outcome::value(21).map(|n| n * 2);
    /// assert_eq!(outcome.into_result(), Ok(42));
    /// ```
    pub fn map<U, F>(self, function: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        Outcome {
            settled: self.settled.map(function),
        }
    }

    /// Chains a fallible computation on the contained value.
    ///
    /// The handler runs inline, immediately, and only when the outcome is a
    /// value; a fault passes through unchanged without invoking it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::Fault;
    /// use settle::outcome::Outcome;
    ///
    /// let outcome = Outcome::value(10).then(|n| {
    ///     if n == 0 {
    ///         Err(Fault::precondition("divisor must be non-zero"))
    ///     } else {
    ///         Ok(100 / n)
    ///     }
    /// });
    /// assert_eq!(outcome.into_result(), Ok(10));
    /// ```
    pub fn then<U, F>(self, handler: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Result<U, Fault>,
    {
        Outcome {
            settled: self.settled.and_then(handler),
        }
    }

    /// Handles both arms in one link: exactly one handler runs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::Fault;
    /// use settle::outcome::Outcome;
    ///
    /// let described = Outcome::value(7).branch(
    ///     |n| Ok(format!("value: {n}")),
    ///     |fault| Ok(format!("fault: {fault}")),
    /// );
    /// assert_eq!(described.into_result(), Ok("value: 7".to_string()));
    /// ```
    pub fn branch<U, F, G>(self, on_value: F, on_error: G) -> Outcome<U>
    where
        F: FnOnce(T) -> Result<U, Fault>,
        G: FnOnce(Fault) -> Result<U, Fault>,
    {
        let settled = match self.settled {
            Ok(value) => on_value(value),
            Err(fault) => on_error(fault),
        };
        Outcome { settled }
    }

    /// Observes the contained value for side effects, preserving it.
    ///
    /// The original value is kept unless the handler itself fails, in which
    /// case the handler's fault becomes the new outcome.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::Fault;
    /// use settle::outcome::Outcome;
    ///
    /// let mut seen = 0;
    /// let outcome = Outcome::value(5).on_value(|n| {
    ///     seen = *n;
    ///     Ok(())
    /// });
    /// assert_eq!(seen, 5);
    /// assert_eq!(outcome.into_result(), Ok(5));
    /// ```
    pub fn on_value<F>(self, handler: F) -> Self
    where
        F: FnOnce(&T) -> Result<(), Fault>,
    {
        match self.settled {
            Ok(value) => match handler(&value) {
                Ok(()) => Self::value(value),
                Err(fault) => Self::fault(fault),
            },
            Err(fault) => Self::fault(fault),
        }
    }
}

// =============================================================================
// Fault Combinators
// =============================================================================

impl<T> Outcome<T> {
    /// Recovers from any fault.
    ///
    /// The handler runs only on a fault; its return becomes the new outcome,
    /// so a matched catch may swallow the fault and produce a value. A value
    /// passes through unchanged without invoking the handler.
    pub fn catch<F>(self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Result<T, Fault>,
    {
        self.catch_kind(FaultKind::Any, handler)
    }

    /// Recovers from faults of the given category.
    ///
    /// Matching is subtype-aware. A fault of a different category passes
    /// through unchanged - unmatched typed catches re-throw.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::{Fault, FaultKind};
    /// use settle::outcome::Outcome;
    ///
    /// let miss: Outcome<i32> = Outcome::fault(Fault::not_found("absent"));
    /// let recovered = miss.catch_kind(FaultKind::NotFound, |_| Ok(0));
    /// assert_eq!(recovered.into_result(), Ok(0));
    ///
    /// let violation: Outcome<i32> = Outcome::fault(Fault::precondition("bad"));
    /// let unmatched = violation.catch_kind(FaultKind::NotFound, |_| Ok(0));
    /// assert!(unmatched.is_fault());
    /// ```
    pub fn catch_kind<F>(self, kind: FaultKind, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Result<T, Fault>,
    {
        match self.settled {
            Err(fault) if fault.is(kind) => Self {
                settled: handler(fault),
            },
            settled => Self { settled },
        }
    }

    /// Observes any fault for side effects without swallowing it.
    ///
    /// The original fault is preserved unless the handler itself fails, in
    /// which case the handler's fault replaces it.
    pub fn on_error<F>(self, handler: F) -> Self
    where
        F: FnOnce(&Fault) -> Result<(), Fault>,
    {
        self.on_error_kind(FaultKind::Any, handler)
    }

    /// Observes faults of the given category without swallowing them.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::{Fault, FaultKind};
    /// use settle::outcome::Outcome;
    ///
    /// let mut observed = false;
    /// let outcome: Outcome<i32> = Outcome::fault(Fault::precondition("bad"))
    ///     .on_error_kind(FaultKind::Contract, |_| {
    ///         observed = true;
    ///         Ok(())
    ///     });
    /// assert!(observed);
    /// assert!(outcome.is_fault());
    /// ```
    pub fn on_error_kind<F>(self, kind: FaultKind, handler: F) -> Self
    where
        F: FnOnce(&Fault) -> Result<(), Fault>,
    {
        match self.settled {
            Err(fault) if fault.is(kind) => match handler(&fault) {
                Ok(()) => Self::fault(fault),
                Err(replacement) => Self::fault(replacement),
            },
            settled => Self { settled },
        }
    }

    /// Rewrites any fault into another fault.
    ///
    /// The chain stays in the fault state when the handler runs; conversion
    /// can never turn a failure into a success. A value passes through
    /// unchanged without invoking the handler.
    pub fn convert_error<F>(self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Fault,
    {
        self.convert_error_kind(FaultKind::Any, handler)
    }

    /// Rewrites faults of the given category into another fault.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::{Fault, FaultKind};
    /// use settle::outcome::Outcome;
    ///
    /// let outcome: Outcome<i32> = Outcome::fault(Fault::not_found("no row"))
    ///     .convert_error_kind(FaultKind::NotFound, |fault| {
    ///         Fault::generic(format!("lookup failed: {}", fault.message()))
    ///     });
    /// let fault = outcome.into_result().unwrap_err();
    /// assert_eq!(fault.message(), "lookup failed: no row");
    /// ```
    pub fn convert_error_kind<F>(self, kind: FaultKind, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Fault,
    {
        match self.settled {
            Err(fault) if fault.is(kind) => Self::fault(handler(fault)),
            settled => Self { settled },
        }
    }

    /// Unimplemented on the eager variant.
    ///
    /// Cleanup-regardless-of-outcome is only supported on the deferred
    /// variant ([`AsyncOutcome::finally`]); here the cleanup is not run and
    /// the result settles to a contract-violation fault naming the
    /// limitation. This is a deliberate gap, kept visible rather than given
    /// an invented behavior.
    pub fn finally<F>(self, _cleanup: F) -> Self
    where
        F: FnOnce(),
    {
        Self::fault(Fault::contract(
            "finally is not supported on the eager variant",
        ))
    }
}

// =============================================================================
// Promotion
// =============================================================================

impl<T> Outcome<T> {
    /// Chains a deferred computation: the chain is deferred from this link
    /// onward.
    ///
    /// The handler runs inline, immediately, and only when the outcome is a
    /// value; its deferred result becomes the rest of the chain. A fault is
    /// carried into a pre-settled deferred outcome without invoking the
    /// handler.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use settle::fault::Fault;
    /// use settle::outcome::{AsyncOutcome, Outcome};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let deferred = Outcome::value(20)
    ///         .then_deferred(|n| AsyncOutcome::defer(async move { Ok(n + 2) }));
    ///     assert_eq!(deferred.await, Ok(22));
    /// }
    /// ```
    pub fn then_deferred<U, F>(self, handler: F) -> AsyncOutcome<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> AsyncOutcome<U>,
    {
        match self.settled {
            Ok(value) => handler(value),
            Err(fault) => AsyncOutcome::fault(fault),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<T> From<Result<T, Fault>> for Outcome<T> {
    #[inline]
    fn from(settled: Result<T, Fault>) -> Self {
        Self { settled }
    }
}

impl<T> From<Outcome<T>> for Result<T, Fault> {
    #[inline]
    fn from(outcome: Outcome<T>) -> Self {
        outcome.settled
    }
}

impl<T> IntoFuture for Outcome<T> {
    type Output = Result<T, Fault>;
    type IntoFuture = Ready<Result<T, Fault>>;

    /// An eager outcome is consumable anywhere a future is expected; the
    /// already-settled result is yielded without suspension.
    fn into_future(self) -> Self::IntoFuture {
        ready(self.settled)
    }
}
