//! Typed faults - categorized, matchable error values.
//!
//! A [`Fault`] is the single error currency of this library. Every fault
//! carries a [`FaultKind`] category, and the typed combinators on outcomes
//! match against categories rather than against concrete error types.
//! Matching is subtype-aware: a [`FaultKind::PreCondition`] fault is
//! accepted by a handler registered for [`FaultKind::Contract`] or for
//! [`FaultKind::Any`].
//!
//! The [`contract`] submodule provides stateless contract-check functions
//! that produce categorized faults, for callers that want to report
//! precondition/postcondition violations or expected absences through an
//! outcome chain instead of panicking.
//!
//! # Examples
//!
//! ```rust
//! use settle::fault::{Fault, FaultKind};
//!
//! let fault = Fault::not_found("missing header: content-type");
//! assert!(fault.is(FaultKind::NotFound));
//! assert!(fault.is(FaultKind::Any));
//! assert!(!fault.is(FaultKind::Contract));
//! ```

use std::fmt;

use static_assertions::assert_impl_all;

mod contract_checks;
mod kind;

pub use kind::FaultKind;

/// Stateless contract-check functions producing categorized faults.
pub mod contract {
    pub use super::contract_checks::{ensure, found, require};
}

/// A categorized error value.
///
/// `Fault` is what an outcome holds when a computation fails. It pairs a
/// [`FaultKind`] category with a human-readable message. Faults are plain
/// values: cloneable, comparable, and printable, so they can flow through
/// deferred chains and be re-read after settlement.
///
/// # Examples
///
/// ```rust
/// use settle::fault::{Fault, FaultKind};
///
/// let fault = Fault::precondition("index must be non-negative");
/// assert_eq!(fault.kind(), FaultKind::PreCondition);
/// assert_eq!(fault.message(), "index must be non-negative");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    kind: FaultKind,
    message: String,
}

impl Fault {
    /// Creates a fault with an explicit category.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::{Fault, FaultKind};
    ///
    /// let fault = Fault::new(FaultKind::Generic, "disk full");
    /// assert_eq!(fault.kind(), FaultKind::Generic);
    /// ```
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an uncategorized fault.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::{Fault, FaultKind};
    ///
    /// let fault = Fault::generic("connection reset");
    /// assert_eq!(fault.kind(), FaultKind::Generic);
    /// ```
    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Generic, message)
    }

    /// Creates an expected-absence fault.
    ///
    /// Intended to be caught and converted to default behavior, e.g. a
    /// missing map key or header.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(FaultKind::NotFound, message)
    }

    /// Creates a general contract-violation fault.
    ///
    /// Contract violations signal programmer errors, not expected failure
    /// modes; ordinary recovery code should let them propagate.
    pub fn contract(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Contract, message)
    }

    /// Creates a precondition-violation fault.
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::new(FaultKind::PreCondition, message)
    }

    /// Creates a postcondition-violation fault.
    pub fn postcondition(message: impl Into<String>) -> Self {
        Self::new(FaultKind::PostCondition, message)
    }

    /// Returns the category of this fault.
    #[inline]
    pub const fn kind(&self) -> FaultKind {
        self.kind
    }

    /// Returns the message of this fault.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Tests whether this fault belongs to the given category.
    ///
    /// Matching is subtype-aware: derived categories match their parent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::{Fault, FaultKind};
    ///
    /// let fault = Fault::precondition("empty input");
    /// assert!(fault.is(FaultKind::PreCondition));
    /// assert!(fault.is(FaultKind::Contract));
    /// assert!(fault.is(FaultKind::Any));
    /// assert!(!fault.is(FaultKind::NotFound));
    /// ```
    #[inline]
    pub const fn is(&self, kind: FaultKind) -> bool {
        kind.accepts(self.kind)
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Fault {}

assert_impl_all!(Fault: Send, Sync, Clone, Unpin);
