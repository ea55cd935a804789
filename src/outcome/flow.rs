//! The tagged union over both outcome variants.
//!
//! A [`Flow`] is either [`Settled`](Flow::Settled) around an eager
//! [`Outcome`] or [`Deferred`](Flow::Deferred) around an [`AsyncOutcome`].
//! Combinators pattern-match on the tag: on the settled arm they execute
//! inline, on the deferred arm they are scheduled for settlement. The only
//! way a settled chain becomes deferred is the explicit promotion point
//! [`Flow::then_deferred`]; once deferred, every subsequent link stays
//! deferred.
//!
//! `Flow` also carries the construction surface most callers use:
//! [`Flow::run`] and [`Flow::value`]/[`Flow::fault`] for the eager path
//! (the default), [`Flow::defer`]/[`Flow::lift`] for the deferred path and
//! [`Flow::tick`] for an async no-op suspension.
//!
//! # Examples
//!
//! ```rust
//! use settle::fault::Fault;
//! use settle::outcome::Flow;
//!
//! let flow = Flow::run(|| Ok::<_, Fault>(2)).map(|n| n + 40);
//! assert!(flow.is_settled());
//! ```

use std::future::{Future, IntoFuture};

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::fault::{Fault, FaultKind};

use super::{AsyncOutcome, Outcome};

/// An outcome that is either already settled or still deferred.
///
/// Callers that do not care which arm they hold consume a `Flow` uniformly
/// through [`Flow::settle`] or by awaiting it; the settled arm completes
/// without suspension.
#[derive(Debug, Clone)]
pub enum Flow<T> {
    /// An eagerly-settled outcome; combinators run inline.
    Settled(Outcome<T>),
    /// A deferred outcome; combinators run at settlement.
    Deferred(AsyncOutcome<T>),
}

// =============================================================================
// Construction
// =============================================================================

impl<T> Flow<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Runs a computation immediately and captures its outcome on the
    /// settled arm.
    pub fn run<F>(action: F) -> Self
    where
        F: FnOnce() -> Result<T, Fault>,
    {
        Self::Settled(Outcome::run(action))
    }

    /// Wraps a known value; the eager path is the default.
    pub fn value(value: T) -> Self {
        Self::Settled(Outcome::value(value))
    }

    /// Wraps a known fault; the eager path is the default.
    pub fn fault(fault: Fault) -> Self {
        Self::Settled(Outcome::fault(fault))
    }

    /// Wraps an existing future on the deferred arm.
    pub fn defer<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, Fault>> + Send + 'static,
    {
        Self::Deferred(AsyncOutcome::defer(future))
    }

    /// Wraps a closure returning a future on the deferred arm.
    ///
    /// The closure is invoked when the flow is first awaited.
    pub fn lift<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, Fault>> + Send + 'static,
    {
        Self::Deferred(AsyncOutcome::new(action))
    }
}

impl Flow<()> {
    /// The async no-op: a deferred unit flow that settles on the next
    /// scheduling opportunity.
    #[must_use]
    pub fn tick() -> Self {
        Self::Deferred(AsyncOutcome::tick())
    }
}

// =============================================================================
// Inspection
// =============================================================================

impl<T> Flow<T> {
    /// Returns `true` on the settled arm.
    #[inline]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Settled(_))
    }

    /// Returns `true` on the deferred arm.
    #[inline]
    pub const fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// Converts into the eager outcome, if this flow is settled.
    #[inline]
    pub fn into_settled(self) -> Option<Outcome<T>> {
        match self {
            Self::Settled(outcome) => Some(outcome),
            Self::Deferred(_) => None,
        }
    }

    /// Converts into the deferred outcome, if this flow is deferred.
    #[inline]
    pub fn into_deferred(self) -> Option<AsyncOutcome<T>> {
        match self {
            Self::Settled(_) => None,
            Self::Deferred(deferred) => Some(deferred),
        }
    }
}

// =============================================================================
// Combinators
// =============================================================================

impl<T> Flow<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Transforms the value; a fault passes through unchanged.
    pub fn map<U, F>(self, function: F) -> Flow<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        match self {
            Self::Settled(outcome) => Flow::Settled(outcome.map(function)),
            Self::Deferred(deferred) => Flow::Deferred(deferred.map(function)),
        }
    }

    /// Chains a fallible computation on the value.
    ///
    /// On the settled arm the handler runs inline; on the deferred arm it
    /// runs at settlement. Either way it runs at most once, and a fault
    /// passes through without invoking it.
    pub fn then<U, F>(self, handler: F) -> Flow<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Result<U, Fault> + Send + 'static,
    {
        match self {
            Self::Settled(outcome) => Flow::Settled(outcome.then(handler)),
            Self::Deferred(deferred) => Flow::Deferred(deferred.then(handler)),
        }
    }

    /// Chains a deferred computation: the promotion point.
    ///
    /// The result is deferred regardless of the arm this flow was on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use settle::fault::Fault;
    /// use settle::outcome::{AsyncOutcome, Flow};
    ///
    /// let flow = Flow::value(20)
    ///     .then_deferred(|n| AsyncOutcome::defer(async move { Ok(n + 2) }));
    /// assert!(flow.is_deferred());
    /// ```
    pub fn then_deferred<U, F>(self, handler: F) -> Flow<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> AsyncOutcome<U> + Send + 'static,
    {
        match self {
            Self::Settled(outcome) => Flow::Deferred(outcome.then_deferred(handler)),
            Self::Deferred(deferred) => Flow::Deferred(deferred.then_deferred(handler)),
        }
    }

    /// Handles both arms of the outcome in one link: exactly one handler
    /// runs.
    pub fn branch<U, F, G>(self, on_value: F, on_error: G) -> Flow<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Result<U, Fault> + Send + 'static,
        G: FnOnce(Fault) -> Result<U, Fault> + Send + 'static,
    {
        match self {
            Self::Settled(outcome) => Flow::Settled(outcome.branch(on_value, on_error)),
            Self::Deferred(deferred) => Flow::Deferred(deferred.branch(on_value, on_error)),
        }
    }

    /// Observes the value for side effects, preserving it unless the
    /// handler fails.
    pub fn on_value<F>(self, handler: F) -> Self
    where
        F: FnOnce(&T) -> Result<(), Fault> + Send + 'static,
    {
        match self {
            Self::Settled(outcome) => Self::Settled(outcome.on_value(handler)),
            Self::Deferred(deferred) => Self::Deferred(deferred.on_value(handler)),
        }
    }

    /// Recovers from any fault.
    pub fn catch<F>(self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Result<T, Fault> + Send + 'static,
    {
        self.catch_kind(FaultKind::Any, handler)
    }

    /// Recovers from faults of the given category; unmatched faults
    /// propagate unchanged.
    pub fn catch_kind<F>(self, kind: FaultKind, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Result<T, Fault> + Send + 'static,
    {
        match self {
            Self::Settled(outcome) => Self::Settled(outcome.catch_kind(kind, handler)),
            Self::Deferred(deferred) => Self::Deferred(deferred.catch_kind(kind, handler)),
        }
    }

    /// Observes any fault without swallowing it.
    pub fn on_error<F>(self, handler: F) -> Self
    where
        F: FnOnce(&Fault) -> Result<(), Fault> + Send + 'static,
    {
        self.on_error_kind(FaultKind::Any, handler)
    }

    /// Observes faults of the given category without swallowing them.
    pub fn on_error_kind<F>(self, kind: FaultKind, handler: F) -> Self
    where
        F: FnOnce(&Fault) -> Result<(), Fault> + Send + 'static,
    {
        match self {
            Self::Settled(outcome) => Self::Settled(outcome.on_error_kind(kind, handler)),
            Self::Deferred(deferred) => Self::Deferred(deferred.on_error_kind(kind, handler)),
        }
    }

    /// Rewrites any fault into another fault; never resolves to a value.
    pub fn convert_error<F>(self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Fault + Send + 'static,
    {
        self.convert_error_kind(FaultKind::Any, handler)
    }

    /// Rewrites faults of the given category into another fault.
    pub fn convert_error_kind<F>(self, kind: FaultKind, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Fault + Send + 'static,
    {
        match self {
            Self::Settled(outcome) => Self::Settled(outcome.convert_error_kind(kind, handler)),
            Self::Deferred(deferred) => Self::Deferred(deferred.convert_error_kind(kind, handler)),
        }
    }

    /// Runs a cleanup after settlement, regardless of the outcome.
    ///
    /// Supported on the deferred arm only; on the settled arm this is the
    /// same deliberate gap as [`Outcome::finally`].
    pub fn finally<F>(self, cleanup: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        match self {
            Self::Settled(outcome) => Self::Settled(outcome.finally(cleanup)),
            Self::Deferred(deferred) => Self::Deferred(deferred.finally(move || {
                cleanup();
                std::future::ready(())
            })),
        }
    }
}

// =============================================================================
// Settlement
// =============================================================================

impl<T> Flow<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Consumes the flow uniformly: the settled arm returns without
    /// suspension, the deferred arm awaits settlement.
    ///
    /// # Errors
    ///
    /// Returns the fault the flow settled with.
    pub async fn settle(self) -> Result<T, Fault> {
        match self {
            Self::Settled(outcome) => outcome.into_result(),
            Self::Deferred(deferred) => deferred.await,
        }
    }
}

impl<T> IntoFuture for Flow<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Output = Result<T, Fault>;
    type IntoFuture = BoxFuture<'static, Result<T, Fault>>;

    /// Either arm is consumable anywhere a future is expected, without
    /// special-casing by the consumer.
    fn into_future(self) -> Self::IntoFuture {
        match self {
            Self::Settled(outcome) => std::future::ready(outcome.into_result()).boxed(),
            Self::Deferred(deferred) => deferred.boxed(),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<T> From<Outcome<T>> for Flow<T> {
    #[inline]
    fn from(outcome: Outcome<T>) -> Self {
        Self::Settled(outcome)
    }
}

impl<T> From<AsyncOutcome<T>> for Flow<T> {
    #[inline]
    fn from(deferred: AsyncOutcome<T>) -> Self {
        Self::Deferred(deferred)
    }
}
