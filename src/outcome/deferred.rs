//! Deferred outcomes.
//!
//! An [`AsyncOutcome`] represents a computation whose result settles later.
//! It wraps a shared, memoizing future: the underlying computation runs at
//! most once, upon first await, and its settled result - value or fault -
//! is permanent. Re-awaiting (via [`AsyncOutcome::settle`] or a clone) only
//! re-reads the settled outcome; chained handlers never run a second time.
//!
//! Handlers registered through the combinators execute at settlement, on
//! the task that drives the chain, never inline at registration.
//!
//! # Examples
//!
//! ```rust,ignore
//! use settle::fault::Fault;
//! use settle::outcome::AsyncOutcome;
//!
//! #[tokio::main]
//! async fn main() {
//!     let outcome = AsyncOutcome::defer(async { Ok::<_, Fault>(21) })
//!         .map(|n| n * 2);
//!     assert_eq!(outcome.await, Ok(42));
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use static_assertions::assert_impl_all;

use crate::fault::{Fault, FaultKind};

use super::Outcome;

type SharedSettlement<T> = Shared<BoxFuture<'static, Result<T, Fault>>>;

/// A deferred outcome: pending until its wrapped future settles, then
/// permanently a value or a fault.
///
/// `AsyncOutcome<T>` implements [`Future`] and can be awaited directly.
/// Settlement is monotonic and single-writer: the wrapped computation runs
/// at most once, and every clone of the outcome observes the same settled
/// result.
///
/// The `T: Clone + Send + Sync` bounds on the combinator surface exist
/// because the settled value is shared across awaits and across the tasks
/// that hold clones.
pub struct AsyncOutcome<T> {
    settlement: SharedSettlement<T>,
}

impl<T> Clone for AsyncOutcome<T> {
    fn clone(&self) -> Self {
        Self {
            settlement: self.settlement.clone(),
        }
    }
}

impl<T> std::fmt::Debug for AsyncOutcome<T> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("<AsyncOutcome>")
    }
}

// =============================================================================
// Construction
// =============================================================================

impl<T> AsyncOutcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn wrap<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, Fault>> + Send + 'static,
    {
        Self {
            settlement: future.boxed().shared(),
        }
    }

    /// Creates a deferred outcome from a closure returning a future.
    ///
    /// The closure is not invoked until the outcome is first awaited.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use settle::fault::Fault;
    /// use settle::outcome::AsyncOutcome;
    ///
    /// let outcome = AsyncOutcome::new(|| async { Ok::<_, Fault>(42) });
    /// ```
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, Fault>> + Send + 'static,
    {
        Self::wrap(async move { action().await })
    }

    /// Wraps an existing future.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use settle::fault::Fault;
    /// use settle::outcome::AsyncOutcome;
    ///
    /// let outcome = AsyncOutcome::defer(async { Ok::<_, Fault>("ready") });
    /// ```
    pub fn defer<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, Fault>> + Send + 'static,
    {
        Self::wrap(future)
    }

    /// Wraps an already-settled value.
    pub fn value(value: T) -> Self {
        Self::wrap(std::future::ready(Ok(value)))
    }

    /// Wraps an already-settled fault.
    pub fn fault(fault: Fault) -> Self {
        Self::wrap(std::future::ready(Err(fault)))
    }
}

impl AsyncOutcome<()> {
    /// Produces a deferred unit outcome that settles on the next scheduling
    /// opportunity.
    ///
    /// Awaiting it forces at least one suspension point, letting
    /// already-scheduled continuations run before the caller resumes.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use settle::outcome::AsyncOutcome;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     AsyncOutcome::tick().await.unwrap();
    /// }
    /// ```
    #[must_use]
    pub fn tick() -> Self {
        Self::wrap(async {
            tokio::task::yield_now().await;
            Ok(())
        })
    }
}

// =============================================================================
// Settlement
// =============================================================================

impl<T> AsyncOutcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Awaits settlement without consuming the outcome.
    ///
    /// The underlying computation runs at most once; calling `settle`
    /// repeatedly re-reads the already-settled result.
    ///
    /// # Errors
    ///
    /// Returns the fault the outcome settled with.
    pub async fn settle(&self) -> Result<T, Fault> {
        self.settlement.clone().await
    }
}

impl<T: Clone> Future for AsyncOutcome<T> {
    type Output = Result<T, Fault>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().settlement).poll(context)
    }
}

// =============================================================================
// Value Combinators
// =============================================================================

impl<T> AsyncOutcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Transforms the settled value; a fault passes through unchanged.
    ///
    /// The function runs at settlement, at most once.
    pub fn map<U, F>(self, function: F) -> AsyncOutcome<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        AsyncOutcome::wrap(async move { self.settlement.await.map(function) })
    }

    /// Chains a fallible computation on the settled value.
    ///
    /// The handler runs at settlement and only when the outcome is a value;
    /// a fault passes through unchanged without invoking it.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use settle::fault::Fault;
    /// use settle::outcome::AsyncOutcome;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let outcome = AsyncOutcome::fault(Fault::generic("abc"))
    ///         .then(|_: i32| Ok("hello"));
    ///     // the mapping handler is never called
    ///     assert_eq!(outcome.await.unwrap_err().message(), "abc");
    /// }
    /// ```
    pub fn then<U, F>(self, handler: F) -> AsyncOutcome<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Result<U, Fault> + Send + 'static,
    {
        AsyncOutcome::wrap(async move { self.settlement.await.and_then(handler) })
    }

    /// Chains a further deferred computation on the settled value.
    ///
    /// A fault passes through unchanged without invoking the handler.
    pub fn then_deferred<U, F>(self, handler: F) -> AsyncOutcome<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> AsyncOutcome<U> + Send + 'static,
    {
        AsyncOutcome::wrap(async move {
            match self.settlement.await {
                Ok(value) => handler(value).settlement.await,
                Err(fault) => Err(fault),
            }
        })
    }

    /// Handles both arms in one link: exactly one handler runs, at
    /// settlement.
    pub fn branch<U, F, G>(self, on_value: F, on_error: G) -> AsyncOutcome<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Result<U, Fault> + Send + 'static,
        G: FnOnce(Fault) -> Result<U, Fault> + Send + 'static,
    {
        AsyncOutcome::wrap(async move {
            match self.settlement.await {
                Ok(value) => on_value(value),
                Err(fault) => on_error(fault),
            }
        })
    }

    /// Observes the settled value for side effects, preserving it.
    ///
    /// The handler runs at most once, at settlement, no matter how many
    /// times the resulting outcome is awaited afterward. The original value
    /// is kept unless the handler itself fails.
    pub fn on_value<F>(self, handler: F) -> Self
    where
        F: FnOnce(&T) -> Result<(), Fault> + Send + 'static,
    {
        Self::wrap(async move {
            match self.settlement.await {
                Ok(value) => match handler(&value) {
                    Ok(()) => Ok(value),
                    Err(fault) => Err(fault),
                },
                Err(fault) => Err(fault),
            }
        })
    }
}

// =============================================================================
// Fault Combinators
// =============================================================================

impl<T> AsyncOutcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Recovers from any fault.
    ///
    /// The handler runs only on a fault; its return becomes the new
    /// outcome. A value passes through unchanged without invoking it.
    pub fn catch<F>(self, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Result<T, Fault> + Send + 'static,
    {
        self.catch_kind(FaultKind::Any, handler)
    }

    /// Recovers from faults of the given category.
    ///
    /// Matching is subtype-aware; a fault of a different category passes
    /// through unchanged.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use settle::fault::{Fault, FaultKind};
    /// use settle::outcome::AsyncOutcome;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let recovered = AsyncOutcome::<usize>::fault(Fault::precondition("abc"))
    ///         .catch_kind(FaultKind::Any, |fault| Ok(fault.message().len()));
    ///     assert_eq!(recovered.await, Ok(3));
    /// }
    /// ```
    pub fn catch_kind<F>(self, kind: FaultKind, handler: F) -> Self
    where
        F: FnOnce(Fault) -> Result<T, Fault> + Send + 'static,
    {
        Self::wrap(async move {
            match self.settlement.await {
                Err(fault) if fault.is(kind) => handler(fault),
                settled => settled,
            }
        })
    }

    /// Observes any fault for side effects without swallowing it.
    pub fn on_error<F>(self, handler: F) -> Self
    where
        F: FnOnce(&Fault) -> Result<(), Fault> + Send + 'static,
    {
        self.on_error_kind(FaultKind::Any, handler)
    }

    /// Observes faults of the given category without swallowing them.
    ///
    /// The original fault is preserved unless the handler itself fails, in
    /// which case the handler's fault replaces it.
    pub fn on_error_kind<F>(self, kind: FaultKind, handler: F) -> Self
    where
        F: FnOnce(&Fault) -> Result<(), Fault> + Send + 'static,
    {
        Self::wrap(async move {
            match self.settlement.await {
                Err(fault) if fault.is(kind) => match handler(&fault) {
                    Ok(()) => Err(fault),
                    Err(replacement) => Err(replacement),
                },
                settled => settled,
            }
        })
    }

    /// Rewrites any fault into another fault.
    ///
    /// Conversion can never turn a failure into a success.
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
        Self::wrap(async move {
            match self.settlement.await {
                Err(fault) if fault.is(kind) => Err(handler(fault)),
                settled => settled,
            }
        })
    }

    /// Runs an async cleanup after settlement, regardless of the outcome.
    ///
    /// The settled outcome is returned unaltered once the cleanup
    /// completes.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use settle::fault::Fault;
    /// use settle::outcome::AsyncOutcome;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let outcome = AsyncOutcome::defer(async { Ok::<_, Fault>(1) })
    ///         .finally(|| async { println!("cleanup"); });
    ///     assert_eq!(outcome.await, Ok(1));
    /// }
    /// ```
    pub fn finally<F, Cleanup>(self, cleanup: F) -> Self
    where
        F: FnOnce() -> Cleanup + Send + 'static,
        Cleanup: Future<Output = ()> + Send + 'static,
    {
        Self::wrap(async move {
            let settled = self.settlement.await;
            cleanup().await;
            settled
        })
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<T> From<Outcome<T>> for AsyncOutcome<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Lifts an eager outcome into a pre-settled deferred one.
    fn from(outcome: Outcome<T>) -> Self {
        Self::wrap(std::future::ready(outcome.into_result()))
    }
}

assert_impl_all!(AsyncOutcome<i32>: Send, Sync, Clone, Unpin);
