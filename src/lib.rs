//! # settle
//!
//! A dual-mode result library for Rust providing eager and deferred
//! outcomes with typed, composable error recovery.
//!
//! ## Overview
//!
//! This library gives calling code one combinator surface over two outcome
//! containers:
//!
//! - [`Outcome<T>`](outcome::Outcome): an eagerly-settled outcome. The
//!   supplied computation runs at construction and the result is frozen.
//! - [`AsyncOutcome<T>`](outcome::AsyncOutcome): a deferred outcome wrapping
//!   a future. Settlement happens later, exactly once, and the settled
//!   result is shared across every subsequent await.
//! - [`Flow<T>`](outcome::Flow): a tagged union over both, so a chain can
//!   start eager and upgrade to deferred at an explicit promotion point.
//!
//! Failures are [`Fault`](fault::Fault) values carrying a
//! [`FaultKind`](fault::FaultKind) category, and the typed combinators
//! (`catch_kind`, `on_error_kind`, `convert_error_kind`) match categories
//! subtype-aware: a precondition fault is caught by a handler for any
//! contract violation, or by a catch-all handler.
//!
//! ## Example
//!
//! ```rust
//! use settle::fault::{Fault, FaultKind};
//! use settle::outcome::Outcome;
//!
//! let result = Outcome::run(|| Ok::<_, Fault>(20))
//!     .map(|n| n + 1)
//!     .then(|n| {
//!         if n > 100 {
//!             Err(Fault::precondition("value out of range"))
//!         } else {
//!             Ok(n * 2)
//!         }
//!     })
//!     .catch_kind(FaultKind::NotFound, |_| Ok(0))
//!     .into_result();
//! assert_eq!(result, Ok(42));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use settle::prelude::*;
/// ```
pub mod prelude {
    pub use crate::fault::{Fault, FaultKind, contract};
    pub use crate::outcome::{AsyncOutcome, Flow, Outcome};
}

pub mod fault;

pub mod outcome;
