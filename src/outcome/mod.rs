//! Dual-mode outcome containers.
//!
//! This module provides the two outcome variants and the tagged union over
//! them:
//!
//! - [`Outcome<T>`]: eagerly settled. The supplied computation runs at
//!   construction, on the caller's stack, and the result is frozen.
//! - [`AsyncOutcome<T>`]: deferred. Wraps a future that settles later,
//!   exactly once; the settled result is shared across repeated awaits.
//! - [`Flow<T>`]: `Settled | Deferred`, letting a chain start eager and
//!   upgrade to deferred at an explicit promotion point
//!   ([`Flow::then_deferred`]).
//!
//! All three expose the same combinator surface: `map`, `then`, `branch`,
//! `on_value`, `catch`/`catch_kind`, `on_error`/`on_error_kind`,
//! `convert_error`/`convert_error_kind` and `finally`. Handlers run at most
//! once per chain link, and exactly one of a link's handlers runs for a
//! given settlement.
//!
//! # Examples
//!
//! ```rust
//! use settle::fault::{Fault, FaultKind};
//! use settle::outcome::Outcome;
//!
//! let lookup: Outcome<&str> = Outcome::fault(Fault::not_found("no such key"));
//! let recovered = lookup
//!     .catch_kind(FaultKind::NotFound, |_| Ok("default"))
//!     .into_result();
//! assert_eq!(recovered, Ok("default"));
//! ```

mod deferred;
mod eager;
mod flow;

pub use deferred::AsyncOutcome;
pub use eager::Outcome;
pub use flow::Flow;
