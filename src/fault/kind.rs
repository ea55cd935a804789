//! Fault categories and subtype-aware matching.

use std::fmt;

/// A runtime-checkable handle identifying a fault category.
///
/// `FaultKind` is what the typed combinators (`catch_kind`,
/// `on_error_kind`, `convert_error_kind`) match against. The categories
/// form a small hierarchy:
///
/// - [`Any`](Self::Any) accepts every fault - the catch-all root.
/// - [`Contract`](Self::Contract) accepts itself and the derived
///   [`PreCondition`](Self::PreCondition) and
///   [`PostCondition`](Self::PostCondition) categories.
/// - Every other category accepts only itself.
///
/// # Examples
///
/// ```rust
/// use settle::fault::FaultKind;
///
/// assert!(FaultKind::Any.accepts(FaultKind::NotFound));
/// assert!(FaultKind::Contract.accepts(FaultKind::PreCondition));
/// assert!(!FaultKind::PreCondition.accepts(FaultKind::Contract));
/// assert!(!FaultKind::NotFound.accepts(FaultKind::Generic));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Accepts every fault; the root of the category hierarchy.
    Any,
    /// An uncategorized failure.
    Generic,
    /// An expected absence, such as a missing map key or header.
    NotFound,
    /// A contract violation; accepts both derived contract categories.
    Contract,
    /// A precondition violation, derived from [`Contract`](Self::Contract).
    PreCondition,
    /// A postcondition violation, derived from [`Contract`](Self::Contract).
    PostCondition,
}

impl FaultKind {
    /// Tests whether a fault of category `other` belongs to this category.
    ///
    /// This is the descriptor side of subtype-aware matching:
    /// `descriptor.accepts(fault_kind)`.
    #[inline]
    pub const fn accepts(self, other: Self) -> bool {
        match self {
            Self::Any => true,
            Self::Contract => matches!(
                other,
                Self::Contract | Self::PreCondition | Self::PostCondition
            ),
            Self::Generic | Self::NotFound | Self::PreCondition | Self::PostCondition => {
                matches!(
                    (self, other),
                    (Self::Generic, Self::Generic)
                        | (Self::NotFound, Self::NotFound)
                        | (Self::PreCondition, Self::PreCondition)
                        | (Self::PostCondition, Self::PostCondition)
                )
            }
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "any fault",
            Self::Generic => "generic fault",
            Self::NotFound => "not found",
            Self::Contract => "contract violation",
            Self::PreCondition => "precondition violation",
            Self::PostCondition => "postcondition violation",
        };
        formatter.write_str(name)
    }
}
