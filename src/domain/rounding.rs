//! Explicit rounding direction for scaled-integer division.

/// Rounding direction for integer-domain divisions.
///
/// On-chain integer division truncates, so [`Rounding::Down`] is the
/// default everywhere a preview must agree with the contract. `Up` exists
/// only for explicit ceiling divisions such as
/// [`FixedDecimal::div_ceil`](super::FixedDecimal::div_ceil).
///
/// # Examples
///
/// ```
/// use rmm_engine::domain::Rounding;
///
/// assert!(Rounding::default().is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Truncate towards zero, matching integer division.
    #[default]
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
