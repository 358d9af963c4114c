use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Signals that a diff was computed with reduced fidelity to bound its cost.
///
/// Variants are ordered by severity, so the worst of several results is
/// simply their maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Degradation {
    /// The diff deadline elapsed. The spans still rebuild both texts but
    /// may not be the smallest possible edit script.
    #[display(fmt = "Deadline exceeded")]
    DeadlineExceeded,

    /// A character diff had too many tokens and was redone word by word
    #[display(fmt = "Coarser granularity")]
    CoarserGranularity,

    /// Too many tokens even word by word; the differing middle of the texts
    /// is reported as a single removal and a single insertion
    #[display(fmt = "Input too large")]
    InputTooLarge,
}

/// Keep the more severe of two optional degradations
pub(crate) fn worst(a: Option<Degradation>, b: Option<Degradation>) -> Option<Degradation> {
    a.max(b)
}
