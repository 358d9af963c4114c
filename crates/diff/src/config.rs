use derive_more::Display;
use similar::Algorithm;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::token::Granularity;

/// How lines of the two texts are paired up for side-by-side display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AlignmentMode {
    /// Line `i` of the old text is compared with line `i` of the new text.
    /// An inserted line shifts every following pair out of step.
    #[default]
    #[display(fmt = "Positional")]
    Positional,

    /// Equal lines are matched with a line-level diff first, so insertions
    /// and deletions do not cascade into the following lines.
    #[display(fmt = "LCS")]
    Lcs,
}

/// Which shape of result [`DiffConfig::recompute`] produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ViewMode {
    /// Line records for two-column rendering
    #[default]
    #[display(fmt = "Side by side")]
    SideBySide,

    /// One span sequence over the whole texts for a single highlighted pane
    #[display(fmt = "Inline")]
    Inline,
}

/// Configuration for diff operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffConfig {
    /// The algorithm used for both token and line diffs
    pub algorithm: Algorithm,

    /// Token granularity of the inline (single pane) view
    pub granularity: Granularity,

    /// Token granularity used to highlight inside a changed line
    pub line_granularity: Granularity,

    /// How lines are paired in the side-by-side view
    pub alignment: AlignmentMode,

    /// Which view `recompute` builds
    pub view: ViewMode,

    /// Time budget for a single diff before it settles for a non-minimal script
    pub timeout: Duration,

    /// Maximum number of tokens per side before degrading
    pub max_tokens: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Myers,
            granularity: Granularity::Character,
            line_granularity: Granularity::Word,
            alignment: AlignmentMode::Positional,
            view: ViewMode::SideBySide,
            timeout: Duration::from_secs(1),
            max_tokens: 100_000,
        }
    }
}

impl DiffConfig {
    /// Set the diff algorithm
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the granularity of the inline view
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the granularity used inside changed lines
    pub fn line_granularity(mut self, granularity: Granularity) -> Self {
        self.line_granularity = granularity;
        self
    }

    /// Set the line alignment mode
    pub fn alignment(mut self, alignment: AlignmentMode) -> Self {
        self.alignment = alignment;
        self
    }

    /// Set the view produced by `recompute`
    pub fn view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    /// Set the time budget of a single diff
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the per-side token limit
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
