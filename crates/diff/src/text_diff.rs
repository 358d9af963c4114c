use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{DiffConfig, ViewMode};
use crate::degradation::Degradation;
use crate::line_align::{LineRecord, LineStats};
use crate::span::EditSpan;
use crate::token::Granularity;

/// The display-ready shape of a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiffView {
    /// Aligned line records for a two-column view
    Lines(Vec<LineRecord>),

    /// Whole-text spans for a single highlighted pane
    Inline(Vec<EditSpan>),
}

/// The result of comparing two texts
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffResult {
    pub view: DiffView,

    /// Set when the comparison was degraded to bound its cost
    pub degradation: Option<Degradation>,
}

impl DiffResult {
    /// The line records, if this is a side-by-side result
    pub fn lines(&self) -> Option<&[LineRecord]> {
        match &self.view {
            DiffView::Lines(records) => Some(records),
            DiffView::Inline(_) => None,
        }
    }

    /// The spans, if this is an inline result
    pub fn spans(&self) -> Option<&[EditSpan]> {
        match &self.view {
            DiffView::Inline(spans) => Some(spans),
            DiffView::Lines(_) => None,
        }
    }

    /// Check if the compared texts differ
    pub fn has_changes(&self) -> bool {
        match &self.view {
            DiffView::Lines(records) => records.iter().any(LineRecord::is_change),
            DiffView::Inline(spans) => spans.iter().any(EditSpan::is_change),
        }
    }

    /// Line statistics of a side-by-side result
    pub fn line_stats(&self) -> Option<LineStats> {
        self.lines().map(LineStats::from_records)
    }

    pub fn is_degraded(&self) -> bool {
        self.degradation.is_some()
    }
}

/// Compare two texts with the default configuration
pub fn recompute(old_text: &str, new_text: &str) -> DiffResult {
    DiffConfig::default().recompute(old_text, new_text)
}

/// Diff two whole texts for single-pane rendering, without splitting lines
pub fn inline(old_text: &str, new_text: &str, granularity: Granularity) -> Vec<EditSpan> {
    DiffConfig::default()
        .diff_tokens(old_text, new_text, granularity)
        .spans
}

impl DiffConfig {
    /// Compute the configured view from scratch.
    ///
    /// Nothing is cached between calls; callers that want to skip identical
    /// recomputations must do so themselves.
    pub fn recompute(&self, old_text: &str, new_text: &str) -> DiffResult {
        debug!(
            "recomputing {} view for {} and {} bytes",
            self.view,
            old_text.len(),
            new_text.len()
        );

        match self.view {
            ViewMode::SideBySide => {
                let alignment = self.align(old_text, new_text);
                DiffResult {
                    view: DiffView::Lines(alignment.records),
                    degradation: alignment.degradation,
                }
            }
            ViewMode::Inline => {
                let diff = self.diff_tokens(old_text, new_text, self.granularity);
                DiffResult {
                    view: DiffView::Inline(diff.spans),
                    degradation: diff.degradation,
                }
            }
        }
    }
}
