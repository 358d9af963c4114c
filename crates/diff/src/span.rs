use derive_more::Display;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a piece of text relates to the two compared versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChangeKind {
    /// Present in both versions
    #[display(fmt = "Unchanged")]
    Unchanged,

    /// Only present in the new version
    #[display(fmt = "Added")]
    Added,

    /// Only present in the old version
    #[display(fmt = "Removed")]
    Removed,
}

/// A run of text sharing one [`ChangeKind`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EditSpan {
    /// The text covered by this span
    pub value: String,

    /// Whether the text was kept, added or removed
    pub kind: ChangeKind,
}

impl EditSpan {
    /// Create a new span
    pub fn new(value: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    pub fn unchanged(value: impl Into<String>) -> Self {
        Self::new(value, ChangeKind::Unchanged)
    }

    pub fn added(value: impl Into<String>) -> Self {
        Self::new(value, ChangeKind::Added)
    }

    pub fn removed(value: impl Into<String>) -> Self {
        Self::new(value, ChangeKind::Removed)
    }

    /// Check if this span is an insertion or a deletion
    pub fn is_change(&self) -> bool {
        self.kind != ChangeKind::Unchanged
    }
}

/// Word-diff markup: removed text as `[-text-]`, added text as `{+text+}`
impl fmt::Display for EditSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ChangeKind::Unchanged => f.write_str(&self.value),
            ChangeKind::Added => write!(f, "{{+{}+}}", self.value),
            ChangeKind::Removed => write!(f, "[-{}-]", self.value),
        }
    }
}

/// Rebuild the old text by skipping added spans
pub fn old_text(spans: &[EditSpan]) -> String {
    collect_text(spans, ChangeKind::Added)
}

/// Rebuild the new text by skipping removed spans
pub fn new_text(spans: &[EditSpan]) -> String {
    collect_text(spans, ChangeKind::Removed)
}

/// Render spans as word-diff markup
pub fn markup(spans: &[EditSpan]) -> String {
    spans.iter().map(ToString::to_string).collect()
}

fn collect_text(spans: &[EditSpan], skip: ChangeKind) -> String {
    spans
        .iter()
        .filter(|span| span.kind != skip)
        .map(|span| span.value.as_str())
        .collect()
}
