// Core diff library for text comparison
// This crate computes token-level edit scripts and line-aligned views of them

mod config;
mod degradation;
mod line_align;
mod span;
mod text_diff;
mod token;
mod token_diff;

pub use config::{AlignmentMode, DiffConfig, ViewMode};
pub use degradation::Degradation;
pub use line_align::{align, LineAlignment, LineRecord, LineStats};
pub use span::{markup, new_text, old_text, ChangeKind, EditSpan};
pub use text_diff::{inline, recompute, DiffResult, DiffView};
pub use token::{tokenize, Granularity};
pub use token_diff::{diff, TokenDiff};

// Re-exported so callers can pick an algorithm without depending on `similar`
pub use similar::Algorithm;
