use log::{trace, warn};
use similar::{DiffOp, DiffTag};
use std::mem;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::DiffConfig;
use crate::degradation::{worst, Degradation};
use crate::span::{ChangeKind, EditSpan};
use crate::token::{tokenize, Granularity};

/// The outcome of a token diff
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TokenDiff {
    /// Coalesced spans, removed text before added text at every change point
    pub spans: Vec<EditSpan>,

    /// Set when the diff was computed with reduced fidelity
    pub degradation: Option<Degradation>,
}

impl TokenDiff {
    fn exact(spans: Vec<EditSpan>) -> Self {
        Self {
            spans,
            degradation: None,
        }
    }

    /// Check if any span is an insertion or a deletion
    pub fn has_changes(&self) -> bool {
        self.spans.iter().any(EditSpan::is_change)
    }
}

/// Diff two strings with the default configuration
pub fn diff(old_text: &str, new_text: &str, granularity: Granularity) -> Vec<EditSpan> {
    DiffConfig::default()
        .diff_tokens(old_text, new_text, granularity)
        .spans
}

impl DiffConfig {
    /// Compute the edit script between two strings at the given granularity
    pub fn diff_tokens(&self, old_text: &str, new_text: &str, granularity: Granularity) -> TokenDiff {
        if let Some(spans) = trivial_spans(old_text, new_text) {
            return TokenDiff::exact(spans);
        }

        let old_tokens = tokenize(old_text, granularity);
        let new_tokens = tokenize(new_text, granularity);
        let largest = old_tokens.len().max(new_tokens.len());

        if largest > self.max_tokens {
            return match granularity {
                Granularity::Character => {
                    warn!(
                        "{} character tokens exceed the limit of {}, diffing by word",
                        largest, self.max_tokens
                    );
                    let mut coarse = self.diff_tokens(old_text, new_text, Granularity::Word);
                    coarse.degradation =
                        worst(coarse.degradation, Some(Degradation::CoarserGranularity));
                    coarse
                }
                Granularity::Word => {
                    warn!(
                        "{} word tokens exceed the limit of {}, replacing the differing middle",
                        largest, self.max_tokens
                    );
                    TokenDiff {
                        spans: replace_middle(old_text, new_text),
                        degradation: Some(Degradation::InputTooLarge),
                    }
                }
            };
        }

        trace!(
            "{} diff over {} old and {} new tokens",
            granularity,
            old_tokens.len(),
            new_tokens.len()
        );

        let deadline = Instant::now().checked_add(self.timeout);
        let ops =
            similar::capture_diff_slices_deadline(self.algorithm, &old_tokens, &new_tokens, deadline);

        let degradation = match deadline {
            Some(deadline) if Instant::now() > deadline => {
                warn!("{} diff ran past its deadline of {:?}", granularity, self.timeout);
                Some(Degradation::DeadlineExceeded)
            }
            _ => None,
        };

        TokenDiff {
            spans: spans_from_ops(&old_tokens, &new_tokens, &ops),
            degradation,
        }
    }
}

/// Results that need no tokenization at all
fn trivial_spans(old_text: &str, new_text: &str) -> Option<Vec<EditSpan>> {
    match (old_text.is_empty(), new_text.is_empty()) {
        (true, true) => Some(Vec::new()),
        (true, false) => Some(vec![EditSpan::added(new_text)]),
        (false, true) => Some(vec![EditSpan::removed(old_text)]),
        _ if old_text == new_text => Some(vec![EditSpan::unchanged(old_text)]),
        _ => None,
    }
}

fn spans_from_ops(old_tokens: &[&str], new_tokens: &[&str], ops: &[DiffOp]) -> Vec<EditSpan> {
    let mut builder = SpanBuilder::default();

    for op in ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => builder.keep(&old_tokens[old_range].concat()),
            DiffTag::Delete => builder.remove(&old_tokens[old_range].concat()),
            DiffTag::Insert => builder.add(&new_tokens[new_range].concat()),
            DiffTag::Replace => {
                builder.remove(&old_tokens[old_range].concat());
                builder.add(&new_tokens[new_range].concat());
            }
        }
    }

    builder.finish()
}

/// Degraded diff: common prefix and suffix are kept, everything between is
/// one removal followed by one insertion.
fn replace_middle(old_text: &str, new_text: &str) -> Vec<EditSpan> {
    let prefix = old_text
        .char_indices()
        .zip(new_text.chars())
        .find(|((_, a), b)| a != b)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| old_text.len().min(new_text.len()));

    let old_rest = &old_text[prefix..];
    let new_rest = &new_text[prefix..];
    let suffix: usize = old_rest
        .chars()
        .rev()
        .zip(new_rest.chars().rev())
        .take_while(|(a, b)| a == b)
        .map(|(c, _)| c.len_utf8())
        .sum();

    let mut builder = SpanBuilder::default();
    builder.keep(&old_text[..prefix]);
    builder.remove(&old_rest[..old_rest.len() - suffix]);
    builder.add(&new_rest[..new_rest.len() - suffix]);
    builder.keep(&old_rest[old_rest.len() - suffix..]);
    builder.finish()
}

/// Collects edits into coalesced spans.
///
/// Removals and insertions are buffered until the next unchanged text so
/// that each change point yields at most one removed span followed by at
/// most one added span.
#[derive(Default)]
struct SpanBuilder {
    spans: Vec<EditSpan>,
    removed: String,
    added: String,
}

impl SpanBuilder {
    fn keep(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.flush_changes();
        match self.spans.last_mut() {
            Some(last) if last.kind == ChangeKind::Unchanged => last.value.push_str(text),
            _ => self.spans.push(EditSpan::unchanged(text)),
        }
    }

    fn remove(&mut self, text: &str) {
        self.removed.push_str(text);
    }

    fn add(&mut self, text: &str) {
        self.added.push_str(text);
    }

    fn flush_changes(&mut self) {
        if !self.removed.is_empty() {
            self.spans.push(EditSpan::removed(mem::take(&mut self.removed)));
        }
        if !self.added.is_empty() {
            self.spans.push(EditSpan::added(mem::take(&mut self.added)));
        }
    }

    fn finish(mut self) -> Vec<EditSpan> {
        self.flush_changes();
        self.spans
    }
}
