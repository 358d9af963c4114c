use log::{debug, warn};
use similar::DiffTag;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{AlignmentMode, DiffConfig};
use crate::degradation::{worst, Degradation};
use crate::span::{self, ChangeKind, EditSpan};

/// One display row of a side-by-side comparison
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineRecord {
    /// Position of this record in the output (1-based)
    pub line_number: usize,

    /// Line number in the old text (1-based), if the old text has this line
    pub old_line: Option<usize>,

    /// Line number in the new text (1-based), if the new text has this line
    pub new_line: Option<usize>,

    /// Highlighted content of the line
    pub spans: Vec<EditSpan>,

    /// Classification of the line as a whole
    pub kind: ChangeKind,
}

impl LineRecord {
    /// The new-side text of this line
    pub fn content(&self) -> String {
        span::new_text(&self.spans)
    }

    /// The old-side text of this line
    pub fn old_content(&self) -> String {
        span::old_text(&self.spans)
    }

    /// Check if this line is anything but unchanged
    pub fn is_change(&self) -> bool {
        self.kind != ChangeKind::Unchanged
    }
}

/// Line records together with the worst degradation met while building them
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineAlignment {
    pub records: Vec<LineRecord>,
    pub degradation: Option<Degradation>,
}

/// Counts of line records per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineStats {
    pub unchanged: usize,
    pub added: usize,
    pub removed: usize,
}

impl LineStats {
    /// Tally the kinds of the given records
    pub fn from_records(records: &[LineRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            match record.kind {
                ChangeKind::Unchanged => stats.unchanged += 1,
                ChangeKind::Added => stats.added += 1,
                ChangeKind::Removed => stats.removed += 1,
            }
            stats
        })
    }

    /// Check if any line changed
    pub fn has_changes(&self) -> bool {
        self.added + self.removed > 0
    }
}

/// Align two texts line by line with the default (positional) configuration
pub fn align(old_text: &str, new_text: &str) -> Vec<LineRecord> {
    DiffConfig::default().align(old_text, new_text).records
}

impl DiffConfig {
    /// Split both texts on `\n` and build one record per aligned line.
    ///
    /// A trailing newline yields a trailing empty line, exactly like
    /// [`str::split`].
    pub fn align(&self, old_text: &str, new_text: &str) -> LineAlignment {
        let old_lines: Vec<&str> = old_text.split('\n').collect();
        let new_lines: Vec<&str> = new_text.split('\n').collect();

        let mut aligner = Aligner::new(self);
        match self.alignment {
            AlignmentMode::Positional => aligner.positional(&old_lines, &new_lines),
            AlignmentMode::Lcs => aligner.matched(&old_lines, &new_lines),
        }

        debug!(
            "{} alignment of {} old and {} new lines produced {} records",
            self.alignment,
            old_lines.len(),
            new_lines.len(),
            aligner.records.len()
        );

        LineAlignment {
            records: aligner.records,
            degradation: aligner.degradation,
        }
    }
}

struct Aligner<'a> {
    config: &'a DiffConfig,
    records: Vec<LineRecord>,
    degradation: Option<Degradation>,
}

impl<'a> Aligner<'a> {
    fn new(config: &'a DiffConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
            degradation: None,
        }
    }

    fn positional(&mut self, old_lines: &[&str], new_lines: &[&str]) {
        let count = old_lines.len().max(new_lines.len());
        for i in 0..count {
            let old = old_lines.get(i).map(|line| (i + 1, *line));
            let new = new_lines.get(i).map(|line| (i + 1, *line));
            self.push_pair(old, new);
        }
    }

    /// Match equal lines with a line-level diff, then pair the lines of each
    /// replaced block positionally.
    fn matched(&mut self, old_lines: &[&str], new_lines: &[&str]) {
        let largest = old_lines.len().max(new_lines.len());
        if largest > self.config.max_tokens {
            warn!(
                "{} lines exceed the limit of {}, falling back to positional alignment",
                largest, self.config.max_tokens
            );
            self.degrade(Some(Degradation::InputTooLarge));
            self.positional(old_lines, new_lines);
            return;
        }

        let deadline = Instant::now().checked_add(self.config.timeout);
        let ops = similar::capture_diff_slices_deadline(
            self.config.algorithm,
            old_lines,
            new_lines,
            deadline,
        );
        if matches!(deadline, Some(deadline) if Instant::now() > deadline) {
            warn!("line matching ran past its deadline of {:?}", self.config.timeout);
            self.degrade(Some(Degradation::DeadlineExceeded));
        }

        for op in &ops {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            match tag {
                DiffTag::Equal => {
                    for (o, n) in old_range.zip(new_range) {
                        self.push_whole(Some(o + 1), Some(n + 1), new_lines[n], ChangeKind::Unchanged);
                    }
                }
                DiffTag::Delete => {
                    for o in old_range {
                        self.push_whole(Some(o + 1), None, old_lines[o], ChangeKind::Removed);
                    }
                }
                DiffTag::Insert => {
                    for n in new_range {
                        self.push_whole(None, Some(n + 1), new_lines[n], ChangeKind::Added);
                    }
                }
                DiffTag::Replace => {
                    let count = old_range.len().max(new_range.len());
                    for k in 0..count {
                        let old = Some(old_range.start + k)
                            .filter(|o| old_range.contains(o))
                            .map(|o| (o + 1, old_lines[o]));
                        let new = Some(new_range.start + k)
                            .filter(|n| new_range.contains(n))
                            .map(|n| (n + 1, new_lines[n]));
                        match (old, new) {
                            (Some((o, line)), None) => {
                                self.push_whole(Some(o), None, line, ChangeKind::Removed)
                            }
                            (None, Some((n, line))) => {
                                self.push_whole(None, Some(n), line, ChangeKind::Added)
                            }
                            _ => self.push_pair(old, new),
                        }
                    }
                }
            }
        }
    }

    /// Compare one old/new pair, treating a missing side as an empty line
    fn push_pair(&mut self, old: Option<(usize, &str)>, new: Option<(usize, &str)>) {
        let old_text = old.map_or("", |(_, line)| line);
        let new_text = new.map_or("", |(_, line)| line);
        let old_line = old.map(|(number, _)| number);
        let new_line = new.map(|(number, _)| number);

        if old_text == new_text {
            self.push_whole(old_line, new_line, new_text, ChangeKind::Unchanged);
            return;
        }

        let diff = self
            .config
            .diff_tokens(old_text, new_text, self.config.line_granularity);
        self.degrade(diff.degradation);

        let spans = if diff.has_changes() {
            diff.spans
        } else {
            warn!(
                "token diff reported no change for differing line {}, keeping it whole",
                self.records.len() + 1
            );
            vec![EditSpan::unchanged(new_text)]
        };
        self.push(old_line, new_line, spans, ChangeKind::Added);
    }

    fn push_whole(
        &mut self,
        old_line: Option<usize>,
        new_line: Option<usize>,
        text: &str,
        kind: ChangeKind,
    ) {
        self.push(old_line, new_line, vec![EditSpan::new(text, kind)], kind);
    }

    fn push(
        &mut self,
        old_line: Option<usize>,
        new_line: Option<usize>,
        spans: Vec<EditSpan>,
        kind: ChangeKind,
    ) {
        self.records.push(LineRecord {
            line_number: self.records.len() + 1,
            old_line,
            new_line,
            spans,
            kind,
        });
    }

    fn degrade(&mut self, degradation: Option<Degradation>) {
        self.degradation = worst(self.degradation, degradation);
    }
}
