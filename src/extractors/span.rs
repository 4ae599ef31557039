//! Reconstruction of highlighted text from quad regions.
//!
//! A highlight that runs across a line wrap arrives as several quads whose
//! covered word sets overlap at the boundary. Concatenating them would repeat
//! the shared words, so the per-quad word groups are merged into one span.
//!
//! Two merge strategies are provided:
//!
//! - [`MergeStrategy::WordUnion`] tracks the covered word positions as a set
//!   of index ranges and flattens them in reading order. The result does not
//!   depend on the order the quads were supplied in.
//! - [`MergeStrategy::SequenceDiff`] aligns the accumulated token sequence
//!   with each new group using an LCS diff. Matched runs are kept once,
//!   tokens only in the accumulated span are kept, new tokens are inserted at
//!   their aligned position, and replaced runs emit the old tokens followed by
//!   the new ones. Quads supplied out of reading order can scramble the
//!   result; this mode exists to reproduce transcripts made with diff merging.

use std::ops::Range;

use similar::{capture_diff_slices, Algorithm, DiffTag};

use crate::geometry::Rect;
use crate::layout::WordIndex;
use crate::text::HyphenationHandler;

/// How word groups from successive quads are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Union of covered word positions, flattened in reading order
    #[default]
    WordUnion,
    /// LCS alignment of token sequences, in quad order
    SequenceDiff,
}

impl MergeStrategy {
    /// Parse a strategy name (`union` or `diff`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "union" | "word-union" => Some(Self::WordUnion),
            "diff" | "sequence-diff" => Some(Self::SequenceDiff),
            _ => None,
        }
    }
}

/// The reconstructed tokens of one annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedSpan {
    tokens: Vec<String>,
}

impl MergedSpan {
    /// Create an empty span.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens in merged order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// True when no words were recovered.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Merge the token group recovered from the next quad.
    ///
    /// The first non-empty group becomes the span as is; later groups are
    /// aligned against the accumulated tokens.
    pub fn push_group(&mut self, group: Vec<String>) {
        if self.tokens.is_empty() {
            self.tokens = group;
        } else if !group.is_empty() {
            self.tokens = merge_token_sequences(&self.tokens, &group);
        }
    }

    /// Tokens joined with single spaces.
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }
}

impl From<Vec<String>> for MergedSpan {
    fn from(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

/// Align `new` against `old` and return the merged token sequence.
///
/// # Examples
///
/// ```
/// use annot_oxide::extractors::span::merge_token_sequences;
///
/// let old: Vec<String> = ["A", "B"].iter().map(|s| s.to_string()).collect();
/// let new: Vec<String> = ["B", "C"].iter().map(|s| s.to_string()).collect();
/// assert_eq!(merge_token_sequences(&old, &new), vec!["A", "B", "C"]);
/// ```
pub fn merge_token_sequences(old: &[String], new: &[String]) -> Vec<String> {
    let mut merged = Vec::with_capacity(old.len() + new.len());
    for op in capture_diff_slices(Algorithm::Lcs, old, new) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal | DiffTag::Delete => merged.extend_from_slice(&old[old_range]),
            DiffTag::Insert => merged.extend_from_slice(&new[new_range]),
            DiffTag::Replace => {
                merged.extend_from_slice(&old[old_range]);
                merged.extend_from_slice(&new[new_range]);
            },
        }
    }
    merged
}

/// Sorted, disjoint, non-adjacent ranges of word positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoveredRanges {
    ranges: Vec<Range<usize>>,
}

impl CoveredRanges {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a range, coalescing it with any range it overlaps or touches.
    pub fn insert(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let mut pending = Some(range);
        let mut out = Vec::with_capacity(self.ranges.len() + 1);
        for r in self.ranges.drain(..) {
            match pending.take() {
                Some(p) if r.end < p.start => {
                    out.push(r);
                    pending = Some(p);
                },
                Some(p) if p.end < r.start => {
                    out.push(p);
                    out.push(r);
                },
                Some(p) => pending = Some(p.start.min(r.start)..p.end.max(r.end)),
                None => out.push(r),
            }
        }
        if let Some(p) = pending {
            out.push(p);
        }
        self.ranges = out;
    }

    /// Add sorted word positions, grouping consecutive ones into ranges.
    pub fn insert_indices(&mut self, indices: &[usize]) {
        let mut run: Option<Range<usize>> = None;
        for &i in indices {
            run = match run {
                Some(r) if r.end == i => Some(r.start..i + 1),
                Some(r) => {
                    self.insert(r);
                    Some(i..i + 1)
                },
                None => Some(i..i + 1),
            };
        }
        if let Some(r) = run {
            self.insert(r);
        }
    }

    /// The ranges in ascending order.
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// All covered positions in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.ranges.iter().flat_map(|r| r.clone())
    }

    /// True when nothing is covered.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Recovers the text underlying a (possibly multi-quad) highlight.
#[derive(Debug, Clone, Default)]
pub struct SpanReconstructor {
    strategy: MergeStrategy,
    hyphenation: HyphenationHandler,
}

impl SpanReconstructor {
    /// Create a reconstructor with the given merge strategy.
    pub fn new(strategy: MergeStrategy) -> Self {
        Self {
            strategy,
            hyphenation: HyphenationHandler::new(),
        }
    }

    /// Merge the words covered by each region into one span.
    pub fn merge(&self, words: &WordIndex, regions: &[Rect]) -> MergedSpan {
        match self.strategy {
            MergeStrategy::WordUnion => {
                let mut covered = CoveredRanges::new();
                for region in regions {
                    covered.insert_indices(&words.covered_by(region));
                }
                let indices: Vec<usize> = covered.indices().collect();
                MergedSpan::from(tokenize(words.texts(&indices)))
            },
            MergeStrategy::SequenceDiff => {
                let mut span = MergedSpan::new();
                for region in regions {
                    let covered = words.covered_by(region);
                    span.push_group(tokenize(words.texts(&covered)));
                }
                span
            },
        }
    }

    /// Reconstruct the highlighted text, with line-break hyphenation removed.
    ///
    /// Returns an empty string when no region covers any word.
    pub fn reconstruct(&self, words: &WordIndex, regions: &[Rect]) -> String {
        let span = self.merge(words, regions);
        if span.is_empty() {
            return String::new();
        }
        self.hyphenation.join_line_breaks(&span.joined())
    }
}

/// Split word texts into whitespace-free tokens.
fn tokenize<'a>(texts: impl Iterator<Item = &'a str>) -> Vec<String> {
    texts
        .flat_map(str::split_whitespace)
        .map(str::to_string)
        .collect()
}
