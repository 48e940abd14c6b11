//! Character-level text diffing with whitespace normalization.
//!
//! # Overview
//!
//! This module compares two text blobs and produces an ordered sequence
//! of [`DiffSegment`]s (equal / added / removed runs). Both inputs are
//! normalized first: trailing whitespace is stripped from every line and
//! tabs are expanded to two spaces, so cosmetic whitespace churn never
//! shows up as a change.
//!
//! The raw diff comes from the `similar` crate (Myers' algorithm) run at
//! character granularity; consecutive operations with the same tag are
//! folded into segments and a semantic cleanup pass merges short equal
//! runs that are surrounded by larger edits into coherent remove/add
//! blocks, so a rewritten line reads as one replacement instead of
//! interleaved single-character noise.
//!
//! # Reconstruction guarantee
//!
//! Concatenating the texts of all `Equal` and `Remove` segments yields
//! the normalized left input; `Equal` and `Add` yield the normalized
//! right input. Every transformation in this module preserves that
//! property, including cleanup.

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// The role a segment plays in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Text present in both inputs.
    Equal,
    /// Text present only in the right-hand input.
    Add,
    /// Text present only in the left-hand input.
    Remove,
}

/// One run of the diff output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSegment {
    /// Whether this run is shared, added, or removed.
    pub kind: SegmentKind,
    /// The text of the run, taken from the normalized inputs.
    pub text: String,
}

impl DiffSegment {
    fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Length of this segment in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// True for `Add` and `Remove` segments.
    #[must_use]
    pub fn is_edit(&self) -> bool {
        self.kind != SegmentKind::Equal
    }
}

/// Normalize a text blob for comparison.
///
/// Per line: trailing whitespace is stripped, then every tab is expanded
/// to two spaces. Line count and line order are preserved, as is the
/// presence or absence of a trailing newline. Idempotent: normalizing an
/// already-normalized text returns it unchanged (trailing tabs are gone
/// after the strip, so the expansion can never create new trailing
/// whitespace).
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split('\n')
        .map(|line| line.trim_end().replace('\t', "  "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check whether two texts differ after normalization.
///
/// Agrees exactly with [`diff_lines`]: this returns `true` iff
/// `diff_lines` would produce at least one non-equal segment. It is a
/// plain string comparison of the normalized inputs, so it is always
/// cheaper than running the diff.
#[must_use]
pub fn has_changed(text_a: &str, text_b: &str) -> bool {
    normalize(text_a) != normalize(text_b)
}

/// Compute the diff between two texts.
///
/// Returns segments in left-to-right document order. Identical inputs
/// yield a single `Equal` segment (or nothing when both are empty);
/// fully disjoint inputs yield one `Remove` covering all of the left
/// input followed by one `Add` covering all of the right.
#[must_use]
pub fn diff_lines(text_a: &str, text_b: &str) -> Vec<DiffSegment> {
    let norm_a = normalize(text_a);
    let norm_b = normalize(text_b);

    if norm_a == norm_b {
        if norm_a.is_empty() {
            return Vec::new();
        }
        return vec![DiffSegment::new(SegmentKind::Equal, norm_a)];
    }

    let diff = TextDiff::from_chars(norm_a.as_str(), norm_b.as_str());
    let mut segments: Vec<DiffSegment> = Vec::new();

    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SegmentKind::Equal,
            ChangeTag::Insert => SegmentKind::Add,
            ChangeTag::Delete => SegmentKind::Remove,
        };
        match segments.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(change.value()),
            _ => segments.push(DiffSegment::new(kind, change.value())),
        }
    }

    semantic_cleanup(segments)
}

/// Merge adjacent segments that share a kind.
fn coalesce(segments: Vec<DiffSegment>) -> Vec<DiffSegment> {
    let mut out: Vec<DiffSegment> = Vec::with_capacity(segments.len());
    for seg in segments {
        if seg.text.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.kind == seg.kind => last.text.push_str(&seg.text),
            _ => out.push(seg),
        }
    }
    out
}

/// Total character length of the edit run immediately before `idx`.
///
/// Scans backwards over contiguous non-equal segments and returns the
/// larger of (added chars, removed chars) in that run.
fn edit_weight_before(segments: &[DiffSegment], idx: usize) -> usize {
    let mut added = 0;
    let mut removed = 0;
    for seg in segments[..idx].iter().rev() {
        match seg.kind {
            SegmentKind::Add => added += seg.char_len(),
            SegmentKind::Remove => removed += seg.char_len(),
            SegmentKind::Equal => break,
        }
    }
    added.max(removed)
}

/// Total character length of the edit run immediately after `idx`.
fn edit_weight_after(segments: &[DiffSegment], idx: usize) -> usize {
    let mut added = 0;
    let mut removed = 0;
    for seg in &segments[idx + 1..] {
        match seg.kind {
            SegmentKind::Add => added += seg.char_len(),
            SegmentKind::Remove => removed += seg.char_len(),
            SegmentKind::Equal => break,
        }
    }
    added.max(removed)
}

/// Semantic cleanup over a raw character diff.
///
/// An `Equal` segment that is no longer than the edit runs on both of
/// its sides is factored out into the surrounding edits (it becomes a
/// `Remove` plus an `Add` of the same text), turning scattered
/// single-character coincidences into one coherent replacement block.
/// Repeats until a fixed point, then orders each edit run as removals
/// before additions.
fn semantic_cleanup(segments: Vec<DiffSegment>) -> Vec<DiffSegment> {
    let mut segs = coalesce(segments);

    loop {
        let mut changed = false;
        let mut i = 0;
        while i < segs.len() {
            let absorb = segs[i].kind == SegmentKind::Equal
                && i > 0
                && i + 1 < segs.len()
                && {
                    let eq_len = segs[i].char_len();
                    eq_len > 0
                        && eq_len <= edit_weight_before(&segs, i)
                        && eq_len <= edit_weight_after(&segs, i)
                };
            if absorb {
                let text = std::mem::take(&mut segs[i].text);
                segs[i] = DiffSegment::new(SegmentKind::Remove, text.clone());
                segs.insert(i + 1, DiffSegment::new(SegmentKind::Add, text));
                changed = true;
                i += 2;
            } else {
                i += 1;
            }
        }
        segs = order_edit_runs(segs);
        if !changed {
            break;
        }
    }

    segs
}

/// Within each contiguous run of edits, emit all removals before all
/// additions, each side coalesced. Relative order inside either side is
/// preserved, so both reconstruction properties survive.
fn order_edit_runs(segments: Vec<DiffSegment>) -> Vec<DiffSegment> {
    let mut out: Vec<DiffSegment> = Vec::with_capacity(segments.len());
    let mut removed = String::new();
    let mut added = String::new();

    let flush = |out: &mut Vec<DiffSegment>, removed: &mut String, added: &mut String| {
        if !removed.is_empty() {
            out.push(DiffSegment::new(SegmentKind::Remove, std::mem::take(removed)));
        }
        if !added.is_empty() {
            out.push(DiffSegment::new(SegmentKind::Add, std::mem::take(added)));
        }
    };

    for seg in segments {
        match seg.kind {
            SegmentKind::Remove => removed.push_str(&seg.text),
            SegmentKind::Add => added.push_str(&seg.text),
            SegmentKind::Equal => {
                flush(&mut out, &mut removed, &mut added);
                out.push(seg);
            }
        }
    }
    flush(&mut out, &mut removed, &mut added);

    coalesce(out)
}
