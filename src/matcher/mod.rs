//! Segment-based fuzzy path matching.
//!
//! Archive entries are stored with full internal paths (`mymod/entry.lua`)
//! while diagnostic transcripts and inline JSON values often refer to the
//! same file by a shorter relative form (`entry.lua`). This module
//! reconciles the two representations without touching the filesystem.
//!
//! # Match Semantics
//!
//! Two paths match when, after splitting into segments on `/` or `\`:
//! 1. neither side is a bare filename while the other is nested (a bare
//!    `entry.lua` must not match an unrelated `shield/entry.lua` unless
//!    the other side is also bare);
//! 2. equal-length sequences are compared pairwise;
//! 3. otherwise the shorter sequence must equal a trailing slice of the
//!    longer one (suffix match).
//!
//! [`find_best_path_match`] ranks candidates so that exact matches always
//! outrank partial ones and longer matched suffixes outrank shorter ones,
//! making the most specific candidate win. Ties go to the first-seen
//! candidate, so results are stable for a given candidate order.

use tracing::trace;

/// Split a path into its non-empty segments.
///
/// Both `/` and `\` are accepted as separators; empty components
/// (doubled separators, leading/trailing separators) are dropped.
///
/// # Examples
///
/// ```
/// use modlens::matcher::path_to_segments;
///
/// assert_eq!(path_to_segments("a/b/c.lua"), vec!["a", "b", "c.lua"]);
/// assert_eq!(path_to_segments("a\\b.lua"), vec!["a", "b.lua"]);
/// assert_eq!(path_to_segments(""), Vec::<String>::new());
/// ```
#[must_use]
pub fn path_to_segments(path: &str) -> Vec<String> {
    path.split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Compare two path-like strings that may differ in leading directory
/// depth.
///
/// Empty paths never match anything, including each other.
#[must_use]
pub fn paths_match(a: &str, b: &str) -> bool {
    segments_match(&path_to_segments(a), &path_to_segments(b))
}

fn segments_match(a: &[String], b: &[String]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    // A bare filename must not match a nested path of the same name.
    if (a.len() == 1) != (b.len() == 1) {
        return false;
    }

    if a.len() == b.len() {
        return a == b;
    }

    let (shorter, longer) = if a.len() < b.len() { (a, b) } else { (b, a) };
    longer.ends_with(shorter)
}

/// True when the shorter sequence equals a trailing slice of the longer.
///
/// Unlike [`paths_match`] this has no bare-filename restriction: ranking
/// a bare `entry.lua` against archive entries is exactly the case where a
/// single segment must be allowed to match the tail of a nested path.
fn is_suffix(a: &[String], b: &[String]) -> bool {
    let (shorter, longer) = if a.len() < b.len() { (a, b) } else { (b, a) };
    longer.ends_with(shorter)
}

/// Score a candidate against a target, higher is better, 0 is no match.
fn match_score(target: &[String], candidate: &[String]) -> usize {
    if target.is_empty() || candidate.is_empty() {
        return 0;
    }
    if target == candidate {
        return 1000 + target.len();
    }
    if is_suffix(target, candidate) {
        return 500 + target.len().min(candidate.len());
    }
    if target.len() == 1 && candidate.len() == 1 && target[0] == candidate[0] {
        return 100;
    }
    0
}

/// Find the candidate that best matches `target`, or `None` if no
/// candidate matches at all.
///
/// Exact full-sequence matches always outrank suffix matches, and longer
/// matched suffixes outrank shorter ones. Ties are broken by first-seen
/// order in the candidate list.
pub fn find_best_path_match<'a, I>(target: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let target_segments = path_to_segments(target);

    let mut best: Option<(&'a str, usize)> = None;
    for candidate in candidates {
        let score = match_score(&target_segments, &path_to_segments(candidate));
        trace!(target, candidate, score, "scored path candidate");
        if score > 0 && best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }

    best.map(|(candidate, _)| candidate)
}
