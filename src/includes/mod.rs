//! Extraction of statically-written include targets from Lua source.
//!
//! Recognizes the three literal call forms of the `include` directive:
//!
//! ```lua
//! include("helpers.lua")
//! include('helpers.lua')
//! include[[helpers.lua]]
//! ```
//!
//! All three forms may appear anywhere on a line, multiple times per
//! line. Lines whose trimmed form starts with the `--` comment marker are
//! skipped entirely; there is no partial-line comment stripping, so an
//! include after trailing code on a commented line stays invisible.
//!
//! # Limitations
//!
//! Computed arguments (`include(prefix .. name)`, variables, string
//! formatting) are not resolved and produce no target. This is a
//! documented limitation of static extraction, not an error: such
//! includes are simply invisible to the dependency tree.

use regex::Regex;

use crate::constants::{INCLUDE_FUNCTION, LINE_COMMENT_MARKER};

/// Extract include targets from one file's Lua source text.
///
/// Targets are returned in left-to-right, top-to-bottom order of
/// appearance. Duplicates are preserved; callers decide whether to
/// deduplicate.
///
/// # Examples
///
/// ```
/// use modlens::includes::parse_includes_from_lua;
///
/// let source = "-- include(\"x.lua\")\ninclude(\"y.lua\")";
/// assert_eq!(parse_includes_from_lua(source), vec!["y.lua"]);
/// ```
#[must_use]
pub fn parse_includes_from_lua(content: &str) -> Vec<String> {
    let mut targets = Vec::new();

    // Double-quoted, single-quoted, and long-bracket argument forms. The
    // long-bracket form is legal Lua both with and without parentheses.
    let patterns = [
        format!(r#"{INCLUDE_FUNCTION}\s*\(\s*"([^"]+)"\s*\)"#),
        format!(r"{INCLUDE_FUNCTION}\s*\(\s*'([^']+)'\s*\)"),
        format!(r"{INCLUDE_FUNCTION}\s*\(?\s*\[\[([^\]]+)\]\]"),
    ];
    let regexes: Vec<Regex> = patterns.iter().filter_map(|p| Regex::new(p).ok()).collect();

    for line in content.lines() {
        if line.trim_start().starts_with(LINE_COMMENT_MARKER) {
            continue;
        }

        // Collect matches from all forms on this line, then restore
        // left-to-right order across forms.
        let mut line_targets: Vec<(usize, String)> = Vec::new();
        for regex in &regexes {
            for capture in regex.captures_iter(line) {
                if let Some(target) = capture.get(1) {
                    line_targets.push((target.start(), target.as_str().to_string()));
                }
            }
        }
        line_targets.sort_by_key(|(offset, _)| *offset);
        targets.extend(line_targets.into_iter().map(|(_, target)| target));
    }

    targets
}
