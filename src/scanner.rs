use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::Error;
use crate::format;
use crate::literal::LiteralBlocks;
use crate::registry::Registry;
use crate::types::{LinkFormat, SourceRef};

/// Matches ``:role:`text` `` and ``{role}`text` ``. Role text may not span lines.
#[allow(clippy::expect_used, reason = "hardcoded pattern is a compile-time invariant")]
static ROLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"(?::(?P<rst>[A-Za-z][\w.+-]*):|\{(?P<myst>[A-Za-z][\w.+-]*)\})`(?P<text>[^`\n]*)`")
        .expect("valid regex");
});

/// A registered role marker found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleOccurrence {
    /// Text between the backticks.
    pub identifier: String,
    /// Document and one-based line of the marker.
    pub location: SourceRef,
    /// The entire marker as authored.
    pub raw_text: String,
    /// Role name without its delimiters.
    pub role: String,
    /// Byte range of `raw_text` within its line.
    pub span: Range<usize>,
}

/// List every document under `root` that the config allows, sorted by path.
/// Hidden directories and `target/` are never entered.
pub fn documents(root: &Path, config: &Config) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| return !is_skipped_dir(e))
        .filter_map(Result::ok)
        .filter(|e| return e.file_type().is_file() && format::is_document(e.path()))
    {
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if config.should_scan(&relative.to_string_lossy()) {
            found.push(relative.to_path_buf());
        }
    }

    return found;
}

/// Find every registered role marker in a document's content.
/// Markers in literal blocks and inline code are examples and are skipped.
pub fn find_roles(
    content: &str,
    file: &Path,
    format: LinkFormat,
    registry: &Registry,
) -> Vec<RoleOccurrence> {
    let mut blocks = LiteralBlocks::new(format);
    let mut occurrences = Vec::new();
    let mut line_number = 0_u32;
    for line in content.lines() {
        line_number = line_number.saturating_add(1);
        if blocks.is_literal(line) {
            continue;
        }
        occurrences.extend(find_roles_in_line(line, file, line_number, registry));
    }
    return occurrences;
}

/// Find registered role markers on a single line.
///
/// Unregistered roles are skipped, and so is anything inside an inline code
/// span: a backtick run closed by a run of the same length, which also covers
/// RST ``` ``literals`` ```.
pub fn find_roles_in_line(
    line: &str,
    file: &Path,
    line_number: u32,
    registry: &Registry,
) -> Vec<RoleOccurrence> {
    let mut occurrences = Vec::new();
    let mut pos = 0_usize;

    while let Some(cap) = ROLE_PATTERN.captures_at(line, pos) {
        let Some(whole) = cap.get(0) else {
            break;
        };
        let code_start = line
            .get(pos..whole.start())
            .and_then(|gap| return gap.find('`'))
            .map(|offset| return pos.saturating_add(offset));
        if let Some(start) = code_start {
            pos = skip_code_span(line, start);
            continue;
        }

        occurrences.extend(parse_role_capture(&cap, file, line_number, registry));
        pos = whole.end();
    }

    return occurrences;
}

/// Scan all documents under `root` and collect their role markers,
/// ordered by document path then position.
///
/// # Errors
///
/// Returns `Error::Io` if any document cannot be read.
pub fn scan(root: &Path, config: &Config, registry: &Registry) -> Result<Vec<RoleOccurrence>, Error> {
    let mut occurrences = Vec::new();

    for relative in documents(root, config) {
        let format = format::format_for_path(&relative)?;
        let content = std::fs::read_to_string(root.join(&relative))?;
        occurrences.extend(find_roles(&content, &relative, format, registry));
    }

    return Ok(occurrences);
}

/// Hidden directories and build output are not documentation.
fn is_skipped_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    return name.starts_with('.') || name == "target";
}

/// Turn a regex capture into an occurrence if its role is registered.
fn parse_role_capture(
    cap: &Captures<'_>,
    file: &Path,
    line_number: u32,
    registry: &Registry,
) -> Option<RoleOccurrence> {
    let whole = cap.get(0)?;
    let role = cap.name("rst").or_else(|| return cap.name("myst"))?.as_str();
    registry.role(role)?;

    let identifier = cap.name("text").map_or("", |m| return m.as_str());
    return Some(RoleOccurrence {
        identifier: identifier.to_string(),
        location: SourceRef {
            file: file.to_path_buf(),
            line: line_number,
        },
        raw_text: whole.as_str().to_string(),
        role: role.to_string(),
        span: whole.range(),
    });
}

/// Position just past the code span whose opening backtick run starts at
/// `start`. An unmatched run is plain text and only the run is skipped.
fn skip_code_span(line: &str, start: usize) -> usize {
    let run_len = |at: usize| -> usize {
        return line.get(at..).map_or(0, |rest| return rest.bytes().take_while(|b| return *b == b'`').count());
    };

    let opening = run_len(start);
    let mut cursor = start.saturating_add(opening);
    while let Some(offset) = line.get(cursor..).and_then(|rest| return rest.find('`')) {
        let at = cursor.saturating_add(offset);
        let closing = run_len(at);
        cursor = at.saturating_add(closing);
        if closing == opening {
            return cursor;
        }
    }
    return start.saturating_add(opening);
}
