//! Literal block tracking: lines whose text is shown verbatim, so role
//! markers inside them are examples rather than references.

use crate::types::LinkFormat;

/// Directives whose body is source code in both reStructuredText and MyST.
const CODE_DIRECTIVES: [&str; 3] = ["code", "code-block", "sourcecode"];

/// An open Markdown fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    /// `` ` `` or `~`.
    ch: char,
    /// Length of the opening run; the closing run must be at least as long.
    len: usize,
    /// False for MyST directive fences such as ```` ```{note} ````, whose body is markup.
    literal: bool,
}

/// Per-document state, fed one line at a time in order.
#[derive(Debug, Clone)]
pub struct LiteralBlocks {
    /// Open fences, innermost last. Markdown only.
    fences: Vec<Fence>,
    /// Which markup the document is written in.
    format: LinkFormat,
    /// Indentation of the line that introduced an RST literal block.
    rst_marker: Option<usize>,
}

impl LiteralBlocks {
    /// Whether `line` is part of a literal block. Must be called for every
    /// line of the document, in order.
    pub fn is_literal(&mut self, line: &str) -> bool {
        return match self.format {
            LinkFormat::Markdown => self.markdown_line(line),
            LinkFormat::Rst => self.rst_line(line),
        };
    }

    /// Fresh state for a document in `format`.
    pub const fn new(format: LinkFormat) -> Self {
        return Self {
            fences: Vec::new(),
            format,
            rst_marker: None,
        };
    }

    /// Fenced code blocks (```` ``` ```` and `~~~`). Fence lines themselves are literal.
    fn markdown_line(&mut self, line: &str) -> bool {
        if let Some(top) = self.fences.last().copied() {
            if closes_fence(line, top) {
                self.fences.pop();
                return true;
            }
            if top.literal {
                return true;
            }
        }

        let Some(fence) = opening_fence(line) else {
            return false;
        };
        self.fences.push(fence);
        return true;
    }

    /// `::` literal blocks and code directives: the indented body after the
    /// marker line is literal, the marker line is not.
    fn rst_line(&mut self, line: &str) -> bool {
        if let Some(marker) = self.rst_marker {
            if line.trim().is_empty() || indentation(line) > marker {
                return true;
            }
            self.rst_marker = None;
        }

        if introduces_rst_literal(line) {
            self.rst_marker = Some(indentation(line));
        }
        return false;
    }
}

/// Whether `line` is a closing fence for `fence`.
fn closes_fence(line: &str, fence: Fence) -> bool {
    let Some(body) = fence_body(line) else {
        return false;
    };
    let run = body.chars().take_while(|c| return *c == fence.ch).count();
    let rest = body.trim_start_matches(fence.ch);
    return run >= fence.len && rest.trim().is_empty();
}

/// Line content after up to three spaces of indentation, or `None` if it is
/// indented further (an indented code line, never a fence).
fn fence_body(line: &str) -> Option<&str> {
    let body = line.trim_start_matches(' ');
    if line.len().saturating_sub(body.len()) > 3 {
        return None;
    }
    return Some(body);
}

/// Leading whitespace width, in characters.
fn indentation(line: &str) -> usize {
    return line.chars().take_while(|c| return c.is_whitespace()).count();
}

/// `Example::` paragraphs and `.. code-block::`-style directives.
fn introduces_rst_literal(line: &str) -> bool {
    let trimmed = line.trim();
    if let Some(directive) = trimmed.strip_prefix("..") {
        let name = directive.trim_start().split("::").next().unwrap_or_default().trim();
        return trimmed.contains("::") && CODE_DIRECTIVES.contains(&name);
    }
    return trimmed.ends_with("::");
}

/// Parse an opening fence: three or more backticks or tildes plus an info string.
fn opening_fence(line: &str) -> Option<Fence> {
    let body = fence_body(line)?;
    let ch = body.chars().next().filter(|c| return matches!(c, '`' | '~'))?;
    let len = body.chars().take_while(|c| return *c == ch).count();
    if len < 3 {
        return None;
    }

    let info = body.trim_start_matches(ch).trim();
    if ch == '`' && info.contains('`') {
        return None;
    }

    let literal = info.strip_prefix('{').is_none_or(|directive| {
        let name = directive.split('}').next().unwrap_or_default();
        return CODE_DIRECTIVES.contains(&name);
    });
    return Some(Fence { ch, len, literal });
}
