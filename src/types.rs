/// Core domain types for MDN role references, links, and diagnostics.
use std::fmt;
use std::path::PathBuf;

/// Output of a role handler: the nodes to insert plus any diagnostics.
/// A successful resolution always carries exactly one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Diagnostics raised while resolving. Empty unless validation is enabled.
    pub messages: Vec<Diagnostic>,
    /// Rendered nodes, in document order.
    pub nodes: Vec<ReferenceLink>,
}

/// A message attached to a role occurrence.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic {
    /// Where the offending markup was authored.
    pub location: SourceRef,
    /// Human-readable description.
    pub message: String,
    /// How serious the message is.
    pub severity: Severity,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "{}: {}: {}", self.severity, self.location, self.message);
    }
}

/// Output flavor for a rendered link, chosen from the document's format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkFormat {
    /// `[title](url)`
    Markdown,
    /// `` `title <url>`__ `` (anonymous hyperlink).
    Rst,
}

/// The three MDN reference families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// HTML element reference.
    Html,
    /// JavaScript language reference.
    JavaScript,
    /// Web API reference.
    WebApi,
}

impl ReferenceKind {
    /// Human-facing name used in listings.
    pub const fn label(self) -> &'static str {
        return match self {
            Self::Html => "HTML",
            Self::JavaScript => "JavaScript",
            Self::WebApi => "Web API",
        };
    }
}

/// Resolved hyperlink produced for one role occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceLink {
    /// Visible link text: the last `/` segment of the identifier.
    pub display_title: String,
    /// `base_url + "/" + identifier`, verbatim.
    pub target_url: String,
}

impl ReferenceLink {
    /// Render the link in the markup of the surrounding document.
    ///
    /// Markup characters in the title are backslash-escaped so the result is
    /// always one hyperlink. The target keeps its meaning; Markdown wraps it
    /// in `<...>` when it holds spaces, parentheses or angle brackets.
    /// reStructuredText cannot show an empty link text, so a blank title
    /// renders as `` `<url>`__ `` and the URL becomes the visible text.
    pub fn render(&self, format: LinkFormat) -> String {
        return match format {
            LinkFormat::Markdown => format!(
                "[{}]({})",
                escape_chars(&self.display_title, &['\\', '[', ']']),
                markdown_destination(&self.target_url)
            ),
            LinkFormat::Rst if self.display_title.trim().is_empty() => {
                format!("`<{}>`__", self.target_url)
            },
            LinkFormat::Rst => format!(
                "`{} <{}>`__",
                rst_title(&self.display_title),
                self.target_url
            ),
        };
    }
}

/// One occurrence of a role marker, built by the scanner and consumed by a handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRequest {
    /// Text marked with the role, e.g. `Array/map`.
    pub identifier: String,
    /// Determined by which role matched.
    pub kind: ReferenceKind,
    /// Where the markup was authored. Passed through for diagnostics only.
    pub location: SourceRef,
    /// The entire markup snippet including the role, e.g. ``:js-ref:`Array/map` ``.
    pub raw_text: String,
}

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Severity {
    /// The link was produced but probably points nowhere useful.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::Warning => f.write_str("warning"),
        };
    }
}

/// Location in a document where a role was authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SourceRef {
    /// Document containing the markup.
    pub file: PathBuf,
    /// One-based line number. Zero when the request did not come from a file.
    pub line: u32,
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            return write!(f, "{}", self.file.display());
        }
        return write!(f, "{}:{}", self.file.display(), self.line);
    }
}

/// Prefix every occurrence of `special` in `text` with a backslash.
fn escape_chars(text: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    return out;
}

/// Link destination for `[title](...)`. Plain when CommonMark allows it,
/// `<...>` otherwise.
fn markdown_destination(url: &str) -> String {
    let needs_brackets = url.is_empty()
        || url
            .chars()
            .any(|c| return c.is_whitespace() || matches!(c, '(' | ')' | '<' | '>'));
    if needs_brackets {
        return format!("<{}>", escape_chars(url, &['\\', '<', '>']));
    }
    return escape_chars(url, &['\\']);
}

/// Title text for an anonymous hyperlink. Interpreted text may not start
/// with whitespace, so leading blanks are dropped behind an escaped space.
fn rst_title(title: &str) -> String {
    let escaped = escape_chars(title, &['\\', '`', '<']);
    if title.starts_with(char::is_whitespace) {
        return format!("\\ {}", escaped.trim_start());
    }
    return escaped;
}
