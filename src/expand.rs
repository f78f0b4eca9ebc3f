//! Document expansion: substitute role markers with rendered MDN links.

use std::path::Path;

use crate::config::Config;
use crate::registry::Registry;
use crate::resolver::ResolveOptions;
use crate::scanner::{self, RoleOccurrence};
use crate::types::{Diagnostic, LinkFormat, Resolution};

/// Result of expanding one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Diagnostics raised by the handlers, in document order.
    pub messages: Vec<Diagnostic>,
    /// Number of markers replaced.
    pub replaced: usize,
    /// Rewritten document text.
    pub text: String,
}

/// Expand every registered role marker in `content`. Markers in literal
/// blocks and inline code stay as written.
/// Everything outside the markers, line endings included, is kept byte-for-byte.
pub fn expand(
    content: &str,
    file: &Path,
    format: LinkFormat,
    registry: &Registry,
    config: &Config,
) -> Expansion {
    let occurrences = scanner::find_roles(content, file, format, registry);
    let mut pending = occurrences.iter().peekable();

    let mut text = String::with_capacity(content.len());
    let mut messages = Vec::new();
    let mut replaced = 0_usize;
    let mut line_number = 0_u32;

    for line in content.split_inclusive('\n') {
        line_number = line_number.saturating_add(1);
        let mut cursor = 0_usize;

        while let Some(occurrence) = pending.next_if(|o| return o.location.line == line_number) {
            let Some(resolution) = resolve_occurrence(occurrence, registry, config) else {
                continue;
            };
            text.push_str(line.get(cursor..occurrence.span.start).unwrap_or_default());
            for node in &resolution.nodes {
                text.push_str(&node.render(format));
            }
            messages.extend(resolution.messages);
            cursor = occurrence.span.end;
            replaced = replaced.saturating_add(1);
        }

        text.push_str(line.get(cursor..).unwrap_or_default());
    }

    return Expansion { messages, replaced, text };
}

/// Run the handler for one occurrence with the configured base URLs.
pub fn resolve_occurrence(
    occurrence: &RoleOccurrence,
    registry: &Registry,
    config: &Config,
) -> Option<Resolution> {
    let options = ResolveOptions {
        validate_identifiers: config.validate_identifiers,
    };
    return registry.invoke(
        &occurrence.role,
        &occurrence.raw_text,
        &occurrence.identifier,
        occurrence.location.clone(),
        &config.urls,
        options,
    );
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::indexing_slicing, reason = "tests")]
mod tests {
    use super::*;

    /// Expand `content` as a document named `doc`.
    fn run(content: &str, format: LinkFormat, config: &Config) -> Expansion {
        return expand(content, Path::new("doc"), format, &Registry::mdn(), config);
    }

    #[test]
    fn markdown_links_replace_markers() {
        let out = run("Call {js-ref}`Array/map` now.\n", LinkFormat::Markdown, &Config::default());
        assert_eq!(
            out.text,
            "Call [map](https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Array/map) now.\n",
            "marker replaced in place"
        );
        assert_eq!(out.replaced, 1, "one marker");
        assert!(out.messages.is_empty(), "no validation by default");
    }

    #[test]
    fn rst_uses_anonymous_hyperlinks() {
        let out = run("The :html-ref:`video` element", LinkFormat::Rst, &Config::default());
        assert_eq!(
            out.text,
            "The `video <https://developer.mozilla.org/en-US/docs/Web/HTML/Element/video>`__ element",
            "anonymous hyperlink"
        );
    }

    #[test]
    fn other_text_is_untouched() {
        let content = "A :ref:`intro` link\r\nand `code` :web-api-ref:`Fetch_API/Using_Fetch`\n\nend";
        let out = run(content, LinkFormat::Markdown, &Config::default());
        assert_eq!(
            out.text,
            "A :ref:`intro` link\r\nand `code` [Using_Fetch](https://developer.mozilla.org/en-US/docs/Web/API/Fetch_API/Using_Fetch)\n\nend",
            "unregistered roles, code and line endings survive"
        );
        assert_eq!(out.replaced, 1, "only the registered marker");
    }

    #[test]
    fn literals_are_left_as_written() {
        let content = "Write ``{js-ref}`Array/map` `` in docs.\n```rst\n:js-ref:`Array/map`\n```\n";
        let out = run(content, LinkFormat::Markdown, &Config::default());
        assert_eq!(out.text, content, "code spans and fences show role syntax verbatim");
        assert_eq!(out.replaced, 0, "nothing replaced");
    }

    #[test]
    fn rst_literal_block_is_left_as_written() {
        let content = "Example::\n\n    :html-ref:`video`\n\nSee :html-ref:`audio`.\n";
        let out = run(content, LinkFormat::Rst, &Config::default());
        assert_eq!(
            out.text,
            "Example::\n\n    :html-ref:`video`\n\nSee `audio <https://developer.mozilla.org/en-US/docs/Web/HTML/Element/audio>`__.\n",
            "only the paragraph marker is expanded"
        );
    }

    #[test]
    fn empty_identifier_still_renders_one_rst_link() {
        let out = run(":html-ref:``", LinkFormat::Rst, &Config::default());
        assert_eq!(
            out.text,
            "`<https://developer.mozilla.org/en-US/docs/Web/HTML/Element/>`__",
            "the URL stands in for the empty title"
        );
    }

    #[test]
    fn configured_urls_are_used() {
        let config = Config::parse("[urls]\napi_reference_url = \"http://local/api\"\n").unwrap();
        let out = run(":web-api-ref:`Window`", LinkFormat::Markdown, &config);
        assert_eq!(out.text, "[Window](http://local/api/Window)", "override applies");
    }

    #[test]
    fn validation_reports_empty_identifiers_with_lines() {
        let config = Config::parse("validate_identifiers = true\n").unwrap();
        let out = run("ok :js-ref:`Map`\nbad :js-ref:``\n", LinkFormat::Markdown, &config);
        assert!(
            out.text.contains("[](https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/)"),
            "empty identifier still links"
        );
        assert_eq!(out.messages.len(), 1, "one warning");
        assert_eq!(out.messages[0].location.line, 2, "warning points at the second line");
    }
}
