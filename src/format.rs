/// Document format resolution by file extension.
use std::path::Path;

use crate::error::Error;
use crate::types::LinkFormat;

/// Map a document's extension to the markup its links are rendered in.
///
/// # Errors
///
/// Returns `Error::UnsupportedFormat` for unknown extensions.
pub fn format_for_path(path: &Path) -> Result<LinkFormat, Error> {
    let ext = path.extension().and_then(|e| return e.to_str()).unwrap_or("");

    return match ext {
        "markdown" | "md" => Ok(LinkFormat::Markdown),
        "rst" => Ok(LinkFormat::Rst),
        _ => Err(Error::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    };
}

/// Whether the scanner should look inside this file at all.
pub fn is_document(path: &Path) -> bool {
    return format_for_path(path).is_ok();
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(format_for_path(Path::new("a/b.md")).unwrap(), LinkFormat::Markdown, ".md");
        assert_eq!(format_for_path(Path::new("b.markdown")).unwrap(), LinkFormat::Markdown, ".markdown");
        assert_eq!(format_for_path(Path::new("index.rst")).unwrap(), LinkFormat::Rst, ".rst");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(
            matches!(format_for_path(Path::new("lib.rs")), Err(Error::UnsupportedFormat { .. })),
            "source files are not documents"
        );
        assert!(!is_document(Path::new("Makefile")), "no extension");
    }
}
