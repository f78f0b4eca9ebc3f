//! Core CLI commands for mdnref: resolve, list, check, expand.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use serde::Serialize;

use crate::config;
use crate::diagnostics;
use crate::error;
use crate::expand::{self, Expansion};
use crate::format;
use crate::registry::Registry;
use crate::resolver::ResolveOptions;
use crate::scanner;
use crate::types::{Diagnostic, ReferenceLink, SourceRef};

/// JSON shape printed by `resolve --json`.
#[derive(Serialize)]
struct ResolvedJson<'a> {
    /// Visible link text.
    display_title: &'a str,
    /// Diagnostics raised by the handler.
    messages: &'a [Diagnostic],
    /// Role that was invoked.
    role: &'a str,
    /// Link target.
    target_url: &'a str,
}

/// Resolve every role in every scanned document with validation forced on.
/// Exits 1 if any warning was raised.
///
/// # Errors
///
/// Returns errors from config loading or document reading.
pub fn check() -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let mut config = config::Config::load(&root)?;
    config.validate_identifiers = true;
    let registry = Registry::mdn();

    let mut total = 0_usize;
    let mut warnings = 0_usize;
    for occurrence in &scanner::scan(&root, &config, &registry)? {
        let Some(resolution) = expand::resolve_occurrence(occurrence, &registry, &config) else {
            continue;
        };
        total = total.saturating_add(1);
        for message in &resolution.messages {
            diagnostics::print_warning(message);
            warnings = warnings.saturating_add(1);
        }
    }

    if warnings > 0 {
        println!("{warnings} warnings in {total} references");
        return Ok(ExitCode::from(1));
    }
    println!("All {total} references OK");
    return Ok(ExitCode::SUCCESS);
}

/// Expand role markers in the given documents, or every scanned document
/// when none are given. Prints to stdout unless `write` is set.
///
/// # Errors
///
/// Returns `Error::FileNotFound` or `Error::UnsupportedFormat` for bad paths,
/// and I/O errors from reading or writing documents.
pub fn expand(paths: &[PathBuf], write: bool) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let config = config::Config::load(&root)?;
    let registry = Registry::mdn();

    let targets = if paths.is_empty() {
        scanner::documents(&root, &config)
    } else {
        paths.to_vec()
    };

    let mut replaced = 0_usize;
    for path in &targets {
        let expansion = expand_file(&root.join(path), path, &registry, &config)?;
        for message in &expansion.messages {
            diagnostics::print_warning(message);
        }
        replaced = replaced.saturating_add(expansion.replaced);

        if write {
            if expansion.replaced > 0 {
                std::fs::write(root.join(path), &expansion.text)?;
                eprintln!("Expanded {} references in {}", expansion.replaced, path.display());
            }
        } else {
            print!("{}", expansion.text);
        }
    }

    if write {
        eprintln!("Expanded {replaced} references in {} documents", targets.len());
    }
    return Ok(());
}

/// Print every role occurrence with the link it resolves to.
///
/// # Errors
///
/// Returns errors from config loading or document reading.
pub fn list() -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let config = config::Config::load(&root)?;
    let registry = Registry::mdn();

    let mut count = 0_usize;
    for occurrence in &scanner::scan(&root, &config, &registry)? {
        let Some(resolution) = expand::resolve_occurrence(occurrence, &registry, &config) else {
            continue;
        };
        for message in &resolution.messages {
            diagnostics::print_warning(message);
        }
        for link in &resolution.nodes {
            println!("{}  {}  {}", occurrence.location, occurrence.role, link.target_url);
            count = count.saturating_add(1);
        }
    }

    eprintln!("{count} references");
    return Ok(());
}

/// Resolve a single identifier with the configured base URLs.
///
/// # Errors
///
/// Returns `Error::UnknownRole` if `role` is not registered, or errors from config loading.
pub fn resolve(role: &str, identifier: &str, json: bool) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let config = config::Config::load(&root)?;
    let registry = Registry::mdn();

    let raw_text = format!(":{role}:`{identifier}`");
    let options = ResolveOptions { validate_identifiers: config.validate_identifiers };
    let location = SourceRef { file: PathBuf::from("<command line>"), line: 0 };
    let resolution = registry
        .invoke(role, &raw_text, identifier, location, &config.urls, options)
        .ok_or_else(|| return error::Error::UnknownRole { name: role.to_string() })?;

    for message in &resolution.messages {
        diagnostics::print_warning(message);
    }

    for link in &resolution.nodes {
        print_resolved(role, link, &resolution.messages, json);
    }
    return Ok(());
}

/// Read and expand one document.
///
/// # Errors
///
/// Returns `Error::UnsupportedFormat`, `Error::FileNotFound`, or `Error::Io`.
fn expand_file(
    disk_path: &Path,
    display_path: &Path,
    registry: &Registry,
    config: &config::Config,
) -> Result<Expansion, error::Error> {
    let link_format = format::format_for_path(display_path)?;
    let content = match std::fs::read_to_string(disk_path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(error::Error::FileNotFound { path: display_path.to_path_buf() });
        },
        Err(e) => return Err(error::Error::Io(e)),
        Ok(c) => c,
    };
    return Ok(expand::expand(&content, display_path, link_format, registry, config));
}

/// Print one resolved link as `title<TAB>url` or JSON.
fn print_resolved(role: &str, link: &ReferenceLink, messages: &[Diagnostic], json: bool) {
    if json {
        let out = ResolvedJson {
            display_title: &link.display_title,
            messages,
            role,
            target_url: &link.target_url,
        };
        // serde_json::to_string_pretty won't fail on this structure.
        println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
    } else {
        println!("{}\t{}", link.display_title, link.target_url);
    }
    return;
}
