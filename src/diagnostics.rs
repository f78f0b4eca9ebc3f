use std::fmt::Write as _;

use crate::config::CONFIG_FILE;
use crate::error::Error;
use crate::registry::Registry;
use crate::types::Diagnostic;

/// ANSI bold on.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Print a resolver diagnostic as a single stderr line.
pub fn print_warning(diagnostic: &Diagnostic) {
    eprintln!("{diagnostic}");
}

/// Render an error as a structured markdown diagnostic: what happened and how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::ConfigParse { path, reason } => format!("\
# Error: Invalid Config

Could not parse `{}`: {reason}
", path.display()),

        Error::FileNotFound { path } => format!("\
# Error: File Not Found

`{}` does not exist.
", path.display()),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::TomlDe(e) => format!("\
# Error: Invalid Config

{e}

## Fix

Check `{CONFIG_FILE}`. Allowed top-level keys: `include`, `exclude`,
`validate_identifiers`, `[urls]`.
"),

        Error::UnknownConfigKey { key } => render_unknown_config_key(key),
        Error::UnknownRole { name } => render_unknown_role(name),

        Error::UnsupportedFormat { path } => format!("\
# Error: Unsupported Format

`{}` is not a Markdown (`.md`, `.markdown`) or reStructuredText (`.rst`) document.
", path.display()),
    };
}

/// List the declared keys so the user can pick the right one.
fn render_unknown_config_key(key: &str) -> String {
    let registry = Registry::mdn();
    let mut out = format!("\
# Error: Unknown Config Key

`{key}` is not a declared configuration value.

## Known keys

");
    for value in registry.config_values() {
        let _ = writeln!(out, "- `{}` (default `{}`)", value.key, value.default);
    }
    return out;
}

/// List the registered roles.
fn render_unknown_role(name: &str) -> String {
    let registry = Registry::mdn();
    let mut out = format!("\
# Error: Unknown Role

`{name}` is not a registered role.

## Registered roles

");
    for role in registry.roles() {
        let _ = writeln!(out, "- `{}` ({})", role.name, role.kind.label());
    }
    return out;
}
