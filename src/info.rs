use std::path::PathBuf;

use serde::Serialize;

use crate::config::{self, CONFIG_FILE};
use crate::registry::Registry;

/// Documented exit codes, shared by both renderings.
const EXIT_CODES: [(u8, &str); 3] = [
    (0, "Success / no warnings"),
    (1, "`check` found warnings"),
    (2, "Runtime error"),
];

/// What the current directory looks like to mdnref.
struct CurrentState {
    /// Effective config, or defaults when absent or invalid.
    config: config::Config,
    /// Whether `.mdnref.toml` exists.
    config_found: bool,
    /// Whether the config file parsed; `None` when absent.
    config_valid: Option<bool>,
}

/// One exit code.
#[derive(Serialize)]
struct ExitCodeInfo {
    /// Process exit code.
    code: u8,
    /// What it means.
    meaning: String,
}

/// Root JSON object.
#[derive(Serialize)]
struct InfoJson {
    /// Effective configuration summary.
    current_state: StateJson,
    /// Documented exit codes.
    exit_codes: Vec<ExitCodeInfo>,
    /// Registered roles.
    roles: Vec<RoleJson>,
    /// Crate version.
    version: String,
}

/// One registered role.
#[derive(Serialize)]
struct RoleJson {
    /// Effective base URL.
    base_url: String,
    /// Canonical config key.
    config_key: String,
    /// Built-in default base URL.
    default_url: String,
    /// Reference kind label.
    kind: String,
    /// Role name.
    name: String,
    /// Config scope.
    scope: String,
}

/// Current directory summary.
#[derive(Serialize)]
struct StateJson {
    /// Whether `.mdnref.toml` exists.
    config_found: bool,
    /// Whether it parsed; absent when not found.
    config_valid: Option<bool>,
    /// Whether empty identifiers raise warnings.
    validate_identifiers: bool,
}

/// Load config without failing; `info` must work in a broken project too.
fn gather_state(root: &std::path::Path) -> CurrentState {
    let config_found = root.join(CONFIG_FILE).exists();
    let loaded = config::Config::load(root);
    let config_valid = config_found.then(|| return loaded.is_ok());

    return CurrentState {
        config: loaded.unwrap_or_default(),
        config_found,
        config_valid,
    };
}

/// Render the machine-readable document.
fn print_json(registry: &Registry, state: &CurrentState) {
    let roles = registry
        .roles()
        .iter()
        .map(|role| {
            let key = config::url_key_for(role.kind);
            let declared = registry.config_value(key);
            return RoleJson {
                base_url: state.config.urls.for_kind(role.kind).to_string(),
                config_key: key.to_string(),
                default_url: declared.map_or("", |v| return v.default).to_string(),
                kind: role.kind.label().to_string(),
                name: role.name.to_string(),
                scope: declared.map_or(String::new(), |v| return v.scope.to_string()),
            };
        })
        .collect();

    let info = InfoJson {
        current_state: StateJson {
            config_found: state.config_found,
            config_valid: state.config_valid,
            validate_identifiers: state.config.validate_identifiers,
        },
        exit_codes: EXIT_CODES
            .iter()
            .map(|(code, meaning)| return ExitCodeInfo { code: *code, meaning: (*meaning).to_string() })
            .collect(),
        roles,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(&info).unwrap_or_default();
    println!("{json}");
}

/// Render the human-readable document.
fn print_markdown(registry: &Registry, state: &CurrentState) {
    let version = env!("CARGO_PKG_VERSION");
    print_markdown_header(version);
    print_markdown_roles(registry, state);
    println!();
    print_markdown_state(state);
    println!();
    println!("## Exit Codes\n");
    println!("| Code | Meaning |");
    println!("|------|---------|");
    for (code, meaning) in EXIT_CODES {
        println!("| {code}    | {meaning} |");
    }
}

/// Static usage section.
fn print_markdown_header(version: &str) {
    print!(
        "\
# mdnref {version}

MDN cross-reference roles for Markdown and reStructuredText documentation.
Each role turns an identifier into a link to the MDN reference.

## Role Syntax

    :js-ref:`Array/map`                 reStructuredText role
    {{js-ref}}`Array/map`                 MyST / Markdown role

The link text is the last `/` segment of the identifier; the target is
`<base url>/<identifier>`, verbatim.

## Workflow

    mdnref resolve <role> <identifier>  Print the link for one identifier
    mdnref list                         List every role in scanned documents
    mdnref check                        Report warnings (exit 0/1)
    mdnref expand [files] [--write]     Substitute roles with links
    mdnref config set <key> <url>       Override a base URL in {CONFIG_FILE}

"
    );
}

/// Table of registered roles and their effective base URLs.
fn print_markdown_roles(registry: &Registry, state: &CurrentState) {
    println!("## Roles\n");
    println!("| Role | Kind | Config key | Base URL |");
    println!("|------|------|------------|----------|");
    for role in registry.roles() {
        let key = config::url_key_for(role.kind);
        println!(
            "| `{}` | {} | `{key}` | {} |",
            role.name,
            role.kind.label(),
            state.config.urls.for_kind(role.kind)
        );
    }
}

/// Current directory summary.
fn print_markdown_state(state: &CurrentState) {
    println!("## Current State\n");
    let config_line = match state.config_valid {
        None => "not found, using defaults",
        Some(false) => "found, INVALID (run `mdnref check` for details)",
        Some(true) => "found",
    };
    println!("Config:     {CONFIG_FILE} ({config_line})");
    println!("Validation: {}", if state.config.validate_identifiers { "on" } else { "off" });
}

/// Output the mdnref reference document: roles, config keys, exit codes.
pub fn run(json: bool) {
    let root = PathBuf::from(".");
    let state = gather_state(&root);
    let registry = Registry::mdn();

    if json {
        print_json(&registry, &state);
    } else {
        print_markdown(&registry, &state);
    }
}
