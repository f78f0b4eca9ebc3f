mod commands;
mod config;
mod config_edit;
mod diagnostics;
mod error;
mod expand;
mod format;
mod info;
mod literal;
mod registry;
mod resolver;
mod scanner;
mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// Top-level CLI arguments.
#[derive(Parser)]
#[command(name = "mdnref", version, about = "MDN cross-reference roles for Markdown and reStructuredText")]
struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Report empty identifiers in every scanned document (exit 0/1)
    Check,
    /// Inspect or override base URLs in .mdnref.toml
    Config {
        /// Config action.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Replace role markers with links
    Expand {
        /// Documents to expand. Defaults to every scanned document.
        paths: Vec<PathBuf>,
        /// Rewrite the documents in place instead of printing them.
        #[arg(long)]
        write: bool,
    },
    /// Print roles, config keys, and exit codes
    Info {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List every role occurrence and its link
    List,
    /// Resolve one identifier, e.g. `mdnref resolve js-ref Array/map`
    Resolve {
        /// Role name: js-ref, html-ref, or web-api-ref.
        role: String,
        /// Identifier to resolve.
        identifier: String,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// `mdnref config` subcommands.
#[derive(Subcommand)]
enum ConfigAction {
    /// Override a base URL
    Set {
        /// Config key, e.g. mdn_api_reference_url.
        key: String,
        /// New base URL, used verbatim.
        url: String,
    },
    /// Print effective base URLs
    Show,
    /// Remove an override so the default applies
    Unset {
        /// Config key to remove.
        key: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check => commands::check(),
        Commands::Config { action } => run_config(action).map(|()| return ExitCode::SUCCESS),
        Commands::Expand { paths, write } => commands::expand(&paths, write).map(|()| return ExitCode::SUCCESS),
        Commands::Info { json } => {
            info::run(json);
            Ok(ExitCode::SUCCESS)
        },
        Commands::List => commands::list().map(|()| return ExitCode::SUCCESS),
        Commands::Resolve { role, identifier, json } => {
            commands::resolve(&role, &identifier, json).map(|()| return ExitCode::SUCCESS)
        },
    };

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(2)
        },
    };
}

/// Dispatch a `config` subcommand.
///
/// # Errors
///
/// Returns errors from config reading or writing.
fn run_config(action: ConfigAction) -> Result<(), error::Error> {
    return match action {
        ConfigAction::Set { key, url } => config_edit::cmd_set(&key, &url),
        ConfigAction::Show => config_edit::cmd_show(),
        ConfigAction::Unset { key } => config_edit::cmd_unset(&key),
    };
}
