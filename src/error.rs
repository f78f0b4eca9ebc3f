/// Crate-level error types for mdnref diagnostics.
use std::path::PathBuf;

/// Every error names the file, key, or role that caused it so the rendered
/// diagnostic is actionable on its own. The resolver itself never fails;
/// these come from the configuration and document plumbing around it.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `.mdnref.toml` could not be parsed as an editable TOML document.
    #[error("config parse failed: {}: {reason}", path.display())]
    ConfigParse {
        /// Path of the config file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// A document given on the command line does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// `config set`/`unset` named a key that no role declared.
    #[error("unknown config key: `{key}`")]
    UnknownConfigKey {
        /// Key as typed by the user.
        key: String,
    },

    /// A role name that is not registered.
    #[error("unknown role: `{name}`")]
    UnknownRole {
        /// Role name as typed by the user.
        name: String,
    },

    /// A document whose extension maps to no markup format.
    #[error("unsupported document format: {}", path.display())]
    UnsupportedFormat {
        /// Offending document.
        path: PathBuf,
    },
}
