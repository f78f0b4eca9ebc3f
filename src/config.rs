use std::path::Path;

use crate::error::Error;
use crate::types::ReferenceKind;

/// Name of the project configuration file, looked up at the scan root.
pub const CONFIG_FILE: &str = ".mdnref.toml";

/// Config key holding the HTML element reference base URL.
pub const HTML_URL_KEY: &str = "mdn_html_reference_url";

/// Config key holding the JavaScript reference base URL.
pub const JAVASCRIPT_URL_KEY: &str = "mdn_javascript_reference_url";

/// Config key holding the Web API reference base URL.
pub const WEB_API_URL_KEY: &str = "mdn_api_reference_url";

/// Default HTML element reference root.
pub const DEFAULT_HTML_URL: &str = "https://developer.mozilla.org/en-US/docs/Web/HTML/Element";

/// Default JavaScript reference root.
pub const DEFAULT_JAVASCRIPT_URL: &str =
    "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference";

/// Default Web API reference root.
pub const DEFAULT_WEB_API_URL: &str = "https://developer.mozilla.org/en-US/docs/Web/API";

/// The three base URLs a resolver reads from. Loaded once per run and never
/// mutated afterwards; handlers receive it by reference.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(deny_unknown_fields)]
pub struct BaseUrls {
    /// Root for `:web-api-ref:`.
    #[serde(default = "default_web_api_url", rename = "mdn_api_reference_url", alias = "api_reference_url")]
    pub api: String,
    /// Root for `:html-ref:`.
    #[serde(default = "default_html_url", rename = "mdn_html_reference_url", alias = "html_reference_url")]
    pub html: String,
    /// Root for `:js-ref:`.
    #[serde(
        default = "default_javascript_url",
        rename = "mdn_javascript_reference_url",
        alias = "javascript_reference_url"
    )]
    pub javascript: String,
}

impl BaseUrls {
    /// Base URL configured for a reference kind.
    pub fn for_kind(&self, kind: ReferenceKind) -> &str {
        return match kind {
            ReferenceKind::Html => &self.html,
            ReferenceKind::JavaScript => &self.javascript,
            ReferenceKind::WebApi => &self.api,
        };
    }

    /// Base URL stored under a config key (canonical name or alias).
    pub fn get(&self, key: &str) -> Option<&str> {
        return url_key_kind(key).map(|kind| return self.for_kind(kind));
    }
}

impl Default for BaseUrls {
    fn default() -> Self {
        return Self {
            api: default_web_api_url(),
            html: default_html_url(),
            javascript: default_javascript_url(),
        };
    }
}

/// Project configuration loaded from `.mdnref.toml`.
/// Include/exclude patterns are path prefixes applied to document paths.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Path prefixes excluded from scanning.
    exclude: Vec<String>,
    /// Path prefixes to scan. Empty means everything.
    include: Vec<String>,
    /// Base URLs handed to every role handler.
    pub urls: BaseUrls,
    /// Attach a warning to references with an empty identifier.
    pub validate_identifiers: bool,
}

/// Raw TOML structure for `.mdnref.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct MdnrefTomlConfig {
    /// See [`Config::exclude`].
    #[serde(default)]
    exclude: Vec<String>,
    /// See [`Config::include`].
    #[serde(default)]
    include: Vec<String>,
    /// `[urls]` table.
    #[serde(default)]
    urls: BaseUrls,
    /// See [`Config::validate_identifiers`].
    #[serde(default)]
    validate_identifiers: bool,
}

impl Config {
    /// Load config from `.mdnref.toml` in the given root directory.
    /// Returns defaults if the file doesn't exist. A file that exists but is
    /// malformed is an error; it never silently falls back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed or names unknown keys.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        return Self::parse(&content);
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or names unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: MdnrefTomlConfig = toml::from_str(content)?;
        return Ok(Self {
            exclude: raw.exclude,
            include: raw.include,
            urls: raw.urls,
            validate_identifiers: raw.validate_identifiers,
        });
    }

    /// Check whether a document path should be scanned.
    ///
    /// A path is included if no include patterns are set, or if it starts
    /// with at least one include pattern. An included path is then excluded
    /// if it starts with any exclude pattern.
    pub fn should_scan(&self, relative_path: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| return relative_path.starts_with(p.as_str()));

        if !included {
            return false;
        }

        return !self.exclude.iter().any(|p| return relative_path.starts_with(p.as_str()));
    }
}

/// Map a URL config key, canonical or alias, to its canonical spelling.
pub fn canonical_url_key(key: &str) -> Option<&'static str> {
    return url_key_kind(key).map(url_key_for);
}

/// Serde default for [`BaseUrls::html`].
fn default_html_url() -> String {
    return DEFAULT_HTML_URL.to_string();
}

/// Serde default for [`BaseUrls::javascript`].
fn default_javascript_url() -> String {
    return DEFAULT_JAVASCRIPT_URL.to_string();
}

/// Serde default for [`BaseUrls::api`].
fn default_web_api_url() -> String {
    return DEFAULT_WEB_API_URL.to_string();
}

/// Canonical config key holding the base URL for a kind.
pub const fn url_key_for(kind: ReferenceKind) -> &'static str {
    return match kind {
        ReferenceKind::Html => HTML_URL_KEY,
        ReferenceKind::JavaScript => JAVASCRIPT_URL_KEY,
        ReferenceKind::WebApi => WEB_API_URL_KEY,
    };
}

/// Which reference kind a URL config key configures.
fn url_key_kind(key: &str) -> Option<ReferenceKind> {
    return match key {
        "api_reference_url" | WEB_API_URL_KEY => Some(ReferenceKind::WebApi),
        "html_reference_url" | HTML_URL_KEY => Some(ReferenceKind::Html),
        "javascript_reference_url" | JAVASCRIPT_URL_KEY => Some(ReferenceKind::JavaScript),
        _ => None,
    };
}
