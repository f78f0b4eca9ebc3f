//! Role registration: the adapter between the resolver and the document pipeline.

use std::fmt;

use crate::config::{
    BaseUrls, DEFAULT_HTML_URL, DEFAULT_JAVASCRIPT_URL, DEFAULT_WEB_API_URL, HTML_URL_KEY,
    JAVASCRIPT_URL_KEY, WEB_API_URL_KEY,
};
use crate::resolver::{self, ResolveOptions};
use crate::types::{ReferenceKind, ReferenceRequest, Resolution, SourceRef};

/// Signature shared by every role handler.
pub type RoleHandler = fn(&ReferenceRequest, &BaseUrls, ResolveOptions) -> Resolution;

/// How widely a config value may vary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigScope {
    /// Per build environment, never per document.
    Env,
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Self::Env => f.write_str("env"),
        };
    }
}

/// A declared configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    /// Value used when the build does not override it.
    pub default: &'static str,
    /// Canonical key name.
    pub key: &'static str,
    /// How widely the value may vary.
    pub scope: ConfigScope,
}

/// A registered role.
#[derive(Debug, Clone)]
pub struct RoleEntry {
    /// Function invoked per occurrence.
    pub handler: RoleHandler,
    /// Which kind of request the role builds.
    pub kind: ReferenceKind,
    /// Role name as written in markup, e.g. `js-ref`.
    pub name: &'static str,
}

/// Capabilities a host pipeline offers to a plugin at start-up.
pub trait RoleRegistrar {
    /// Declare a configuration value with its default.
    fn add_config_value(&mut self, key: &'static str, default: &'static str, scope: ConfigScope);

    /// Bind a role name to a handler.
    fn add_role(&mut self, name: &'static str, kind: ReferenceKind, handler: RoleHandler);
}

/// In-process role table used by the scanner and expander.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Declared config values, in declaration order.
    config_values: Vec<ConfigValue>,
    /// Registered roles, in registration order.
    roles: Vec<RoleEntry>,
}

impl Registry {
    /// Look up a declared config value by canonical key.
    pub fn config_value(&self, key: &str) -> Option<&ConfigValue> {
        return self.config_values.iter().find(|v| return v.key == key);
    }

    /// Declared config values, in declaration order.
    pub fn config_values(&self) -> &[ConfigValue] {
        return &self.config_values;
    }

    /// Run the handler registered under `name`. Returns `None` for unknown roles.
    pub fn invoke(
        &self,
        name: &str,
        raw_text: &str,
        identifier: &str,
        location: SourceRef,
        urls: &BaseUrls,
        options: ResolveOptions,
    ) -> Option<Resolution> {
        let entry = self.role(name)?;
        let request = ReferenceRequest {
            identifier: identifier.to_string(),
            kind: entry.kind,
            location,
            raw_text: raw_text.to_string(),
        };
        return Some((entry.handler)(&request, urls, options));
    }

    /// A registry with the three MDN roles installed.
    pub fn mdn() -> Self {
        let mut registry = Self::default();
        setup(&mut registry);
        return registry;
    }

    /// Look up a role by name.
    pub fn role(&self, name: &str) -> Option<&RoleEntry> {
        return self.roles.iter().find(|r| return r.name == name);
    }

    /// Registered roles, in registration order.
    pub fn roles(&self) -> &[RoleEntry] {
        return &self.roles;
    }
}

impl RoleRegistrar for Registry {
    fn add_config_value(&mut self, key: &'static str, default: &'static str, scope: ConfigScope) {
        self.config_values.retain(|v| return v.key != key);
        self.config_values.push(ConfigValue { default, key, scope });
    }

    fn add_role(&mut self, name: &'static str, kind: ReferenceKind, handler: RoleHandler) {
        self.roles.retain(|r| return r.name != name);
        self.roles.push(RoleEntry { handler, kind, name });
    }
}

/// Install the MDN roles and their config values.
pub fn setup<R: RoleRegistrar + ?Sized>(app: &mut R) {
    app.add_role("js-ref", ReferenceKind::JavaScript, resolver::javascript_reference);
    app.add_config_value(JAVASCRIPT_URL_KEY, DEFAULT_JAVASCRIPT_URL, ConfigScope::Env);

    app.add_role("html-ref", ReferenceKind::Html, resolver::html_reference);
    app.add_config_value(HTML_URL_KEY, DEFAULT_HTML_URL, ConfigScope::Env);

    app.add_role("web-api-ref", ReferenceKind::WebApi, resolver::web_api_reference);
    app.add_config_value(WEB_API_URL_KEY, DEFAULT_WEB_API_URL, ConfigScope::Env);
}
