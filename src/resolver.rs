//! Reference resolution: turn a role's identifier into an MDN hyperlink.
//!
//! Handlers are pure functions of the request and the base URLs. The
//! identifier is never escaped, trimmed, or validated; an empty identifier
//! yields `base_url + "/"`.

use crate::config::BaseUrls;
use crate::types::{
    Diagnostic, ReferenceKind, ReferenceLink, ReferenceRequest, Resolution, Severity,
};

/// Knobs that alter diagnostics but never the produced link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Warn when the identifier is empty.
    pub validate_identifiers: bool,
}

/// Handler for `:html-ref:`.
pub fn html_reference(request: &ReferenceRequest, urls: &BaseUrls, options: ResolveOptions) -> Resolution {
    return resolve(request, urls.for_kind(ReferenceKind::Html), options);
}

/// Handler for `:js-ref:`.
pub fn javascript_reference(
    request: &ReferenceRequest,
    urls: &BaseUrls,
    options: ResolveOptions,
) -> Resolution {
    return resolve(request, urls.for_kind(ReferenceKind::JavaScript), options);
}

/// Build the link for one request against an explicit base URL.
pub fn link_for(identifier: &str, base_url: &str) -> ReferenceLink {
    return ReferenceLink {
        display_title: display_title(identifier).to_string(),
        target_url: format!("{base_url}/{identifier}"),
    };
}

/// Handler for `:web-api-ref:`.
pub fn web_api_reference(
    request: &ReferenceRequest,
    urls: &BaseUrls,
    options: ResolveOptions,
) -> Resolution {
    return resolve(request, urls.for_kind(ReferenceKind::WebApi), options);
}

/// Last `/`-delimited segment of the identifier, or all of it.
fn display_title(identifier: &str) -> &str {
    return identifier.rsplit_once('/').map_or(identifier, |(_, last)| return last);
}

/// Shared body of every handler.
fn resolve(request: &ReferenceRequest, base_url: &str, options: ResolveOptions) -> Resolution {
    let link = link_for(&request.identifier, base_url);

    let mut messages = Vec::new();
    if options.validate_identifiers && request.identifier.is_empty() {
        messages.push(Diagnostic {
            location: request.location.clone(),
            message: format!("empty {} reference `{}` links to {}", request.kind.label(), request.raw_text, link.target_url),
            severity: Severity::Warning,
        });
    }

    return Resolution {
        messages,
        nodes: vec![link],
    };
}
