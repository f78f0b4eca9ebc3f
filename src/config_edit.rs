//! `mdnref config` subcommands: format-preserving edits of `.mdnref.toml`.

use std::path::{Path, PathBuf};

use crate::config::{self, CONFIG_FILE};
use crate::error;
use crate::registry::Registry;

/// Set a base URL override in `.mdnref.toml`.
///
/// # Errors
///
/// Returns `Error::UnknownConfigKey` for keys no role declared, or errors
/// from reading and writing the config file.
pub fn cmd_set(key: &str, url: &str) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let canonical = declared_key(key)?;
    set_in_config(&root, canonical, url)?;
    eprintln!("Set {canonical} = {url}");
    return Ok(());
}

/// Print every declared key with its effective value and where it came from.
///
/// # Errors
///
/// Returns errors from config loading.
pub fn cmd_show() -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    for line in describe_values(&root)? {
        println!("{line}");
    }
    return Ok(());
}

/// Remove a base URL override so the default applies again.
///
/// # Errors
///
/// Returns `Error::UnknownConfigKey` for keys no role declared, or errors
/// from reading and writing the config file.
pub fn cmd_unset(key: &str) -> Result<(), error::Error> {
    let root = PathBuf::from(".");
    let canonical = declared_key(key)?;
    if unset_in_config(&root, canonical)? {
        eprintln!("Unset {canonical}");
    } else {
        eprintln!("{canonical} was not set");
    }
    return Ok(());
}

/// Resolve an alias to its canonical key and make sure a role declared it.
///
/// # Errors
///
/// Returns `Error::UnknownConfigKey` if no declared key matches.
fn declared_key(key: &str) -> Result<&'static str, error::Error> {
    let registry = Registry::mdn();
    return config::canonical_url_key(key)
        .filter(|canonical| return registry.config_value(canonical).is_some())
        .ok_or_else(|| return error::Error::UnknownConfigKey { key: key.to_string() });
}

/// One `key = value  (origin, scope: ...)` line per declared key. The
/// origin is the config file whenever it sets the key, whatever the value.
///
/// # Errors
///
/// Returns errors from loading or parsing the config file.
fn describe_values(root: &Path) -> Result<Vec<String>, error::Error> {
    let config = config::Config::load(root)?;
    let (_, doc) = read_config_doc(root)?;
    let overridden = overridden_keys(&doc);
    let registry = Registry::mdn();

    return Ok(registry
        .config_values()
        .iter()
        .map(|value| {
            let effective = config.urls.get(value.key).unwrap_or(value.default);
            let origin = if overridden.contains(&value.key) { CONFIG_FILE } else { "default" };
            return format!("{} = {effective}  ({origin}, scope: {})", value.key, value.scope);
        })
        .collect());
}

/// Canonical keys set under `[urls]`, whether as a table or an inline table.
fn overridden_keys(doc: &toml_edit::DocumentMut) -> Vec<&'static str> {
    return doc
        .get("urls")
        .and_then(toml_edit::Item::as_table_like)
        .map(|urls| return urls.iter().filter_map(|(k, _)| return config::canonical_url_key(k)).collect())
        .unwrap_or_default();
}

/// Parse `.mdnref.toml` into a format-preserving document.
/// Returns an empty document if the file doesn't exist.
///
/// # Errors
///
/// Returns `Error::Io` on read failure or `Error::ConfigParse` on parse failure.
fn read_config_doc(root: &Path) -> Result<(PathBuf, toml_edit::DocumentMut), error::Error> {
    let config_path = root.join(CONFIG_FILE);
    let content = match std::fs::read_to_string(&config_path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(error::Error::Io(e)),
        Ok(c) => c,
    };

    let doc: toml_edit::DocumentMut = content.parse().map_err(|e: toml_edit::TomlError| {
        return error::Error::ConfigParse {
            path: config_path.clone(),
            reason: e.to_string(),
        };
    })?;

    return Ok((config_path, doc));
}

/// Remove aliases of `canonical` from the `[urls]` table. Returns whether anything was removed.
fn remove_key_and_aliases(urls: &mut dyn toml_edit::TableLike, canonical: &str) -> bool {
    let stale: Vec<String> = urls
        .iter()
        .map(|(k, _)| return k.to_string())
        .filter(|k| return config::canonical_url_key(k) == Some(canonical))
        .collect();
    for k in &stale {
        urls.remove(k);
    }
    return !stale.is_empty();
}

/// Write `canonical = url` under `[urls]`, replacing any alias spelling.
/// Creates the `[urls]` table if it doesn't exist; an inline `urls = { ... }`
/// table is edited in place.
///
/// # Errors
///
/// Returns `Error::ConfigParse` if the config can't be parsed or `[urls]`
/// is not a table, or `Error::Io` if writing fails.
fn set_in_config(root: &Path, canonical: &str, url: &str) -> Result<(), error::Error> {
    let (config_path, mut doc) = read_config_doc(root)?;

    let urls = doc
        .entry("urls")
        .or_insert(toml_edit::table())
        .as_table_like_mut()
        .ok_or_else(|| {
            return error::Error::ConfigParse {
                path: config_path.clone(),
                reason: "`urls` must be a table".to_string(),
            };
        })?;

    remove_key_and_aliases(urls, canonical);
    urls.insert(canonical, toml_edit::value(url));

    std::fs::write(&config_path, doc.to_string())?;
    return Ok(());
}

/// Drop `canonical` (and aliases) from `[urls]`. Returns whether anything was removed.
///
/// # Errors
///
/// Returns `Error::ConfigParse` if the config can't be parsed, or `Error::Io` if writing fails.
fn unset_in_config(root: &Path, canonical: &str) -> Result<bool, error::Error> {
    let (config_path, mut doc) = read_config_doc(root)?;

    let Some(urls) = doc.get_mut("urls").and_then(toml_edit::Item::as_table_like_mut) else {
        return Ok(false);
    };
    if !remove_key_and_aliases(urls, canonical) {
        return Ok(false);
    }

    std::fs::write(&config_path, doc.to_string())?;
    return Ok(true);
}
