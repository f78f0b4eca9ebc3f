#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use std::path::{Path, PathBuf};
    use std::process::{Command, Output};

    /// Default JavaScript reference root.
    const JS: &str = "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference";
    /// Default HTML element reference root.
    const HTML: &str = "https://developer.mozilla.org/en-US/docs/Web/HTML/Element";

    /// The built binary, run from `dir`.
    fn mdnref_cmd(dir: &Path) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_mdnref"));
        cmd.current_dir(dir);
        cmd
    }

    /// Path of a checked-in fixture project.
    fn fixture(name: &str) -> PathBuf {
        Path::new("tests/fixtures").join(name)
    }

    /// Captured stdout as text.
    fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Captured stderr as text.
    fn stderr(output: &Output) -> String {
        String::from_utf8_lossy(&output.stderr).into_owned()
    }

    #[test]
    fn resolve_uses_defaults_without_config() {
        let out = mdnref_cmd(&fixture("empty-id"))
            .args(["resolve", "js-ref", "Array/map"])
            .output()
            .unwrap();
        assert!(out.status.success(), "resolve failed: {}", stderr(&out));
        assert_eq!(stdout(&out), format!("map\t{JS}/Array/map\n"), "title and default target");
    }

    #[test]
    fn resolve_honors_configured_base_url() {
        let out = mdnref_cmd(&fixture("basic"))
            .args(["resolve", "web-api-ref", "Fetch_API/Using_Fetch", "--json"])
            .output()
            .unwrap();
        assert!(out.status.success(), "resolve failed: {}", stderr(&out));

        let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
        assert_eq!(
            json["target_url"],
            "https://mirror.example/api/Fetch_API/Using_Fetch",
            "configured mirror is the base"
        );
        assert_eq!(json["display_title"], "Using_Fetch", "last segment");
        assert_eq!(json["messages"].as_array().unwrap().len(), 0, "no diagnostics");
    }

    #[test]
    fn resolve_empty_identifier_passes_through() {
        let out = mdnref_cmd(&fixture("empty-id"))
            .args(["resolve", "html-ref", ""])
            .output()
            .unwrap();
        assert!(out.status.success(), "resolve failed: {}", stderr(&out));
        assert_eq!(stdout(&out), format!("\t{HTML}/\n"), "empty title, dangling target");
    }

    #[test]
    fn resolve_unknown_role_is_an_error() {
        let out = mdnref_cmd(&fixture("basic"))
            .args(["resolve", "css-ref", "color"])
            .output()
            .unwrap();
        assert_eq!(out.status.code(), Some(2), "runtime error exit code");
        assert!(stderr(&out).contains("Unknown Role"), "diagnostic: {}", stderr(&out));
    }

    #[test]
    fn list_skips_excluded_and_unregistered_roles() {
        let out = mdnref_cmd(&fixture("basic")).arg("list").output().unwrap();
        assert!(out.status.success(), "list failed: {}", stderr(&out));

        let lines: Vec<String> = stdout(&out).lines().map(String::from).collect();
        assert_eq!(
            lines,
            vec![
                "api.rst:4  web-api-ref  https://mirror.example/api/Fetch_API/Using_Fetch".to_string(),
                format!("guide.md:3  js-ref  {JS}/Array/map"),
                format!("guide.md:3  html-ref  {HTML}/video"),
            ],
            "archive/ is excluded and :ref: is not listed"
        );
    }

    #[test]
    fn check_passes_on_clean_docs() {
        let out = mdnref_cmd(&fixture("basic")).arg("check").output().unwrap();
        assert!(out.status.success(), "check failed: {}", stderr(&out));
        assert_eq!(stdout(&out), "All 3 references OK\n", "summary line");
    }

    #[test]
    fn check_flags_empty_identifiers() {
        let out = mdnref_cmd(&fixture("empty-id")).arg("check").output().unwrap();
        assert_eq!(out.status.code(), Some(1), "warnings exit code");
        assert!(
            stderr(&out).contains("warning: guide.md:1: "),
            "warning names the location: {}",
            stderr(&out)
        );
        assert_eq!(stdout(&out), "1 warnings in 2 references\n", "summary line");
    }

    #[test]
    fn expand_prints_without_touching_the_file() {
        let out = mdnref_cmd(&fixture("basic"))
            .args(["expand", "api.rst"])
            .output()
            .unwrap();
        assert!(out.status.success(), "expand failed: {}", stderr(&out));
        assert_eq!(
            stdout(&out),
            "API\n===\n\nSee `Using_Fetch <https://mirror.example/api/Fetch_API/Using_Fetch>`__.\n",
            "rst anonymous hyperlink on stdout"
        );

        let on_disk = std::fs::read_to_string(fixture("basic").join("api.rst")).unwrap();
        assert!(on_disk.contains(":web-api-ref:`Fetch_API/Using_Fetch`"), "file unchanged: {on_disk}");
    }

    #[test]
    fn expand_write_rewrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.md"), "Try {js-ref}`Promise/all` and :ref:`x`.\n").unwrap();

        let out = mdnref_cmd(dir.path()).args(["expand", "--write"]).output().unwrap();
        assert!(out.status.success(), "expand failed: {}", stderr(&out));

        let written = std::fs::read_to_string(dir.path().join("page.md")).unwrap();
        assert_eq!(
            written,
            format!("Try [all]({JS}/Promise/all) and :ref:`x`.\n"),
            "registered marker replaced, other role kept"
        );
    }

    #[test]
    fn expand_write_keeps_documented_role_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let readme = "Use ``{js-ref}`Array/map` `` in prose.\n\n```rst\n:js-ref:`Array/map`\n```\n";
        std::fs::write(dir.path().join("README.md"), readme).unwrap();

        let out = mdnref_cmd(dir.path()).args(["expand", "--write"]).output().unwrap();
        assert!(out.status.success(), "expand failed: {}", stderr(&out));

        let written = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
        assert_eq!(written, readme, "examples in code spans and fences survive");
    }

    #[test]
    fn expand_missing_file_is_an_error() {
        let out = mdnref_cmd(&fixture("basic"))
            .args(["expand", "nope.md"])
            .output()
            .unwrap();
        assert_eq!(out.status.code(), Some(2), "runtime error exit code");
        assert!(stderr(&out).contains("File Not Found"), "diagnostic: {}", stderr(&out));
    }

    #[test]
    fn config_set_then_resolve_changes_only_target() {
        let dir = tempfile::tempdir().unwrap();

        let set = mdnref_cmd(dir.path())
            .args(["config", "set", "html_reference_url", "http://local/html"])
            .output()
            .unwrap();
        assert!(set.status.success(), "config set failed: {}", stderr(&set));

        let out = mdnref_cmd(dir.path())
            .args(["resolve", "html-ref", "Global_attributes/id"])
            .output()
            .unwrap();
        assert_eq!(
            stdout(&out),
            "id\thttp://local/html/Global_attributes/id\n",
            "override moves the target"
        );

        let unset = mdnref_cmd(dir.path())
            .args(["config", "unset", "mdn_html_reference_url"])
            .output()
            .unwrap();
        assert!(unset.status.success(), "config unset failed: {}", stderr(&unset));

        let out = mdnref_cmd(dir.path())
            .args(["resolve", "html-ref", "Global_attributes/id"])
            .output()
            .unwrap();
        assert_eq!(stdout(&out), format!("id\t{HTML}/Global_attributes/id\n"), "default restored");
    }

    #[test]
    fn config_show_reports_where_values_come_from() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".mdnref.toml"), format!("urls = {{ html_reference_url = \"{HTML}\" }}\n"))
            .unwrap();

        let out = mdnref_cmd(dir.path()).args(["config", "show"]).output().unwrap();
        assert!(out.status.success(), "config show failed: {}", stderr(&out));
        assert!(
            stdout(&out).contains(&format!("mdn_html_reference_url = {HTML}  (.mdnref.toml, scope: env)")),
            "inline override equal to the default still comes from the file: {}",
            stdout(&out)
        );
        assert!(
            stdout(&out).contains(&format!("mdn_javascript_reference_url = {JS}  (default, scope: env)")),
            "unset key: {}",
            stdout(&out)
        );
    }

    #[test]
    fn config_set_rejects_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let out = mdnref_cmd(dir.path())
            .args(["config", "set", "css_reference_url", "x"])
            .output()
            .unwrap();
        assert_eq!(out.status.code(), Some(2), "runtime error exit code");
        assert!(!dir.path().join(".mdnref.toml").exists(), "nothing written");
    }

    #[test]
    fn info_json_lists_roles() {
        let out = mdnref_cmd(&fixture("basic")).args(["info", "--json"]).output().unwrap();
        assert!(out.status.success(), "info failed: {}", stderr(&out));

        let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
        let roles = json["roles"].as_array().unwrap();
        assert_eq!(roles.len(), 3, "three registered roles");
        assert_eq!(roles[0]["name"], "js-ref", "registration order");
        assert_eq!(roles[2]["config_key"], "mdn_api_reference_url", "canonical key");
        assert_eq!(roles[2]["base_url"], "https://mirror.example/api", "effective url");
        assert_eq!(roles[2]["scope"], "env", "scope");
        assert_eq!(json["current_state"]["config_found"], true, "fixture has a config");
    }
}
