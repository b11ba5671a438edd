use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const TOOL_CATALOG: &str = r#"
name: tool
options:
  - { short: a, long: enable-a }
  - { short: c, long: copt }
  - { short: b, long: bfile, args: 1, required: true }
"#;

fn write_catalog(dir: &Path, file_name: &str, text: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, text).expect("failed to write catalog");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cmdline-parse"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run cmdline-parse")
}

/// Runs `parse` against `catalog` with `extra` flags and the arguments after `--`.
fn run_parse(catalog: &Path, extra: &[&str], args: &[&str]) -> Output {
    let catalog = catalog.to_str().expect("utf-8 temp path");
    let mut argv = vec!["parse", "--catalog", catalog];
    argv.extend_from_slice(extra);
    argv.push("--");
    argv.extend_from_slice(args);
    run(&argv)
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn option_names(report: &Value) -> Vec<&str> {
    report["options"]
        .as_array()
        .expect("options array")
        .iter()
        .filter_map(|option| option["name"].as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn test_parse_prints_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), "tool.yaml", TOOL_CATALOG);

    let output = run_parse(&catalog, &[], &["-acbtoast", "foo", "bar"]);
    let report = stdout_json(&output);

    assert_eq!(report["catalog"], "tool");
    assert_eq!(report["dialect"], "posix");
    assert_eq!(option_names(&report), vec!["a", "c", "b"]);
    assert_eq!(report["options"][2]["values"], serde_json::json!(["toast"]));
    assert!(report["options"][0].get("values").is_none());
    assert_eq!(report["args"], serde_json::json!(["foo", "bar"]));
}

#[test]
fn test_parse_yaml_output() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), "tool.yaml", TOOL_CATALOG);

    let output = run_parse(&catalog, &["--format", "yaml"], &["-b", "x"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("dialect: posix"));
    assert!(text.contains("name: b"));
}

#[test]
fn test_parse_dialect_override() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), "tool.yaml", TOOL_CATALOG);

    let posix = stdout_json(&run_parse(&catalog, &[], &["-ac", "-b", "x"]));
    assert_eq!(option_names(&posix), vec!["a", "c", "b"]);

    let gnu = stdout_json(&run_parse(&catalog, &["--dialect", "gnu"], &["-ac", "-b", "x"]));
    assert_eq!(gnu["dialect"], "gnu");
    assert_eq!(option_names(&gnu), vec!["a", "b"]);
    assert_eq!(gnu["args"], serde_json::json!(["c"]));
}

#[test]
fn test_parse_stop_at_non_option() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), "tool.yaml", TOOL_CATALOG);

    let report = stdout_json(&run_parse(
        &catalog,
        &["--stop-at-non-option"],
        &["-b", "x", "foo", "-a"],
    ));

    assert_eq!(option_names(&report), vec!["b"]);
    assert_eq!(report["args"], serde_json::json!(["foo", "-a"]));
}

#[test]
fn test_parse_properties_fill_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), "tool.yaml", TOOL_CATALOG);

    let report = stdout_json(&run_parse(
        &catalog,
        &["--property", "bfile=out.txt", "--property", "enable-a=yes"],
        &["-c"],
    ));

    assert_eq!(option_names(&report), vec!["c", "b", "a"]);
    assert_eq!(report["options"][1]["values"], serde_json::json!(["out.txt"]));
}

#[test]
fn test_parse_keep_quotes() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), "tool.yaml", TOOL_CATALOG);

    let stripped = stdout_json(&run_parse(&catalog, &[], &["-b", "\"x\""]));
    assert_eq!(stripped["options"][0]["values"], serde_json::json!(["x"]));

    let kept = stdout_json(&run_parse(&catalog, &["--keep-quotes"], &["-b", "\"x\""]));
    assert_eq!(kept["options"][0]["values"], serde_json::json!(["\"x\""]));
}

#[test]
fn test_parse_rejection_exits_with_two() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), "tool.yaml", TOOL_CATALOG);

    let output = run_parse(&catalog, &[], &["-a"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stderr(&output).trim(), "error: missing required option: b");

    let output = run_parse(&catalog, &[], &["-adbtoast"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unrecognized option: -adbtoast"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_parse_missing_catalog_exits_with_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_parse(&dir.path().join("absent.yaml"), &[], &[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: Failed to load"));
}

#[test]
fn test_parse_rejects_malformed_property() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), "tool.yaml", TOOL_CATALOG);

    let output = run_parse(&catalog, &["--property", "bfile"], &["-b", "x"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("expected KEY=VALUE"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), "tool.yaml", TOOL_CATALOG);

    let output = run_parse(&catalog, &["-v"], &["-b", "x"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("Parsing arguments"));
    stdout_json(&output);

    let quiet = run_parse(&catalog, &[], &["-b", "x"]);
    assert!(stderr(&quiet).is_empty());
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn test_check_files_and_directories() {
    let dir = tempfile::tempdir().unwrap();
    let catalogs = dir.path().join("catalogs");
    fs::create_dir(&catalogs).unwrap();
    write_catalog(&catalogs, "tool.yaml", TOOL_CATALOG);
    write_catalog(&catalogs, "ls.json", r#"{"options":[{"short":"l"}]}"#);
    let single = write_catalog(dir.path(), "single.yml", "options:\n  - { long: verbose }\n");

    let output = run(&[
        "check",
        catalogs.to_str().unwrap(),
        single.to_str().unwrap(),
    ]);

    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Checked 3 catalog(s)."
    );
}

#[test]
fn test_check_reports_invalid_definitions() {
    let dir = tempfile::tempdir().unwrap();
    let bad = write_catalog(
        dir.path(),
        "bad.yaml",
        "options:\n  - { short: x, optional_arg: true }\n",
    );

    let output = run(&["check", bad.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid catalog definition"));
}

// ---------------------------------------------------------------------------
// convert
// ---------------------------------------------------------------------------

#[test]
fn test_convert_yaml_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), "tool.yaml", TOOL_CATALOG);
    let target = dir.path().join("tool.json");

    let output = run(&[
        "convert",
        "--catalog",
        catalog.to_str().unwrap(),
        "--output",
        target.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("3 option(s)"));

    let json: Value = serde_json::from_str(&fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(json["name"], "tool");
    assert_eq!(json["options"][2]["long"], "bfile");
    assert_eq!(json["options"][2]["args"], 1);

    // The converted file drives the parser the same way.
    let report = stdout_json(&run_parse(&target, &[], &["-acbtoast"]));
    assert_eq!(option_names(&report), vec!["a", "c", "b"]);
}

#[test]
fn test_convert_rejects_unknown_extension() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write_catalog(dir.path(), "tool.yaml", TOOL_CATALOG);

    let output = run(&[
        "convert",
        "--catalog",
        catalog.to_str().unwrap(),
        "--output",
        dir.path().join("tool.toml").to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unsupported catalog format"));
}
