use projfix_test_utils::sandbox::Sandbox;
use projfix_test_utils::snapdir::dir_manifest;

const LEGACY: &str = r#"{
  "version": "1.0.0-*",
  "compilationOptions": {
    "warningsAsErrors": true
  },
  "content": "config/*.json",
  "dependencies": {}
}
"#;

const MIGRATED: &str = r#"{
  "version": "1.0.0-*",
  "buildOptions": {
    "warningsAsErrors": true,
    "copyToOutput": {
      "include": "config/*.json"
    }
  },
  "publishOptions": {
    "include": "config/*.json"
  },
  "dependencies": {}
}
"#;

#[test]
fn test_migrates_nested_manifests() {
    let mut sb = Sandbox::new();
    sb.write("src/app/project.json", LEGACY)
        .write("test/app.tests/project.json", LEGACY)
        .write("src/app/appsettings.json", r#"{"content": "keep me"}"#);

    let out = sb.output("projfix", ["."]);
    assert!(out.success(), "{}", out.stderr);
    assert!(out.stderr.contains("src/app/project.json"), "{}", out.stderr);
    assert!(out.stderr.contains("Migrated 2 of 2 manifests"), "{}", out.stderr);

    assert_eq!(sb.read("src/app/project.json"), MIGRATED);
    assert_eq!(sb.read("test/app.tests/project.json"), MIGRATED);
    assert_eq!(
        sb.read("src/app/appsettings.json"),
        r#"{"content": "keep me"}"#
    );
}

#[test]
fn test_second_run_is_a_no_op() {
    let mut sb = Sandbox::new();
    sb.write("project.json", LEGACY);

    assert!(sb.output("projfix", ["."]).success());
    let first = sb.read("project.json");
    let modified = sb.modified("project.json");

    let out = sb.output("projfix", ["."]);
    assert!(out.success(), "{}", out.stderr);
    assert!(out.stderr.contains("Migrated 0 of 1 manifests"), "{}", out.stderr);
    assert_eq!(sb.read("project.json"), first);
    assert_eq!(sb.modified("project.json"), modified);
}

#[test]
fn test_unchanged_manifest_not_rewritten() {
    let mut sb = Sandbox::new();
    // Formatting differs from what the serializer would write; it must survive
    let current = "{\"version\":\"1.0\",   \"buildOptions\": {}}";
    sb.write("project.json", current);
    let modified = sb.modified("project.json");

    let out = sb.output("projfix", ["."]);
    assert!(out.success(), "{}", out.stderr);
    assert_eq!(sb.read("project.json"), current);
    assert_eq!(sb.modified("project.json"), modified);
}

#[test]
fn test_usage_error_without_root() {
    let mut sb = Sandbox::new();
    sb.write("project.json", LEGACY);

    let out = sb.output("projfix", Vec::<&str>::new());
    assert!(!out.success());
    assert!(out.stderr.contains("Usage:"), "{}", out.stderr);
    assert_eq!(sb.read("project.json"), LEGACY);
}

#[test]
fn test_usage_error_with_extra_argument() {
    let mut sb = Sandbox::new();
    sb.write("project.json", LEGACY);

    let out = sb.output("projfix", [".", "extra"]);
    assert!(!out.success());
    assert!(out.stderr.contains("Usage:"), "{}", out.stderr);
    assert_eq!(sb.read("project.json"), LEGACY);
}

#[test]
fn test_root_must_be_a_directory() {
    let sb = Sandbox::new();
    let output = sb.snapshot_run("projfix", ["missing"]);
    assert_eq!(
        output,
        "Exit Code: 1\n--- STDOUT ---\n--- STDERR ---\nError: missing is not a directory\n"
    );
}

#[test]
fn test_check_reports_without_writing() {
    let mut sb = Sandbox::new();
    sb.write("a/project.json", LEGACY)
        .write("b/project.json", MIGRATED);

    let out = sb.output("projfix", [".", "--check"]);
    assert_eq!(out.code, Some(1));
    assert!(
        out.stderr.contains("a/project.json (needs migration)"),
        "{}",
        out.stderr
    );
    assert!(!out.stderr.contains("b/project.json"), "{}", out.stderr);
    assert!(
        out.stderr.contains("1 manifests need migration"),
        "{}",
        out.stderr
    );
    assert_eq!(sb.read("a/project.json"), LEGACY);

    let mut clean = Sandbox::new();
    clean.write("project.json", MIGRATED);
    assert!(clean.output("projfix", [".", "--check"]).success());
}

#[test]
fn test_diff_prints_without_writing() {
    let mut sb = Sandbox::new();
    sb.write("project.json", LEGACY);

    let out = sb.output("projfix", [".", "--diff"]);
    assert!(out.success(), "{}", out.stderr);
    assert!(
        out.stdout.contains("-  \"compilationOptions\": {"),
        "{}",
        out.stdout
    );
    assert!(out.stdout.contains("+  \"buildOptions\": {"), "{}", out.stdout);
    assert!(out.stdout.contains("+  \"publishOptions\": {"), "{}", out.stdout);
    assert_eq!(sb.read("project.json"), LEGACY);
}

#[test]
fn test_malformed_manifest_stops_the_run() {
    let mut sb = Sandbox::new();
    sb.write("a/project.json", LEGACY)
        .write("b/project.json", "{ \"content\": ")
        .write("c/project.json", LEGACY);

    let out = sb.output("projfix", ["."]);
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("Failed to migrate"), "{}", out.stderr);
    assert!(out.stderr.contains("JSON parse error"), "{}", out.stderr);

    // Manifests before the failure stay migrated, the rest are untouched
    assert_eq!(sb.read("a/project.json"), MIGRATED);
    assert_eq!(sb.read("b/project.json"), "{ \"content\": ");
    assert_eq!(sb.read("c/project.json"), LEGACY);
}

#[test]
fn test_keep_going_reports_and_continues() {
    let mut sb = Sandbox::new();
    sb.write("a/project.json", LEGACY)
        .write("b/project.json", r#"{"frameworks": {"net46": []}}"#)
        .write("c/project.json", LEGACY);

    let out = sb.output("projfix", [".", "--keep-going"]);
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("b/project.json"), "{}", out.stderr);
    assert!(
        out.stderr.contains("expected object, found array"),
        "{}",
        out.stderr
    );
    assert!(
        out.stderr.contains("Migrate failed with errors"),
        "{}",
        out.stderr
    );

    assert_eq!(sb.read("a/project.json"), MIGRATED);
    assert_eq!(sb.read("c/project.json"), MIGRATED);
}

#[test]
fn test_every_manifest_migrated_by_default() {
    let mut sb = Sandbox::new();
    sb.write(".gitignore", "artifacts/\n")
        .write("src/project.json", LEGACY)
        .write("vendor/pkg/project.json", LEGACY)
        .write(".build/project.json", LEGACY)
        .write("artifacts/project.json", LEGACY);

    let out = sb.output("projfix", ["."]);
    assert!(out.success(), "{}", out.stderr);
    assert!(out.stderr.contains("Migrated 4 of 4 manifests"), "{}", out.stderr);
    for path in [
        "src/project.json",
        "vendor/pkg/project.json",
        ".build/project.json",
        "artifacts/project.json",
    ] {
        assert_eq!(sb.read(path), MIGRATED, "{path}");
    }
}

#[test]
fn test_pruning_flags() {
    let mut sb = Sandbox::new();
    sb.write(".gitignore", "artifacts/\n")
        .write("src/project.json", LEGACY)
        .write("vendor/pkg/project.json", LEGACY)
        .write(".build/project.json", LEGACY)
        .write("artifacts/project.json", LEGACY);

    let out = sb.output(
        "projfix",
        [".", "--skip-hidden", "--respect-ignores", "--skip-vendor"],
    );
    assert!(out.success(), "{}", out.stderr);
    assert_eq!(sb.read("src/project.json"), MIGRATED);
    assert_eq!(sb.read("vendor/pkg/project.json"), LEGACY);
    assert_eq!(sb.read(".build/project.json"), LEGACY);
    assert_eq!(sb.read("artifacts/project.json"), LEGACY);

    let out = sb.output("projfix", [".", "--respect-ignores"]);
    assert!(out.success(), "{}", out.stderr);
    assert_eq!(sb.read("vendor/pkg/project.json"), MIGRATED);
    assert_eq!(sb.read(".build/project.json"), MIGRATED);
    assert_eq!(sb.read("artifacts/project.json"), LEGACY);
}

#[test]
fn test_custom_file_name() {
    let mut sb = Sandbox::new();
    sb.write("legacy/manifest.json", LEGACY)
        .write("legacy/project.json", LEGACY);

    let out = sb.output("projfix", [".", "--file-name", "manifest.json"]);
    assert!(out.success(), "{}", out.stderr);
    assert_eq!(
        dir_manifest(sb.root_path()),
        format!("=== legacy/manifest.json\n{MIGRATED}=== legacy/project.json\n{LEGACY}")
    );
}

#[test]
fn test_no_manifests_found() {
    let mut sb = Sandbox::new();
    sb.write("readme.txt", "nothing here");

    let out = sb.output("projfix", ["."]);
    assert!(out.success(), "{}", out.stderr);
    assert!(
        out.stderr.contains("No project.json files found"),
        "{}",
        out.stderr
    );
}

#[test]
fn test_crlf_manifest_keeps_line_endings() {
    let mut sb = Sandbox::new();
    sb.write("project.json", LEGACY.replace('\n', "\r\n"));

    let out = sb.output("projfix", ["."]);
    assert!(out.success(), "{}", out.stderr);
    assert_eq!(sb.read("project.json"), MIGRATED.replace('\n', "\r\n"));
}
