use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

fn cargo_bin() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_listing") {
        return PathBuf::from(path);
    }

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| repo_root().join("target"));
    let executable_name = format!("listing{}", std::env::consts::EXE_SUFFIX);
    let fallback = target_dir.join("debug").join(executable_name);

    if fallback.exists() {
        return fallback;
    }

    panic!(
        "CARGO_BIN_EXE_listing is not set and fallback binary was not found at {}",
        fallback.display()
    );
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn testdata_path(path: &str) -> PathBuf {
    repo_root().join(path)
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time after epoch")
        .as_nanos();
    let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let filename = format!(
        "listing-cli-{name}-{}-{nanos}-{counter}.{extension}",
        std::process::id()
    );
    env::temp_dir().join(filename)
}

fn assert_exit_code(output: &Output, expected: i32) {
    let actual = output.status.code().unwrap_or(-1);
    assert_eq!(
        actual,
        expected,
        "unexpected exit code; stdout: {}; stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn remove_if_exists(path: &Path) {
    let _ = fs::remove_file(path);
}

struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn create(name: &str, extension: &str, content: &str) -> Self {
        let path = unique_temp_path(name, extension);
        fs::write(&path, content).expect("temporary file should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        remove_if_exists(&self.path);
    }
}

fn run_validate(input: &Path, mapping: &Path, schema: &Path, extra: &[&str]) -> Output {
    let mut args = vec![
        "validate".to_string(),
        input.to_string_lossy().into_owned(),
        "-m".to_string(),
        mapping.to_string_lossy().into_owned(),
        "-s".to_string(),
        schema.to_string_lossy().into_owned(),
    ];
    args.extend(extra.iter().map(|arg| (*arg).to_string()));

    Command::new(cargo_bin())
        .args(&args)
        .output()
        .expect("run listing validate")
}

#[test]
fn validate_reports_errors_as_json_and_exits_one() {
    let output = run_validate(
        &testdata_path("testdata/sellers/apparel.csv"),
        &testdata_path("testdata/mappings/apparel.yaml"),
        &testdata_path("testdata/templates/apparel.json"),
        &[],
    );
    assert_exit_code(&output, 1);

    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should contain valid JSON");
    assert_eq!(payload["total_rows"], 3);
    assert_eq!(payload["valid_rows"], 1);
    assert_eq!(payload["invalid_rows"], 2);
    assert_eq!(payload["data"][0]["brand"], "ACME");

    let result = &payload["validation_result"];
    assert_eq!(result["is_valid"], false);
    let errors = result["errors"].as_array().expect("errors should be an array");
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0]["row"], 2);
    assert_eq!(errors[0]["field"], "price");
    assert_eq!(
        errors[0]["message"],
        "Price (1999.0) cannot be greater than MRP (1499.0)"
    );
    assert_eq!(errors[2]["field"], "productName");
}

#[test]
fn validate_text_report_lists_each_error() {
    let output = run_validate(
        &testdata_path("testdata/sellers/apparel.csv"),
        &testdata_path("testdata/mappings/apparel.yaml"),
        &testdata_path("testdata/templates/apparel.json"),
        &["--format", "text"],
    );
    assert_exit_code(&output, 1);

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Validation failed: 2 of 3 rows invalid, 3 errors",
            "row 2: price: Price (1999.0) cannot be greater than MRP (1499.0)",
            "row 2: images: Field 'images' must be a valid URL",
            "row 3: productName: Required field 'productName' is missing or empty",
        ]
    );
}

#[test]
fn validate_passing_file_exits_zero() {
    let output = run_validate(
        &testdata_path("testdata/sellers/accessories.tsv"),
        &testdata_path("testdata/mappings/accessories.json"),
        &testdata_path("testdata/templates/accessories.yaml"),
        &["--format", "text"],
    );
    assert_exit_code(&output, 0);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end(), "Validation passed: 2 rows valid");
}

#[test]
fn validate_writes_report_to_output_file() {
    let report_path = unique_temp_path("report", "json");
    remove_if_exists(&report_path);

    let output = run_validate(
        &testdata_path("testdata/sellers/apparel.csv"),
        &testdata_path("testdata/mappings/apparel.yaml"),
        &testdata_path("testdata/templates/apparel.json"),
        &["--output", report_path.to_string_lossy().as_ref()],
    );
    assert_exit_code(&output, 1);
    assert!(output.stdout.is_empty());

    let written = fs::read_to_string(&report_path).expect("report should be written");
    remove_if_exists(&report_path);
    let payload: serde_json::Value = serde_json::from_str(&written).expect("valid JSON report");
    assert_eq!(payload["invalid_rows"], 2);
}

#[test]
fn validate_applies_max_errors_from_config() {
    let config = TempFile::create("max-errors", "yaml", "max_errors: 1\n");

    let output = Command::new(cargo_bin())
        .args([
            "-c",
            config.path().to_string_lossy().as_ref(),
            "validate",
            testdata_path("testdata/sellers/apparel.csv")
                .to_string_lossy()
                .as_ref(),
            "-m",
            testdata_path("testdata/mappings/apparel.yaml")
                .to_string_lossy()
                .as_ref(),
            "-s",
            testdata_path("testdata/templates/apparel.json")
                .to_string_lossy()
                .as_ref(),
            "--format",
            "text",
        ])
        .output()
        .expect("run listing validate");
    assert_exit_code(&output, 1);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Validation failed: 1 of 3 rows invalid, 1 errors"));
    assert!(stdout.contains("warning: Validation stopped after 1 errors"));
}

#[test]
fn validate_strict_booleans_from_config() {
    let seller = TempFile::create(
        "returnable",
        "csv",
        "Name,Returnable\nTee,yes\nCap,sometimes\n",
    );
    let mapping = TempFile::create(
        "returnable-mapping",
        "yaml",
        "- seller_column: Name\n  marketplace_attribute: productName\n- seller_column: Returnable\n  marketplace_attribute: isReturnable\n",
    );
    let template = TempFile::create(
        "returnable-template",
        "json",
        r#"{
            "productName": {"name": "productName", "type": "string"},
            "isReturnable": {"name": "isReturnable", "type": "boolean"}
        }"#,
    );

    let lenient = run_validate(seller.path(), mapping.path(), template.path(), &[]);
    assert_exit_code(&lenient, 0);

    let config = TempFile::create("strict", "yaml", "strict_booleans: true\n");
    let strict = Command::new(cargo_bin())
        .args([
            "-c",
            config.path().to_string_lossy().as_ref(),
            "validate",
            seller.path().to_string_lossy().as_ref(),
            "-m",
            mapping.path().to_string_lossy().as_ref(),
            "-s",
            template.path().to_string_lossy().as_ref(),
            "--format",
            "text",
        ])
        .output()
        .expect("run listing validate");
    assert_exit_code(&strict, 1);
    assert!(
        String::from_utf8_lossy(&strict.stdout)
            .contains("row 2: isReturnable: Field 'isReturnable' must be a boolean")
    );
}

#[test]
fn validate_missing_template_fails() {
    let output = run_validate(
        &testdata_path("testdata/sellers/apparel.csv"),
        &testdata_path("testdata/mappings/apparel.yaml"),
        &testdata_path("testdata/templates/does-not-exist.json"),
        &[],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("loading template"), "stderr: {stderr}");
}
