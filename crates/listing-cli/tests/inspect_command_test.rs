use std::env;
use std::path::PathBuf;
use std::process::{Command, Output};

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

#[test]
fn inspect_prints_columns_and_sample_rows() {
    let input = testdata_path("testdata/sellers/apparel.csv");
    let config = testdata_path("testdata/config/listing.yaml");

    let output = Command::new(cargo_bin())
        .args([
            "-c",
            config.to_string_lossy().as_ref(),
            "inspect",
            input.to_string_lossy().as_ref(),
        ])
        .output()
        .expect("run listing inspect");
    assert_exit_code(&output, 0);

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should contain valid JSON");
    assert_eq!(
        summary["columns"],
        serde_json::json!([
            "Product Name",
            "Brand",
            "MRP",
            "Price",
            "Quantity",
            "Images",
            "Bullet Points",
            "Gender"
        ])
    );
    assert_eq!(summary["row_count"], 3);

    let samples = summary["sample_rows"]
        .as_array()
        .expect("sample_rows should be an array");
    assert_eq!(samples.len(), 2, "config limits the sample to two rows");
    assert_eq!(samples[0]["MRP"], "₹1,299");
    assert_eq!(samples[0]["Price"], 999.0);
    assert_eq!(samples[1]["Product Name"], "slim denim jeans");
}

#[test]
fn inspect_reads_tsv_files() {
    let input = testdata_path("testdata/sellers/accessories.tsv");

    let output = Command::new(cargo_bin())
        .args(["inspect", input.to_string_lossy().as_ref()])
        .output()
        .expect("run listing inspect");
    assert_exit_code(&output, 0);

    let summary: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should contain valid JSON");
    assert_eq!(summary["columns"], serde_json::json!(["sku", "name", "price"]));
    assert_eq!(summary["sample_rows"][1]["price"], 650.5);
}

#[test]
fn inspect_rejects_spreadsheets() {
    let output = Command::new(cargo_bin())
        .args(["inspect", "listing.xlsx"])
        .output()
        .expect("run listing inspect");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unsupported file type"),
        "stderr should name the problem: {stderr}"
    );
}
