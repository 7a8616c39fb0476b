//! Reading the seller files in testdata/sellers.

use listing_adapter_csv::{CsvConfig, CsvReader};
use listing_ir::Value;
use std::path::PathBuf;

fn seller_file(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../testdata/sellers")
        .join(file_name)
}

#[test]
fn apparel_csv_headers_are_cleaned() -> anyhow::Result<()> {
    let table = CsvReader::new().read_path(&seller_file("apparel.csv"))?;
    assert_eq!(
        table.column_names(),
        vec![
            "Product Name",
            "Brand",
            "MRP",
            "Price",
            "Quantity",
            "Images",
            "Bullet Points",
            "Gender"
        ]
    );
    assert_eq!(table.row_count(), 3);

    let first = table.row(0)?;
    assert_eq!(first.get("MRP"), Some(&Value::from("₹1,299")));
    assert_eq!(first.get("Price"), Some(&Value::Float(999.0)));
    assert_eq!(first.get("Bullet Points"), Some(&Value::from("Soft cotton|Regular fit|Machine wash")));

    let last = table.row(2)?;
    assert_eq!(last.get("Product Name"), Some(&Value::from("   ")));
    assert_eq!(last.get("Bullet Points"), Some(&Value::Null));
    Ok(())
}

#[test]
fn tsv_files_are_tab_separated() -> anyhow::Result<()> {
    // a configured comma delimiter does not apply to .tsv files
    let reader = CsvReader::new().with_config(CsvConfig::new().delimiter(','));
    let table = reader.read_path(&seller_file("accessories.tsv"))?;
    assert_eq!(table.column_names(), vec!["sku", "name", "price"]);
    assert_eq!(table.row(1)?.get("price"), Some(&Value::Float(650.5)));
    Ok(())
}

#[test]
fn inspect_serializes_summary() -> anyhow::Result<()> {
    let reader = CsvReader::new().with_config(CsvConfig::new().sample_size(1));
    let summary = reader.inspect_path(&seller_file("apparel.csv"))?;
    assert_eq!(summary.row_count, 3);
    assert_eq!(summary.sample_rows.len(), 1);

    let json = serde_json::to_value(&summary)?;
    assert_eq!(json["columns"][0], "Product Name");
    // "abc" in a later row keeps the whole column textual
    assert_eq!(json["sample_rows"][0]["Quantity"], "25");
    assert_eq!(json["sample_rows"][0]["Price"], 999.0);
    Ok(())
}

#[test]
fn missing_file_is_io_error() {
    let err = CsvReader::new()
        .read_path(&seller_file("missing.csv"))
        .unwrap_err();
    assert!(matches!(err, listing_adapter_csv::CsvError::Io(_)));
}
