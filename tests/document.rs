mod common;

use common::write_pdf;
use pdfchat::document::extract_pdf;
use tempfile::TempDir;

#[test]
fn test_extracts_pages_in_order_joined_by_blank_line() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.pdf");
    write_pdf(&path, &["First page", "Second page"]);

    let document = extract_pdf(&path).unwrap();

    assert_eq!(document.name, "report.pdf");
    assert_eq!(document.pages, 2);
    assert_eq!(document.text, "First page\n\nSecond page");
}

#[test]
fn test_single_page_has_no_trailing_separator() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("memo.pdf");
    write_pdf(&path, &["Only page"]);

    let document = extract_pdf(&path).unwrap();
    assert_eq!(document.text, "Only page");
}
