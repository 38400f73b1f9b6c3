//! Excel boundary tests: workbook decoding and export round trips.

use aircost::core::Classifier;
use aircost::excel::{load_grid, ShipmentExporter};
use aircost::grid::Grid;
use aircost::pipeline::process_shipment;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

// ═══════════════════════════════════════════════════════════════════════════
// READER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_load_grid_preserves_absolute_positions() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("costing.xlsx");

    // First used cell is nowhere near A1; absolute offsets must still hold.
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_number(22, 5, 18.45).unwrap();
    sheet.write_string(26, 0, "FACTOR").unwrap();
    sheet.write_number(26, 1, 10.0).unwrap();
    sheet.write_number(26, 3, 24.5).unwrap();
    workbook.save(&path).unwrap();

    let grid = load_grid(&path).unwrap();
    assert_eq!(grid.number(22, 5), 18.45);
    assert_eq!(grid.text(26, 0), "FACTOR");
    assert_eq!(grid.number(26, 1), 10.0);
    // Gap column between duty and factor stays empty.
    assert_eq!(grid.number(26, 2), 0.0);
    assert_eq!(grid.number(26, 3), 24.5);
}

#[test]
fn test_load_grid_mixed_cell_types() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mixed.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "CODE").unwrap();
    sheet.write_number(0, 1, 800.0).unwrap();
    sheet.write_boolean(0, 2, true).unwrap();
    workbook.save(&path).unwrap();

    let grid = load_grid(&path).unwrap();
    assert_eq!(grid.text(0, 0), "CODE");
    assert_eq!(grid.number(0, 1), 800.0);
    // Booleans never coerce to numbers.
    assert_eq!(grid.number(0, 2), 0.0);
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORTER TESTS
// ═══════════════════════════════════════════════════════════════════════════

fn sample_record() -> aircost::ShipmentRecord {
    let costing = Grid::from_strings(vec![
        vec!["FACTOR", "0", "22.70"],
        vec!["FACTOR", "10", "24.50"],
    ]);
    let invoice = Grid::from_strings(vec![
        vec!["C/NO", "CODE", "DESCRIPTION", "QTY", "UNIT", "UNIT PRICE", "AMOUNT"],
        vec!["7#", "CB1", "COLOUR BOX SMALL", "800", "PCS", "0.0141", "11.28"],
        vec!["8#", "SH2", "SHELL STRANDS", "100", "PCS", "0.2", "20"],
    ]);
    process_shipment(&costing, &invoice, None, &[], &Classifier::default()).unwrap()
}

#[test]
fn test_export_writes_both_sheets() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out.xlsx");

    let record = sample_record();
    ShipmentExporter::new(&record).export(&path).unwrap();
    assert!(path.exists());

    // The invoice sheet is first, so load_grid sees its header row.
    let grid = load_grid(&path).unwrap();
    assert_eq!(grid.text(0, 0), "C/NO.");
    assert_eq!(grid.text(0, 11), "SELLING PRICE");
}

#[test]
fn test_export_round_trips_item_values() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out.xlsx");

    let record = sample_record();
    ShipmentExporter::new(&record).export(&path).unwrap();

    let grid = load_grid(&path).unwrap();
    // Row 1 = first processed item, in export column order.
    assert_eq!(grid.text(1, 0), "7#");
    assert_eq!(grid.text(1, 2), "COLOUR BOX SMALL");
    assert_eq!(grid.number(1, 3), 800.0);
    assert_eq!(grid.number(1, 7), 10.0); // duty %
    assert_eq!(grid.number(1, 8), 24.5); // factor
    assert_eq!(grid.number(1, 11), record.processed[0].selling_price);
}

#[test]
fn test_export_empty_shipment_still_writes_headers() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.xlsx");

    let mut record = sample_record();
    record.processed.clear();
    ShipmentExporter::new(&record).export(&path).unwrap();

    let grid = load_grid(&path).unwrap();
    assert_eq!(grid.text(0, 1), "CODE");
    assert_eq!(grid.row_count(), 1);
}
