//! End-to-end pipeline tests over in-memory grids.

use aircost::core::Classifier;
use aircost::grid::Grid;
use aircost::pipeline::process_shipment;
use aircost::types::DutyRule;
use aircost::AircostError;
use pretty_assertions::assert_eq;

/// Costing grid carrying the reference duty→factor table.
fn costing_grid() -> Grid {
    let mut rows: Vec<Vec<&str>> = vec![vec![""; 8]; 26];
    rows[4][5] = "11.28";
    rows[22][5] = "18.45";
    rows.push(vec!["FACTOR", "0", "22.70"]);
    rows.push(vec!["FACTOR", "10", "24.50"]);
    rows.push(vec!["FACTOR", "15", "25.40"]);
    rows.push(vec!["FACTOR", "20", "26.25"]);
    rows.push(vec!["FACTOR", "22", "26.60"]);
    rows.push(vec!["FACTOR", "30", "28.00"]);
    Grid::from_strings(rows)
}

#[test]
fn test_colour_box_reference_shipment() {
    let invoice = Grid::from_strings(vec![
        vec!["C/NO", "CODE", "DESCRIPTION", "QTY", "UNIT", "UNIT PRICE", "AMOUNT"],
        vec!["7#", "", "COLOUR BOX FOR X", "800", "PCS", "0.0141", "11.28"],
    ]);

    let record = process_shipment(
        &costing_grid(),
        &invoice,
        None,
        &[],
        &Classifier::default(),
    )
    .unwrap();

    assert_eq!(record.items.len(), 1);
    let item = &record.processed[0];
    assert_eq!(item.duty_percent, 10);
    assert_eq!(item.factor, 24.50);
    assert!((item.landed_cost - 0.34545).abs() < 1e-9);
    assert_eq!(item.selling_price, 0.75);

    assert_eq!(record.totals.groups.len(), 1);
    assert_eq!(record.totals.total_invoice_amount, 11.28);
    assert_eq!(record.costing.exchange_rate, 18.45);
}

#[test]
fn test_interpolated_duty_between_table_keys() {
    let invoice = Grid::from_strings(vec![
        vec!["CODE", "DESCRIPTION", "QTY", "UNIT PRICE"],
        vec!["X1", "ENAMEL PENDANTS", "10", "2"],
    ]);
    // User rule puts the item at 18%, which is between the 15 and 20 keys.
    let rules = vec![DutyRule::new("ENAMEL PENDANTS", "711790", "18%", 18)];

    let record = process_shipment(
        &costing_grid(),
        &invoice,
        None,
        &rules,
        &Classifier::default(),
    )
    .unwrap();

    let item = &record.processed[0];
    assert_eq!(item.duty_percent, 18);
    assert!((item.factor - 25.91).abs() < 1e-9);
    // Amount derived from price × qty.
    assert_eq!(item.amount, 20.0);
}

#[test]
fn test_adversarial_grids_never_panic() {
    let junk_costing = Grid::from_strings(vec![
        vec!["FACTOR", "abc", "xyz"],
        vec!["@@@", "", ""],
        vec!["FACTOR"],
    ]);
    let junk_invoice = Grid::from_strings(vec![
        vec!["CODE", "DESCRIPTION", "QTY", "PRICE"],
        vec!["", "", "", ""],
        vec!["??", "###", "-", "not a number"],
        vec!["A1", "REAL ITEM", "5", "1.5"],
    ]);

    let record = process_shipment(
        &junk_costing,
        &junk_invoice,
        None,
        &[],
        &Classifier::default(),
    )
    .unwrap();

    // Only the real row survives; everything malformed degraded silently.
    assert_eq!(record.items.len(), 1);
    assert_eq!(record.items[0].code, "A1");
    assert!(record.processed[0].final_cost.is_finite());
}

#[test]
fn test_structural_failure_names_the_stage() {
    let empty_invoice = Grid::from_strings(vec![vec!["some", "noise"]]);
    let err = process_shipment(
        &costing_grid(),
        &empty_invoice,
        None,
        &[],
        &Classifier::default(),
    )
    .unwrap_err();

    match err {
        AircostError::Parse(msg) => assert!(msg.contains("invoice")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_record_round_trips_through_json() {
    let invoice = Grid::from_strings(vec![
        vec!["CODE", "DESCRIPTION", "QTY", "UNIT PRICE"],
        vec!["T1", "SILK TASSEL", "50", "0.8"],
    ]);
    let record = process_shipment(
        &costing_grid(),
        &invoice,
        None,
        &[],
        &Classifier::default(),
    )
    .unwrap();

    let json = serde_json::to_string(&record).unwrap();
    let back: aircost::ShipmentRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back.processed, record.processed);
    assert_eq!(back.totals, record.totals);
}
