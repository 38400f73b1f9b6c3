//! Bulk duty-rule import.
//!
//! Users maintain keyword → duty lists in their own spreadsheets with no
//! fixed layout. This reader locates the product and duty columns from the
//! header; unlike the main sheet readers it CAN fail, because a rule sheet
//! without those two columns is unusable.

use crate::error::{AircostError, AircostResult};
use crate::grid::Grid;
use crate::sheets::costing::duty_from_formula;
use crate::types::DutyRule;
use tracing::debug;

const HEADER_SCAN_ROWS: usize = 25;

const PRODUCT_LABELS: [&str; 4] = ["PRODUCT", "DESCRIPTION", "KEYWORD", "ITEM"];
const DUTY_LABELS: [&str; 2] = ["DUTY", "RATE"];
const TARIFF_LABELS: [&str; 2] = ["TARIFF", "HS CODE"];

fn find_labelled_column(cells: &[String], labels: &[&str]) -> Option<usize> {
    for label in labels {
        if let Some(idx) = cells.iter().position(|c| c.contains(label)) {
            return Some(idx);
        }
    }
    None
}

/// Read a user-maintained duty mapping sheet into rules.
///
/// The single user-visible failure of the bulk import: the header must name
/// both a product column and a duty column somewhere in the first 25 rows.
pub fn read_duty_mappings(grid: &Grid) -> AircostResult<Vec<DutyRule>> {
    let mut header: Option<(usize, usize, usize, Option<usize>)> = None;

    for r in 0..grid.row_count().min(HEADER_SCAN_ROWS) {
        let cells: Vec<String> = grid
            .row(r)
            .iter()
            .map(|c| c.as_text().to_uppercase())
            .collect();
        let product = find_labelled_column(&cells, &PRODUCT_LABELS);
        let duty = find_labelled_column(&cells, &DUTY_LABELS);
        if let (Some(p), Some(d)) = (product, duty) {
            header = Some((r, p, d, find_labelled_column(&cells, &TARIFF_LABELS)));
            break;
        }
    }

    let Some((header_row, product_col, duty_col, tariff_col)) = header else {
        return Err(AircostError::Parse(
            "could not find product and duty columns".to_string(),
        ));
    };
    debug!(header_row, product_col, duty_col, "rule sheet header located");

    let mut rules = Vec::new();
    for r in header_row + 1..grid.row_count() {
        let keyword = grid.text(r, product_col);
        if keyword.is_empty() {
            continue;
        }
        let duty_text = grid.text(r, duty_col);
        // Duty cells may be formulas ("15%", "FREE") or plain numbers.
        let duty_percent = if duty_text.contains('%') || duty_text.eq_ignore_ascii_case("free") {
            duty_from_formula(&duty_text)
        } else {
            grid.number(r, duty_col).round().max(0.0) as u32
        };
        let duty_formula = if duty_percent == 0 {
            "FREE".to_string()
        } else {
            format!("{duty_percent}%")
        };

        rules.push(DutyRule {
            keyword,
            tariff: tariff_col.map_or_else(String::new, |c| grid.text(r, c)),
            duty_formula,
            duty_percent,
            value: 0.0,
        });
    }

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_mapping_rows() {
        let grid = Grid::from_strings(vec![
            vec!["PRODUCT", "TARIFF", "DUTY %"],
            vec!["GLASS BEADS", "701810", "20%"],
            vec!["SHELL", "96019090", "FREE"],
            vec!["TASSELS", "580610", "22"],
            vec!["", "", "15%"],
        ]);
        let rules = read_duty_mappings(&grid).unwrap();
        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].duty_percent, 20);
        assert_eq!(rules[1].duty_percent, 0);
        assert_eq!(rules[1].duty_formula, "FREE");
        assert_eq!(rules[2].duty_percent, 22);
        assert_eq!(rules[2].tariff, "580610");
    }

    #[test]
    fn test_missing_columns_is_an_error() {
        let grid = Grid::from_strings(vec![
            vec!["NAME", "COLOUR"],
            vec!["GLASS BEADS", "BLUE"],
        ]);
        let err = read_duty_mappings(&grid).unwrap_err();
        assert!(err.to_string().contains("could not find product and duty columns"));
    }

    #[test]
    fn test_header_found_past_title_rows() {
        let grid = Grid::from_strings(vec![
            vec!["CUSTOMS RATES 2024"],
            vec![],
            vec!["ITEM", "DUTY"],
            vec!["SCARF", "30%"],
        ]);
        let rules = read_duty_mappings(&grid).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].duty_percent, 30);
    }
}
