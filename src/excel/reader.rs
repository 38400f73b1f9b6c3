//! Workbook decoding - .xlsx → `Grid`

use crate::error::{AircostError, AircostResult};
use crate::grid::{Cell, Grid};
use calamine::{open_workbook, Data, Reader, Xlsx};
use std::path::Path;
use tracing::debug;

/// Load the first worksheet of an .xlsx file into a `Grid`.
///
/// Cell positions are absolute: a worksheet whose used range starts below
/// row 0 is padded with empty rows so fixed-offset reads line up with the
/// source document. Datetimes flatten to their serial number; error cells
/// read as empty.
pub fn load_grid<P: AsRef<Path>>(path: P) -> AircostResult<Grid> {
    let path = path.as_ref();
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| AircostError::Excel(format!("Failed to open Excel file: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AircostError::Excel("Workbook has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| AircostError::Excel(format!("Failed to read sheet '{sheet_name}': {e}")))?;

    let (start_row, start_col) = match range.start() {
        Some((r, c)) => (r as usize, c as usize),
        None => (0, 0),
    };

    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(start_row + range.height());
    // Pad leading empty rows so grid coordinates stay absolute.
    for _ in 0..start_row {
        rows.push(Vec::new());
    }
    for data_row in range.rows() {
        let mut row: Vec<Cell> = Vec::with_capacity(start_col + data_row.len());
        row.resize(start_col, Cell::Empty);
        for cell in data_row {
            row.push(convert_cell(cell));
        }
        rows.push(row);
    }

    debug!(
        sheet = %sheet_name,
        rows = rows.len(),
        "loaded worksheet into grid"
    );

    Ok(Grid::new(rows))
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell_numbers() {
        assert_eq!(convert_cell(&Data::Float(1.5)), Cell::Number(1.5));
        assert_eq!(convert_cell(&Data::Int(7)), Cell::Number(7.0));
    }

    #[test]
    fn test_convert_cell_blank_string_is_empty() {
        assert_eq!(convert_cell(&Data::String("   ".to_string())), Cell::Empty);
        assert_eq!(
            convert_cell(&Data::String("CODE".to_string())),
            Cell::Text("CODE".to_string())
        );
    }

    #[test]
    fn test_load_grid_missing_file() {
        let result = load_grid("definitely_not_here.xlsx");
        assert!(matches!(result, Err(AircostError::Excel(_))));
    }
}
