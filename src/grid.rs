//! In-memory spreadsheet grid.
//!
//! Both sheet readers consume this type, so the file-format codec stays at
//! the edge of the system. Out-of-range access yields `Cell::Empty` and all
//! numeric coercion is tolerant: a cell that cannot be read as a number is
//! zero, never an error.

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    /// The trimmed string form of the cell ("" for empty).
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) => format_cell_number(*n),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }

    /// Tolerant numeric coercion. Strips thousands separators, whitespace
    /// and stray `#` markers; empty, `-` and unparsable cells become 0.
    pub fn as_number(&self) -> f64 {
        match self {
            Cell::Empty | Cell::Bool(_) => 0.0,
            Cell::Number(n) => *n,
            Cell::Text(s) => parse_loose_number(s),
        }
    }
}

/// Format a numeric cell the way it would appear in a text context,
/// without a trailing ".0" for whole numbers.
fn format_cell_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// Parse human-authored numeric text: "1,234.5", " 12 ", "800#" all work.
fn parse_loose_number(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '#')
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return 0.0;
    }
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// A rectangular-ish array of rows. Rows may have differing lengths;
/// missing trailing cells read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Build a grid from string literals (test and fixture convenience).
    /// Cells that parse cleanly as numbers become `Cell::Number`.
    pub fn from_strings(rows: Vec<Vec<&str>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|s| {
                        if s.is_empty() {
                            Cell::Empty
                        } else if let Ok(n) = s.parse::<f64>() {
                            Cell::Number(n)
                        } else {
                            Cell::Text(s.to_string())
                        }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, r: usize) -> &[Cell] {
        self.rows.get(r).map_or(&[], Vec::as_slice)
    }

    pub fn cell(&self, r: usize, c: usize) -> &Cell {
        self.rows.get(r).and_then(|row| row.get(c)).unwrap_or(&Cell::Empty)
    }

    /// Trimmed text at (r, c); "" when out of range.
    pub fn text(&self, r: usize, c: usize) -> String {
        self.cell(r, c).as_text()
    }

    /// Tolerant numeric value at (r, c); 0 when out of range or malformed.
    pub fn number(&self, r: usize, c: usize) -> f64 {
        self.cell(r, c).as_number()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_number_strips_separators() {
        assert_eq!(parse_loose_number("1,234.5"), 1234.5);
        assert_eq!(parse_loose_number("  12 "), 12.0);
        assert_eq!(parse_loose_number("800#"), 800.0);
    }

    #[test]
    fn test_loose_number_degrades_to_zero() {
        assert_eq!(parse_loose_number(""), 0.0);
        assert_eq!(parse_loose_number("-"), 0.0);
        assert_eq!(parse_loose_number("N/A"), 0.0);
        assert_eq!(parse_loose_number("12..3"), 0.0);
    }

    #[test]
    fn test_cell_as_number() {
        assert_eq!(Cell::Number(3.5).as_number(), 3.5);
        assert_eq!(Cell::Text("2,000".to_string()).as_number(), 2000.0);
        assert_eq!(Cell::Empty.as_number(), 0.0);
        assert_eq!(Cell::Bool(true).as_number(), 0.0);
    }

    #[test]
    fn test_cell_as_text_trims() {
        assert_eq!(Cell::Text("  QTY  ".to_string()).as_text(), "QTY");
        assert_eq!(Cell::Number(800.0).as_text(), "800");
        assert_eq!(Cell::Number(0.25).as_text(), "0.25");
    }

    #[test]
    fn test_out_of_range_reads_empty() {
        let grid = Grid::from_strings(vec![vec!["a"]]);
        assert_eq!(grid.cell(5, 5), &Cell::Empty);
        assert_eq!(grid.text(0, 3), "");
        assert_eq!(grid.number(9, 0), 0.0);
    }

    #[test]
    fn test_from_strings_types_cells() {
        let grid = Grid::from_strings(vec![vec!["CODE", "1.5", ""]]);
        assert_eq!(grid.cell(0, 0), &Cell::Text("CODE".to_string()));
        assert_eq!(grid.cell(0, 1), &Cell::Number(1.5));
        assert_eq!(grid.cell(0, 2), &Cell::Empty);
    }
}
