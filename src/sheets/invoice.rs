//! Invoice-sheet reader.
//!
//! Invoices arrive with the header anywhere in the first 25 rows and with
//! columns in any order, so the reader first detects the header row, then
//! resolves each column role against an ordered pattern list, and only then
//! extracts rows. When no header can be found it falls back to the fixed
//! column layout of the oldest template.

use crate::grid::Grid;
use crate::types::RawLineItem;
use tracing::debug;

/// How many leading rows to scan for a header.
const HEADER_SCAN_ROWS: usize = 25;

/// A single header-label predicate, evaluated against an upper-cased,
/// trimmed header cell.
#[derive(Debug, Clone, Copy)]
enum LabelMatch {
    /// Cell equals the token exactly.
    Exact(&'static str),
    /// Cell equals or contains the token.
    Contains(&'static str),
}

impl LabelMatch {
    fn matches(&self, cell: &str) -> bool {
        match self {
            LabelMatch::Exact(token) => cell == *token,
            LabelMatch::Contains(token) => cell.contains(token),
        }
    }
}

/// Ordered label patterns per column role. First pattern with a matching
/// header cell wins; a role with no match at all resolves to absent.
const CARTON_PATTERNS: &[LabelMatch] = &[
    LabelMatch::Contains("C/NO"),
    LabelMatch::Contains("CARTON"),
    LabelMatch::Contains("CTN"),
];
const CODE_PATTERNS: &[LabelMatch] = &[
    LabelMatch::Contains("CODE"),
    LabelMatch::Contains("ITEM CODE"),
    LabelMatch::Contains("PRODUCT CODE"),
];
const DESCRIPTION_PATTERNS: &[LabelMatch] = &[
    LabelMatch::Contains("DESCRIPTION"),
    LabelMatch::Contains("DESC"),
    LabelMatch::Contains("DEC."),
    LabelMatch::Contains("DEC"),
    LabelMatch::Contains("ITEM"),
    LabelMatch::Contains("PRODUCT"),
];
const QTY_PATTERNS: &[LabelMatch] = &[
    LabelMatch::Contains("QTY"),
    LabelMatch::Contains("QUANTITY"),
    LabelMatch::Contains("QUAN"),
];
// "UNIT" must not swallow "UNIT PRICE", so only an exact match counts.
const UNIT_PATTERNS: &[LabelMatch] = &[LabelMatch::Exact("UNIT")];
const UNIT_PRICE_PATTERNS: &[LabelMatch] = &[
    LabelMatch::Contains("UNIT PRICE"),
    LabelMatch::Contains("PRICE"),
    LabelMatch::Contains("UNIT_PRICE"),
    LabelMatch::Contains("U/PRICE"),
];
const AMOUNT_PATTERNS: &[LabelMatch] = &[
    LabelMatch::Contains("AMOUNT"),
    LabelMatch::Contains("TOTAL"),
    LabelMatch::Contains("VALUE"),
    LabelMatch::Contains("LINE TOTAL"),
];

/// Resolved column index per role; `None` means the column is absent and
/// every read from it degrades to empty/zero.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnIndices {
    carton_no: Option<usize>,
    code: Option<usize>,
    description: Option<usize>,
    qty: Option<usize>,
    unit: Option<usize>,
    unit_price: Option<usize>,
    amount: Option<usize>,
}

impl ColumnIndices {
    /// Fixed positions 0-6 for the headerless legacy layout.
    fn fixed() -> Self {
        Self {
            carton_no: Some(0),
            code: Some(1),
            description: Some(2),
            qty: Some(3),
            unit: Some(4),
            unit_price: Some(5),
            amount: Some(6),
        }
    }

    fn resolve(header: &[String]) -> Self {
        Self {
            carton_no: find_column(header, CARTON_PATTERNS),
            code: find_column(header, CODE_PATTERNS),
            description: find_column(header, DESCRIPTION_PATTERNS),
            qty: find_column(header, QTY_PATTERNS),
            unit: find_column(header, UNIT_PATTERNS),
            unit_price: find_column(header, UNIT_PRICE_PATTERNS),
            amount: find_column(header, AMOUNT_PATTERNS),
        }
    }
}

fn find_column(header: &[String], patterns: &[LabelMatch]) -> Option<usize> {
    for pattern in patterns {
        if let Some(idx) = header.iter().position(|cell| pattern.matches(cell)) {
            return Some(idx);
        }
    }
    None
}

/// Upper-cased, trimmed cells of one row.
fn upper_row(grid: &Grid, r: usize) -> Vec<String> {
    grid.row(r)
        .iter()
        .map(|cell| cell.as_text().to_uppercase())
        .collect()
}

/// Scan the leading rows for one that looks like an invoice header: it must
/// name a code-like or description-like column AND a quantity-like or
/// monetary-like column.
fn find_header_row(grid: &Grid) -> Option<usize> {
    for r in 0..grid.row_count().min(HEADER_SCAN_ROWS) {
        let cells = upper_row(grid, r);
        let has_code = cells.iter().any(|c| c.contains("CODE"));
        let has_desc = cells.iter().any(|c| {
            c == "DESCRIPTION" || c.contains("DESC") || c.contains("DEC") || c == "ITEM" || c == "PRODUCT"
        });
        let has_qty = cells.iter().any(|c| c.contains("QTY") || c.contains("QUANTITY"));
        let has_money = cells
            .iter()
            .any(|c| c.contains("PRICE") || c.contains("AMOUNT") || c.contains("VALUE"));

        if (has_code || has_desc) && (has_qty || has_money) {
            return Some(r);
        }
    }
    None
}

fn text_at(grid: &Grid, r: usize, col: Option<usize>) -> String {
    col.map_or_else(String::new, |c| grid.text(r, c))
}

fn number_at(grid: &Grid, r: usize, col: Option<usize>) -> f64 {
    col.map_or(0.0, |c| grid.number(r, c))
}

/// Extract normalized line items from an invoice grid, preserving source
/// row order.
///
/// Derivation rules per row: a missing amount is `unit_price × qty` when
/// both are positive; a zero quantity defaults to 1; a missing unit price
/// is back-derived from `amount / qty`. Rows without real data (no amount
/// and no code+description+qty) are discarded as spacing or section noise.
pub fn read_invoice_items(grid: &Grid) -> Vec<RawLineItem> {
    let header_idx = find_header_row(grid);
    let columns = match header_idx {
        Some(r) => ColumnIndices::resolve(&upper_row(grid, r)),
        None => ColumnIndices::fixed(),
    };
    debug!(?header_idx, ?columns, "invoice header detection");

    let start_row = header_idx.map_or(0, |r| r + 1);
    let mut items = Vec::new();
    let mut skipped = 0usize;

    for r in start_row..grid.row_count() {
        let code = text_at(grid, r, columns.code);
        let description = text_at(grid, r, columns.description);

        if code.is_empty() && description.is_empty() {
            skipped += 1;
            continue;
        }

        let carton_no = text_at(grid, r, columns.carton_no);
        let qty = number_at(grid, r, columns.qty);
        let unit = text_at(grid, r, columns.unit);
        let unit_price = number_at(grid, r, columns.unit_price);
        let amount = number_at(grid, r, columns.amount);

        let final_amount = if amount > 0.0 {
            amount
        } else if unit_price > 0.0 && qty > 0.0 {
            unit_price * qty
        } else {
            0.0
        };
        let final_qty = if qty > 0.0 { qty } else { 1.0 };
        let final_unit_price = if unit_price > 0.0 {
            unit_price
        } else if final_amount > 0.0 {
            final_amount / final_qty
        } else {
            0.0
        };

        if final_amount > 0.0 || (!code.is_empty() && !description.is_empty() && qty > 0.0) {
            items.push(RawLineItem {
                carton_no,
                code,
                description,
                qty: final_qty,
                unit,
                unit_price: final_unit_price,
                amount: if final_amount > 0.0 {
                    final_amount
                } else {
                    final_unit_price * final_qty
                },
            });
        } else {
            debug!(row = r, "skipped row with no usable data");
            skipped += 1;
        }
    }

    debug!(items = items.len(), skipped, "invoice extraction complete");
    items
}
