//! One-shot shipment processing pipeline.
//!
//! Grids in, shipment record out. All stages are tolerant; the only failure
//! this pipeline reports is structural: an invoice with no parseable rows
//! at all.

use crate::core::classifier::Classifier;
use crate::core::pricing::{aggregate, process_items};
use crate::error::{AircostError, AircostResult};
use crate::grid::Grid;
use crate::sheets::{read_costing_model, read_customs_rules, read_invoice_items};
use crate::types::{DutyRule, ShipmentRecord};
use tracing::info;

/// Process one shipment: costing grid + invoice grid (+ optional customs
/// worksheet and user-declared rules) → immutable [`ShipmentRecord`].
///
/// Worksheet-extracted rules are consulted before user-declared ones,
/// mirroring how the customs paperwork historically took precedence.
pub fn process_shipment(
    costing_grid: &Grid,
    invoice_grid: &Grid,
    worksheet_grid: Option<&Grid>,
    user_rules: &[DutyRule],
    classifier: &Classifier,
) -> AircostResult<ShipmentRecord> {
    let costing = read_costing_model(costing_grid);

    let items = read_invoice_items(invoice_grid);
    if items.is_empty() {
        return Err(AircostError::Parse(
            "no parseable invoice rows found; check the invoice layout".to_string(),
        ));
    }

    let mut rules: Vec<DutyRule> = worksheet_grid.map(read_customs_rules).unwrap_or_default();
    rules.extend_from_slice(user_rules);

    let processed = process_items(&items, classifier, &rules, &costing.factors);
    let totals = aggregate(&processed);

    info!(
        items = processed.len(),
        rules = rules.len(),
        total_final_cost = totals.total_final_cost,
        "shipment processed"
    );

    Ok(ShipmentRecord {
        created_at: chrono::Utc::now(),
        costing,
        items,
        processed,
        totals,
    })
}
