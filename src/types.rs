use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

//==============================================================================
// Costing Model
//==============================================================================

/// Markup factor table: duty percent → factor.
///
/// Sorted keys make range lookups for interpolation natural. Duplicate duty
/// percents in the source document overwrite (last writer wins).
pub type FactorTable = BTreeMap<u32, f64>;

/// Scalar charges and the factor table read from a costing workbook.
///
/// Built once per costing upload and immutable afterwards. Missing or
/// malformed cells degrade to zero during parsing, so every field is always
/// populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostingModel {
    pub invoice_total: f64,
    pub bank_charges: f64,
    pub clearing_charges: f64,
    pub duties: f64,
    pub overseas_transport: f64,
    pub clearing_charges_factor: f64,
    pub duties_rate: f64,
    /// USD → local currency.
    pub exchange_rate: f64,
    pub factors: FactorTable,
}

//==============================================================================
// Duty Rules
//==============================================================================

/// A keyword → duty mapping, either user-declared or extracted from a
/// customs worksheet. `"FREE"` always means 0%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyRule {
    /// Product description text whose tokens are matched against line items.
    pub keyword: String,
    pub tariff: String,
    /// Human-readable formula, e.g. "FREE" or "15%".
    pub duty_formula: String,
    pub duty_percent: u32,
    pub value: f64,
}

impl DutyRule {
    pub fn new(keyword: impl Into<String>, tariff: impl Into<String>, duty_formula: impl Into<String>, duty_percent: u32) -> Self {
        Self {
            keyword: keyword.into(),
            tariff: tariff.into(),
            duty_formula: duty_formula.into(),
            duty_percent,
            value: 0.0,
        }
    }
}

//==============================================================================
// Line Items
//==============================================================================

/// One normalized invoice row, before classification and pricing.
///
/// `amount` and `unit_price` may have been derived from each other during
/// extraction; a row only survives extraction if it carries real data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLineItem {
    pub carton_no: String,
    pub code: String,
    pub description: String,
    pub qty: f64,
    pub unit: String,
    pub unit_price: f64,
    pub amount: f64,
}

/// A line item with duty, factor and pricing resolved. Created once during
/// the cost pass, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedLineItem {
    pub carton_no: String,
    pub code: String,
    pub description: String,
    pub qty: f64,
    pub unit: String,
    pub unit_price: f64,
    pub amount: f64,
    pub duty_percent: u32,
    pub factor: f64,
    /// unit_price × factor, per unit in local currency.
    pub landed_cost: f64,
    /// landed_cost × qty, the total line value.
    pub final_cost: f64,
    /// Landed cost grossed up by margin and tax, rounded to the quarter.
    pub selling_price: f64,
}

//==============================================================================
// Aggregates
//==============================================================================

/// Per-duty-percent subtotal for the cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyGroup {
    pub duty_percent: u32,
    pub count: usize,
    pub invoice_amount: f64,
    pub final_cost: f64,
    pub factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentTotals {
    pub total_invoice_amount: f64,
    pub total_final_cost: f64,
    /// total_final_cost / total_invoice_amount (0 when the invoice is empty).
    pub effective_factor: f64,
    /// Breakdown sorted by ascending duty percent.
    pub groups: Vec<DutyGroup>,
}

//==============================================================================
// Shipment Record
//==============================================================================

/// The persisted result of one shipment upload. Written once, read many
/// times; re-saving produces a new record id rather than updating in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub created_at: DateTime<Utc>,
    pub costing: CostingModel,
    pub items: Vec<RawLineItem>,
    pub processed: Vec<ProcessedLineItem>,
    pub totals: ShipmentTotals,
}
