//! Sheet readers: tolerant extraction from loosely-structured grids.
//!
//! The costing and invoice readers never fail. Malformed numeric cells
//! degrade to zero and layout-detection failures fall back to fixed
//! positions, so an upload always yields a best-effort model instead of a
//! per-cell error. Only the bulk rule import can fail, when a rule sheet
//! lacks its two required columns.

pub mod costing;
pub mod invoice;
pub mod rules;

pub use costing::{duty_from_formula, read_costing_model, read_customs_rules};
pub use invoice::read_invoice_items;
pub use rules::read_duty_mappings;
