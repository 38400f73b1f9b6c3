//! Aircost - air-shipment landed cost calculator
//!
//! This library turns two loosely-structured workbooks - an air-freight
//! costing sheet and a supplier invoice - into priced line items and
//! shipment totals.
//!
//! # Pipeline
//!
//! Workbook → grid → {costing model, line items} → duty classification →
//! factor interpolation → landed/selling prices → aggregates.
//!
//! # Example
//!
//! ```no_run
//! use aircost::core::Classifier;
//! use aircost::excel::load_grid;
//! use aircost::pipeline::process_shipment;
//!
//! let costing = load_grid("costing.xlsx")?;
//! let invoice = load_grid("invoice.xlsx")?;
//! let record = process_shipment(&costing, &invoice, None, &[], &Classifier::default())?;
//!
//! println!("Items: {}", record.processed.len());
//! println!("Total final cost: {:.2}", record.totals.total_final_cost);
//! # Ok::<(), aircost::error::AircostError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod grid;
pub mod pipeline;
pub mod sheets;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{AircostError, AircostResult};
pub use grid::{Cell, Grid};
pub use types::{
    CostingModel, DutyRule, FactorTable, ProcessedLineItem, RawLineItem, ShipmentRecord,
    ShipmentTotals,
};
