//! Excel boundary: workbook decoding and processed-invoice export.
//!
//! Everything else in the crate works on in-memory [`crate::grid::Grid`]
//! values; this module is the only place that touches .xlsx files.

mod exporter;
mod reader;

pub use exporter::ShipmentExporter;
pub use reader::load_grid;
