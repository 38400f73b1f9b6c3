//! Core engine: duty classification, factor interpolation, pricing.

pub mod classifier;
pub mod interpolate;
pub mod pricing;

pub use classifier::{CategoryRule, Classifier};
pub use interpolate::factor_for;
pub use pricing::{aggregate, process_items};
