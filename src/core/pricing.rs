//! Cost calculator and aggregator.
//!
//! Selling price targets a 45% gross margin grossed up by 15% consumption
//! tax, then snaps to the nearest quarter-unit of currency.

use crate::core::classifier::Classifier;
use crate::core::interpolate::factor_for;
use crate::types::{
    DutyGroup, DutyRule, FactorTable, ProcessedLineItem, RawLineItem, ShipmentTotals,
};
use std::collections::BTreeMap;

const MARGIN_DIVISOR: f64 = 0.55;
const TAX_GROSS_UP: f64 = 1.15;

/// Round to the nearest quarter-unit of currency (0.25, 0.50, 0.75, ...).
fn round_to_quarter(value: f64) -> f64 {
    (value * 4.0).round() / 4.0
}

/// Price one line item with its resolved duty and factor.
fn price_item(item: &RawLineItem, duty_percent: u32, factor: f64) -> ProcessedLineItem {
    let landed_cost = item.unit_price * factor;
    let final_cost = landed_cost * item.qty;
    let selling_price = round_to_quarter(landed_cost / MARGIN_DIVISOR * TAX_GROSS_UP);

    ProcessedLineItem {
        carton_no: item.carton_no.clone(),
        code: item.code.clone(),
        description: item.description.clone(),
        qty: item.qty,
        unit: item.unit.clone(),
        unit_price: item.unit_price,
        amount: item.amount,
        duty_percent,
        factor,
        landed_cost,
        final_cost,
        selling_price,
    }
}

/// Run classify → interpolate → price over every item, preserving order.
/// Pure per-item: no cross-item dependency.
pub fn process_items(
    items: &[RawLineItem],
    classifier: &Classifier,
    rules: &[DutyRule],
    factors: &FactorTable,
) -> Vec<ProcessedLineItem> {
    items
        .iter()
        .map(|item| {
            let duty_percent = classifier.classify(item, rules);
            let factor = factor_for(duty_percent, factors);
            price_item(item, duty_percent, factor)
        })
        .collect()
}

/// Group processed items by duty percent and compute grand totals.
pub fn aggregate(items: &[ProcessedLineItem]) -> ShipmentTotals {
    let mut by_duty: BTreeMap<u32, DutyGroup> = BTreeMap::new();

    for item in items {
        let group = by_duty.entry(item.duty_percent).or_insert(DutyGroup {
            duty_percent: item.duty_percent,
            count: 0,
            invoice_amount: 0.0,
            final_cost: 0.0,
            factor: item.factor,
        });
        group.count += 1;
        group.invoice_amount += item.amount;
        group.final_cost += item.final_cost;
    }

    let total_invoice_amount: f64 = items.iter().map(|i| i.amount).sum();
    let total_final_cost: f64 = items.iter().map(|i| i.final_cost).sum();
    let effective_factor = if total_invoice_amount > 0.0 {
        total_final_cost / total_invoice_amount
    } else {
        0.0
    };

    ShipmentTotals {
        total_invoice_amount,
        total_final_cost,
        effective_factor,
        groups: by_duty.into_values().collect(),
    }
}
