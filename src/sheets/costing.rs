//! Costing-sheet reader.
//!
//! The costing template carries scalar charges at fixed offsets, a duty →
//! markup factor table tagged with "FACTOR" row labels, and (optionally)
//! customs worksheet rows with tariff codes and duty formulas.

use crate::grid::Grid;
use crate::types::{CostingModel, DutyRule, FactorTable};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Fixed (row, column) offsets of the scalar charges in the known template.
const INVOICE_TOTAL: (usize, usize) = (4, 5);
const BANK_CHARGES: (usize, usize) = (11, 5);
const CLEARING_CHARGES: (usize, usize) = (13, 5);
const DUTIES: (usize, usize) = (15, 5);
const OVERSEAS_TRANSPORT: (usize, usize) = (19, 5);
const CLEARING_CHARGES_FACTOR: (usize, usize) = (20, 5);
const DUTIES_RATE: (usize, usize) = (21, 5);
const EXCHANGE_RATE: (usize, usize) = (22, 5);

/// Fallback factor positions for the older template layout, used when no
/// row is tagged "FACTOR".
const FALLBACK_FACTORS: [(u32, (usize, usize)); 4] = [
    (0, (26, 2)),
    (15, (27, 2)),
    (20, (28, 2)),
    (30, (29, 2)),
];

/// Read a costing model from a grid.
///
/// Never fails: missing or malformed cells read as zero, and the factor
/// table always ends up with at least one entry. Reading the same grid
/// twice yields an identical model.
pub fn read_costing_model(grid: &Grid) -> CostingModel {
    let mut factors = FactorTable::new();

    for r in 0..grid.row_count() {
        if !grid.text(r, 0).to_uppercase().contains("FACTOR") {
            continue;
        }
        let duty_percent = grid.number(r, 1).round().max(0.0) as u32;

        // The factor value is not necessarily adjacent to the duty column;
        // take the first non-zero numeric value scanning right.
        let mut factor_value = 0.0;
        for c in 2..grid.row(r).len() {
            let val = grid.number(r, c);
            if val != 0.0 {
                factor_value = val;
                break;
            }
        }

        debug!(row = r, duty_percent, factor_value, "found FACTOR row");
        factors.insert(duty_percent, factor_value);
    }

    if factors.is_empty() {
        debug!("no FACTOR rows found, using default positions");
        for (duty_percent, (r, c)) in FALLBACK_FACTORS {
            factors.insert(duty_percent, grid.number(r, c));
        }
    }

    CostingModel {
        invoice_total: grid.number(INVOICE_TOTAL.0, INVOICE_TOTAL.1),
        bank_charges: grid.number(BANK_CHARGES.0, BANK_CHARGES.1),
        clearing_charges: grid.number(CLEARING_CHARGES.0, CLEARING_CHARGES.1),
        duties: grid.number(DUTIES.0, DUTIES.1),
        overseas_transport: grid.number(OVERSEAS_TRANSPORT.0, OVERSEAS_TRANSPORT.1),
        clearing_charges_factor: grid.number(CLEARING_CHARGES_FACTOR.0, CLEARING_CHARGES_FACTOR.1),
        duties_rate: grid.number(DUTIES_RATE.0, DUTIES_RATE.1),
        exchange_rate: grid.number(EXCHANGE_RATE.0, EXCHANGE_RATE.1),
        factors,
    }
}

/// Extract duty rules from a customs worksheet grid.
///
/// Columns: LINE | COO | TARIFF | PRODUCT | DUTY FORMULA | VALUE. A row
/// qualifies when the tariff is a 6-10 digit code and both the product text
/// and the duty formula are present.
pub fn read_customs_rules(grid: &Grid) -> Vec<DutyRule> {
    let mut rules = Vec::new();

    for r in 0..grid.row_count() {
        let tariff = grid.text(r, 2);
        let keyword = grid.text(r, 3);
        let formula = grid.text(r, 4);

        if keyword.is_empty() || formula.is_empty() || !tariff_regex().is_match(&tariff) {
            continue;
        }

        let duty_percent = duty_from_formula(&formula);
        debug!(
            tariff = %tariff,
            product = %keyword,
            formula = %formula,
            duty_percent,
            "found customs worksheet row"
        );
        rules.push(DutyRule {
            keyword,
            tariff,
            duty_formula: formula,
            duty_percent,
            value: grid.number(r, 5),
        });
    }

    rules
}

/// Parse a duty percent out of a human-readable formula: "FREE" is 0,
/// otherwise the first "N%" figure, otherwise 0.
pub fn duty_from_formula(formula: &str) -> u32 {
    if formula.eq_ignore_ascii_case("free") {
        return 0;
    }
    duty_percent_regex()
        .captures(formula)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

fn tariff_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{6,10}$").unwrap())
}

fn duty_percent_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)%").unwrap())
}
