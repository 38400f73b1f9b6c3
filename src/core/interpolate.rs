//! Factor interpolation over the duty → markup table.

use crate::types::FactorTable;
use std::ops::Bound;

/// Resolve the markup factor for a duty percent.
///
/// Exact table hits return directly. Between two keys the factor is
/// linearly interpolated; outside the table's range it clamps to the
/// nearest key's factor. The result is finite for every non-empty table
/// (an empty table, unreachable after costing parse, yields 0).
pub fn factor_for(duty_percent: u32, table: &FactorTable) -> f64 {
    if let Some(factor) = table.get(&duty_percent) {
        return *factor;
    }

    // Largest key strictly below, smallest key strictly above.
    let lower = table
        .range((Bound::Unbounded, Bound::Excluded(duty_percent)))
        .next_back();
    let upper = table
        .range((Bound::Excluded(duty_percent), Bound::Unbounded))
        .next();

    match (lower, upper) {
        (Some((&lo, &lo_factor)), Some((&hi, &hi_factor))) => {
            let ratio = f64::from(duty_percent - lo) / f64::from(hi - lo);
            lo_factor + ratio * (hi_factor - lo_factor)
        }
        // Above the table's range: clamp, no extrapolation.
        (Some((_, &lo_factor)), None) => lo_factor,
        // Below the table's range: clamp to the smallest key.
        (None, Some((_, &hi_factor))) => hi_factor,
        (None, None) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(u32, f64)]) -> FactorTable {
        entries.iter().copied().collect()
    }

    #[test]
    fn test_exact_hit() {
        let t = table(&[(0, 22.70), (15, 25.40), (20, 26.25)]);
        assert_eq!(factor_for(15, &t), 25.40);
    }

    #[test]
    fn test_linear_interpolation() {
        let t = table(&[(15, 25.40), (20, 26.25)]);
        let f = factor_for(18, &t);
        assert!((f - 25.91).abs() < 1e-9, "got {f}");
    }

    #[test]
    fn test_interpolated_value_is_bounded_by_neighbours() {
        let t = table(&[(0, 22.70), (10, 24.50), (22, 26.60), (30, 28.00)]);
        for d in 0..=35 {
            let f = factor_for(d, &t);
            assert!(f.is_finite());
            assert!((22.70..=28.00).contains(&f), "duty {d} gave {f}");
        }
    }

    #[test]
    fn test_clamps_above_range() {
        let t = table(&[(0, 22.70), (30, 28.00)]);
        assert_eq!(factor_for(45, &t), 28.00);
    }

    #[test]
    fn test_clamps_below_range() {
        let t = table(&[(10, 24.50), (20, 26.25)]);
        assert_eq!(factor_for(5, &t), 24.50);
    }

    #[test]
    fn test_single_point_table() {
        let t = table(&[(15, 25.40)]);
        assert_eq!(factor_for(0, &t), 25.40);
        assert_eq!(factor_for(15, &t), 25.40);
        assert_eq!(factor_for(40, &t), 25.40);
    }

    #[test]
    fn test_empty_table_stays_total() {
        assert_eq!(factor_for(10, &FactorTable::new()), 0.0);
    }
}
