use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::BizPlanError;
use crate::types::*;
use crate::BizPlanResult;

const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// A named recurring cost with an already-resolved value per projection year.
/// The carry-forward convention (year 1 repeated unless overridden) lives in
/// the form layer; the engine only ever sees final per-year values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedCharge {
    pub name: String,
    pub by_year: YearSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingCostsInput {
    pub fixed_charges: Vec<FixedCharge>,
    /// Variable cost as a percent of goods revenue (40 = 40%)
    pub variable_cost_pct: Percent,
    /// Goods revenue per year, from the revenue projector
    pub goods_revenue_by_year: YearSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingCosts {
    /// Sum of all fixed charges per year
    pub fixed_by_year: YearSeries,
    /// goods_revenue x variable_cost_pct; services carry no variable cost
    pub variable_by_year: YearSeries,
    pub total_by_year: YearSeries,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Sum year-by-year fixed operating costs and derive variable costs as a
/// percentage of goods revenue.
pub fn aggregate_operating_costs(
    input: &OperatingCostsInput,
) -> BizPlanResult<ComputationOutput<OperatingCosts>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    if input.variable_cost_pct < Decimal::ZERO {
        return Err(BizPlanError::InvalidInput {
            field: "variable_cost_pct".into(),
            reason: "Variable cost percentage cannot be negative".into(),
        });
    }
    for charge in &input.fixed_charges {
        if charge.by_year.iter().any(|v| *v < Decimal::ZERO) {
            return Err(BizPlanError::InvalidInput {
                field: format!("fixed_charges:{}", charge.name),
                reason: "Fixed charge cannot be negative".into(),
            });
        }
    }

    let mut fixed_by_year = zero_years();
    for charge in &input.fixed_charges {
        fixed_by_year = add_years(&fixed_by_year, &charge.by_year);
    }

    let ratio = input.variable_cost_pct / PERCENT;
    let variable_by_year = [
        input.goods_revenue_by_year[0] * ratio,
        input.goods_revenue_by_year[1] * ratio,
        input.goods_revenue_by_year[2] * ratio,
    ];

    let output = OperatingCosts {
        fixed_by_year,
        variable_by_year,
        total_by_year: add_years(&fixed_by_year, &variable_by_year),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed & Variable Cost Aggregation",
        &serde_json::json!({
            "fixed_charges": input.fixed_charges.len(),
            "variable_cost_pct": input.variable_cost_pct.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_charges_sum_per_year() {
        let input = OperatingCostsInput {
            fixed_charges: vec![
                FixedCharge {
                    name: "Rent".into(),
                    by_year: [dec!(6000), dec!(6000), dec!(6600)],
                },
                FixedCharge {
                    name: "Insurance".into(),
                    by_year: [dec!(1200), dec!(1200), dec!(1200)],
                },
            ],
            variable_cost_pct: Decimal::ZERO,
            goods_revenue_by_year: zero_years(),
        };
        let result = aggregate_operating_costs(&input).unwrap();
        assert_eq!(
            result.result.fixed_by_year,
            [dec!(7200), dec!(7200), dec!(7800)]
        );
    }

    #[test]
    fn test_variable_cost_tracks_goods_revenue() {
        let input = OperatingCostsInput {
            fixed_charges: vec![],
            variable_cost_pct: dec!(40),
            goods_revenue_by_year: [dec!(24000), dec!(26400), dec!(27720)],
        };
        let result = aggregate_operating_costs(&input).unwrap();
        assert_eq!(result.result.variable_by_year[0], dec!(9600));
        assert_eq!(result.result.variable_by_year[1], dec!(10560));
        assert_eq!(result.result.total_by_year[0], dec!(9600));
    }

    #[test]
    fn test_zero_goods_revenue_zero_variable() {
        let input = OperatingCostsInput {
            fixed_charges: vec![],
            variable_cost_pct: dec!(40),
            goods_revenue_by_year: zero_years(),
        };
        let result = aggregate_operating_costs(&input).unwrap();
        assert_eq!(result.result.variable_by_year, zero_years());
    }

    #[test]
    fn test_negative_pct_rejected() {
        let input = OperatingCostsInput {
            fixed_charges: vec![],
            variable_cost_pct: dec!(-1),
            goods_revenue_by_year: zero_years(),
        };
        assert!(aggregate_operating_costs(&input).is_err());
    }
}
