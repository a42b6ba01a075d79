use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::BizPlanError;
use crate::types::*;
use crate::BizPlanResult;

const DAYS_IN_YEAR: Decimal = dec!(365);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingCapitalInput {
    pub revenue_by_year: YearSeries,
    pub variable_costs_by_year: YearSeries,
    /// Average payment delay granted to customers; mandatory
    pub customer_credit_days: Days,
    /// Average payment delay obtained from suppliers; mandatory
    pub supplier_debt_days: Days,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingCapitalYear {
    pub year: u32,
    /// revenue x credit_days / 365
    pub customer_credit_volume: Money,
    /// variable costs x debt_days / 365
    pub supplier_debt_volume: Money,
    /// customer credit - supplier debt
    pub bfr: Money,
    /// BFR[n] - BFR[n-1], with BFR[0] = 0 before year 1
    pub bfr_change: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingCapitalOutput {
    pub years: Vec<WorkingCapitalYear>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the working-capital requirement (BFR) per year from days-based
/// customer-credit and supplier-debt volumes.
///
/// Both day-count parameters are required: a zero or negative value is a
/// configuration error, never a silent zero BFR.
pub fn compute_working_capital(
    input: &WorkingCapitalInput,
) -> BizPlanResult<ComputationOutput<WorkingCapitalOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    if input.customer_credit_days <= Decimal::ZERO {
        return Err(BizPlanError::MissingConfiguration {
            field: "customer_credit_days".into(),
            reason: "Customer payment-delay days must be set before computing the BFR".into(),
        });
    }
    if input.supplier_debt_days <= Decimal::ZERO {
        return Err(BizPlanError::MissingConfiguration {
            field: "supplier_debt_days".into(),
            reason: "Supplier payment-delay days must be set before computing the BFR".into(),
        });
    }

    let mut prior_bfr = Decimal::ZERO;
    let years: Vec<WorkingCapitalYear> = (0..PROJECTION_YEARS)
        .map(|y| {
            let customer_credit_volume =
                input.revenue_by_year[y] * input.customer_credit_days / DAYS_IN_YEAR;
            let supplier_debt_volume =
                input.variable_costs_by_year[y] * input.supplier_debt_days / DAYS_IN_YEAR;
            let bfr = customer_credit_volume - supplier_debt_volume;
            let bfr_change = bfr - prior_bfr;
            prior_bfr = bfr;
            WorkingCapitalYear {
                year: (y + 1) as u32,
                customer_credit_volume,
                supplier_debt_volume,
                bfr,
                bfr_change,
            }
        })
        .collect();

    let output = WorkingCapitalOutput { years };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Working Capital Requirement (BFR)",
        &serde_json::json!({
            "customer_credit_days": input.customer_credit_days.to_string(),
            "supplier_debt_days": input.supplier_debt_days.to_string(),
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

    fn sample_input() -> WorkingCapitalInput {
        WorkingCapitalInput {
            revenue_by_year: [dec!(36500), dec!(73000), dec!(73000)],
            variable_costs_by_year: [dec!(14600), dec!(29200), dec!(29200)],
            customer_credit_days: dec!(30),
            supplier_debt_days: dec!(45),
        }
    }

    #[test]
    fn test_volumes_days_over_365() {
        let result = compute_working_capital(&sample_input()).unwrap();
        let y1 = &result.result.years[0];
        assert_eq!(y1.customer_credit_volume, dec!(3000));
        assert_eq!(y1.supplier_debt_volume, dec!(1800));
        assert_eq!(y1.bfr, dec!(1200));
    }

    #[test]
    fn test_bfr_change_uses_zero_base() {
        let result = compute_working_capital(&sample_input()).unwrap();
        let years = &result.result.years;
        assert_eq!(years[0].bfr_change, years[0].bfr);
        assert_eq!(years[1].bfr_change, years[1].bfr - years[0].bfr);
        assert_eq!(years[2].bfr_change, Decimal::ZERO);
    }

    #[test]
    fn test_missing_credit_days_is_configuration_error() {
        let mut input = sample_input();
        input.customer_credit_days = Decimal::ZERO;
        let err = compute_working_capital(&input).unwrap_err();
        assert!(err.to_string().contains("customer_credit_days"));
    }

    #[test]
    fn test_missing_debt_days_is_configuration_error() {
        let mut input = sample_input();
        input.supplier_debt_days = Decimal::ZERO;
        assert!(compute_working_capital(&input).is_err());
    }

    #[test]
    fn test_negative_bfr_is_valid() {
        // Suppliers financing the cycle: debt volume above credit volume
        let input = WorkingCapitalInput {
            revenue_by_year: [dec!(10000), dec!(10000), dec!(10000)],
            variable_costs_by_year: [dec!(8000), dec!(8000), dec!(8000)],
            customer_credit_days: dec!(10),
            supplier_debt_days: dec!(60),
        };
        let result = compute_working_capital(&input).unwrap();
        assert!(result.result.years[0].bfr < Decimal::ZERO);
    }
}
