use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::types::*;
use crate::BizPlanResult;

const MONTHS_PER_YEAR_DEC: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// A single loan as entered in the financing section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Display name, e.g. "Bank loan" or "Honour loan"
    pub name: String,
    /// Amount borrowed
    pub principal: Money,
    /// Annual nominal rate in percent (5 = 5%)
    pub annual_rate_pct: Percent,
    /// Repayment term in months; non-positive values yield a zero schedule
    pub term_months: i64,
}

/// Fixed-rate repayment schedule derived from a loan.
///
/// Every field is rounded to two decimals; this is the one calculator whose
/// contract rounds at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub name: String,
    /// Constant monthly instalment (annuity)
    pub monthly_payment: Money,
    /// Principal portion: principal / term_months
    pub monthly_principal: Money,
    /// Interest portion: monthly_payment - monthly_principal
    pub monthly_interest: Money,
    /// monthly_payment x term_months
    pub total_repaid: Money,
    /// total_repaid - principal
    pub total_interest: Money,
    /// Interest charged within months 1-12, 13-24, 25-36, clipped to term
    pub interest_by_year: YearSeries,
    /// Principal repaid within the same windows
    pub principal_by_year: YearSeries,
}

impl LoanSchedule {
    fn zeroed(name: &str) -> Self {
        LoanSchedule {
            name: name.to_string(),
            monthly_payment: Decimal::ZERO,
            monthly_principal: Decimal::ZERO,
            monthly_interest: Decimal::ZERO,
            total_repaid: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            interest_by_year: zero_years(),
            principal_by_year: zero_years(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Convert a loan's principal/rate/term into a fixed-interest repayment
/// schedule with per-projection-year interest and principal splits.
///
/// Never fails: a non-positive term returns a zero-filled schedule with a
/// warning instead of raising a division error.
pub fn amortize_loan(input: &LoanInput) -> BizPlanResult<ComputationOutput<LoanSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = compute_schedule(input, &mut warnings);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Loan Amortization",
        &serde_json::json!({
            "loan": input.name,
            "principal": input.principal.to_string(),
            "annual_rate_pct": input.annual_rate_pct.to_string(),
            "term_months": input.term_months,
        }),
        warnings,
        elapsed,
        schedule,
    ))
}

/// Bare schedule computation, shared with the startup-financing aggregator
/// so per-loan detail is not re-derived downstream.
pub(crate) fn compute_schedule(input: &LoanInput, warnings: &mut Vec<String>) -> LoanSchedule {
    if input.term_months <= 0 {
        if input.principal > Decimal::ZERO {
            warnings.push(format!(
                "Loan '{}': term is {} months; schedule zeroed.",
                input.name, input.term_months
            ));
        }
        return LoanSchedule::zeroed(&input.name);
    }

    let term = Decimal::from(input.term_months);
    let monthly_rate = input.annual_rate_pct / PERCENT / MONTHS_PER_YEAR_DEC;

    let monthly_payment = if monthly_rate.is_zero() {
        // Degenerate zero-rate case: straight principal split
        input.principal / term
    } else {
        // Annuity: r * P * (1+r)^n / ((1+r)^n - 1)
        let growth = (Decimal::ONE + monthly_rate).powd(term);
        monthly_rate * input.principal * growth / (growth - Decimal::ONE)
    };

    let monthly_principal = input.principal / term;
    let monthly_interest = monthly_payment - monthly_principal;
    let total_repaid = monthly_payment * term;
    let total_interest = total_repaid - input.principal;

    let mut interest_by_year = zero_years();
    let mut principal_by_year = zero_years();
    for (year, (iy, py)) in interest_by_year
        .iter_mut()
        .zip(principal_by_year.iter_mut())
        .enumerate()
    {
        let months = months_in_year(input.term_months, year);
        *iy = (monthly_interest * months).round_dp(2);
        *py = (monthly_principal * months).round_dp(2);
    }

    LoanSchedule {
        name: input.name.clone(),
        monthly_payment: monthly_payment.round_dp(2),
        monthly_principal: monthly_principal.round_dp(2),
        monthly_interest: monthly_interest.round_dp(2),
        total_repaid: total_repaid.round_dp(2),
        total_interest: total_interest.round_dp(2),
        interest_by_year,
        principal_by_year,
    }
}

/// How many repayment months of the loan fall inside projection year
/// `year_index` (0-based; month offsets 0, 12, 24).
fn months_in_year(term_months: i64, year_index: usize) -> Decimal {
    let offset = (year_index as i64) * 12;
    Decimal::from((term_months - offset).clamp(0, 12))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn loan(principal: Decimal, rate_pct: Decimal, term: i64) -> LoanInput {
        LoanInput {
            name: "Bank loan".into(),
            principal,
            annual_rate_pct: rate_pct,
            term_months: term,
        }
    }

    #[test]
    fn test_zero_term_yields_zero_schedule() {
        let result = amortize_loan(&loan(dec!(10000), dec!(5.0), 0)).unwrap();
        let s = &result.result;
        assert_eq!(s.monthly_payment, Decimal::ZERO);
        assert_eq!(s.monthly_principal, Decimal::ZERO);
        assert_eq!(s.monthly_interest, Decimal::ZERO);
        assert_eq!(s.total_repaid, Decimal::ZERO);
        assert_eq!(s.total_interest, Decimal::ZERO);
        assert_eq!(s.interest_by_year, zero_years());
        assert_eq!(s.principal_by_year, zero_years());
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_negative_term_yields_zero_schedule() {
        let result = amortize_loan(&loan(dec!(10000), dec!(5.0), -6)).unwrap();
        assert_eq!(result.result.monthly_payment, Decimal::ZERO);
        assert_eq!(result.result.total_repaid, Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_is_straight_principal_split() {
        let result = amortize_loan(&loan(dec!(10000), dec!(0), 12)).unwrap();
        let s = &result.result;
        assert!((s.monthly_payment - dec!(833.33)).abs() <= dec!(0.01));
        assert_eq!(s.monthly_interest, Decimal::ZERO);
        assert_eq!(s.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_annuity_payment_reference() {
        // 12,000 at 6% over 24 months: instalment ~531.85
        let result = amortize_loan(&loan(dec!(12000), dec!(6.0), 24)).unwrap();
        let s = &result.result;
        assert!(
            (s.monthly_payment - dec!(531.85)).abs() < dec!(0.05),
            "payment was {}",
            s.monthly_payment
        );
        assert!(s.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let result = amortize_loan(&loan(dec!(9876.54), dec!(4.37), 30)).unwrap();
        let s = &result.result;
        for v in [
            s.monthly_payment,
            s.monthly_principal,
            s.monthly_interest,
            s.total_repaid,
            s.total_interest,
        ] {
            assert_eq!(v, v.round_dp(2));
        }
        for v in s.interest_by_year.iter().chain(s.principal_by_year.iter()) {
            assert_eq!(*v, v.round_dp(2));
        }
    }

    #[test]
    fn test_interest_spread_across_three_years() {
        let result = amortize_loan(&loan(dec!(10000), dec!(5.0), 36)).unwrap();
        let s = &result.result;
        assert!(s.interest_by_year[0] > Decimal::ZERO);
        assert!(s.interest_by_year[1] > Decimal::ZERO);
        assert!(s.interest_by_year[2] > Decimal::ZERO);
    }

    #[test]
    fn test_short_loan_interest_confined_to_year_one() {
        let result = amortize_loan(&loan(dec!(10000), dec!(5.0), 6)).unwrap();
        let s = &result.result;
        assert!(s.interest_by_year[0] > Decimal::ZERO);
        assert_eq!(s.interest_by_year[1], Decimal::ZERO);
        assert_eq!(s.interest_by_year[2], Decimal::ZERO);
    }

    #[test]
    fn test_two_year_loan_has_no_year_three_interest() {
        let result = amortize_loan(&loan(dec!(12000), dec!(6.0), 24)).unwrap();
        let s = &result.result;
        assert!(s.interest_by_year[0] > Decimal::ZERO);
        assert!(s.interest_by_year[1] > Decimal::ZERO);
        assert_eq!(s.interest_by_year[2], Decimal::ZERO);
    }

    #[test]
    fn test_principal_split_clipped_to_term() {
        // 18-month loan: 12 months of principal in year 1, 6 in year 2
        let result = amortize_loan(&loan(dec!(18000), dec!(3.0), 18)).unwrap();
        let s = &result.result;
        assert_eq!(s.principal_by_year[0], dec!(12000));
        assert_eq!(s.principal_by_year[1], dec!(6000));
        assert_eq!(s.principal_by_year[2], Decimal::ZERO);
    }

    #[test]
    fn test_zero_principal_is_quiet() {
        let result = amortize_loan(&loan(Decimal::ZERO, dec!(5.0), 0)).unwrap();
        assert!(result.warnings.is_empty());
        assert_eq!(result.result.monthly_payment, Decimal::ZERO);
    }
}
