use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::BizPlanError;
use crate::types::*;
use crate::BizPlanResult;

const PERCENT: Decimal = dec!(100);

/// Default employer + employee contribution rate on gross wages.
const EMPLOYEE_RATE_PCT: Decimal = dec!(42);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Social-security regime of the owner. Each regime carries a flat
/// contribution rate applied to the owner's draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialRegime {
    /// Micro-entrepreneur: contributions on turnover-like draw, ~22%
    MicroEntrepreneur,
    /// Self-employed (TNS): ~45% of compensation
    SelfEmployed,
    /// Assimilated employee (e.g. SASU president): ~65% of compensation
    AssimilatedEmployee,
}

impl SocialRegime {
    /// Contribution rate in percent applied to the owner's compensation.
    pub fn owner_rate_pct(&self) -> Percent {
        match self {
            SocialRegime::MicroEntrepreneur => dec!(22),
            SocialRegime::SelfEmployed => dec!(45),
            SocialRegime::AssimilatedEmployee => dec!(65),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialChargesInput {
    pub regime: SocialRegime,
    /// Owner compensation drawn per year
    pub owner_draw_by_year: YearSeries,
    /// Gross employee wages per year
    pub employee_wages_by_year: YearSeries,
    /// Overrides the regime preset when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_rate_override_pct: Option<Percent>,
    /// Overrides the default employer+employee rate when provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_rate_override_pct: Option<Percent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialCharges {
    /// Rates actually applied, in percent
    pub owner_rate_pct: Percent,
    pub employee_rate_pct: Percent,
    pub owner_by_year: YearSeries,
    pub employee_by_year: YearSeries,
    pub total_by_year: YearSeries,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Apply regime-dependent contribution rates to owner and employee
/// compensation.
pub fn compute_social_charges(
    input: &SocialChargesInput,
) -> BizPlanResult<ComputationOutput<SocialCharges>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    for (field, series) in [
        ("owner_draw_by_year", &input.owner_draw_by_year),
        ("employee_wages_by_year", &input.employee_wages_by_year),
    ] {
        if series.iter().any(|v| *v < Decimal::ZERO) {
            return Err(BizPlanError::InvalidInput {
                field: field.into(),
                reason: "Compensation cannot be negative".into(),
            });
        }
    }

    let owner_rate_pct = input
        .owner_rate_override_pct
        .unwrap_or_else(|| input.regime.owner_rate_pct());
    let employee_rate_pct = input
        .employee_rate_override_pct
        .unwrap_or(EMPLOYEE_RATE_PCT);
    if owner_rate_pct < Decimal::ZERO || employee_rate_pct < Decimal::ZERO {
        return Err(BizPlanError::InvalidInput {
            field: "rate_override_pct".into(),
            reason: "Contribution rates cannot be negative".into(),
        });
    }

    let owner_ratio = owner_rate_pct / PERCENT;
    let employee_ratio = employee_rate_pct / PERCENT;

    let mut owner_by_year = zero_years();
    let mut employee_by_year = zero_years();
    for year in 0..PROJECTION_YEARS {
        owner_by_year[year] = input.owner_draw_by_year[year] * owner_ratio;
        employee_by_year[year] = input.employee_wages_by_year[year] * employee_ratio;
    }

    let output = SocialCharges {
        owner_rate_pct,
        employee_rate_pct,
        total_by_year: add_years(&owner_by_year, &employee_by_year),
        owner_by_year,
        employee_by_year,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Social Charges (regime-dependent contribution rates)",
        &serde_json::json!({
            "regime": format!("{:?}", input.regime),
            "owner_rate_pct": owner_rate_pct.to_string(),
            "employee_rate_pct": employee_rate_pct.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
