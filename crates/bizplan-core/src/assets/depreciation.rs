use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::BizPlanError;
use crate::types::*;
use crate::BizPlanResult;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetCategory {
    Intangible,
    Tangible,
}

/// A startup asset depreciated straight-line over the chosen horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciableAsset {
    pub name: String,
    pub amount: Money,
    pub category: AssetCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationInput {
    pub assets: Vec<DepreciableAsset>,
    /// Straight-line horizon in years; must be at least 1
    pub horizon_years: u32,
}

/// Per-asset depreciation detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetDepreciation {
    pub name: String,
    pub category: AssetCategory,
    /// amount / horizon_years
    pub annual_charge: Money,
    /// Charge per projection year; zero beyond the horizon
    pub by_year: YearSeries,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepreciationSchedule {
    pub assets: Vec<AssetDepreciation>,
    pub intangible_by_year: YearSeries,
    pub tangible_by_year: YearSeries,
    pub total_by_year: YearSeries,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Straight-line-depreciate startup assets over the user-chosen horizon.
///
/// An asset contributes `amount / horizon` to a projection year only while
/// `year_index < horizon`; a 2-year horizon leaves year 3 at zero even though
/// the asset was a year-1 expenditure.
pub fn build_depreciation_schedule(
    input: &DepreciationInput,
) -> BizPlanResult<ComputationOutput<DepreciationSchedule>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    if input.horizon_years == 0 {
        return Err(BizPlanError::InvalidInput {
            field: "horizon_years".into(),
            reason: "Depreciation horizon must be at least 1 year".into(),
        });
    }
    for asset in &input.assets {
        if asset.amount < Decimal::ZERO {
            return Err(BizPlanError::InvalidInput {
                field: format!("assets:{}", asset.name),
                reason: "Asset amount cannot be negative".into(),
            });
        }
    }

    let horizon = Decimal::from(input.horizon_years);
    let mut intangible_by_year = zero_years();
    let mut tangible_by_year = zero_years();

    let assets: Vec<AssetDepreciation> = input
        .assets
        .iter()
        .map(|asset| {
            let annual_charge = asset.amount / horizon;
            let mut by_year = zero_years();
            for (year, charge) in by_year.iter_mut().enumerate() {
                if (year as u32) < input.horizon_years {
                    *charge = annual_charge;
                }
            }
            let bucket = match asset.category {
                AssetCategory::Intangible => &mut intangible_by_year,
                AssetCategory::Tangible => &mut tangible_by_year,
            };
            *bucket = add_years(bucket, &by_year);
            AssetDepreciation {
                name: asset.name.clone(),
                category: asset.category,
                annual_charge,
                by_year,
            }
        })
        .collect();

    let total_by_year = add_years(&intangible_by_year, &tangible_by_year);

    let output = DepreciationSchedule {
        assets,
        intangible_by_year,
        tangible_by_year,
        total_by_year,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Straight-Line Depreciation Schedule",
        &serde_json::json!({
            "assets": input.assets.len(),
            "horizon_years": input.horizon_years,
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

    fn asset(name: &str, amount: Decimal, category: AssetCategory) -> DepreciableAsset {
        DepreciableAsset {
            name: name.into(),
            amount,
            category,
        }
    }

    #[test]
    fn test_three_year_horizon_charges_every_year() {
        let input = DepreciationInput {
            assets: vec![asset("Equipment", dec!(9000), AssetCategory::Tangible)],
            horizon_years: 3,
        };
        let result = build_depreciation_schedule(&input).unwrap();
        let out = &result.result;
        assert_eq!(out.total_by_year, [dec!(3000), dec!(3000), dec!(3000)]);
        assert_eq!(out.total_by_year[2], dec!(9000) / dec!(3));
    }

    #[test]
    fn test_charge_stops_at_horizon() {
        let input = DepreciationInput {
            assets: vec![asset("Software", dec!(4000), AssetCategory::Intangible)],
            horizon_years: 2,
        };
        let result = build_depreciation_schedule(&input).unwrap();
        let out = &result.result;
        assert_eq!(out.total_by_year, [dec!(2000), dec!(2000), Decimal::ZERO]);
    }

    #[test]
    fn test_horizon_beyond_window_charges_all_three_years() {
        let input = DepreciationInput {
            assets: vec![asset("Fit-out", dec!(10000), AssetCategory::Tangible)],
            horizon_years: 5,
        };
        let result = build_depreciation_schedule(&input).unwrap();
        let annual = dec!(10000) / dec!(5);
        assert_eq!(result.result.total_by_year, [annual, annual, annual]);
    }

    #[test]
    fn test_categories_split() {
        let input = DepreciationInput {
            assets: vec![
                asset("Licence", dec!(3000), AssetCategory::Intangible),
                asset("Van", dec!(6000), AssetCategory::Tangible),
            ],
            horizon_years: 3,
        };
        let result = build_depreciation_schedule(&input).unwrap();
        let out = &result.result;
        assert_eq!(out.intangible_by_year[0], dec!(1000));
        assert_eq!(out.tangible_by_year[0], dec!(2000));
        assert_eq!(out.total_by_year[0], dec!(3000));
    }

    #[test]
    fn test_zero_horizon_is_configuration_error() {
        let input = DepreciationInput {
            assets: vec![asset("Equipment", dec!(9000), AssetCategory::Tangible)],
            horizon_years: 0,
        };
        assert!(build_depreciation_schedule(&input).is_err());
    }

    #[test]
    fn test_negative_asset_rejected() {
        let input = DepreciationInput {
            assets: vec![asset("Equipment", dec!(-1), AssetCategory::Tangible)],
            horizon_years: 3,
        };
        assert!(build_depreciation_schedule(&input).is_err());
    }

    #[test]
    fn test_no_assets_yields_zero_schedule() {
        let input = DepreciationInput {
            assets: vec![],
            horizon_years: 3,
        };
        let result = build_depreciation_schedule(&input).unwrap();
        assert_eq!(result.result.total_by_year, zero_years());
    }
}
