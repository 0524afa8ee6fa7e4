//! Return on investment derived from the maturity projection

use super::irr::{calculate_irr, premium_schedule_cashflows};
use super::maturity::calculate_maturity_benefit;
use crate::catalog::Catalog;
use crate::plan::Plan;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub total_premiums_paid: f64,
    pub maturity_benefits: f64,
    pub net_gain: f64,

    /// Compound annual growth (percent) turning total premiums into the
    /// maturity benefit; never negative
    #[serde(rename = "effectiveAnnualROI")]
    pub effective_annual_roi: f64,

    /// Annual IRR (percent) of the actual premium schedule; may be negative
    pub money_weighted_return: Option<f64>,
}

/// Compound annual return (percent) implied by growing `premiums` into `maturity` over `years`
///
/// Returns 0 for non-positive premiums or years, and clamps negative returns to 0.
pub fn effective_annual_return(premiums: f64, maturity: f64, years: u32) -> f64 {
    if premiums <= 0.0 || years == 0 {
        return 0.0;
    }

    let ratio = maturity / premiums;
    let annual_return = (ratio.powf(1.0 / years as f64) - 1.0) * 100.0;

    if annual_return.is_nan() {
        return 0.0;
    }
    annual_return.max(0.0)
}

pub fn calculate_roi(
    catalog: &Catalog,
    premium_amount: f64,
    term: u32,
    age: u32,
    plan: &Plan,
) -> RoiResult {
    let maturity = calculate_maturity_benefit(catalog, premium_amount, term, age, plan);
    let total_premiums_paid = maturity.total_premiums_paid;
    let maturity_benefits = maturity.total_maturity;

    let money_weighted_return = if premium_amount > 0.0 && term > 0 {
        calculate_irr(
            &premium_schedule_cashflows(premium_amount, term, maturity_benefits),
            1,
        )
        .map(|r| r * 100.0)
    } else {
        None
    };

    RoiResult {
        total_premiums_paid,
        maturity_benefits,
        net_gain: maturity_benefits - total_premiums_paid,
        effective_annual_roi: effective_annual_return(total_premiums_paid, maturity_benefits, term),
        money_weighted_return,
    }
}
