//! Periodic premium estimation
//!
//! Uses the plan's published rate table when present, scaling the row for
//! the nearest published age by the requested sum assured. Plans without a
//! table fall back to a percentage-of-cover estimate adjusted for age and term.

use super::{nearest_row, CalculationBasis};
use crate::catalog::Catalog;
use crate::plan::Plan;
use log::debug;
use serde::{Deserialize, Serialize};

/// Premium amounts at each payment frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumResult {
    pub monthly: f64,
    pub quarterly: f64,
    pub half_yearly: f64,
    pub annual: f64,
    pub basis: CalculationBasis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Age loading applied to the base rate
fn age_factor(age: u32) -> f64 {
    if age > 45 {
        1.2
    } else if age > 35 {
        1.1
    } else {
        1.0
    }
}

/// Term loading applied to the base rate
fn term_factor(term: u32) -> f64 {
    if term > 25 {
        0.95
    } else if term < 15 {
        1.05
    } else {
        1.0
    }
}

/// Effective annual premium rate (% of sum assured) for the estimation path
pub fn estimated_premium_rate(catalog: &Catalog, plan_id: &str, age: u32, term: u32) -> f64 {
    catalog.base_premium_rate(plan_id) * age_factor(age) * term_factor(term)
}

/// Calculate premiums for `sum_assured` of cover over `term` years
pub fn calculate_premium(
    catalog: &Catalog,
    age: u32,
    sum_assured: f64,
    term: u32,
    plan: &Plan,
) -> PremiumResult {
    if let Some(rate) = nearest_row(&plan.premium_rates, age, |r| r.age) {
        let ratio = sum_assured / catalog.defaults().reference_base_unit;
        debug!(
            "{}: premium from published rates at age {} (ratio {:.4})",
            plan.id, rate.age, ratio
        );

        return PremiumResult {
            monthly: (rate.monthly_premium * ratio).round(),
            quarterly: (rate.quarterly_premium * ratio).round(),
            half_yearly: (rate.half_yearly_premium * ratio).round(),
            annual: (rate.annual_premium * ratio).round(),
            basis: CalculationBasis::Published { reference: rate.age },
            note: Some(format!("Based on age {} premium rates", rate.age)),
        };
    }

    let rate = estimated_premium_rate(catalog, &plan.id, age, term);
    let annual = (sum_assured * rate / 100.0).round();
    debug!("{}: estimated premium at {:.4}% of cover", plan.id, rate);

    PremiumResult {
        monthly: (annual / 12.0).round(),
        quarterly: (annual / 4.0).round(),
        half_yearly: (annual / 2.0).round(),
        annual,
        basis: CalculationBasis::Estimated,
        note: Some("Estimated premium based on plan characteristics".to_string()),
    }
}
