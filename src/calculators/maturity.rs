//! Maturity benefit projection from a recurring premium

use super::{nearest_row, CalculationBasis};
use crate::catalog::Catalog;
use crate::plan::Plan;
use log::debug;
use serde::{Deserialize, Serialize};

/// Projected lump sum at the end of the policy term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaturityResult {
    pub total_maturity: f64,
    pub sum_assured: f64,
    pub guaranteed_additions: f64,
    pub bonuses: f64,
    pub total_premiums_paid: f64,
    pub net_gain: f64,
    pub basis: CalculationBasis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Sum assured implied by a recurring premium
pub fn implied_sum_assured(catalog: &Catalog, plan_id: &str, premium_amount: f64) -> f64 {
    premium_amount * catalog.sum_assured_multiplier(plan_id)
}

/// Project the maturity benefit of paying `premium_amount` for `term` years
///
/// Premiums are summed without discounting. The published row for the
/// nearest term is scaled by the ratio of implied to published sum assured;
/// without published rows the plan's per-annum accrual rates are used.
pub fn calculate_maturity_benefit(
    catalog: &Catalog,
    premium_amount: f64,
    term: u32,
    _age: u32,
    plan: &Plan,
) -> MaturityResult {
    let sum_assured = implied_sum_assured(catalog, &plan.id, premium_amount);
    let total_premiums_paid = premium_amount * term as f64;

    let (guaranteed_additions, bonuses, basis, note) =
        match nearest_row(&plan.maturity_benefits, term, |b| b.term) {
            Some(row) => {
                let ratio = if row.sum_assured > 0.0 {
                    sum_assured / row.sum_assured
                } else {
                    0.0
                };
                debug!(
                    "{}: maturity from published {}-year row (ratio {:.4})",
                    plan.id, row.term, ratio
                );
                (
                    (row.guaranteed_additions * ratio).round(),
                    (row.bonus * ratio).round(),
                    CalculationBasis::Published { reference: row.term },
                    format!("Based on {} year term maturity data", row.term),
                )
            }
            None => {
                let (guaranteed_rate, bonus_rate) = catalog.accrual_rates(&plan.id);
                let years = term as f64;
                debug!(
                    "{}: estimated maturity at {}% + {}% p.a.",
                    plan.id, guaranteed_rate, bonus_rate
                );
                (
                    (sum_assured * guaranteed_rate * years / 100.0).round(),
                    (sum_assured * bonus_rate * years / 100.0).round(),
                    CalculationBasis::Estimated,
                    "Estimated maturity benefits based on plan characteristics".to_string(),
                )
            }
        };

    let total_maturity = sum_assured + guaranteed_additions + bonuses;

    MaturityResult {
        total_maturity,
        sum_assured,
        guaranteed_additions,
        bonuses,
        total_premiums_paid,
        net_gain: total_maturity - total_premiums_paid,
        basis,
        note: Some(note),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::MaturityBenefit;
    use approx::assert_abs_diff_eq;

    fn umang_with_table() -> Plan {
        Plan::new("jivan-umang", "Jivan Umang").with_maturity_benefits(vec![
            MaturityBenefit {
                term: 15,
                sum_assured: 100_000.0,
                guaranteed_additions: 12_500.0,
                bonus: 64_000.0,
            },
            MaturityBenefit {
                term: 25,
                sum_assured: 100_000.0,
                guaranteed_additions: 20_000.0,
                bonus: 112_000.0,
            },
        ])
    }

    #[test]
    fn test_estimated_jeevan_utsav() {
        let catalog = Catalog::default_lic();
        let plan = Plan::new("jivan-utsav", "Jivan Utsav");
        let result = calculate_maturity_benefit(&catalog, 50_000.0, 20, 30, &plan);

        assert_eq!(result.sum_assured, 550_000.0);
        assert_eq!(result.guaranteed_additions, 1_100_000.0);
        assert_eq!(result.bonuses, 0.0);
        assert_eq!(result.total_maturity, 1_650_000.0);
        assert_eq!(result.total_premiums_paid, 1_000_000.0);
        assert_eq!(result.net_gain, 650_000.0);
        assert_eq!(result.basis, CalculationBasis::Estimated);
    }

    #[test]
    fn test_published_row_scaled_by_ratio() {
        let catalog = Catalog::default_lic();
        // 12x multiplier => 240000 sum assured, ratio 2.4 against the 15-year row
        let result = calculate_maturity_benefit(&catalog, 20_000.0, 17, 35, &umang_with_table());

        assert_eq!(result.sum_assured, 240_000.0);
        assert_eq!(result.guaranteed_additions, 30_000.0);
        assert_eq!(result.bonuses, 153_600.0);
        assert_eq!(result.total_maturity, 423_600.0);
        assert_eq!(result.total_premiums_paid, 340_000.0);
        assert_eq!(result.basis, CalculationBasis::Published { reference: 15 });
        assert_eq!(result.note.as_deref(), Some("Based on 15 year term maturity data"));
    }

    #[test]
    fn test_equidistant_terms_pick_first_listed() {
        let catalog = Catalog::default_lic();
        let result = calculate_maturity_benefit(&catalog, 20_000.0, 20, 35, &umang_with_table());
        assert_eq!(result.basis, CalculationBasis::Published { reference: 15 });
    }

    #[test]
    fn test_doubling_premium_doubles_components() {
        let catalog = Catalog::default_lic();
        let plan = umang_with_table();
        let single = calculate_maturity_benefit(&catalog, 13_337.0, 24, 30, &plan);
        let double = calculate_maturity_benefit(&catalog, 26_674.0, 24, 30, &plan);

        assert_eq!(double.sum_assured, 2.0 * single.sum_assured);
        assert_abs_diff_eq!(
            double.guaranteed_additions,
            2.0 * single.guaranteed_additions,
            epsilon = 1.0
        );
        assert_abs_diff_eq!(double.bonuses, 2.0 * single.bonuses, epsilon = 1.0);
    }

    #[test]
    fn test_unknown_plan_uses_default_multiplier_and_rates() {
        let catalog = Catalog::default_lic();
        let plan = Plan::new("new-plan", "New Plan");
        let result = calculate_maturity_benefit(&catalog, 10_000.0, 10, 30, &plan);

        assert_eq!(result.sum_assured, 100_000.0);
        assert_eq!(result.guaranteed_additions, 5_000.0);
        assert_eq!(result.bonuses, 4_000.0);
        assert_eq!(result.net_gain, 109_000.0 - 100_000.0);
    }

    #[test]
    fn test_zero_published_sum_assured_does_not_poison_result() {
        let catalog = Catalog::default_lic();
        let row = MaturityBenefit {
            term: 16,
            sum_assured: 0.0,
            guaranteed_additions: 100.0,
            bonus: 100.0,
        };
        let plan = Plan::new("jivan-labh", "Jivan Labh").with_maturity_benefits(vec![row]);
        let result = calculate_maturity_benefit(&catalog, 10_000.0, 16, 30, &plan);
        assert!(result.total_maturity.is_finite());
        assert_eq!(result.total_maturity, result.sum_assured);
    }
}
