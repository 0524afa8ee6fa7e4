//! Premium, maturity and ROI calculators
//!
//! All calculators are pure functions of their inputs and the plan catalog.
//! They never fail: plans without published tables degrade to estimates
//! flagged through `CalculationBasis` and the result note.

mod eligibility;
mod premium;
mod maturity;
mod roi;
pub mod input;
pub mod irr;

pub use eligibility::{is_eligible, is_eligible_id};
pub use premium::{calculate_premium, estimated_premium_rate, PremiumResult};
pub use maturity::{calculate_maturity_benefit, implied_sum_assured, MaturityResult};
pub use roi::{calculate_roi, effective_annual_return, RoiResult};
pub use input::{InputLimits, MaturityQuery, PremiumQuery};

use crate::catalog::Catalog;
use crate::plan::Plan;
use serde::{Deserialize, Serialize};

/// Where a calculated figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CalculationBasis {
    /// Scaled from the published row for this reference age or term
    Published { reference: u32 },
    /// Derived from the plan's static rates
    Estimated,
}

impl CalculationBasis {
    pub fn is_estimated(&self) -> bool {
        matches!(self, CalculationBasis::Estimated)
    }
}

/// Row whose key is closest to `target`
///
/// On equal distance the row listed first is kept.
pub(crate) fn nearest_row<T, F>(rows: &[T], target: u32, key: F) -> Option<&T>
where
    F: Fn(&T) -> u32,
{
    let mut best: Option<(&T, u32)> = None;
    for row in rows {
        let distance = key(row).abs_diff(target);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((row, distance)),
        }
    }
    best.map(|(row, _)| row)
}

/// Calculators bound to one catalog
#[derive(Debug, Clone, Default)]
pub struct PlanCalculator {
    catalog: Catalog,
}

impl PlanCalculator {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_eligible(&self, plan: &Plan, age: u32, term: u32) -> bool {
        is_eligible(&self.catalog, plan, age, term)
    }

    pub fn premium(&self, query: &PremiumQuery, plan: &Plan) -> PremiumResult {
        calculate_premium(&self.catalog, query.age, query.sum_assured, query.term, plan)
    }

    pub fn maturity(&self, query: &MaturityQuery, plan: &Plan) -> MaturityResult {
        calculate_maturity_benefit(
            &self.catalog,
            query.premium_amount,
            query.term,
            query.age,
            plan,
        )
    }

    pub fn roi(&self, query: &MaturityQuery, plan: &Plan) -> RoiResult {
        calculate_roi(&self.catalog, query.premium_amount, query.term, query.age, plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_row_keeps_first_on_tie() {
        let rows = [10u32, 20, 30];
        assert_eq!(nearest_row(&rows, 15, |r| *r), Some(&10));
        assert_eq!(nearest_row(&rows, 25, |r| *r), Some(&20));
        assert_eq!(nearest_row(&rows, 29, |r| *r), Some(&30));
        assert_eq!(nearest_row(&rows, 100, |r| *r), Some(&30));
        assert_eq!(nearest_row::<u32, _>(&[], 5, |r| *r), None);
    }

    #[test]
    fn test_basis_serializes_with_kind_tag() {
        let json = serde_json::to_string(&CalculationBasis::Published { reference: 30 }).unwrap();
        assert_eq!(json, r#"{"kind":"published","reference":30}"#);
        let json = serde_json::to_string(&CalculationBasis::Estimated).unwrap();
        assert_eq!(json, r#"{"kind":"estimated"}"#);
    }

    #[test]
    fn test_calculator_delegates_to_catalog() {
        let calculator = PlanCalculator::new(Catalog::default_lic());
        let plan = Plan::new("jivan-utsav", "Jivan Utsav");
        let query = MaturityQuery {
            premium_amount: 50_000.0,
            term: 20,
            age: 30,
        };

        assert_eq!(calculator.maturity(&query, &plan).total_maturity, 1_650_000.0);
        assert_eq!(calculator.roi(&query, &plan).net_gain, 650_000.0);
        assert!(calculator.is_eligible(&plan, 30, 20));
    }
}
