//! Result grids across every eligible plan
//!
//! The calculator pages show one card per plan that accepts the applicant.
//! ROI ranking runs the projections in parallel.

use crate::calculators::{
    calculate_maturity_benefit, calculate_premium, calculate_roi, is_eligible, MaturityQuery,
    MaturityResult, PremiumQuery, PremiumResult, RoiResult,
};
use crate::catalog::Catalog;
use crate::plan::Plan;
use log::debug;
use rayon::prelude::*;
use serde::Serialize;

/// One plan's result in a grid
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanQuote<R> {
    pub plan_id: String,
    pub plan_name: String,
    pub result: R,
}

impl<R> PlanQuote<R> {
    fn new(plan: &Plan, result: R) -> Self {
        Self {
            plan_id: plan.id.clone(),
            plan_name: plan.name.clone(),
            result,
        }
    }
}

/// Plans accepting this age and term, in the order given
pub fn eligible_plans<'a>(
    catalog: &Catalog,
    plans: &'a [Plan],
    age: u32,
    term: u32,
) -> Vec<&'a Plan> {
    let eligible: Vec<&Plan> = plans
        .iter()
        .filter(|plan| is_eligible(catalog, plan, age, term))
        .collect();
    debug!(
        "{} of {} plans eligible at age {} term {}",
        eligible.len(),
        plans.len(),
        age,
        term
    );
    eligible
}

/// Premium for every eligible plan
pub fn premium_quotes(
    catalog: &Catalog,
    plans: &[Plan],
    query: &PremiumQuery,
) -> Vec<PlanQuote<PremiumResult>> {
    eligible_plans(catalog, plans, query.age, query.term)
        .into_iter()
        .map(|plan| {
            let result = calculate_premium(catalog, query.age, query.sum_assured, query.term, plan);
            PlanQuote::new(plan, result)
        })
        .collect()
}

/// Maturity projection for every eligible plan
pub fn maturity_quotes(
    catalog: &Catalog,
    plans: &[Plan],
    query: &MaturityQuery,
) -> Vec<PlanQuote<MaturityResult>> {
    eligible_plans(catalog, plans, query.age, query.term)
        .into_iter()
        .map(|plan| {
            let result = calculate_maturity_benefit(
                catalog,
                query.premium_amount,
                query.term,
                query.age,
                plan,
            );
            PlanQuote::new(plan, result)
        })
        .collect()
}

/// ROI for every eligible plan, best effective annual return first
///
/// Plans with equal returns keep their catalog order.
pub fn rank_by_roi(
    catalog: &Catalog,
    plans: &[Plan],
    query: &MaturityQuery,
) -> Vec<PlanQuote<RoiResult>> {
    let eligible = eligible_plans(catalog, plans, query.age, query.term);
    let mut ranked: Vec<PlanQuote<RoiResult>> = eligible
        .par_iter()
        .map(|plan| {
            let result =
                calculate_roi(catalog, query.premium_amount, query.term, query.age, plan);
            PlanQuote::new(plan, result)
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.result
            .effective_annual_roi
            .total_cmp(&a.result.effective_annual_roi)
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::load_default_plans;

    fn catalog_plans() -> Vec<Plan> {
        load_default_plans().unwrap()
    }

    #[test]
    fn test_ineligible_plans_are_left_out() {
        let catalog = Catalog::default_lic();
        let plans = catalog_plans();
        let query = PremiumQuery {
            age: 58,
            sum_assured: 500_000.0,
            term: 12,
        };
        let ids: Vec<String> = premium_quotes(&catalog, &plans, &query)
            .into_iter()
            .map(|q| q.plan_id)
            .collect();

        // 58 is past the Umang, Lakshya and Bima Laxmi age bands
        assert_eq!(ids, vec!["jivan-labh", "jivan-shanti", "jivan-utsav"]);
    }

    #[test]
    fn test_quotes_match_single_plan_calculation() {
        let catalog = Catalog::default_lic();
        let plans = catalog_plans();
        let query = MaturityQuery {
            premium_amount: 50_000.0,
            term: 20,
            age: 30,
        };
        let quotes = maturity_quotes(&catalog, &plans, &query);
        let utsav = quotes.iter().find(|q| q.plan_id == "jivan-utsav").unwrap();
        assert_eq!(utsav.result.total_maturity, 1_650_000.0);
    }

    #[test]
    fn test_rank_by_roi_is_descending() {
        let catalog = Catalog::default_lic();
        let plans = catalog_plans();
        let query = MaturityQuery {
            premium_amount: 25_000.0,
            term: 15,
            age: 35,
        };
        let ranked = rank_by_roi(&catalog, &plans, &query);

        assert!(!ranked.is_empty());
        for pair in ranked.windows(2) {
            assert!(pair[0].result.effective_annual_roi >= pair[1].result.effective_annual_roi);
        }
        assert_eq!(ranked[0].plan_id, "jivan-utsav");
    }

    #[test]
    fn test_equal_returns_keep_catalog_order() {
        let catalog = Catalog::default_lic();
        let plans = vec![
            Plan::new("unknown-b", "B"),
            Plan::new("unknown-a", "A"),
            Plan::new("unknown-c", "C"),
        ];
        let query = MaturityQuery {
            premium_amount: 10_000.0,
            term: 10,
            age: 30,
        };
        let ids: Vec<String> = rank_by_roi(&catalog, &plans, &query)
            .into_iter()
            .map(|q| q.plan_id)
            .collect();
        assert_eq!(ids, vec!["unknown-b", "unknown-a", "unknown-c"]);
    }
}
