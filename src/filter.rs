//! Multi-criteria plan filter over the catalog
//!
//! Age and budget ranges use overlap semantics: a plan passes when any value
//! of the requested range falls inside the plan's band.

use crate::catalog::{Band, Catalog, FinancialGoal};
use serde::{Deserialize, Serialize};

/// Optional criteria; an absent criterion does not filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFilterCriteria {
    #[serde(default)]
    pub age_range: Option<Band<u32>>,
    #[serde(default)]
    pub budget_range: Option<Band<f64>>,
    #[serde(default)]
    pub financial_goals: Vec<FinancialGoal>,
}

impl PlanFilterCriteria {
    pub fn with_age_range(mut self, min: u32, max: u32) -> Self {
        self.age_range = Some(Band::new(min, max));
        self
    }

    pub fn with_budget_range(mut self, min: f64, max: f64) -> Self {
        self.budget_range = Some(Band::new(min, max));
        self
    }

    pub fn with_goals(mut self, goals: &[FinancialGoal]) -> Self {
        self.financial_goals = goals.to_vec();
        self
    }
}

/// Keep plans whose age band overlaps the requested range
pub fn filter_by_age<'a>(
    catalog: &Catalog,
    plan_ids: Vec<&'a str>,
    range: Band<u32>,
) -> Vec<&'a str> {
    plan_ids
        .into_iter()
        .filter(|id| match catalog.age_band(id) {
            Some(band) => band.overlaps(&range),
            None => true,
        })
        .collect()
}

/// Keep plans whose monthly budget band overlaps the requested range
///
/// Single-premium plans (zero-width band) always pass.
pub fn filter_by_budget<'a>(
    catalog: &Catalog,
    plan_ids: Vec<&'a str>,
    range: Band<f64>,
) -> Vec<&'a str> {
    plan_ids
        .into_iter()
        .filter(|id| match catalog.budget_band(id) {
            Some(band) if !band.is_zero_width() => band.overlaps(&range),
            _ => true,
        })
        .collect()
}

/// Keep plans tagged with at least one requested goal; no goals keeps all
pub fn filter_by_goals<'a>(
    catalog: &Catalog,
    plan_ids: Vec<&'a str>,
    goals: &[FinancialGoal],
) -> Vec<&'a str> {
    if goals.is_empty() {
        return plan_ids;
    }
    plan_ids
        .into_iter()
        .filter(|id| {
            let tags = catalog.goals(id);
            goals.iter().any(|goal| tags.contains(goal))
        })
        .collect()
}

/// Apply age, then budget, then goals, in catalog order
pub fn filter_plans<'a>(catalog: &'a Catalog, criteria: &PlanFilterCriteria) -> Vec<&'a str> {
    let mut filtered = catalog.plan_ids();

    if let Some(range) = criteria.age_range {
        filtered = filter_by_age(catalog, filtered, range);
    }
    if let Some(range) = criteria.budget_range {
        filtered = filter_by_budget(catalog, filtered, range);
    }
    filter_by_goals(catalog, filtered, &criteria.financial_goals)
}
