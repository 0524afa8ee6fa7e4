//! Side-by-side plan comparison

use crate::i18n::{plan_name, plan_translation, Language};
use crate::plan::Plan;
use serde::Serialize;
use thiserror::Error;

/// Fewest plans a comparison makes sense for
pub const MIN_COMPARED_PLANS: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    #[error("Select at least {required} plans to compare ({selected} selected)")]
    TooFewPlans { selected: usize, required: usize },
}

/// Plan identifiers ticked for comparison, in the order they were ticked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSelection {
    selected: Vec<String>,
}

impl PlanSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the plan if unselected, otherwise unselect it
    pub fn toggle(&mut self, plan_id: &str) {
        if let Some(pos) = self.selected.iter().position(|id| id == plan_id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(plan_id.to_string());
        }
    }

    pub fn select_all(&mut self, plans: &[Plan]) {
        self.selected = plans.iter().map(|p| p.id.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, plan_id: &str) -> bool {
        self.selected.iter().any(|id| id == plan_id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether to prompt for more plans: something is selected but not enough
    pub fn needs_more(&self) -> bool {
        !self.selected.is_empty() && self.selected.len() < MIN_COMPARED_PLANS
    }

    /// Selected plans in catalog order
    pub fn selected_plans<'a>(&self, plans: &'a [Plan]) -> Vec<&'a Plan> {
        plans.iter().filter(|p| self.is_selected(&p.id)).collect()
    }

    /// Build the comparison table, provided enough plans are selected
    pub fn compare(
        &self,
        plans: &[Plan],
        language: Language,
    ) -> Result<ComparisonTable, ComparisonError> {
        let selected = self.selected_plans(plans);
        if selected.len() < MIN_COMPARED_PLANS {
            return Err(ComparisonError::TooFewPlans {
                selected: selected.len(),
                required: MIN_COMPARED_PLANS,
            });
        }
        Ok(ComparisonTable::build(&selected, language))
    }
}

/// First published premium row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePremium {
    pub age: u32,
    pub annual: f64,
    pub monthly: f64,
}

/// First published maturity row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleMaturity {
    pub term: u32,
    pub sum_assured: f64,
    pub bonus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub plan_id: String,
    pub name: String,
    pub description: String,
    pub premium_details: String,
    pub maturity_details: String,
    pub sample_premium: Option<SamplePremium>,
    pub sample_maturity: Option<SampleMaturity>,
    pub natural_death_benefit: Option<f64>,
    pub accidental_death_benefit: Option<f64>,
}

impl ComparisonRow {
    pub fn from_plan(plan: &Plan, language: Language) -> Self {
        let sample_premium = plan.premium_rates.first().map(|r| SamplePremium {
            age: r.age,
            annual: r.annual_premium,
            monthly: r.monthly_premium,
        });
        let sample_maturity = plan.maturity_benefits.first().map(|b| SampleMaturity {
            term: b.term,
            sum_assured: b.sum_assured,
            bonus: b.bonus,
        });

        Self {
            plan_id: plan.id.clone(),
            name: plan_name(&plan.id, &plan.name, language),
            description: plan_translation(&plan.id)
                .map(|t| t.description.get(language).to_string())
                .unwrap_or_else(|| plan.description.clone()),
            premium_details: plan.premium_details.clone(),
            maturity_details: plan.maturity_details.clone(),
            sample_premium,
            sample_maturity,
            natural_death_benefit: plan.risk_cover.as_ref().map(|c| c.natural_death_benefit),
            accidental_death_benefit: plan.risk_cover.as_ref().map(|c| c.accidental_death_benefit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTable {
    pub language: Language,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn build(plans: &[&Plan], language: Language) -> Self {
        Self {
            language,
            rows: plans.iter().map(|p| ComparisonRow::from_plan(p, language)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::load_default_plans;

    #[test]
    fn test_toggle_select_all_and_clear() {
        let plans = load_default_plans().unwrap();
        let mut selection = PlanSelection::new();

        selection.toggle("jivan-umang");
        assert!(selection.is_selected("jivan-umang"));
        assert!(selection.needs_more());

        selection.toggle("jivan-umang");
        assert!(selection.is_empty());
        assert!(!selection.needs_more());

        selection.select_all(&plans);
        assert_eq!(selection.len(), plans.len());

        selection.clear();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_single_plan_is_not_comparable() {
        let plans = load_default_plans().unwrap();
        let mut selection = PlanSelection::new();
        selection.toggle("jivan-labh");

        let err = selection.compare(&plans, Language::English).unwrap_err();
        assert_eq!(err, ComparisonError::TooFewPlans { selected: 1, required: 2 });
    }

    #[test]
    fn test_rows_follow_catalog_order_and_show_samples() {
        let plans = load_default_plans().unwrap();
        let mut selection = PlanSelection::new();
        selection.toggle("jivan-utsav");
        selection.toggle("jivan-labh");

        let table = selection.compare(&plans, Language::English).unwrap();
        assert_eq!(table.rows.len(), 2);

        let labh = &table.rows[0];
        assert_eq!(labh.plan_id, "jivan-labh");
        assert_eq!(labh.name, "Jivan Labh (Plan 736)");
        assert_eq!(labh.sample_premium.as_ref().map(|s| s.age), Some(20));
        assert_eq!(labh.sample_maturity.as_ref().map(|s| s.term), Some(16));
        assert!(labh.natural_death_benefit.is_some());

        let utsav = &table.rows[1];
        assert!(utsav.sample_premium.is_none());
        assert!(utsav.sample_maturity.is_none());
        assert!(utsav.accidental_death_benefit.is_none());
    }

    #[test]
    fn test_rows_are_translated() {
        let plans = load_default_plans().unwrap();
        let mut selection = PlanSelection::new();
        selection.select_all(&plans);

        let table = selection.compare(&plans, Language::Marathi).unwrap();
        assert_eq!(table.rows[2].name, "जीवन शांती (योजना संख्या: 850)");
    }
}
