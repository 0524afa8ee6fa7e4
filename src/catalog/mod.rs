//! Plan catalog: one immutable configuration record per plan identifier
//!
//! Every static attribute the calculators and filters need (eligibility
//! bands, budget bands, fallback rates, goal tags) lives in a single
//! `PlanProfile`, so the tables cannot drift apart.

mod profile;
pub mod loader;

pub use profile::{Band, CalculatorDefaults, FinancialGoal, PlanProfile};
pub use loader::{load_profiles, load_profiles_from_reader, DEFAULT_CATALOG_PATH};

use crate::error::Result;
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Ordered set of plan profiles plus calculator defaults
#[derive(Debug, Clone)]
pub struct Catalog {
    profiles: Vec<PlanProfile>,
    index: HashMap<String, usize>,
    defaults: CalculatorDefaults,
}

impl Catalog {
    /// Build a catalog from profiles in display order
    pub fn new(profiles: Vec<PlanProfile>, defaults: CalculatorDefaults) -> Self {
        let index = profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self {
            profiles,
            index,
            defaults,
        }
    }

    /// The six-plan catalog the advisory practice sells
    pub fn default_lic() -> Self {
        use FinancialGoal::*;

        let profile = |id: &str,
                       age: (u32, u32),
                       term: (u32, u32),
                       budget: (f64, f64),
                       (base_rate, multiplier, guaranteed, bonus): (f64, f64, f64, f64),
                       goals: &[FinancialGoal]| PlanProfile {
            id: id.to_string(),
            age_band: Some(Band::new(age.0, age.1)),
            term_band: Some(Band::new(term.0, term.1)),
            budget_band: Some(Band::new(budget.0, budget.1)),
            base_premium_rate: Some(base_rate),
            sum_assured_multiplier: Some(multiplier),
            guaranteed_addition_rate: Some(guaranteed),
            bonus_rate: Some(bonus),
            goals: goals.to_vec(),
        };

        Self::new(
            vec![
                profile(
                    "jivan-labh",
                    (18, 60),
                    (10, 16),
                    (1000.0, 10000.0),
                    (2.5, 10.0, 0.5, 0.4),
                    &[Savings, GuaranteedReturns],
                ),
                profile(
                    "jivan-umang",
                    (18, 55),
                    (15, 30),
                    (1300.0, 15000.0),
                    (3.0, 12.0, 0.6, 0.5),
                    &[Pension, GuaranteedReturns],
                ),
                // Single premium annuity
                profile(
                    "jivan-shanti",
                    (30, 75),
                    (0, 20),
                    (0.0, 0.0),
                    (0.0, 0.0, 0.0, 0.0),
                    &[Pension],
                ),
                profile(
                    "jivan-utsav",
                    (18, 60),
                    (10, 30),
                    (4000.0, 25000.0),
                    (8.5, 11.0, 10.0, 0.0),
                    &[GuaranteedReturns, Savings],
                ),
                profile(
                    "jivan-lakshya",
                    (18, 50),
                    (13, 25),
                    (1300.0, 12000.0),
                    (3.2, 10.0, 0.55, 0.45),
                    &[Savings],
                ),
                // Money back plan
                profile(
                    "bima-laxmi",
                    (18, 55),
                    (20, 25),
                    (1500.0, 10000.0),
                    (2.0, 50.0, 0.5, 0.5),
                    &[MoneyBack, Savings],
                ),
            ],
            CalculatorDefaults::default(),
        )
    }

    /// Load profiles from the default data/catalog directory
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(DEFAULT_CATALOG_PATH))
    }

    /// Load profiles from plan_profiles.csv in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let profiles = load_profiles(path)?;
        info!("Loaded {} plan profiles from {}", profiles.len(), path.display());
        Ok(Self::new(profiles, CalculatorDefaults::default()))
    }

    pub fn with_defaults(mut self, defaults: CalculatorDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &CalculatorDefaults {
        &self.defaults
    }

    pub fn profile(&self, plan_id: &str) -> Option<&PlanProfile> {
        self.index.get(plan_id).map(|&i| &self.profiles[i])
    }

    pub fn profiles(&self) -> &[PlanProfile] {
        &self.profiles
    }

    /// Plan identifiers in catalog order
    pub fn plan_ids(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.id.as_str()).collect()
    }

    pub fn age_band(&self, plan_id: &str) -> Option<Band<u32>> {
        self.profile(plan_id).and_then(|p| p.age_band)
    }

    pub fn term_band(&self, plan_id: &str) -> Option<Band<u32>> {
        self.profile(plan_id).and_then(|p| p.term_band)
    }

    pub fn budget_band(&self, plan_id: &str) -> Option<Band<f64>> {
        self.profile(plan_id).and_then(|p| p.budget_band)
    }

    pub fn goals(&self, plan_id: &str) -> &[FinancialGoal] {
        self.profile(plan_id).map(|p| p.goals.as_slice()).unwrap_or(&[])
    }

    /// Base annual premium rate (% of sum assured), defaulted for unknown plans
    pub fn base_premium_rate(&self, plan_id: &str) -> f64 {
        self.profile(plan_id)
            .and_then(|p| p.base_premium_rate)
            .unwrap_or(self.defaults.base_premium_rate)
    }

    /// Sum assured per unit of recurring premium, defaulted for unknown plans
    pub fn sum_assured_multiplier(&self, plan_id: &str) -> f64 {
        self.profile(plan_id)
            .and_then(|p| p.sum_assured_multiplier)
            .unwrap_or(self.defaults.sum_assured_multiplier)
    }

    /// Guaranteed-addition and bonus rates (% of sum assured per year)
    pub fn accrual_rates(&self, plan_id: &str) -> (f64, f64) {
        let profile = self.profile(plan_id);
        let guaranteed = profile
            .and_then(|p| p.guaranteed_addition_rate)
            .unwrap_or(self.defaults.guaranteed_addition_rate);
        let bonus = profile
            .and_then(|p| p.bonus_rate)
            .unwrap_or(self.defaults.bonus_rate);
        (guaranteed, bonus)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::default_lic()
    }
}
