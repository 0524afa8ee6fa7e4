//! Static per-plan attributes: eligibility bands, budget bands, fallback rates and goal tags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed interval [min, max]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Band<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Check whether a value lies inside the band (inclusive)
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check whether any value of `other` lies inside this band
    pub fn overlaps(&self, other: &Band<T>) -> bool {
        !(other.max < self.min || other.min > self.max)
    }

    /// A band whose bounds coincide (single-premium budget bands)
    pub fn is_zero_width(&self) -> bool {
        self.min == self.max
    }
}

/// Financial goal tags used by the plan filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FinancialGoal {
    Savings,
    Pension,
    MoneyBack,
    GuaranteedReturns,
}

impl FinancialGoal {
    pub const ALL: [FinancialGoal; 4] = [
        FinancialGoal::Savings,
        FinancialGoal::Pension,
        FinancialGoal::MoneyBack,
        FinancialGoal::GuaranteedReturns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialGoal::Savings => "savings",
            FinancialGoal::Pension => "pension",
            FinancialGoal::MoneyBack => "moneyBack",
            FinancialGoal::GuaranteedReturns => "guaranteedReturns",
        }
    }
}

impl fmt::Display for FinancialGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinancialGoal {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "savings" => Ok(FinancialGoal::Savings),
            "pension" => Ok(FinancialGoal::Pension),
            "moneyback" => Ok(FinancialGoal::MoneyBack),
            "guaranteedreturns" => Ok(FinancialGoal::GuaranteedReturns),
            _ => Err(crate::error::Error::UnknownValue {
                kind: "financial goal",
                value: s.to_string(),
            }),
        }
    }
}

/// Every static attribute of one plan identifier
///
/// A `None` band leaves that dimension unconstrained; a `None` rate falls
/// back to the catalog's `CalculatorDefaults`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanProfile {
    pub id: String,

    /// Issue ages accepted
    pub age_band: Option<Band<u32>>,

    /// Policy terms accepted, in years
    pub term_band: Option<Band<u32>>,

    /// Approximate monthly premium range
    pub budget_band: Option<Band<f64>>,

    /// Annual premium as a percentage of sum assured
    pub base_premium_rate: Option<f64>,

    /// Sum assured per unit of recurring premium
    pub sum_assured_multiplier: Option<f64>,

    /// Guaranteed additions, percent of sum assured per year
    pub guaranteed_addition_rate: Option<f64>,

    /// Bonus, percent of sum assured per year
    pub bonus_rate: Option<f64>,

    pub goals: Vec<FinancialGoal>,
}

impl PlanProfile {
    /// Profile with no bands, no rates and no goals
    pub fn unconstrained(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            age_band: None,
            term_band: None,
            budget_band: None,
            base_premium_rate: None,
            sum_assured_multiplier: None,
            guaranteed_addition_rate: None,
            bonus_rate: None,
            goals: Vec::new(),
        }
    }

    pub fn has_goal(&self, goal: FinancialGoal) -> bool {
        self.goals.contains(&goal)
    }
}

/// Constants used when a plan has no published data or no profile entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorDefaults {
    /// Sum assured that published premium rows are quoted for
    pub reference_base_unit: f64,

    /// Base premium rate (% of sum assured) for unknown plans
    pub base_premium_rate: f64,

    /// Sum assured multiplier for unknown plans
    pub sum_assured_multiplier: f64,

    /// Guaranteed-addition rate (% p.a.) for unknown plans
    pub guaranteed_addition_rate: f64,

    /// Bonus rate (% p.a.) for unknown plans
    pub bonus_rate: f64,
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        Self {
            reference_base_unit: 100_000.0,
            base_premium_rate: 3.0,
            sum_assured_multiplier: 10.0,
            guaranteed_addition_rate: 0.5,
            bonus_rate: 0.4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_contains_is_inclusive() {
        let band = Band::new(18, 60);
        assert!(band.contains(18));
        assert!(band.contains(60));
        assert!(!band.contains(17));
        assert!(!band.contains(61));
    }

    #[test]
    fn test_band_overlap() {
        let band = Band::new(18, 50);
        assert!(band.overlaps(&Band::new(45, 70)));
        assert!(band.overlaps(&Band::new(50, 50)));
        assert!(!band.overlaps(&Band::new(62, 70)));
        assert!(!band.overlaps(&Band::new(10, 17)));
    }

    #[test]
    fn test_zero_width() {
        assert!(Band::new(0.0, 0.0).is_zero_width());
        assert!(!Band::new(1000.0, 10000.0).is_zero_width());
    }

    #[test]
    fn test_goal_parsing_accepts_form_spellings() {
        assert_eq!("moneyBack".parse::<FinancialGoal>().unwrap(), FinancialGoal::MoneyBack);
        assert_eq!(
            "guaranteed-returns".parse::<FinancialGoal>().unwrap(),
            FinancialGoal::GuaranteedReturns
        );
        assert_eq!(" Savings ".parse::<FinancialGoal>().unwrap(), FinancialGoal::Savings);
        assert!("retirement".parse::<FinancialGoal>().is_err());
    }
}
