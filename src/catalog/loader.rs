//! CSV-based plan profile loader
//!
//! Loads the static per-plan attributes from data/catalog/plan_profiles.csv

use super::profile::{Band, FinancialGoal, PlanProfile};
use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to the catalog directory
pub const DEFAULT_CATALOG_PATH: &str = "data/catalog";

/// Raw CSV row matching plan_profiles.csv columns
///
/// Empty cells deserialize to `None`.
#[derive(Debug, serde::Deserialize)]
struct ProfileRow {
    #[serde(rename = "PlanId")]
    plan_id: String,
    #[serde(rename = "MinAge")]
    min_age: Option<u32>,
    #[serde(rename = "MaxAge")]
    max_age: Option<u32>,
    #[serde(rename = "MinTerm")]
    min_term: Option<u32>,
    #[serde(rename = "MaxTerm")]
    max_term: Option<u32>,
    #[serde(rename = "MinBudget")]
    min_budget: Option<f64>,
    #[serde(rename = "MaxBudget")]
    max_budget: Option<f64>,
    #[serde(rename = "BaseRate")]
    base_rate: Option<f64>,
    #[serde(rename = "Multiplier")]
    multiplier: Option<f64>,
    #[serde(rename = "GuaranteedRate")]
    guaranteed_rate: Option<f64>,
    #[serde(rename = "BonusRate")]
    bonus_rate: Option<f64>,
    #[serde(rename = "Goals")]
    goals: String,
}

fn band<T: PartialOrd + Copy + ToString>(
    field: &str,
    min: Option<T>,
    max: Option<T>,
) -> Result<Option<Band<T>>> {
    match (min, max) {
        (Some(min), Some(max)) if min <= max => Ok(Some(Band::new(min, max))),
        (None, None) => Ok(None),
        (min, max) => Err(Error::InvalidNumber {
            field: field.to_string(),
            value: format!(
                "[{}, {}]",
                min.map(|v| v.to_string()).unwrap_or_default(),
                max.map(|v| v.to_string()).unwrap_or_default()
            ),
        }),
    }
}

impl ProfileRow {
    fn into_profile(self) -> Result<PlanProfile> {
        let goals = self
            .goals
            .split(';')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::parse::<FinancialGoal>)
            .collect::<Result<Vec<_>>>()?;

        Ok(PlanProfile {
            age_band: band(&format!("{} age band", self.plan_id), self.min_age, self.max_age)?,
            term_band: band(&format!("{} term band", self.plan_id), self.min_term, self.max_term)?,
            budget_band: band(
                &format!("{} budget band", self.plan_id),
                self.min_budget,
                self.max_budget,
            )?,
            base_premium_rate: self.base_rate,
            sum_assured_multiplier: self.multiplier,
            guaranteed_addition_rate: self.guaranteed_rate,
            bonus_rate: self.bonus_rate,
            goals,
            id: self.plan_id,
        })
    }
}

/// Load plan profiles from any reader
pub fn load_profiles_from_reader<R: Read>(reader: R) -> Result<Vec<PlanProfile>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut profiles = Vec::new();

    for result in csv_reader.deserialize() {
        let row: ProfileRow = result?;
        profiles.push(row.into_profile()?);
    }

    Ok(profiles)
}

/// Load plan profiles from plan_profiles.csv in the given directory
pub fn load_profiles(path: &Path) -> Result<Vec<PlanProfile>> {
    let file = File::open(path.join("plan_profiles.csv"))?;
    load_profiles_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "PlanId,MinAge,MaxAge,MinTerm,MaxTerm,MinBudget,MaxBudget,BaseRate,Multiplier,GuaranteedRate,BonusRate,Goals\n";

    #[test]
    fn test_load_default_profiles() {
        let profiles =
            load_profiles(Path::new(DEFAULT_CATALOG_PATH)).expect("Failed to load profiles");
        assert_eq!(profiles.len(), 6);

        let shanti = profiles.iter().find(|p| p.id == "jivan-shanti").unwrap();
        assert_eq!(shanti.age_band, Some(Band::new(30, 75)));
        assert_eq!(shanti.base_premium_rate, Some(0.0));
        assert!(shanti.budget_band.unwrap().is_zero_width());
    }

    #[test]
    fn test_empty_cells_leave_dimensions_open() {
        let csv = format!("{}custom,,,5,10,,,,12,,,savings;pension\n", HEADER);
        let profiles = load_profiles_from_reader(csv.as_bytes()).unwrap();

        let p = &profiles[0];
        assert_eq!(p.age_band, None);
        assert_eq!(p.term_band, Some(Band::new(5, 10)));
        assert_eq!(p.base_premium_rate, None);
        assert_eq!(p.sum_assured_multiplier, Some(12.0));
        assert_eq!(p.goals, vec![FinancialGoal::Savings, FinancialGoal::Pension]);
    }

    #[test]
    fn test_half_open_band_is_rejected() {
        let csv = format!("{}broken,18,,,,,,,,,,\n", HEADER);
        assert!(load_profiles_from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_unknown_goal_is_rejected() {
        let csv = format!("{}broken,,,,,,,,,,,lottery\n", HEADER);
        assert!(load_profiles_from_reader(csv.as_bytes()).is_err());
    }
}
