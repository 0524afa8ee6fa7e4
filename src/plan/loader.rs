//! Load the published plan catalog from CSV files
//!
//! `plans.csv` defines the plans in display order; `premium_rates.csv`,
//! `maturity_benefits.csv` and `risk_covers.csv` attach published tables by
//! plan identifier. Row order within each file is preserved because it is
//! the tie-break order for nearest-row lookups.

use super::{MaturityBenefit, Plan, PremiumRate, RiskCover};
use crate::catalog::DEFAULT_CATALOG_PATH;
use crate::error::Result;
use csv::Reader;
use log::{info, warn};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// Raw row of plans.csv
#[derive(Debug, serde::Deserialize)]
struct PlanRow {
    #[serde(rename = "PlanId")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Benefits")]
    benefits: String,
    #[serde(rename = "PremiumDetails")]
    premium_details: String,
    #[serde(rename = "MaturityDetails")]
    maturity_details: String,
    #[serde(rename = "AdditionalInfo")]
    additional_info: String,
}

impl PlanRow {
    fn into_plan(self) -> Plan {
        Plan {
            id: self.id,
            name: self.name,
            description: self.description,
            benefits: self.benefits,
            premium_details: self.premium_details,
            maturity_details: self.maturity_details,
            additional_info: self.additional_info,
            premium_rates: Vec::new(),
            maturity_benefits: Vec::new(),
            risk_cover: None,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct PremiumRateRow {
    #[serde(rename = "PlanId")]
    plan_id: String,
    #[serde(rename = "Age")]
    age: u32,
    #[serde(rename = "Monthly")]
    monthly: f64,
    #[serde(rename = "Quarterly")]
    quarterly: f64,
    #[serde(rename = "HalfYearly")]
    half_yearly: f64,
    #[serde(rename = "Annual")]
    annual: f64,
}

#[derive(Debug, serde::Deserialize)]
struct MaturityRow {
    #[serde(rename = "PlanId")]
    plan_id: String,
    #[serde(rename = "Term")]
    term: u32,
    #[serde(rename = "SumAssured")]
    sum_assured: f64,
    #[serde(rename = "GuaranteedAdditions")]
    guaranteed_additions: f64,
    #[serde(rename = "Bonus")]
    bonus: f64,
}

#[derive(Debug, serde::Deserialize)]
struct RiskCoverRow {
    #[serde(rename = "PlanId")]
    plan_id: String,
    #[serde(rename = "NaturalDeath")]
    natural_death: f64,
    #[serde(rename = "AccidentalDeath")]
    accidental_death: f64,
}

/// Load plan headers from any reader
pub fn load_plans_from_reader<R: Read>(reader: R) -> Result<Vec<Plan>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut plans = Vec::new();

    for result in csv_reader.deserialize() {
        let row: PlanRow = result?;
        plans.push(row.into_plan());
    }

    Ok(plans)
}

/// Catalog under construction, indexed by plan id
struct PlanIndex {
    plans: Vec<Plan>,
    positions: HashMap<String, usize>,
}

impl PlanIndex {
    fn new(plans: Vec<Plan>) -> Self {
        let positions = plans
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self { plans, positions }
    }

    fn get_mut(&mut self, plan_id: &str, file: &str) -> Option<&mut Plan> {
        match self.positions.get(plan_id) {
            Some(&idx) => Some(&mut self.plans[idx]),
            None => {
                warn!("{}: skipping row for unknown plan '{}'", file, plan_id);
                None
            }
        }
    }
}

fn attach_premium_rates<R: Read>(index: &mut PlanIndex, reader: R) -> Result<()> {
    let mut csv_reader = Reader::from_reader(reader);
    for result in csv_reader.deserialize() {
        let row: PremiumRateRow = result?;
        if let Some(plan) = index.get_mut(&row.plan_id, "premium_rates.csv") {
            plan.premium_rates.push(PremiumRate {
                age: row.age,
                monthly_premium: row.monthly,
                quarterly_premium: row.quarterly,
                half_yearly_premium: row.half_yearly,
                annual_premium: row.annual,
            });
        }
    }
    Ok(())
}

fn attach_maturity_benefits<R: Read>(index: &mut PlanIndex, reader: R) -> Result<()> {
    let mut csv_reader = Reader::from_reader(reader);
    for result in csv_reader.deserialize() {
        let row: MaturityRow = result?;
        if let Some(plan) = index.get_mut(&row.plan_id, "maturity_benefits.csv") {
            plan.maturity_benefits.push(MaturityBenefit {
                term: row.term,
                sum_assured: row.sum_assured,
                guaranteed_additions: row.guaranteed_additions,
                bonus: row.bonus,
            });
        }
    }
    Ok(())
}

fn attach_risk_covers<R: Read>(index: &mut PlanIndex, reader: R) -> Result<()> {
    let mut csv_reader = Reader::from_reader(reader);
    for result in csv_reader.deserialize() {
        let row: RiskCoverRow = result?;
        if let Some(plan) = index.get_mut(&row.plan_id, "risk_covers.csv") {
            plan.risk_cover = Some(RiskCover {
                natural_death_benefit: row.natural_death,
                accidental_death_benefit: row.accidental_death,
            });
        }
    }
    Ok(())
}

/// Load the full plan catalog from a directory
///
/// Only `plans.csv` is required; missing table files leave the
/// corresponding tables empty, which sends the calculators down their
/// estimation path.
pub fn load_plans_from(dir: &Path) -> Result<Vec<Plan>> {
    let plans = load_plans_from_reader(std::fs::File::open(dir.join("plans.csv"))?)?;
    let mut index = PlanIndex::new(plans);

    let premium_path = dir.join("premium_rates.csv");
    if premium_path.exists() {
        attach_premium_rates(&mut index, std::fs::File::open(premium_path)?)?;
    }

    let maturity_path = dir.join("maturity_benefits.csv");
    if maturity_path.exists() {
        attach_maturity_benefits(&mut index, std::fs::File::open(maturity_path)?)?;
    }

    let risk_path = dir.join("risk_covers.csv");
    if risk_path.exists() {
        attach_risk_covers(&mut index, std::fs::File::open(risk_path)?)?;
    }

    info!("Loaded {} plans from {}", index.plans.len(), dir.display());
    Ok(index.plans)
}

/// Load the plan catalog from the default data/catalog location
pub fn load_default_plans() -> Result<Vec<Plan>> {
    load_plans_from(Path::new(DEFAULT_CATALOG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_plans() {
        let plans = load_default_plans().expect("Failed to load plans");
        assert_eq!(plans.len(), 6);
        assert_eq!(plans[0].id, "jivan-labh");

        let labh = &plans[0];
        assert!(labh.has_published_rates());
        assert!(labh.has_published_maturity());
        assert!(labh.risk_cover.is_some());

        // Jeevan Utsav ships without published tables
        let utsav = plans.iter().find(|p| p.id == "jivan-utsav").unwrap();
        assert!(!utsav.has_published_rates());
        assert!(!utsav.has_published_maturity());
    }

    #[test]
    fn test_rows_keep_file_order_and_skip_unknown_plans() {
        let plans_csv = "PlanId,Name,Description,Benefits,PremiumDetails,MaturityDetails,AdditionalInfo\n\
                         p1,Plan One,d,b,pd,md,ai\n";
        let rates_csv = "PlanId,Age,Monthly,Quarterly,HalfYearly,Annual\n\
                         p1,40,10,30,60,120\n\
                         ghost,30,1,1,1,1\n\
                         p1,30,8,24,48,96\n";

        let plans = load_plans_from_reader(plans_csv.as_bytes()).unwrap();
        let mut index = PlanIndex::new(plans);
        attach_premium_rates(&mut index, rates_csv.as_bytes()).unwrap();

        let ages: Vec<u32> = index.plans[0].premium_rates.iter().map(|r| r.age).collect();
        assert_eq!(ages, vec![40, 30]);
    }
}
