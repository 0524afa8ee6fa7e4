//! Plan data structures matching the published catalog format

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One published premium row for a reference age
///
/// Amounts are quoted for the catalog's reference sum assured
/// (see `CalculatorDefaults::reference_base_unit`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumRate {
    pub age: u32,
    pub monthly_premium: f64,
    pub quarterly_premium: f64,
    pub half_yearly_premium: f64,
    pub annual_premium: f64,
}

/// One published maturity outcome for a reference term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaturityBenefit {
    /// Policy term in years
    pub term: u32,
    pub sum_assured: f64,
    pub guaranteed_additions: f64,
    pub bonus: f64,
}

/// Death benefits payable during the policy term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCover {
    pub natural_death_benefit: f64,
    pub accidental_death_benefit: f64,
}

/// A plan record as supplied by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Stable identifier, the join key for every static table
    pub id: String,

    /// Display name
    pub name: String,

    pub description: String,
    pub benefits: String,
    pub premium_details: String,
    pub maturity_details: String,
    pub additional_info: String,

    /// Published premium rows in catalog order
    #[serde(default)]
    pub premium_rates: Vec<PremiumRate>,

    /// Published maturity rows in catalog order
    #[serde(default)]
    pub maturity_benefits: Vec<MaturityBenefit>,

    #[serde(default)]
    pub risk_cover: Option<RiskCover>,
}

impl Plan {
    /// Create a plan with only an identifier and name, no published tables
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            benefits: String::new(),
            premium_details: String::new(),
            maturity_details: String::new(),
            additional_info: String::new(),
            premium_rates: Vec::new(),
            maturity_benefits: Vec::new(),
            risk_cover: None,
        }
    }

    pub fn with_premium_rates(mut self, rates: Vec<PremiumRate>) -> Self {
        self.premium_rates = rates;
        self
    }

    pub fn with_maturity_benefits(mut self, benefits: Vec<MaturityBenefit>) -> Self {
        self.maturity_benefits = benefits;
        self
    }

    pub fn with_risk_cover(mut self, cover: RiskCover) -> Self {
        self.risk_cover = Some(cover);
        self
    }

    pub fn has_published_rates(&self) -> bool {
        !self.premium_rates.is_empty()
    }

    pub fn has_published_maturity(&self) -> bool {
        !self.maturity_benefits.is_empty()
    }
}

/// Narrative sections shown on a plan's detail page
///
/// Each section is optional; `with_fallbacks` fills the gaps with standard text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanContent {
    pub title: String,
    pub overview: Option<String>,
    pub benefits: Option<String>,
    pub risk_cover: Option<String>,
    pub payment_options: Option<String>,
    pub returns: Option<String>,
}

/// Bookkeeping attached to an uploaded plan entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    pub title: String,
    pub description: String,
    pub creator: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Poster image bytes as handed over by the uploader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterImage {
    pub file_name: String,
    #[serde(default)]
    pub bytes: Vec<u8>,
}

impl PosterImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// A poster known only by name (bytes held elsewhere)
    pub fn named(file_name: impl Into<String>) -> Self {
        Self::new(file_name, Vec::new())
    }
}

/// An admin-managed plan entry: poster plus narrative content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEntry {
    pub id: String,
    pub content: PlanContent,
    pub metadata: PlanMetadata,
    pub poster: PosterImage,
}

/// Bundled poster images shown when no uploaded poster exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PosterPaths {
    pub primary: &'static str,
    pub additional: &'static [&'static str],
}

const DEFAULT_POSTER: &str = "/assets/generated/lic-plan-default.dim_800x600.png";

/// Look up the bundled posters for a plan identifier
pub fn poster_path(plan_id: &str) -> PosterPaths {
    let (primary, additional): (&'static str, &'static [&'static str]) = match plan_id {
        "jivan-labh" => ("/assets/generated/jivan-labh-736-4.jpg", &[]),
        "jivan-umang" => ("/assets/generated/jivan-umang-6.jpg", &[]),
        "jivan-shanti" => ("/assets/generated/jivan-shanti-1.jpg", &[]),
        "jivan-utsav" => (
            "/assets/generated/lic-jivan-utsav-7.jpg",
            &[
                "/assets/generated/jivan-utsav-8.jpg",
                "/assets/generated/jivan-utsav-plan-6.jpg",
            ],
        ),
        "jivan-lakshya" => (
            "/assets/generated/jivan-lakshya-1.jpg",
            &["/assets/generated/jivan-lakshya-4.jpg"],
        ),
        "bima-laxmi" => ("/assets/generated/bima-laxmi-2.jpg", &[]),
        _ => (DEFAULT_POSTER, &[]),
    };
    PosterPaths { primary, additional }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_builders() {
        let plan = Plan::new("jivan-labh", "Jivan Labh")
            .with_premium_rates(vec![PremiumRate {
                age: 30,
                monthly_premium: 900.0,
                quarterly_premium: 2650.0,
                half_yearly_premium: 5250.0,
                annual_premium: 10400.0,
            }])
            .with_risk_cover(RiskCover {
                natural_death_benefit: 250_000.0,
                accidental_death_benefit: 500_000.0,
            });

        assert!(plan.has_published_rates());
        assert!(!plan.has_published_maturity());
        assert!(plan.risk_cover.is_some());
    }

    #[test]
    fn test_poster_paths() {
        assert_eq!(poster_path("jivan-utsav").additional.len(), 2);
        assert_eq!(poster_path("bima-laxmi").primary, "/assets/generated/bima-laxmi-2.jpg");
        assert_eq!(poster_path("unknown").primary, DEFAULT_POSTER);
    }

    #[test]
    fn test_plan_json_uses_camel_case() {
        let plan = Plan::new("bima-laxmi", "Bima Laxmi");
        let json = serde_json::to_value(&plan).unwrap();
        assert!(json.get("premiumRates").is_some());
        assert!(json.get("maturityDetails").is_some());
    }
}
