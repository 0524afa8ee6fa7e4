//! Calculator queries and their boundary validation

use crate::error::{Error, Result, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Accepted ranges for calculator input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputLimits {
    #[serde(default = "default_min_age")]
    pub min_age: u32,
    #[serde(default = "default_max_age")]
    pub max_age: u32,
    #[serde(default = "default_min_sum_assured")]
    pub min_sum_assured: f64,
    #[serde(default = "default_min_premium")]
    pub min_premium: f64,
    #[serde(default = "default_min_term")]
    pub min_term: u32,
    #[serde(default = "default_max_term")]
    pub max_term: u32,
}

fn default_min_age() -> u32 {
    18
}

fn default_max_age() -> u32 {
    65
}

fn default_min_sum_assured() -> f64 {
    100_000.0
}

fn default_min_premium() -> f64 {
    10_000.0
}

fn default_min_term() -> u32 {
    1
}

fn default_max_term() -> u32 {
    40
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_age: default_min_age(),
            max_age: default_max_age(),
            min_sum_assured: default_min_sum_assured(),
            min_premium: default_min_premium(),
            min_term: default_min_term(),
            max_term: default_max_term(),
        }
    }
}

impl InputLimits {
    fn check_age(&self, age: u32, errors: &mut ValidationErrors) {
        if age < self.min_age || age > self.max_age {
            errors.add(
                "age",
                format!("Age must be between {} and {}", self.min_age, self.max_age),
            );
        }
    }

    fn check_term(&self, term: u32, errors: &mut ValidationErrors) {
        if term < self.min_term || term > self.max_term {
            errors.add(
                "term",
                format!("Term must be between {} and {}", self.min_term, self.max_term),
            );
        }
    }
}

/// Premium calculator input: cover wanted at an issue age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumQuery {
    pub age: u32,
    pub sum_assured: f64,
    pub term: u32,
}

impl PremiumQuery {
    /// Parse raw form values
    pub fn from_form(age: &str, sum_assured: &str, term: &str) -> Result<Self> {
        Ok(Self {
            age: parse_field("age", age)?,
            sum_assured: parse_field("sumAssured", sum_assured)?,
            term: parse_field("term", term)?,
        })
    }

    pub fn validate(&self, limits: &InputLimits) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        limits.check_age(self.age, &mut errors);
        if !(self.sum_assured >= limits.min_sum_assured) {
            errors.add(
                "sumAssured",
                format!("Sum assured must be at least {}", limits.min_sum_assured),
            );
        }
        limits.check_term(self.term, &mut errors);
        errors.into_result()
    }
}

/// Maturity and ROI calculator input: a recurring annual premium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaturityQuery {
    pub premium_amount: f64,
    pub term: u32,
    pub age: u32,
}

impl MaturityQuery {
    /// Parse raw form values
    pub fn from_form(premium_amount: &str, term: &str, age: &str) -> Result<Self> {
        Ok(Self {
            premium_amount: parse_field("premiumAmount", premium_amount)?,
            term: parse_field("term", term)?,
            age: parse_field("age", age)?,
        })
    }

    pub fn validate(&self, limits: &InputLimits) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !(self.premium_amount >= limits.min_premium) {
            errors.add(
                "premiumAmount",
                format!("Premium amount must be at least {}", limits.min_premium),
            );
        }
        limits.check_term(self.term, &mut errors);
        limits.check_age(self.age, &mut errors);
        errors.into_result()
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::InvalidNumber {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_premium_query() {
        let query = PremiumQuery::from_form("30", "500000", "20").unwrap();
        assert_eq!(query.sum_assured, 500_000.0);
        assert!(query.validate(&InputLimits::default()).is_ok());
    }

    #[test]
    fn test_out_of_range_premium_query() {
        let query = PremiumQuery {
            age: 70,
            sum_assured: 50_000.0,
            term: 45,
        };
        let errors = query.validate(&InputLimits::default()).unwrap_err();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("age"), Some("Age must be between 18 and 65"));
        assert_eq!(errors.get("sumAssured"), Some("Sum assured must be at least 100000"));
        assert_eq!(errors.get("term"), Some("Term must be between 1 and 40"));
    }

    #[test]
    fn test_maturity_query_limits() {
        let limits = InputLimits::default();
        let low = MaturityQuery {
            premium_amount: 9_999.0,
            term: 0,
            age: 18,
        };
        let errors = low.validate(&limits).unwrap_err();
        assert_eq!(errors.get("premiumAmount"), Some("Premium amount must be at least 10000"));
        assert_eq!(errors.get("term"), Some("Term must be between 1 and 40"));
        assert!(errors.get("age").is_none());

        let edge = MaturityQuery {
            premium_amount: 10_000.0,
            term: 40,
            age: 65,
        };
        assert!(edge.validate(&limits).is_ok());
    }

    #[test]
    fn test_nan_amount_is_rejected() {
        let query = MaturityQuery {
            premium_amount: f64::NAN,
            term: 10,
            age: 30,
        };
        assert!(query.validate(&InputLimits::default()).is_err());
    }

    #[test]
    fn test_unparseable_form_value() {
        let err = MaturityQuery::from_form("lots", "10", "30").unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { ref field, .. } if field == "premiumAmount"));
    }

    #[test]
    fn test_limits_deserialize_with_defaults() {
        let limits: InputLimits = serde_json::from_str(r#"{"maxAge": 60}"#).unwrap();
        assert_eq!(limits.max_age, 60);
        assert_eq!(limits.min_age, 18);
        assert_eq!(limits.max_term, 40);
    }
}
