//! Lead-capture enquiries from the contact form

use crate::error::ValidationErrors;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10,15}$").unwrap());

/// Product an enquirer is interested in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductInterest {
    Term,
    Endowment,
    Ulip,
    Pension,
    Child,
    Other,
}

impl ProductInterest {
    /// Parse a form value; anything unrecognised is `Other`
    pub fn from_form_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "term" => ProductInterest::Term,
            "endowment" => ProductInterest::Endowment,
            "ulip" => ProductInterest::Ulip,
            "pension" => ProductInterest::Pension,
            "child" => ProductInterest::Child,
            _ => ProductInterest::Other,
        }
    }
}

/// Contact form as submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryForm {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub email: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub product_interest: Option<String>,
    pub message: String,
}

fn required(value: &str, field_name: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{} is required", field_name))
    } else {
        None
    }
}

fn check_email(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        Some("Email is required".to_string())
    } else if !EMAIL.is_match(email) {
        Some("Please enter a valid email address".to_string())
    } else {
        None
    }
}

fn check_phone(phone: &str) -> Option<String> {
    if phone.trim().is_empty() {
        return None;
    }
    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '+')
        .collect();
    if PHONE.is_match(&digits) {
        None
    } else {
        Some("Please enter a valid phone number (10-15 digits)".to_string())
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl EnquiryForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.add_opt("name", required(&self.name, "Name"));
        errors.add_opt("email", check_email(&self.email));
        if let Some(phone) = &self.phone {
            errors.add_opt("phone", check_phone(phone));
        }
        errors.add_opt("message", required(&self.message, "Message"));
        errors.into_result()
    }

    /// Validate and stamp the enquiry with its submission time
    pub fn into_enquiry(self, timestamp: DateTime<Utc>) -> Result<Enquiry, ValidationErrors> {
        self.validate()?;
        Ok(Enquiry {
            name: self.name.trim().to_string(),
            phone: non_blank(&self.phone),
            email: self.email.trim().to_string(),
            city: non_blank(&self.city),
            product_interest: non_blank(&self.product_interest)
                .map(|v| ProductInterest::from_form_value(&v)),
            message: self.message.trim().to_string(),
            timestamp,
        })
    }
}

/// A stored enquiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    pub city: Option<String>,
    pub product_interest: Option<ProductInterest>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn form() -> EnquiryForm {
        EnquiryForm {
            name: "Asha Patil".to_string(),
            phone: Some("+91 98765-43210".to_string()),
            email: "asha@example.in".to_string(),
            city: Some("  ".to_string()),
            product_interest: Some("pension".to_string()),
            message: "Please call about Jeevan Umang".to_string(),
        }
    }

    #[test]
    fn test_valid_form_becomes_enquiry() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        let enquiry = form().into_enquiry(at).unwrap();

        assert_eq!(enquiry.phone.as_deref(), Some("+91 98765-43210"));
        assert_eq!(enquiry.city, None);
        assert_eq!(enquiry.product_interest, Some(ProductInterest::Pension));
        assert_eq!(enquiry.timestamp, at);
    }

    #[test]
    fn test_required_fields() {
        let errors = EnquiryForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("message"), Some("Message is required"));
        assert!(errors.get("phone").is_none());
    }

    #[test]
    fn test_email_shape() {
        for bad in ["asha", "asha@example", "as ha@example.in", "@example.in"] {
            let mut f = form();
            f.email = bad.to_string();
            let errors = f.validate().unwrap_err();
            assert_eq!(errors.get("email"), Some("Please enter a valid email address"), "{}", bad);
        }
    }

    #[test]
    fn test_phone_digits() {
        let mut f = form();
        f.phone = Some("12345".to_string());
        assert!(f.validate().unwrap_err().get("phone").is_some());

        f.phone = Some("98765 432a0".to_string());
        assert!(f.validate().is_err());

        f.phone = Some("".to_string());
        assert!(f.validate().is_ok());

        f.phone = Some("+1-202-555-0143".to_string());
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_unknown_interest_is_other() {
        assert_eq!(ProductInterest::from_form_value("ULIP"), ProductInterest::Ulip);
        assert_eq!(ProductInterest::from_form_value("gold loan"), ProductInterest::Other);
    }
}
