//! Display language, translated strings and the language preference store
//!
//! The language is an explicit value passed to whatever renders text. The
//! user's choice is persisted through a `PreferenceStore`, never held in
//! global state.

use crate::error::Error;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Key under which the chosen language is stored
pub const LANGUAGE_KEY: &str = "lic-language";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "mr")]
    Marathi,
    #[serde(rename = "hi")]
    Hindi,
    #[default]
    #[serde(rename = "en")]
    English,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Marathi, Language::Hindi, Language::English];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Marathi => "mr",
            Language::Hindi => "hi",
            Language::English => "en",
        }
    }

    /// Name of the language in its own script, for the language toggle
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::Marathi => "मराठी",
            Language::Hindi => "हिंदी",
            Language::English => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mr" | "marathi" => Ok(Language::Marathi),
            "hi" | "hindi" => Ok(Language::Hindi),
            "en" | "english" => Ok(Language::English),
            _ => Err(Error::UnknownValue {
                kind: "language",
                value: s.to_string(),
            }),
        }
    }
}

/// One string in every supported language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TranslatedText {
    pub mr: &'static str,
    pub hi: &'static str,
    pub en: &'static str,
}

impl TranslatedText {
    pub const fn new(mr: &'static str, hi: &'static str, en: &'static str) -> Self {
        Self { mr, hi, en }
    }

    /// Text in `language`, or English when that translation is empty
    pub fn get(&self, language: Language) -> &'static str {
        let text = match language {
            Language::Marathi => self.mr,
            Language::Hindi => self.hi,
            Language::English => self.en,
        };
        if text.is_empty() {
            self.en
        } else {
            text
        }
    }
}

/// Translated name and tagline of a catalog plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanTranslation {
    pub name: TranslatedText,
    pub description: TranslatedText,
}

pub fn plan_translation(plan_id: &str) -> Option<PlanTranslation> {
    let (name, description) = match plan_id {
        "jivan-labh" => (
            TranslatedText::new(
                "जीवन लाभ (योजना संख्या: 736)",
                "जीवन लाभ (योजना संख्या: 736)",
                "Jivan Labh (Plan 736)",
            ),
            TranslatedText::new(
                "भुगतान 10 साल | आदाम 6 साल | परिपक्वता 16वां साल",
                "भुगतान 10 साल | आदाम 6 साल | परिपक्वता 16वां साल",
                "10 year payment term | 6 year income period | 16 year maturity",
            ),
        ),
        "jivan-umang" => (
            TranslatedText::new("जीवन उमंग", "जीवन उमंग", "Jivan Umang"),
            TranslatedText::new(
                "रोज ₹138 रुपये जमा करे, केवल 15 साल के लिए",
                "रोज ₹138 रुपये जमा करे, केवल 15 साल के लिए",
                "Save ₹138 daily for just 15 years",
            ),
        ),
        "jivan-shanti" => (
            TranslatedText::new(
                "जीवन शांती (योजना संख्या: 850)",
                "जीवन शांति (योजना संख्या: 850)",
                "Jivan Shanti (Plan 850)",
            ),
            TranslatedText::new(
                "एकल प्रीमियम वार्षिकी योजना हमी दरांसह",
                "एकल प्रीमियम वार्षिकी योजना गारंटीड दरों के साथ",
                "Single premium annuity plan with guaranteed rates",
            ),
        ),
        "jivan-utsav" => (
            TranslatedText::new(
                "जीवन उत्सव (योजना संख्या: 771)",
                "जीवन उत्सव (योजना संख्या: 771)",
                "Jivan Utsav (Plan 771)",
            ),
            TranslatedText::new(
                "आजीवन 10% हमी परतावा",
                "आजीवन 10% गारंटीड रिटर्न",
                "Lifetime 10% guaranteed returns",
            ),
        ),
        "jivan-lakshya" => (
            TranslatedText::new("जीवन लक्ष्य", "जीवन लक्ष्य", "Jivan Lakshya"),
            TranslatedText::new(
                "प्रत्येक व्यक्तीसाठी... प्रत्येक व्यक्तीच्या उत्तम कौटुंबिक भविष्यासाठी",
                "प्रत्येक व्यक्ति के लिए... प्रत्येक व्यक्ति के उत्तम पारिवारिक भविष्य के लिए",
                "For every individual... For every individual's excellent family future",
            ),
        ),
        "bima-laxmi" => (
            TranslatedText::new(
                "बीमा लक्ष्मी (योजना संख्या: 881)",
                "बीमा लक्ष्मी (योजना संख्या: 881)",
                "Bima Laxmi (Plan 881)",
            ),
            TranslatedText::new(
                "₹10 लाख रुपयांचा Money Back प्लान! | हर 2 साल में पैसा वापस!",
                "₹10 लाख रुपयों का Money Back प्लान! | हर 2 साल में पैसा वापस!",
                "₹10 lakh Money Back plan! | Money back every 2 years!",
            ),
        ),
        _ => return None,
    };
    Some(PlanTranslation { name, description })
}

/// Plan name in `language`, falling back to the name the plan record carries
pub fn plan_name(plan_id: &str, fallback: &str, language: Language) -> String {
    plan_translation(plan_id)
        .map(|t| t.name.get(language).to_string())
        .unwrap_or_else(|| fallback.to_string())
}

/// Labels used by the comparison and calculator tables
pub mod labels {
    use super::TranslatedText;

    pub const PLAN_NAME: TranslatedText =
        TranslatedText::new("योजना नाव", "योजना का नाम", "Plan Name");
    pub const SAMPLE_PREMIUM: TranslatedText =
        TranslatedText::new("नमुना प्रीमियम", "नमूना प्रीमियम", "Sample Premium");
    pub const SAMPLE_MATURITY: TranslatedText =
        TranslatedText::new("नमुना परिपक्वता", "नमूना परिपक्वता", "Sample Maturity");
    pub const RISK_COVER: TranslatedText =
        TranslatedText::new("जोखीम कवर", "जोखिम कवर", "Risk Cover");
    pub const NOT_AVAILABLE: TranslatedText =
        TranslatedText::new("उपलब्ध नाही", "उपलब्ध नहीं", "N/A");
    pub const AGE: TranslatedText = TranslatedText::new("वय", "आयु", "Age");
    pub const TERM: TranslatedText = TranslatedText::new("मुदत", "अवधि", "Term");
    pub const ANNUAL: TranslatedText = TranslatedText::new("वार्षिक", "वार्षिक", "Annual");
    pub const MONTHLY: TranslatedText = TranslatedText::new("मासिक", "मासिक", "Monthly");
    pub const SUM_ASSURED: TranslatedText =
        TranslatedText::new("विमा रक्कम", "बीमा राशि", "Sum Assured");
    pub const BONUS: TranslatedText = TranslatedText::new("बोनस", "बोनस", "Bonus");
    pub const NATURAL_DEATH: TranslatedText =
        TranslatedText::new("नैसर्गिक मृत्यू", "प्राकृतिक मृत्यु", "Natural Death");
    pub const ACCIDENTAL_DEATH: TranslatedText =
        TranslatedText::new("अपघाती मृत्यू", "दुर्घटना मृत्यु", "Accidental Death");
    pub const MINIMUM_TWO_PLANS: TranslatedText = TranslatedText::new(
        "तुलना करण्यासाठी किमान 2 योजना निवडा",
        "तुलना करने के लिए कम से कम 2 योजनाएं चुनें",
        "Select at least 2 plans to compare",
    );
    pub const MONTHLY_PREMIUM: TranslatedText =
        TranslatedText::new("मासिक प्रीमियम", "मासिक प्रीमियम", "Monthly Premium");
    pub const QUARTERLY_PREMIUM: TranslatedText =
        TranslatedText::new("त्रैमासिक प्रीमियम", "त्रैमासिक प्रीमियम", "Quarterly Premium");
    pub const HALF_YEARLY_PREMIUM: TranslatedText =
        TranslatedText::new("अर्धवार्षिक प्रीमियम", "अर्धवार्षिक प्रीमियम", "Half-Yearly Premium");
    pub const ANNUAL_PREMIUM: TranslatedText =
        TranslatedText::new("वार्षिक प्रीमियम", "वार्षिक प्रीमियम", "Annual Premium");
    pub const MATURITY_BENEFITS: TranslatedText =
        TranslatedText::new("परिपक्वता लाभ", "परिपक्वता लाभ", "Maturity Benefits");
    pub const GUARANTEED_ADDITIONS: TranslatedText =
        TranslatedText::new("हमी जोड", "गारंटीड जोड़", "Guaranteed Additions");
    pub const BONUSES: TranslatedText = TranslatedText::new("बोनस", "बोनस", "Bonuses");
}

/// Format a rupee amount with Indian digit grouping (₹11,00,296)
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{}", rounded.abs() as u64);
    let sign = if rounded < 0.0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{}₹{}", sign, digits);
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{}₹{},{}", sign, groups.join(","), last_three)
}

/// Key-value persistence for user preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);

    /// Stored language, if any valid one was saved
    fn load_language(&self) -> Option<Language> {
        self.get(LANGUAGE_KEY).and_then(|code| code.parse().ok())
    }

    fn save_language(&self, language: Language) {
        self.set(LANGUAGE_KEY, language.code());
    }
}

/// Preference store kept for the life of the process
#[derive(Debug, Default)]
pub struct InMemoryPreferences {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for InMemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.write().insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_round_trip() {
        for language in Language::ALL {
            assert_eq!(language.code().parse::<Language>().unwrap(), language);
        }
        assert_eq!("Marathi".parse::<Language>().unwrap(), Language::Marathi);
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(serde_json::to_string(&Language::Hindi).unwrap(), r#""hi""#);
    }

    #[test]
    fn test_empty_translation_falls_back_to_english() {
        let text = TranslatedText::new("", "नमस्ते", "Hello");
        assert_eq!(text.get(Language::Marathi), "Hello");
        assert_eq!(text.get(Language::Hindi), "नमस्ते");
        assert_eq!(text.get(Language::English), "Hello");
    }

    #[test]
    fn test_plan_names() {
        assert_eq!(
            plan_name("jivan-shanti", "x", Language::Hindi),
            "जीवन शांति (योजना संख्या: 850)"
        );
        assert_eq!(plan_name("jivan-umang", "x", Language::English), "Jivan Umang");
        assert_eq!(plan_name("new-plan", "New Plan", Language::Marathi), "New Plan");
    }

    #[test]
    fn test_indian_digit_grouping() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(1_000.0), "₹1,000");
        assert_eq!(format_inr(100_000.0), "₹1,00,000");
        assert_eq!(format_inr(1_100_296.0), "₹11,00,296");
        assert_eq!(format_inr(52_60_000.4), "₹52,60,000");
        assert_eq!(format_inr(-650_000.0), "-₹6,50,000");
    }

    #[test]
    fn test_preference_store_persists_language() {
        let store = InMemoryPreferences::new();
        assert_eq!(store.load_language(), None);

        store.save_language(Language::Marathi);
        assert_eq!(store.load_language(), Some(Language::Marathi));
        assert_eq!(store.get(LANGUAGE_KEY).as_deref(), Some("mr"));

        store.set(LANGUAGE_KEY, "klingon");
        assert_eq!(store.load_language(), None);
    }
}
