//! Keyword categorizer turning poster text into plan content sections

use crate::plan::PlanContent;

/// Sections a poster line can be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSection {
    Overview,
    Benefits,
    RiskCover,
    PaymentOptions,
    Returns,
}

/// Lower-case keywords per section, checked in this order
const SECTION_KEYWORDS: &[(ContentSection, &[&str])] = &[
    (
        ContentSection::Overview,
        &[
            "plan",
            "guaranteed",
            "annual income",
            "payment period",
            "investment",
            "premium",
            "limited premium",
            "year",
            "service",
        ],
    ),
    (
        ContentSection::Benefits,
        &[
            "benefit",
            "maturity",
            "family fund",
            "income benefit",
            "total income",
            "pension",
            "survival",
            "education",
            "marriage",
        ],
    ),
    (
        ContentSection::RiskCover,
        &[
            "risk cover",
            "natural risk",
            "accidental risk",
            "insurance",
            "protection",
            "coverage",
            "death benefit",
            "life insurance",
        ],
    ),
    (
        ContentSection::PaymentOptions,
        &[
            "yearly investment",
            "total investment",
            "payment",
            "deposit",
            "premium",
            "pay",
            "monthly premium",
            "options",
            "flexible",
        ],
    ),
    (
        ContentSection::Returns,
        &[
            "bonus",
            "lifetime",
            "pension",
            "returns",
            "profit",
            "lakh",
            "sum assured",
            "guaranteed sum",
            "tax benefit",
        ],
    ),
];

/// Unmatched lines at most this long are dropped as noise
const MIN_UNMATCHED_LEN: usize = 10;

/// Section for a single line, if any keyword matches
pub fn classify_line(line: &str) -> Option<ContentSection> {
    let lower = line.to_lowercase();
    SECTION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(section, _)| *section)
}

/// File each non-blank line under its first matching section
///
/// Unmatched lines longer than ten characters count as overview. Sections
/// with no lines stay `None`.
pub fn categorize_lines<'l, I>(title: &str, lines: I) -> PlanContent
where
    I: IntoIterator<Item = &'l str>,
{
    let mut buckets: [Vec<&str>; 5] = Default::default();

    for line in lines.into_iter().map(str::trim).filter(|l| !l.is_empty()) {
        let section = match classify_line(line) {
            Some(section) => section,
            None if line.chars().count() > MIN_UNMATCHED_LEN => ContentSection::Overview,
            None => continue,
        };
        buckets[section as usize].push(line);
    }

    let join = |lines: &Vec<&str>| {
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    };

    PlanContent {
        title: title.to_string(),
        overview: join(&buckets[ContentSection::Overview as usize]),
        benefits: join(&buckets[ContentSection::Benefits as usize]),
        risk_cover: join(&buckets[ContentSection::RiskCover as usize]),
        payment_options: join(&buckets[ContentSection::PaymentOptions as usize]),
        returns: join(&buckets[ContentSection::Returns as usize]),
    }
}

/// Categorize raw extracted text and fill empty sections with standard wording
pub fn parse_poster_text(raw_text: &str, title: &str) -> PlanContent {
    categorize_lines(title, raw_text.lines()).with_fallbacks()
}

impl PlanContent {
    /// Fill every empty section with the standard description for this title
    pub fn with_fallbacks(mut self) -> Self {
        let title = self.title.clone();
        self.overview.get_or_insert_with(|| {
            format!(
                "{} is a comprehensive LIC insurance plan offering guaranteed benefits and financial security for your family's future. This plan combines life insurance protection with attractive returns, making it an ideal choice for long-term financial planning.",
                title
            )
        });
        self.benefits.get_or_insert_with(|| {
            "This plan provides financial security, guaranteed returns, and comprehensive benefits for your family. It is designed to help you achieve your long-term financial goals such as children's education, marriage expenses, retirement planning, and wealth creation. The plan ensures regular income and lump sum benefits at maturity.".to_string()
        });
        self.risk_cover.get_or_insert_with(|| {
            "Comprehensive risk coverage including life insurance protection throughout the policy term. The plan safeguards your family against unforeseen circumstances by providing death benefits and ensuring financial stability. In case of unfortunate events, your family receives the sum assured along with accrued bonuses.".to_string()
        });
        self.payment_options.get_or_insert_with(|| {
            "Flexible payment terms with various investment options to suit your financial planning needs. Multiple premium payment frequencies are available including monthly, quarterly, half-yearly, and yearly modes. The plan offers limited premium payment terms, allowing you to pay for a shorter duration while enjoying benefits for a longer period.".to_string()
        });
        self.returns.get_or_insert_with(|| {
            "Guaranteed returns with attractive bonus benefits throughout the policy term. The plan provides regular income during the policy period and a substantial lump sum maturity benefit to secure your family's financial future. Tax benefits are available under Section 80C and Section 10(10D) of the Income Tax Act, making it a tax-efficient investment option.".to_string()
        });
        self
    }

    pub fn has_overview(&self) -> bool {
        self.overview.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

pub const JEEVAN_UTSAV_TITLE: &str = "Jivan Utsav";
pub const JEEVAN_UTSAV_DESCRIPTION: &str = "LIC Jivan Utsav - 10-Year Limited Premium Payment Plan with Guaranteed Annual Income starting from year 13. Offers 100% guaranteed returns with comprehensive life insurance coverage.";

/// Whether a title names Jeevan Utsav in any of its spellings
pub fn is_jeevan_utsav_title(title: &str) -> bool {
    let letters: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase())
        .collect();
    ["jivanutsav", "jeevanutsav", "jivanutasav", "jeevanutasav"]
        .iter()
        .any(|v| letters.contains(v))
}

/// Curated content shown for Jeevan Utsav when its entry has none
pub fn jeevan_utsav_fallback_content() -> PlanContent {
    PlanContent {
        title: JEEVAN_UTSAV_TITLE.to_string(),
        overview: Some("LIC's Jivan Utsav (Plan No. 771) is a 10-Year Limited Premium Payment Plan offering guaranteed annual income starting from year 13. This comprehensive plan combines life insurance protection with attractive guaranteed returns, making it an ideal choice for long-term financial planning and family security.".to_string()),
        benefits: Some([
            "Guaranteed Annual Income: ₹50,000 to ₹2,00,000 starting from year 13",
            "Guaranteed Sum Assured: ₹5 lakh to ₹20 lakh",
            "100% Guaranteed Returns with no market risk",
            "Financial security for your family's future",
            "Regular income stream after premium payment period",
        ].join("\n")),
        risk_cover: Some([
            "Comprehensive life insurance coverage throughout the policy term",
            "Death benefit includes sum assured plus accrued bonuses",
            "Natural and accidental risk coverage included",
            "Financial protection for your family against unforeseen circumstances",
            "Ensures family's financial stability in case of unfortunate events",
        ].join("\n")),
        payment_options: Some([
            "Premium Information:",
            "Monthly Premium Options: ₹5,000 to ₹20,400",
            "Limited premium payment for only 10 years",
            "Flexible payment frequencies: Monthly, Quarterly, Half-yearly, Yearly",
            "Multiple sum assured options to suit your financial needs",
            "Easy premium payment through various modes including online, auto-debit, and offline channels",
        ].join("\n")),
        returns: Some([
            "Guaranteed annual income starting from year 13 until maturity",
            "Lump sum maturity benefit at the end of policy term",
            "Tax benefits under Section 80C and Section 10(10D) of Income Tax Act",
            "24/7 customer service and support available",
            "Loan facility available after policy acquires surrender value",
            "Transparent terms with no hidden charges",
        ].join("\n")),
    }
}

/// Content to display for an entry titled `title`
///
/// A Jeevan Utsav entry without an overview shows the curated content instead.
pub fn effective_content(title: &str, content: &PlanContent) -> PlanContent {
    if is_jeevan_utsav_title(title) && !content.has_overview() {
        jeevan_utsav_fallback_content()
    } else {
        content.clone()
    }
}
