//! Plan Advisor - financial calculators and plan matching for an insurance advisory practice
//!
//! This library provides:
//! - Eligibility, premium, maturity and ROI calculators over a plan catalog
//! - Multi-criteria plan filtering and side-by-side plan comparison
//! - Poster file matching and poster-text categorization for plan uploads
//! - Lead-capture enquiries, a storage collaborator trait and translations

pub mod error;
pub mod plan;
pub mod catalog;
pub mod calculators;
pub mod filter;
pub mod quotes;
pub mod comparison;
pub mod matching;
pub mod upload;
pub mod backend;
pub mod enquiry;
pub mod i18n;
pub mod config;

// Re-export commonly used types
pub use error::{Error, Result, ValidationErrors};
pub use plan::{Plan, PlanContent, PlanEntry, PlanMetadata, PosterImage};
pub use catalog::{Band, Catalog, FinancialGoal, PlanProfile};
pub use calculators::{
    calculate_maturity_benefit, calculate_premium, calculate_roi, is_eligible, InputLimits,
    MaturityQuery, MaturityResult, PlanCalculator, PremiumQuery, PremiumResult, RoiResult,
};
pub use filter::{filter_plans, PlanFilterCriteria};
pub use matching::{build_best_candidate_mapping, derive_plan_title};
pub use backend::{InMemoryBackend, PlanBackend};
pub use i18n::Language;
pub use config::AdvisorConfig;
