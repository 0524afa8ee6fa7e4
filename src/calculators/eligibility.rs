//! Age and term eligibility against a plan's published bands

use crate::catalog::Catalog;
use crate::plan::Plan;

/// Check whether a plan accepts an applicant of `age` for a `term`-year policy
///
/// Plans without a profile, or without a band for one dimension, are
/// unconstrained in that dimension.
pub fn is_eligible(catalog: &Catalog, plan: &Plan, age: u32, term: u32) -> bool {
    is_eligible_id(catalog, &plan.id, age, term)
}

/// Eligibility check by identifier only
pub fn is_eligible_id(catalog: &Catalog, plan_id: &str, age: u32, term: u32) -> bool {
    if let Some(band) = catalog.age_band(plan_id) {
        if !band.contains(age) {
            return false;
        }
    }

    if let Some(band) = catalog.term_band(plan_id) {
        if !band.contains(term) {
            return false;
        }
    }

    true
}
