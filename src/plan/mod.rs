//! Plan records, narrative content and catalog loading

mod data;
pub mod loader;

pub use data::{
    poster_path, MaturityBenefit, Plan, PlanContent, PlanEntry, PlanMetadata, PosterImage,
    PosterPaths, PremiumRate, RiskCover,
};
pub use loader::{load_default_plans, load_plans_from, load_plans_from_reader};
