//! Runtime configuration: reference data location, display language and input limits

use crate::calculators::InputLimits;
use crate::catalog::{Catalog, DEFAULT_CATALOG_PATH};
use crate::error::Result;
use crate::i18n::Language;
use crate::plan::{load_plans_from, Plan};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};

pub const CATALOG_DIR_ENV: &str = "PLAN_ADVISOR_CATALOG_DIR";
pub const LANGUAGE_ENV: &str = "PLAN_ADVISOR_LANGUAGE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorConfig {
    /// Directory holding plan_profiles.csv and the published plan tables
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,

    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub limits: InputLimits,
}

fn default_catalog_dir() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_PATH)
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            catalog_dir: default_catalog_dir(),
            language: Language::default(),
            limits: InputLimits::default(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let config = serde_json::from_reader(File::open(path)?)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Override fields from `PLAN_ADVISOR_*` environment variables
    pub fn apply_env(self) -> Self {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars<F: Fn(&str) -> Option<String>>(mut self, var: F) -> Self {
        if let Some(dir) = var(CATALOG_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            self.catalog_dir = PathBuf::from(dir);
        }
        if let Some(code) = var(LANGUAGE_ENV) {
            match code.parse() {
                Ok(language) => self.language = language,
                Err(e) => warn!("Ignoring {}: {}", LANGUAGE_ENV, e),
            }
        }
        self
    }

    /// File configuration if given, else defaults; environment applied last
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_json_path(path)?,
            None => Self::default(),
        };
        Ok(config.apply_env())
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        Catalog::from_csv_path(&self.catalog_dir)
    }

    pub fn load_plans(&self) -> Result<Vec<Plan>> {
        load_plans_from(&self.catalog_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AdvisorConfig =
            serde_json::from_str(r#"{"language": "mr", "limits": {"maxAge": 60}}"#).unwrap();
        assert_eq!(config.catalog_dir, PathBuf::from("data/catalog"));
        assert_eq!(config.language, Language::Marathi);
        assert_eq!(config.limits.max_age, 60);
        assert_eq!(config.limits.min_premium, 10_000.0);
    }

    #[test]
    fn test_environment_overrides() {
        let vars: HashMap<&str, &str> = [(CATALOG_DIR_ENV, "/srv/catalog"), (LANGUAGE_ENV, "hi")]
            .into_iter()
            .collect();
        let config = AdvisorConfig::default().apply_vars(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.catalog_dir, PathBuf::from("/srv/catalog"));
        assert_eq!(config.language, Language::Hindi);
    }

    #[test]
    fn test_bad_language_is_ignored() {
        let config =
            AdvisorConfig::default().apply_vars(|k| (k == LANGUAGE_ENV).then(|| "xx".to_string()));
        assert_eq!(config.language, Language::English);
    }

    #[test]
    fn test_default_config_loads_checked_in_catalog() {
        let config = AdvisorConfig::default();
        assert_eq!(config.load_catalog().unwrap().profiles().len(), 6);
        assert_eq!(config.load_plans().unwrap().len(), 6);
    }
}
