//! Poster matching: file names to plan titles, poster text to plan content

pub mod content;
pub mod filename;

pub use content::{
    categorize_lines, effective_content, is_jeevan_utsav_title, jeevan_utsav_fallback_content,
    parse_poster_text, ContentSection,
};
pub use filename::{
    build_best_candidate_mapping, derive_plan_title, group_by_plan_title, normalize_filename,
    score_candidate, CandidateMapping, FileGroup, NamedFile,
};

/// Catalog identifier for a canonical plan title
///
/// "Jeevan Utsav" becomes "jivan-utsav", matching the identifiers the
/// calculators and catalog use.
pub fn plan_id_for_title(title: &str) -> String {
    title
        .to_lowercase()
        .replace("jeevan", "jivan")
        .replace("lakshmi", "laxmi")
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_slugs_match_catalog_ids() {
        assert_eq!(plan_id_for_title("Jeevan Utsav"), "jivan-utsav");
        assert_eq!(plan_id_for_title("Bima Laxmi"), "bima-laxmi");
        assert_eq!(plan_id_for_title("Jeevan Labh"), "jivan-labh");
        assert_eq!(plan_id_for_title("New  Endowment (2024)"), "new-endowment-2024");
    }

    #[test]
    fn test_every_known_title_maps_into_catalog() {
        let catalog = crate::catalog::Catalog::default_lic();
        for file in [
            "jivan-utsav.jpg",
            "jeevan umang.jpg",
            "bima-lakshmi.jpg",
            "lic-jivan-labh.jpg",
            "jeevan_lakshya.jpg",
            "jeevan-shanti.jpg",
        ] {
            let id = plan_id_for_title(&derive_plan_title(file));
            assert!(catalog.profile(&id).is_some(), "{} -> {}", file, id);
        }
    }
}
