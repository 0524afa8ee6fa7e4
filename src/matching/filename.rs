//! Pairing uploaded poster files with plan titles
//!
//! Each file name is normalized and mapped to a canonical plan title. Files
//! sharing a title form a group, and one file per group is chosen by score:
//! branding, a title match and, above all, the absence of a numbered-copy
//! suffix.

use once_cell::sync::Lazy;
use regex::Regex;

static EXTENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.[^/.]+$").unwrap());
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_\s]+").unwrap());
static NUMERIC_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"-(\d+)\.").unwrap());

const BRANDING_TOKEN: &str = "lic";
const BRANDING_SCORE: u64 = 100;
const TITLE_MATCH_SCORE: u64 = 50;
const BASE_FILE_SCORE: u64 = 1000;

/// Known plans and the normalized spellings that identify them, checked in order
const TITLE_RULES: &[(&[&str], &str)] = &[
    (
        &["jivan utsav", "jeevan utsav", "jivan utasav", "jeevan utasav"],
        "Jeevan Utsav",
    ),
    (&["jivan umang", "jeevan umang"], "Jeevan Umang"),
    (&["bima laxmi", "bima lakshmi"], "Bima Laxmi"),
    (&["jivan labh", "jeevan labh"], "Jeevan Labh"),
    (&["jivan lakshya", "jeevan lakshya"], "Jeevan Lakshya"),
    (&["jivan shanti", "jeevan shanti"], "Jeevan Shanti"),
];

/// Anything that carries a file name
pub trait NamedFile {
    fn file_name(&self) -> &str;
}

impl NamedFile for str {
    fn file_name(&self) -> &str {
        self
    }
}

impl NamedFile for String {
    fn file_name(&self) -> &str {
        self
    }
}

impl<T: NamedFile + ?Sized> NamedFile for &T {
    fn file_name(&self) -> &str {
        (**self).file_name()
    }
}

impl NamedFile for crate::plan::PosterImage {
    fn file_name(&self) -> &str {
        &self.file_name
    }
}

fn strip_extension(file_name: &str) -> &str {
    match EXTENSION.find(file_name) {
        Some(m) => &file_name[..m.start()],
        None => file_name,
    }
}

/// Lowercase, drop the extension, turn `-`/`_` into spaces and collapse whitespace
pub fn normalize_filename(file_name: &str) -> String {
    strip_extension(&file_name.to_lowercase())
        .replace(|c: char| c == '-' || c == '_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Canonical plan title for a poster file name
///
/// Unknown names are title-cased word by word, leaving out a bare "plan" word.
pub fn derive_plan_title(file_name: &str) -> String {
    let normalized = normalize_filename(file_name);

    for (spellings, title) in TITLE_RULES {
        if spellings.iter().any(|s| normalized.contains(s)) {
            return (*title).to_string();
        }
    }

    let stem = strip_extension(file_name);
    let words: Vec<String> = SEPARATORS
        .split(stem)
        .filter(|w| !w.is_empty() && !w.eq_ignore_ascii_case("plan"))
        .map(capitalize)
        .collect();

    if words.is_empty() {
        capitalize(stem.trim())
    } else {
        words.join(" ")
    }
}

/// Letters only, with transliteration variants folded together
fn canonical_spelling(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .replace("jeevan", "jivan")
        .replace("utasav", "utsav")
        .replace("lakshmi", "laxmi")
}

/// Number in a `-<digits>.` suffix, e.g. 2 for "umang-2.jpg"
pub fn numeric_suffix(file_name: &str) -> Option<u64> {
    NUMERIC_SUFFIX
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().parse().unwrap_or(u64::MAX))
}

/// Preference score of a file for a plan title; higher is better
pub fn score_candidate(file_name: &str, plan_title: &str) -> u64 {
    let normalized = normalize_filename(file_name);
    let mut score = 0u64;

    if normalized.contains(BRANDING_TOKEN) {
        score += BRANDING_SCORE;
    }

    if canonical_spelling(&normalized).contains(&canonical_spelling(plan_title)) {
        score += TITLE_MATCH_SCORE;
    }

    match numeric_suffix(file_name) {
        Some(n) => score = score.saturating_add(n),
        None => score += BASE_FILE_SCORE,
    }

    score
}

/// Files sharing one derived plan title, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct FileGroup<'a, F> {
    pub title: String,
    pub files: Vec<&'a F>,
}

/// Group files by derived title; groups appear in order of first occurrence
pub fn group_by_plan_title<F: NamedFile>(files: &[F]) -> Vec<FileGroup<'_, F>> {
    let mut groups: Vec<FileGroup<'_, F>> = Vec::new();

    for file in files {
        let title = derive_plan_title(file.file_name());
        match groups.iter_mut().find(|g| g.title == title) {
            Some(group) => group.files.push(file),
            None => groups.push(FileGroup {
                title,
                files: vec![file],
            }),
        }
    }

    groups
}

impl<'a, F: NamedFile> FileGroup<'a, F> {
    /// Highest-scoring file; the earliest wins a tie. None for an empty group
    pub fn best(&self) -> Option<&'a F> {
        let (&first, rest) = self.files.split_first()?;

        let mut best = (first, score_candidate(first.file_name(), &self.title));
        for &file in rest {
            let score = score_candidate(file.file_name(), &self.title);
            if score > best.1 {
                best = (file, score);
            }
        }
        Some(best.0)
    }
}

/// One chosen file per plan title
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateMapping<'a, F> {
    entries: Vec<(String, &'a F)>,
}

impl<'a, F> CandidateMapping<'a, F> {
    pub fn get(&self, title: &str) -> Option<&'a F> {
        self.entries.iter().find(|(t, _)| t == title).map(|(_, f)| *f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &'a F)> + '_ {
        self.entries.iter().map(|(t, f)| (t.as_str(), *f))
    }

    pub fn titles(&self) -> Vec<&str> {
        self.entries.iter().map(|(t, _)| t.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pick the best file for every plan title found among `files`
pub fn build_best_candidate_mapping<F: NamedFile>(files: &[F]) -> CandidateMapping<'_, F> {
    let entries = group_by_plan_title(files)
        .into_iter()
        .filter_map(|group| group.best().map(|best| (group.title, best)))
        .collect();
    CandidateMapping { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_filename() {
        assert_eq!(normalize_filename("LIC-Jeevan__Umang  Plan.JPG"), "lic jeevan umang plan");
        assert_eq!(normalize_filename("archive.tar.gz"), "archive.tar");
        assert_eq!(normalize_filename("no_extension"), "no extension");
    }

    #[test]
    fn test_typo_variant_maps_to_jeevan_utsav() {
        assert_eq!(derive_plan_title("LIC_Jivan_Utasav_poster.jpg"), "Jeevan Utsav");
        assert_eq!(derive_plan_title("jeevan-utsav-7.png"), "Jeevan Utsav");
    }

    #[test]
    fn test_known_titles_and_spelling_variants() {
        assert_eq!(derive_plan_title("Jivan Umang.jpg"), "Jeevan Umang");
        assert_eq!(derive_plan_title("bima_lakshmi-2.jpg"), "Bima Laxmi");
        assert_eq!(derive_plan_title("LIC Jeevan Labh 736.jpeg"), "Jeevan Labh");
        assert_eq!(derive_plan_title("jivan-lakshya-4.jpg"), "Jeevan Lakshya");
        assert_eq!(derive_plan_title("jeevan_shanti.png"), "Jeevan Shanti");
    }

    #[test]
    fn test_unknown_titles_are_title_cased() {
        assert_eq!(derive_plan_title("new-ENDOWMENT_plan.jpg"), "New Endowment");
        assert_eq!(derive_plan_title("--dhan  rekha--.png"), "Dhan Rekha");
        assert_eq!(derive_plan_title("plan.jpg"), "Plan");
    }

    #[test]
    fn test_numeric_suffix() {
        assert_eq!(numeric_suffix("LIC-Jeevan-Umang-2.jpg"), Some(2));
        assert_eq!(numeric_suffix("jivan-labh-736-4.jpg"), Some(4));
        assert_eq!(numeric_suffix("LIC-Jeevan-Umang.jpg"), None);
        assert_eq!(numeric_suffix("umang2.jpg"), None);
    }

    #[test]
    fn test_base_file_preferred_over_numbered_copy() {
        let files = ["LIC-Jeevan-Umang.jpg", "LIC-Jeevan-Umang-2.jpg"];
        let mapping = build_best_candidate_mapping(&files);

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get("Jeevan Umang"), Some(&"LIC-Jeevan-Umang.jpg"));

        let reversed = ["LIC-Jeevan-Umang-2.jpg", "LIC-Jeevan-Umang.jpg"];
        let mapping = build_best_candidate_mapping(&reversed);
        assert_eq!(mapping.get("Jeevan Umang"), Some(&"LIC-Jeevan-Umang.jpg"));
    }

    #[test]
    fn test_scoring_components() {
        assert_eq!(score_candidate("LIC-Jivan-Utasav.jpg", "Jeevan Utsav"), 1150);
        assert_eq!(score_candidate("jivan-utsav-8.jpg", "Jeevan Utsav"), 58);
        assert_eq!(score_candidate("utsav-poster.jpg", "Jeevan Utsav"), 1000);
    }

    #[test]
    fn test_higher_suffix_wins_among_numbered_copies() {
        let files = vec!["jivan-lakshya-1.jpg".to_string(), "jivan-lakshya-4.jpg".to_string()];
        let mapping = build_best_candidate_mapping(&files);
        assert_eq!(mapping.get("Jeevan Lakshya").map(String::as_str), Some("jivan-lakshya-4.jpg"));
    }

    #[test]
    fn test_ties_keep_list_order() {
        let files = ["Jeevan_Umang.jpg", "jivan umang.png"];
        let mapping = build_best_candidate_mapping(&files);
        assert_eq!(mapping.get("Jeevan Umang"), Some(&"Jeevan_Umang.jpg"));
    }

    #[test]
    fn test_empty_group_has_no_best_file() {
        let group: FileGroup<'_, &str> = FileGroup {
            title: "Jeevan Umang".to_string(),
            files: Vec::new(),
        };
        assert_eq!(group.best(), None);

        let files = ["jivan-umang.jpg"];
        let groups = group_by_plan_title(&files);
        assert_eq!(groups[0].best(), Some(&"jivan-umang.jpg"));
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let files = [
            "bima-laxmi-2.jpg",
            "LIC-Jeevan-Umang.jpg",
            "bima-lakshmi.jpg",
            "random.png",
        ];
        let groups = group_by_plan_title(&files);
        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Bima Laxmi", "Jeevan Umang", "Random"]);
        assert_eq!(groups[0].files.len(), 2);

        let mapping = build_best_candidate_mapping(&files);
        assert_eq!(mapping.titles(), titles);
        assert_eq!(mapping.get("Bima Laxmi"), Some(&"bima-lakshmi.jpg"));
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let files = [
            "LIC-Jeevan-Umang-3.jpg",
            "jivan-utsav-8.jpg",
            "lic-jivan-utsav-7.jpg",
            "jivan-utsav-plan-6.jpg",
            "LIC-Jeevan-Umang-2.jpg",
        ];
        let first: Vec<(String, String)> = build_best_candidate_mapping(&files)
            .iter()
            .map(|(t, f)| (t.to_string(), f.to_string()))
            .collect();
        let second: Vec<(String, String)> = build_best_candidate_mapping(&files)
            .iter()
            .map(|(t, f)| (t.to_string(), f.to_string()))
            .collect();

        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                ("Jeevan Umang".to_string(), "LIC-Jeevan-Umang-3.jpg".to_string()),
                ("Jeevan Utsav".to_string(), "lic-jivan-utsav-7.jpg".to_string()),
            ]
        );
    }
}
