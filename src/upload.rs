//! Admin poster upload queue
//!
//! Files are queued with the plan title derived from their names. Uploading
//! picks one file per title, extracts its text, categorizes it into plan
//! content and stores the entry, one plan at a time.

use crate::backend::{BackendError, PlanBackend};
use crate::matching::content::JEEVAN_UTSAV_DESCRIPTION;
use crate::matching::{
    build_best_candidate_mapping, derive_plan_title, is_jeevan_utsav_title, parse_poster_text,
    plan_id_for_title, NamedFile,
};
use crate::plan::{PlanContent, PlanMetadata, PosterImage};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    #[error("Only administrators can upload plans")]
    NotAdmin,

    #[error("No files selected for upload")]
    NothingSelected,

    #[error("Could not read text from {file}: {reason}")]
    Extraction { file: String, reason: String },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Source of the text printed on a poster
pub trait PosterTextExtractor {
    fn extract_text(&self, poster: &PosterImage) -> Result<String, UploadError>;
}

/// Extractor returning the known wording of each plan's poster
///
/// Stands in for text recognition; the text depends only on the file name.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedPosterText;

impl PosterTextExtractor for CannedPosterText {
    fn extract_text(&self, poster: &PosterImage) -> Result<String, UploadError> {
        let text = match derive_plan_title(&poster.file_name).as_str() {
            "Jeevan Utsav" => "LIC's Jeevan Utsav (Plan No. 771)
10-Year Limited Premium Payment Plan
Guaranteed Annual Income Starting Year 13
Monthly Premium Options: ₹5,000 to ₹20,400
Guaranteed Annual Income: ₹50,000 to ₹2,00,000
Guaranteed Sum Assured: 5 lakh to 20 lakh
100% Guaranteed Returns
24/7 Service Available",
            "Jeevan Umang" => "LIC's Jeevan Umang
Guaranteed Bonus with Lifelong Benefits
Pay premiums for only 15 years
Lifetime pension of ₹50,000
Maturity benefit of ₹52 lakh + ₹60,000
Natural risk cover up to ₹5.5 lakh
Accidental risk cover up to ₹11 lakh",
            "Bima Laxmi" => "LIC's Bima Laxmi
Child Education and Marriage Plan
Guaranteed Maturity Benefits
Regular Survival Benefits
Risk Coverage for Parents
Tax Benefits under Section 80C",
            "Jeevan Labh" => "LIC's Jeevan Labh
Limited Premium Payment Term
Guaranteed Additions
Death Benefit Coverage
Maturity Benefit with Bonuses
Flexible Premium Payment Options",
            "Jeevan Lakshya" => "LIC's Jeevan Lakshya
Goal-Based Savings Plan
Limited Premium Payment
Guaranteed Maturity Benefits
Life Insurance Coverage
Tax Benefits Available",
            _ => "LIC Insurance Plan
Comprehensive coverage and guaranteed benefits
Flexible payment terms
Risk coverage included
Maturity benefits available
Tax benefits under Section 80C",
        };
        Ok(text.to_string())
    }
}

/// A chosen file waiting to be uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    pub poster: PosterImage,
    pub derived_title: String,
    pub selected: bool,
}

impl NamedFile for PendingUpload {
    fn file_name(&self) -> &str {
        &self.poster.file_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedPlan {
    pub plan_id: String,
    pub title: String,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedUpload {
    pub title: String,
    pub file_name: String,
    pub reason: String,
}

/// Outcome of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReport {
    pub uploaded: Vec<UploadedPlan>,
    pub failed: Vec<FailedUpload>,
}

impl UploadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Files chosen in one admin session
#[derive(Debug, Clone, Default)]
pub struct UploadQueue {
    uploader: String,
    pending: Vec<PendingUpload>,
}

impl UploadQueue {
    pub fn new(uploader: impl Into<String>) -> Self {
        Self {
            uploader: uploader.into(),
            pending: Vec::new(),
        }
    }

    /// Queue files, selected, with their derived plan titles
    pub fn add_files<I: IntoIterator<Item = PosterImage>>(&mut self, posters: I) {
        for poster in posters {
            let derived_title = derive_plan_title(&poster.file_name);
            self.pending.push(PendingUpload {
                poster,
                derived_title,
                selected: true,
            });
        }
    }

    pub fn set_selected(&mut self, index: usize, selected: bool) {
        if let Some(upload) = self.pending.get_mut(index) {
            upload.selected = selected;
        }
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn pending(&self) -> &[PendingUpload] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Best selected file for each plan title, in order of first appearance
    pub fn best_candidates(&self) -> Vec<(String, &PendingUpload)> {
        let selected: Vec<&PendingUpload> = self.pending.iter().filter(|p| p.selected).collect();
        build_best_candidate_mapping(&selected)
            .iter()
            .map(|(title, upload)| (title.to_string(), *upload))
            .collect()
    }

    /// Upload one entry per plan title, sequentially
    ///
    /// Files of plans stored successfully leave the queue; files of failed
    /// plans stay for a retry.
    pub fn upload_all<B, E>(
        &mut self,
        backend: &B,
        extractor: &E,
        now: DateTime<Utc>,
    ) -> Result<UploadReport, UploadError>
    where
        B: PlanBackend + ?Sized,
        E: PosterTextExtractor + ?Sized,
    {
        if !backend.is_caller_admin()? {
            return Err(UploadError::NotAdmin);
        }

        let candidates: Vec<(String, PosterImage)> = self
            .best_candidates()
            .into_iter()
            .map(|(title, upload)| (title, upload.poster.clone()))
            .collect();
        if candidates.is_empty() {
            return Err(UploadError::NothingSelected);
        }

        let total = candidates.len();
        let mut report = UploadReport::default();
        let mut done: HashSet<String> = HashSet::new();

        for (i, (title, poster)) in candidates.into_iter().enumerate() {
            info!("Uploading {}/{}: {}", i + 1, total, title);
            let file_name = poster.file_name.clone();

            match self.upload_one(backend, extractor, &title, poster, now) {
                Ok(plan_id) => {
                    report.uploaded.push(UploadedPlan {
                        plan_id,
                        title: title.clone(),
                        file_name,
                    });
                    done.insert(title);
                }
                Err(e) => {
                    warn!("Upload of {} ({}) failed: {}", title, file_name, e);
                    report.failed.push(FailedUpload {
                        title,
                        file_name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.pending
            .retain(|p| !(p.selected && done.contains(&p.derived_title)));
        Ok(report)
    }

    fn upload_one<B, E>(
        &self,
        backend: &B,
        extractor: &E,
        title: &str,
        poster: PosterImage,
        now: DateTime<Utc>,
    ) -> Result<String, UploadError>
    where
        B: PlanBackend + ?Sized,
        E: PosterTextExtractor + ?Sized,
    {
        let text = extractor.extract_text(&poster)?;
        let content = parse_poster_text(&text, title);
        let plan_id = plan_id_for_title(title);

        let metadata = PlanMetadata {
            title: title.to_string(),
            description: describe(title, &content),
            creator: self.uploader.clone(),
            created_at: now,
            updated_at: now,
        };

        backend.create_or_update_plan(&plan_id, metadata, poster, content)?;
        Ok(plan_id)
    }
}

fn describe(title: &str, content: &PlanContent) -> String {
    if is_jeevan_utsav_title(title) {
        return JEEVAN_UTSAV_DESCRIPTION.to_string();
    }
    content
        .overview
        .as_deref()
        .and_then(|o| o.lines().next())
        .unwrap_or(title)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InMemoryBackend;
    use chrono::TimeZone;

    struct FailingFor(&'static str);

    impl PosterTextExtractor for FailingFor {
        fn extract_text(&self, poster: &PosterImage) -> Result<String, UploadError> {
            if poster.file_name.contains(self.0) {
                Err(UploadError::Extraction {
                    file: poster.file_name.clone(),
                    reason: "unreadable".to_string(),
                })
            } else {
                CannedPosterText.extract_text(poster)
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    fn queue(names: &[&str]) -> UploadQueue {
        let mut queue = UploadQueue::new("admin");
        queue.add_files(names.iter().map(|n| PosterImage::new(*n, vec![0xFF, 0xD8])));
        queue
    }

    #[test]
    fn test_add_files_derives_titles() {
        let q = queue(&["LIC_Jivan_Utasav_poster.jpg", "bima-laxmi-2.jpg"]);
        let titles: Vec<&str> = q.pending().iter().map(|p| p.derived_title.as_str()).collect();
        assert_eq!(titles, vec!["Jeevan Utsav", "Bima Laxmi"]);
        assert!(q.pending().iter().all(|p| p.selected));
    }

    #[test]
    fn test_best_candidates_ignore_unselected_files() {
        let mut q = queue(&["LIC-Jeevan-Umang.jpg", "LIC-Jeevan-Umang-2.jpg"]);
        q.set_selected(0, false);
        let best = q.best_candidates();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].1.poster.file_name, "LIC-Jeevan-Umang-2.jpg");
    }

    #[test]
    fn test_non_admin_cannot_upload() {
        let backend = InMemoryBackend::new(Vec::new());
        let mut q = queue(&["jivan-umang.jpg"]);
        assert_eq!(q.upload_all(&backend, &CannedPosterText, now()), Err(UploadError::NotAdmin));
        assert_eq!(q.pending().len(), 1);
    }

    #[test]
    fn test_nothing_selected() {
        let backend = InMemoryBackend::new(Vec::new()).with_admin();
        let mut q = queue(&["jivan-umang.jpg"]);
        q.set_selected(0, false);
        assert_eq!(
            q.upload_all(&backend, &CannedPosterText, now()),
            Err(UploadError::NothingSelected)
        );
    }

    #[test]
    fn test_upload_all_stores_one_entry_per_plan() {
        let backend = InMemoryBackend::new(Vec::new()).with_admin();
        let mut q = queue(&[
            "LIC-Jeevan-Umang.jpg",
            "LIC-Jeevan-Umang-2.jpg",
            "LIC_Jivan_Utasav_poster.jpg",
        ]);

        let report = q.upload_all(&backend, &CannedPosterText, now()).unwrap();
        assert!(report.is_complete());
        let ids: Vec<&str> = report.uploaded.iter().map(|u| u.plan_id.as_str()).collect();
        assert_eq!(ids, vec!["jivan-umang", "jivan-utsav"]);
        assert!(q.is_empty());

        let umang = backend.get_plan_entry("jivan-umang").unwrap().unwrap();
        assert_eq!(umang.poster.file_name, "LIC-Jeevan-Umang.jpg");
        assert_eq!(umang.metadata.creator, "admin");
        assert_eq!(umang.metadata.created_at, now());
        assert!(umang.content.risk_cover.unwrap().contains("Accidental risk cover"));

        let utsav = backend.get_plan_entry("jivan-utsav").unwrap().unwrap();
        assert_eq!(utsav.metadata.description, JEEVAN_UTSAV_DESCRIPTION);
        assert_eq!(utsav.content.title, "Jeevan Utsav");
    }

    #[test]
    fn test_failed_plans_stay_queued() {
        let backend = InMemoryBackend::new(Vec::new()).with_admin();
        let mut q = queue(&["jivan-labh.jpg", "bima-laxmi.jpg"]);

        let report = q.upload_all(&backend, &FailingFor("bima"), now()).unwrap();
        assert_eq!(report.uploaded.len(), 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].title, "Bima Laxmi");
        assert!(report.failed[0].reason.contains("unreadable"));

        let left: Vec<&str> = q.pending().iter().map(|p| p.poster.file_name.as_str()).collect();
        assert_eq!(left, vec!["bima-laxmi.jpg"]);
        assert!(backend.get_plan_entry("bima-laxmi").unwrap().is_none());
    }
}
