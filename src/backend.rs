//! Plan and enquiry storage collaborator
//!
//! The calculators only read plans; uploads and enquiries are written back
//! through the same trait. `InMemoryBackend` serves the CLI, the HTTP
//! handler and tests.

use crate::enquiry::{Enquiry, EnquiryForm};
use crate::error::ValidationErrors;
use crate::matching::effective_content;
use crate::plan::{
    poster_path, Plan, PlanContent, PlanEntry, PlanMetadata, PosterImage, PosterPaths,
};
use chrono::Utc;
use log::info;
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("Caller is not authorized for this operation")]
    NotAuthorized,

    #[error("Plan not found: {0}")]
    PlanNotFound(String),

    #[error("Invalid enquiry: {0}")]
    InvalidEnquiry(ValidationErrors),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Operations the storage service exposes
pub trait PlanBackend {
    /// Full plan catalog, in catalog order
    fn get_all_plans(&self) -> BackendResult<Vec<Plan>>;

    fn get_plan_by_id(&self, id: &str) -> BackendResult<Option<Plan>>;

    /// Uploaded poster entry for a plan
    fn get_plan_entry(&self, id: &str) -> BackendResult<Option<PlanEntry>>;

    fn get_plan_entries(&self, limit: usize) -> BackendResult<Vec<PlanEntry>>;

    /// Store or replace a plan's poster entry; admin only
    fn create_or_update_plan(
        &self,
        id: &str,
        metadata: PlanMetadata,
        poster: PosterImage,
        content: PlanContent,
    ) -> BackendResult<()>;

    fn submit_enquiry(&self, form: EnquiryForm) -> BackendResult<()>;

    /// Most recent enquiries first; admin only
    fn get_enquiries(&self, limit: usize) -> BackendResult<Vec<Enquiry>>;

    fn is_caller_admin(&self) -> BackendResult<bool>;
}

/// Everything a plan's detail page shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetail {
    pub plan: Plan,
    pub content: PlanContent,
    pub posters: PosterPaths,
    /// File name of the admin-uploaded poster, shown ahead of the bundled ones
    pub uploaded_poster: Option<String>,
}

/// Plan record joined with its uploaded entry and bundled posters
pub fn plan_detail<B: PlanBackend + ?Sized>(
    backend: &B,
    id: &str,
) -> BackendResult<Option<PlanDetail>> {
    let Some(plan) = backend.get_plan_by_id(id)? else {
        return Ok(None);
    };
    let entry = backend.get_plan_entry(id)?;

    let stored = match &entry {
        Some(entry) => entry.content.clone(),
        None => PlanContent {
            title: plan.name.clone(),
            ..Default::default()
        },
    };

    Ok(Some(PlanDetail {
        content: effective_content(&plan.name, &stored),
        posters: poster_path(&plan.id),
        uploaded_poster: entry.map(|e| e.poster.file_name),
        plan,
    }))
}

#[derive(Debug, Default)]
struct Store {
    plans: Vec<Plan>,
    entries: Vec<PlanEntry>,
    enquiries: Vec<Enquiry>,
}

/// Process-local backend
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    store: RwLock<Store>,
    caller_is_admin: RwLock<bool>,
}

impl InMemoryBackend {
    pub fn new(plans: Vec<Plan>) -> Self {
        Self {
            store: RwLock::new(Store {
                plans,
                ..Default::default()
            }),
            caller_is_admin: RwLock::new(false),
        }
    }

    /// Backend whose caller holds the admin role
    pub fn with_admin(self) -> Self {
        *self.caller_is_admin.write() = true;
        self
    }

    pub fn set_caller_admin(&self, is_admin: bool) {
        *self.caller_is_admin.write() = is_admin;
    }

    fn require_admin(&self) -> BackendResult<()> {
        if *self.caller_is_admin.read() {
            Ok(())
        } else {
            Err(BackendError::NotAuthorized)
        }
    }
}

impl PlanBackend for InMemoryBackend {
    fn get_all_plans(&self) -> BackendResult<Vec<Plan>> {
        Ok(self.store.read().plans.clone())
    }

    fn get_plan_by_id(&self, id: &str) -> BackendResult<Option<Plan>> {
        Ok(self.store.read().plans.iter().find(|p| p.id == id).cloned())
    }

    fn get_plan_entry(&self, id: &str) -> BackendResult<Option<PlanEntry>> {
        Ok(self.store.read().entries.iter().find(|e| e.id == id).cloned())
    }

    fn get_plan_entries(&self, limit: usize) -> BackendResult<Vec<PlanEntry>> {
        Ok(self.store.read().entries.iter().take(limit).cloned().collect())
    }

    fn create_or_update_plan(
        &self,
        id: &str,
        metadata: PlanMetadata,
        poster: PosterImage,
        content: PlanContent,
    ) -> BackendResult<()> {
        self.require_admin()?;

        let mut store = self.store.write();
        match store.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                // Keep the original creation time across updates
                let created_at = entry.metadata.created_at;
                entry.metadata = PlanMetadata {
                    created_at,
                    ..metadata
                };
                entry.poster = poster;
                entry.content = content;
                info!("Updated plan entry {}", id);
            }
            None => {
                store.entries.push(PlanEntry {
                    id: id.to_string(),
                    content,
                    metadata,
                    poster,
                });
                info!("Created plan entry {}", id);
            }
        }
        Ok(())
    }

    fn submit_enquiry(&self, form: EnquiryForm) -> BackendResult<()> {
        let enquiry = form
            .into_enquiry(Utc::now())
            .map_err(BackendError::InvalidEnquiry)?;
        info!("Enquiry received from {}", enquiry.name);
        self.store.write().enquiries.push(enquiry);
        Ok(())
    }

    fn get_enquiries(&self, limit: usize) -> BackendResult<Vec<Enquiry>> {
        self.require_admin()?;
        Ok(self
            .store
            .read()
            .enquiries
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }

    fn is_caller_admin(&self) -> BackendResult<bool> {
        Ok(*self.caller_is_admin.read())
    }
}
