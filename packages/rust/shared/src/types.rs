//! Core domain types for jobsnap extraction results.

use serde::{Deserialize, Serialize};

/// Seed value for an unknown company. Never leaves the orchestrator.
pub const COMPANY_PLACEHOLDER: &str = "Company";

/// Seed value for an unknown job title. Never leaves the orchestrator.
pub const JOB_TITLE_PLACEHOLDER: &str = "Job Title";

/// Maximum number of requirement lines kept on a record.
pub const MAX_REQUIREMENTS: usize = 5;

// ---------------------------------------------------------------------------
// RawCandidate
// ---------------------------------------------------------------------------

/// What a site adapter pulled out of a page, before validation.
///
/// Same shape as [`JobPostingRecord`] but every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCandidate {
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
    pub location: String,
    pub salary: String,
    pub requirements: Vec<String>,
}

// ---------------------------------------------------------------------------
// JobPostingRecord
// ---------------------------------------------------------------------------

/// The normalized job posting returned to callers.
///
/// `company_name`, `job_title` and `job_description` are always non-empty and
/// never equal to the placeholder seeds; `requirements` holds at most
/// [`MAX_REQUIREMENTS`] entries in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostingRecord {
    pub company_name: String,
    pub job_title: String,
    pub job_description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}
