use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::application_dto::SeekerSummary;
use super::job_dto::JobResponse;
use crate::models::saved_candidate::SavedCandidate;
use crate::models::saved_job::SavedJob;
use crate::models::user::User;

#[derive(Debug, Clone, Deserialize)]
pub struct SaveCandidatePayload {
    pub candidate_id: Uuid,
    #[serde(default)]
    pub match_score: i32,
    pub notes: Option<String>,
    pub applied_for: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNotesPayload {
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCandidateResponse {
    pub id: Uuid,
    pub candidate_details: SeekerSummary,
    pub match_score: i32,
    pub notes: Option<String>,
    pub applied_for: Option<String>,
    pub saved_at: DateTime<Utc>,
}

impl SavedCandidateResponse {
    pub fn from_parts(saved: &SavedCandidate, candidate: &User) -> Self {
        Self {
            id: saved.id,
            candidate_details: SeekerSummary::from(candidate),
            match_score: saved.match_score,
            notes: saved.notes.clone(),
            applied_for: saved.applied_for.clone(),
            saved_at: saved.saved_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveJobPayload {
    pub job_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedJobResponse {
    pub id: Uuid,
    pub job_details: JobResponse,
    pub saved_at: DateTime<Utc>,
}

impl SavedJobResponse {
    pub fn from_parts(saved: &SavedJob, job_details: JobResponse) -> Self {
        Self {
            id: saved.id,
            job_details,
            saved_at: saved.saved_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsSavedResponse {
    pub is_saved: bool,
}
