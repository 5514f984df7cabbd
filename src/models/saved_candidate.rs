use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An employer's shortlist entry for a seeker.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedCandidate {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub candidate_id: Uuid,
    pub match_score: i32,
    pub notes: Option<String>,
    pub applied_for: Option<String>,
    pub saved_at: DateTime<Utc>,
}
