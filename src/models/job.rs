use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Json<Vec<String>>,
    pub salary: Option<String>,
    // Stored as job_type; "type" is reserved in both SQL and Rust.
    #[serde(rename = "type")]
    pub job_type: String,
    pub posted_by: Uuid,
    pub posted_at: DateTime<Utc>,
    pub applicant_count: i32,
}
