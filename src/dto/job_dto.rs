use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::job::Job;
use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub company: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub salary: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub company: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub salary: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
}

/// Independent, AND-combined listing filters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilters {
    #[serde(rename = "type")]
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ByEmployerQuery {
    pub employer_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostedByDetails {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: Option<String>,
    #[serde(rename = "type")]
    pub job_type: String,
    pub posted_by: Uuid,
    pub posted_by_details: Option<PostedByDetails>,
    pub posted_at: DateTime<Utc>,
    pub applicant_count: i32,
}

impl JobResponse {
    pub fn from_job(job: &Job, poster: Option<&User>) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
            requirements: job.requirements.0.clone(),
            salary: job.salary.clone(),
            job_type: job.job_type.clone(),
            posted_by: job.posted_by,
            posted_by_details: poster.map(|u| PostedByDetails {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
                company: u.company.clone(),
            }),
            posted_at: job.posted_at,
            applicant_count: job.applicant_count,
        }
    }
}
