use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user_dto::absolute_media_url;
use crate::models::application::Application;
use crate::models::job::Job;
use crate::models::user::User;

#[derive(Debug, Clone, Deserialize)]
pub struct ApplyPayload {
    pub job_id: Uuid,
    pub cover_letter: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub salary: Option<String>,
    #[serde(rename = "type")]
    pub job_type: String,
    pub posted_at: DateTime<Utc>,
    pub applicant_count: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeekerSummary {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub name: String,
    pub role: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
}

impl From<&User> for SeekerSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            avatar: absolute_media_url(user.avatar.as_deref()),
            bio: user.bio.clone(),
            location: user.location.clone(),
            phone: user.phone.clone(),
            skills: user.skills.0.clone(),
            experience: user.experience.clone(),
            education: user.education.clone(),
            linkedin: user.linkedin.clone(),
            github: user.github.clone(),
            portfolio: user.portfolio.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_details: JobSummary,
    pub seeker_id: Uuid,
    pub seeker_name: String,
    pub seeker_email: String,
    pub seeker_details: SeekerSummary,
    pub cover_letter: Option<String>,
    pub status: String,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationResponse {
    pub fn from_parts(application: &Application, job: &Job, seeker: &User) -> Self {
        Self {
            id: application.id,
            job_id: job.id,
            job_details: JobSummary {
                id: job.id,
                title: job.title.clone(),
                company: job.company.clone(),
                location: job.location.clone(),
                description: job.description.clone(),
                requirements: job.requirements.0.clone(),
                salary: job.salary.clone(),
                job_type: job.job_type.clone(),
                posted_at: job.posted_at,
                applicant_count: job.applicant_count,
            },
            seeker_id: seeker.id,
            seeker_name: seeker.name.clone(),
            seeker_email: seeker.email.clone(),
            seeker_details: SeekerSummary::from(seeker),
            cover_letter: application.cover_letter.clone(),
            status: application.status.clone(),
            applied_at: application.applied_at,
            updated_at: application.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HasAppliedResponse {
    pub has_applied: bool,
}
