use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application_dto::ApplyPayload;
use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::models::job::Job;
use crate::models::user::User;
use crate::utils::validation;

/// Fully-loaded aggregate for serialization: the application plus its job
/// and seeker rows.
pub type ApplicationDetail = (Application, Job, User);

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn apply(&self, caller: &User, payload: ApplyPayload) -> Result<ApplicationDetail> {
        if !caller.is_seeker() {
            return Err(Error::Forbidden(
                "Only seekers can apply to jobs".to_string(),
            ));
        }
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(payload.job_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        // The insert and the counter bump are one transaction; the unique
        // (job_id, seeker_id) index is the authoritative duplicate guard.
        let mut tx = self.pool.begin().await?;
        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (job_id, seeker_id, cover_letter)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(job.id)
        .bind(caller.id)
        .bind(&payload.cover_letter)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| match Error::from(err) {
            Error::Conflict(_) => {
                Error::Conflict("You have already applied to this job".to_string())
            }
            other => other,
        })?;

        let job = sqlx::query_as::<_, Job>(
            "UPDATE jobs SET applicant_count = applicant_count + 1 WHERE id = $1 RETURNING *",
        )
        .bind(job.id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(application_id = %application.id, job_id = %job.id, "application submitted");
        Ok((application, job, caller.clone()))
    }

    /// Default listing is role-scoped: seekers see their own applications,
    /// employers see the ones for their jobs.
    pub async fn list_for(&self, caller: &User) -> Result<Vec<ApplicationDetail>> {
        let applications = if caller.is_seeker() {
            sqlx::query_as::<_, Application>(
                "SELECT * FROM applications WHERE seeker_id = $1 ORDER BY applied_at DESC",
            )
            .bind(caller.id)
            .fetch_all(&self.pool)
            .await?
        } else if caller.is_employer() {
            sqlx::query_as::<_, Application>(
                r#"
                SELECT a.* FROM applications a
                JOIN jobs j ON j.id = a.job_id
                WHERE j.posted_by = $1
                ORDER BY a.applied_at DESC
                "#,
            )
            .bind(caller.id)
            .fetch_all(&self.pool)
            .await?
        } else {
            Vec::new()
        };
        self.hydrate(applications).await
    }

    pub async fn my_applications(&self, caller: &User) -> Result<Vec<ApplicationDetail>> {
        if !caller.is_seeker() {
            return Err(Error::Forbidden(
                "Only seekers can view their applications".to_string(),
            ));
        }
        let applications = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE seeker_id = $1 ORDER BY applied_at DESC",
        )
        .bind(caller.id)
        .fetch_all(&self.pool)
        .await?;
        self.hydrate(applications).await
    }

    pub async fn for_job(&self, caller: &User, job_id: Uuid) -> Result<Vec<ApplicationDetail>> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        if job.posted_by != caller.id {
            return Err(Error::Forbidden(
                "You can only view applications for your own jobs".to_string(),
            ));
        }
        let applications = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE job_id = $1 ORDER BY applied_at DESC",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        self.hydrate(applications).await
    }

    pub async fn get(&self, caller: &User, id: Uuid) -> Result<ApplicationDetail> {
        let (application, job, seeker) = self.load(id).await?;
        if application.seeker_id != caller.id && job.posted_by != caller.id {
            return Err(Error::Forbidden(
                "You do not have access to this application".to_string(),
            ));
        }
        Ok((application, job, seeker))
    }

    pub async fn update_status(
        &self,
        caller: &User,
        id: Uuid,
        status: &str,
    ) -> Result<ApplicationDetail> {
        if !validation::is_valid_application_status(status) {
            return Err(Error::BadRequest(format!("Invalid status: {}", status)));
        }
        let (application, job, seeker) = self.load(id).await?;
        if job.posted_by != caller.id {
            return Err(Error::Forbidden(
                "You can only update applications for your own jobs".to_string(),
            ));
        }
        let application = sqlx::query_as::<_, Application>(
            "UPDATE applications SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(application.id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok((application, job, seeker))
    }

    pub async fn has_applied(&self, seeker_id: Uuid, job_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM applications WHERE job_id = $1 AND seeker_id = $2",
        )
        .bind(job_id)
        .bind(seeker_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(exists.is_some())
    }

    /// Seekers may withdraw their own applications; employers may delete
    /// applications for jobs they posted.
    pub async fn delete(&self, caller: &User, id: Uuid) -> Result<()> {
        let (application, job, _) = self.load(id).await?;
        let allowed = (caller.is_seeker() && application.seeker_id == caller.id)
            || (caller.is_employer() && job.posted_by == caller.id);
        if !allowed {
            return Err(Error::Forbidden(
                "You do not have permission to delete this application".to_string(),
            ));
        }
        sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<ApplicationDetail> {
        let application = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(application.job_id)
            .fetch_one(&self.pool)
            .await?;
        let seeker = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(application.seeker_id)
            .fetch_one(&self.pool)
            .await?;
        Ok((application, job, seeker))
    }

    /// Batch-load the jobs and seekers behind a page of applications so the
    /// projection never does per-row lookups.
    async fn hydrate(&self, applications: Vec<Application>) -> Result<Vec<ApplicationDetail>> {
        if applications.is_empty() {
            return Ok(Vec::new());
        }
        let job_ids: Vec<Uuid> = applications.iter().map(|a| a.job_id).collect();
        let seeker_ids: Vec<Uuid> = applications.iter().map(|a| a.seeker_id).collect();

        let jobs: HashMap<Uuid, Job> =
            sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ANY($1)")
                .bind(&job_ids)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|j| (j.id, j))
                .collect();
        let seekers: HashMap<Uuid, User> =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
                .bind(&seeker_ids)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|u| (u.id, u))
                .collect();

        let mut details = Vec::with_capacity(applications.len());
        for application in applications {
            let (Some(job), Some(seeker)) = (
                jobs.get(&application.job_id),
                seekers.get(&application.seeker_id),
            ) else {
                // Parent rows can vanish between the two reads; skip rather
                // than fail the whole listing.
                continue;
            };
            details.push((application, job.clone(), seeker.clone()));
        }
        Ok(details)
    }
}
