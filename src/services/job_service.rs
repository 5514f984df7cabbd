use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::job_dto::{CreateJobPayload, JobFilters, JobResponse, PostedByDetails, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::Job;
use crate::models::user::User;
use crate::utils::validation;

/// Job row with its poster pre-joined; listing endpoints never traverse
/// relations lazily.
#[derive(Debug, Clone, FromRow)]
pub struct JobWithPoster {
    #[sqlx(flatten)]
    pub job: Job,
    pub poster_name: String,
    pub poster_email: String,
    pub poster_company: Option<String>,
}

impl JobWithPoster {
    pub fn into_response(self) -> JobResponse {
        let mut response = JobResponse::from_job(&self.job, None);
        response.posted_by_details = Some(PostedByDetails {
            id: self.job.posted_by,
            name: self.poster_name,
            email: self.poster_email,
            company: self.poster_company,
        });
        response
    }
}

const SELECT_WITH_POSTER: &str = r#"
    SELECT j.*, u.name AS poster_name, u.email AS poster_email, u.company AS poster_company
    FROM jobs j
    JOIN users u ON u.id = j.posted_by
"#;

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, poster: &User, payload: CreateJobPayload) -> Result<Job> {
        if !poster.is_employer() {
            return Err(Error::Forbidden("Only employers can post jobs".to_string()));
        }
        validation::validate(&payload)?;
        let job_type = payload.job_type.as_deref().unwrap_or("full-time");
        if !validation::is_valid_job_type(job_type) {
            return Err(Error::BadRequest(format!("Invalid job type: {}", job_type)));
        }

        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (title, company, location, description, requirements, salary, job_type, posted_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.company)
        .bind(&payload.location)
        .bind(&payload.description)
        .bind(Json(payload.requirements))
        .bind(&payload.salary)
        .bind(job_type)
        .bind(poster.id)
        .fetch_one(&self.pool)
        .await?;
        tracing::info!(job_id = %job.id, poster = %poster.id, "job posted");
        Ok(job)
    }

    pub async fn get(&self, id: Uuid) -> Result<Job> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn get_with_poster(&self, id: Uuid) -> Result<JobWithPoster> {
        let sql = format!("{} WHERE j.id = $1", SELECT_WITH_POSTER);
        sqlx::query_as::<_, JobWithPoster>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    /// Filters are independent and AND-combined; absent ones fall away.
    /// Newest postings come first.
    pub async fn list(&self, filters: &JobFilters) -> Result<Vec<JobWithPoster>> {
        let sql = format!(
            r#"{}
            WHERE ($1::text IS NULL OR j.job_type = $1)
              AND ($2::text IS NULL OR j.location ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR j.company ILIKE '%' || $3 || '%')
              AND ($4::text IS NULL
                   OR j.title ILIKE '%' || $4 || '%'
                   OR j.description ILIKE '%' || $4 || '%')
            ORDER BY j.posted_at DESC
            "#,
            SELECT_WITH_POSTER
        );
        let jobs = sqlx::query_as::<_, JobWithPoster>(&sql)
            .bind(&filters.job_type)
            .bind(&filters.location)
            .bind(&filters.company)
            .bind(&filters.search)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    pub async fn recent(&self) -> Result<Vec<JobWithPoster>> {
        let sql = format!("{} ORDER BY j.posted_at DESC LIMIT 10", SELECT_WITH_POSTER);
        let jobs = sqlx::query_as::<_, JobWithPoster>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    pub async fn by_employer(&self, employer_id: Uuid) -> Result<Vec<JobWithPoster>> {
        let sql = format!(
            "{} WHERE j.posted_by = $1 ORDER BY j.posted_at DESC",
            SELECT_WITH_POSTER
        );
        let jobs = sqlx::query_as::<_, JobWithPoster>(&sql)
            .bind(employer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }

    pub async fn update(&self, caller: &User, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        validation::validate(&payload)?;
        let job = self.get(id).await?;
        if job.posted_by != caller.id {
            return Err(Error::Forbidden(
                "You can only update your own jobs".to_string(),
            ));
        }
        if let Some(job_type) = payload.job_type.as_deref() {
            if !validation::is_valid_job_type(job_type) {
                return Err(Error::BadRequest(format!("Invalid job type: {}", job_type)));
            }
        }

        let updated = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs SET
                title = COALESCE($2, title),
                company = COALESCE($3, company),
                location = COALESCE($4, location),
                description = COALESCE($5, description),
                requirements = COALESCE($6, requirements),
                salary = COALESCE($7, salary),
                job_type = COALESCE($8, job_type)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.title)
        .bind(&payload.company)
        .bind(&payload.location)
        .bind(&payload.description)
        .bind(payload.requirements.map(Json))
        .bind(&payload.salary)
        .bind(&payload.job_type)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, caller: &User, id: Uuid) -> Result<()> {
        let job = self.get(id).await?;
        if job.posted_by != caller.id {
            return Err(Error::Forbidden(
                "You can only delete your own jobs".to_string(),
            ));
        }
        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::info!(job_id = %id, "job deleted");
        Ok(())
    }
}
