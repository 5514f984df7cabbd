use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::saved_job::SavedJob;
use crate::services::job_service::JobWithPoster;

#[derive(Clone)]
pub struct SavedJobService {
    pool: PgPool,
}

impl SavedJobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, seeker_id: Uuid) -> Result<Vec<(SavedJob, JobWithPoster)>> {
        let saved = sqlx::query_as::<_, SavedJob>(
            "SELECT * FROM saved_jobs WHERE seeker_id = $1 ORDER BY saved_at DESC",
        )
        .bind(seeker_id)
        .fetch_all(&self.pool)
        .await?;
        if saved.is_empty() {
            return Ok(Vec::new());
        }

        let job_ids: Vec<Uuid> = saved.iter().map(|s| s.job_id).collect();
        let jobs: HashMap<Uuid, JobWithPoster> = sqlx::query_as::<_, JobWithPoster>(
            r#"
            SELECT j.*, u.name AS poster_name, u.email AS poster_email, u.company AS poster_company
            FROM jobs j
            JOIN users u ON u.id = j.posted_by
            WHERE j.id = ANY($1)
            "#,
        )
        .bind(&job_ids)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|j| (j.job.id, j))
        .collect();

        Ok(saved
            .into_iter()
            .filter_map(|s| {
                let job = jobs.get(&s.job_id)?.clone();
                Some((s, job))
            })
            .collect())
    }

    pub async fn save(&self, seeker_id: Uuid, job_id: Uuid) -> Result<(SavedJob, JobWithPoster)> {
        let job = sqlx::query_as::<_, JobWithPoster>(
            r#"
            SELECT j.*, u.name AS poster_name, u.email AS poster_email, u.company AS poster_company
            FROM jobs j
            JOIN users u ON u.id = j.posted_by
            WHERE j.id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        let saved = sqlx::query_as::<_, SavedJob>(
            "INSERT INTO saved_jobs (seeker_id, job_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(seeker_id)
        .bind(job_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match Error::from(err) {
            Error::Conflict(_) => Error::Conflict("Job is already saved".to_string()),
            other => other,
        })?;
        Ok((saved, job))
    }

    /// Unsave is keyed by job id, matching how clients track bookmarks.
    pub async fn remove_by_job(&self, seeker_id: Uuid, job_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM saved_jobs WHERE seeker_id = $1 AND job_id = $2")
            .bind(seeker_id)
            .bind(job_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Saved job not found".to_string()));
        }
        Ok(())
    }

    pub async fn is_saved(&self, seeker_id: Uuid, job_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM saved_jobs WHERE seeker_id = $1 AND job_id = $2",
        )
        .bind(seeker_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(exists.is_some())
    }
}
