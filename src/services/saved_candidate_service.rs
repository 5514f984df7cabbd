use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::saved_dto::SaveCandidatePayload;
use crate::error::{Error, Result};
use crate::models::saved_candidate::SavedCandidate;
use crate::models::user::User;

#[derive(Clone)]
pub struct SavedCandidateService {
    pool: PgPool,
}

impl SavedCandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, employer: &User) -> Result<Vec<(SavedCandidate, User)>> {
        if !employer.is_employer() {
            return Err(Error::Forbidden(
                "Only employers can manage saved candidates".to_string(),
            ));
        }
        let saved = sqlx::query_as::<_, SavedCandidate>(
            "SELECT * FROM saved_candidates WHERE employer_id = $1 ORDER BY saved_at DESC",
        )
        .bind(employer.id)
        .fetch_all(&self.pool)
        .await?;
        if saved.is_empty() {
            return Ok(Vec::new());
        }

        let candidate_ids: Vec<Uuid> = saved.iter().map(|s| s.candidate_id).collect();
        let candidates: HashMap<Uuid, User> =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
                .bind(&candidate_ids)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|u| (u.id, u))
                .collect();

        Ok(saved
            .into_iter()
            .filter_map(|s| {
                let candidate = candidates.get(&s.candidate_id)?.clone();
                Some((s, candidate))
            })
            .collect())
    }

    /// The target must be an active seeker; anything else reads as "no such
    /// candidate" rather than a validation failure.
    pub async fn save(
        &self,
        employer: &User,
        payload: SaveCandidatePayload,
    ) -> Result<(SavedCandidate, User)> {
        if !employer.is_employer() {
            return Err(Error::Forbidden(
                "Only employers can save candidates".to_string(),
            ));
        }
        let candidate = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND role = 'seeker' AND is_active = TRUE",
        )
        .bind(payload.candidate_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

        let saved = sqlx::query_as::<_, SavedCandidate>(
            r#"
            INSERT INTO saved_candidates (employer_id, candidate_id, match_score, notes, applied_for)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(employer.id)
        .bind(candidate.id)
        .bind(payload.match_score)
        .bind(&payload.notes)
        .bind(&payload.applied_for)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match Error::from(err) {
            Error::Conflict(_) => Error::Conflict("Candidate is already saved".to_string()),
            other => other,
        })?;
        Ok((saved, candidate))
    }

    pub async fn remove(&self, employer: &User, id: Uuid) -> Result<()> {
        let result =
            sqlx::query("DELETE FROM saved_candidates WHERE id = $1 AND employer_id = $2")
                .bind(id)
                .bind(employer.id)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Saved candidate not found".to_string()));
        }
        Ok(())
    }

    pub async fn remove_by_candidate(&self, employer: &User, candidate_id: Uuid) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM saved_candidates WHERE employer_id = $1 AND candidate_id = $2",
        )
        .bind(employer.id)
        .bind(candidate_id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Saved candidate not found".to_string()));
        }
        Ok(())
    }

    pub async fn is_saved(&self, employer_id: Uuid, candidate_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM saved_candidates WHERE employer_id = $1 AND candidate_id = $2",
        )
        .bind(employer_id)
        .bind(candidate_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(exists.is_some())
    }

    pub async fn update_notes(
        &self,
        employer: &User,
        candidate_id: Uuid,
        notes: &str,
    ) -> Result<(SavedCandidate, User)> {
        let saved = sqlx::query_as::<_, SavedCandidate>(
            r#"
            UPDATE saved_candidates SET notes = $3
            WHERE employer_id = $1 AND candidate_id = $2
            RETURNING *
            "#,
        )
        .bind(employer.id)
        .bind(candidate_id)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Saved candidate not found".to_string()))?;

        let candidate = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(candidate_id)
            .fetch_one(&self.pool)
            .await?;
        Ok((saved, candidate))
    }
}
