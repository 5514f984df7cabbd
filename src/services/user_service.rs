use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user_dto::{UpdateCompanyPayload, UpdateProfilePayload};
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::validation;

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    pub async fn get_active(&self, id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND is_active = TRUE")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    /// Admin view; non-admins go through the role listings instead.
    pub async fn list_all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn list_by_role(&self, role: &str) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = $1 AND is_active = TRUE ORDER BY created_at DESC",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn update_profile(&self, user: &User, payload: UpdateProfilePayload) -> Result<User> {
        validation::validate(&payload)?;

        if let Some(phone) = payload.phone.as_deref() {
            if !phone.is_empty() && !validation::is_valid_phone(phone) {
                return Err(Error::BadRequest("Enter a valid phone number".to_string()));
            }
        }
        if let Some(linkedin) = payload.linkedin.as_deref() {
            if !linkedin.is_empty() && !validation::is_profile_link_for(linkedin, "linkedin.com") {
                return Err(Error::BadRequest(
                    "LinkedIn URL must point to linkedin.com".to_string(),
                ));
            }
        }
        if let Some(github) = payload.github.as_deref() {
            if !github.is_empty() && !validation::is_profile_link_for(github, "github.com") {
                return Err(Error::BadRequest(
                    "GitHub URL must point to github.com".to_string(),
                ));
            }
        }
        let website = payload
            .website
            .as_deref()
            .map(|w| if w.is_empty() { w.to_string() } else { validation::normalize_website(w) });

        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                location = COALESCE($4, location),
                phone = COALESCE($5, phone),
                website = COALESCE($6, website),
                skills = COALESCE($7, skills),
                experience = COALESCE($8, experience),
                education = COALESCE($9, education),
                linkedin = COALESCE($10, linkedin),
                github = COALESCE($11, github),
                portfolio = COALESCE($12, portfolio),
                company = COALESCE($13, company),
                company_size = COALESCE($14, company_size),
                industry = COALESCE($15, industry),
                founded = COALESCE($16, founded)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&payload.name)
        .bind(&payload.bio)
        .bind(&payload.location)
        .bind(&payload.phone)
        .bind(&website)
        .bind(payload.skills.map(Json))
        .bind(&payload.experience)
        .bind(&payload.education)
        .bind(&payload.linkedin)
        .bind(&payload.github)
        .bind(&payload.portfolio)
        .bind(&payload.company)
        .bind(&payload.company_size)
        .bind(&payload.industry)
        .bind(&payload.founded)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn update_skills(&self, user: &User, skills: serde_json::Value) -> Result<User> {
        if !user.is_seeker() {
            return Err(Error::Forbidden(
                "Only job seekers can update skills".to_string(),
            ));
        }
        let skills: Vec<String> = match skills {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => Ok(s),
                    _ => Err(Error::BadRequest("Skills must be a list of strings".to_string())),
                })
                .collect::<Result<_>>()?,
            _ => return Err(Error::BadRequest("Skills must be a list".to_string())),
        };

        let updated = sqlx::query_as::<_, User>(
            "UPDATE users SET skills = $2 WHERE id = $1 RETURNING *",
        )
        .bind(user.id)
        .bind(Json(skills))
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    /// Only the company allow-list is applied; anything else in the request
    /// body is dropped by deserialization.
    pub async fn update_company(&self, user: &User, payload: UpdateCompanyPayload) -> Result<User> {
        if !user.is_employer() {
            return Err(Error::Forbidden(
                "Only employers can update company info".to_string(),
            ));
        }
        let website = payload
            .website
            .as_deref()
            .map(|w| if w.is_empty() { w.to_string() } else { validation::normalize_website(w) });

        let updated = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                company = COALESCE($2, company),
                company_size = COALESCE($3, company_size),
                industry = COALESCE($4, industry),
                founded = COALESCE($5, founded),
                website = COALESCE($6, website)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&payload.company)
        .bind(&payload.company_size)
        .bind(&payload.industry)
        .bind(&payload.founded)
        .bind(&website)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn set_avatar(&self, user_id: Uuid, path: &str) -> Result<User> {
        let updated =
            sqlx::query_as::<_, User>("UPDATE users SET avatar = $2 WHERE id = $1 RETURNING *")
                .bind(user_id)
                .bind(path)
                .fetch_one(&self.pool)
                .await?;
        Ok(updated)
    }

    /// Users are never hard-deleted; dependent rows survive until the row
    /// itself goes away.
    pub async fn deactivate(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}
