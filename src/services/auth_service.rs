use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::auth_dto::{LoginPayload, RegisterPayload};
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::{crypto, token, validation};

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<(User, String)> {
        validation::validate(&payload)?;

        let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_some() {
            return Err(Error::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }

        let role = validation::coerce_role(payload.role.as_deref());
        let base = validation::username_base(&payload.email, payload.username.as_deref());
        let username = self.unique_username(&base).await?;

        let password_hash = crypto::hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Failed to hash password: {}", e)))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, username, name, role, password_hash, phone, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&payload.email)
        .bind(&username)
        .bind(payload.name.as_deref().unwrap_or_default())
        .bind(role)
        .bind(&password_hash)
        .bind(&payload.phone)
        .bind(&payload.location)
        .fetch_one(&self.pool)
        .await?;

        let token = self.get_or_create_token(user.id).await?;
        tracing::info!(user_id = %user.id, role = %user.role, "registered new user");
        Ok((user, token))
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<(User, String)> {
        validation::validate(&payload)?;

        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND is_active = TRUE",
        )
        .bind(&payload.email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

        let ok = crypto::verify_password(&payload.password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Failed to verify password: {}", e)))?;
        if !ok {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }

        let token = self.get_or_create_token(user.id).await?;
        Ok((user, token))
    }

    /// Base name first, then the smallest integer suffix that is free
    /// ("jane", "jane1", "jane2", ...).
    async fn unique_username(&self, base: &str) -> Result<String> {
        let mut counter: u32 = 0;
        loop {
            let candidate = if counter == 0 {
                base.to_string()
            } else {
                format!("{}{}", base, counter)
            };
            let taken = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE username = $1")
                .bind(&candidate)
                .fetch_optional(&self.pool)
                .await?;
            if taken.is_none() {
                return Ok(candidate);
            }
            counter += 1;
        }
    }

    /// Tokens are reused across logins, never rotated. The unique user_id
    /// constraint makes concurrent first logins converge on one row.
    async fn get_or_create_token(&self, user_id: Uuid) -> Result<String> {
        if let Some(existing) =
            sqlx::query_scalar::<_, String>("SELECT token FROM auth_tokens WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
        {
            return Ok(existing);
        }

        let fresh = token::generate_token();
        let inserted = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO auth_tokens (token, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING token
            "#,
        )
        .bind(&fresh)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(token) => Ok(token),
            // Lost the race to a concurrent login; the winner's token stands.
            None => {
                sqlx::query_scalar::<_, String>("SELECT token FROM auth_tokens WHERE user_id = $1")
                    .bind(user_id)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(Into::into)
            }
        }
    }
}
