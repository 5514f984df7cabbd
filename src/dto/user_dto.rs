use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::config::get_config;
use crate::models::user::User;

/// Media paths are stored relative (`/uploads/...`) and rendered absolute
/// against the configured site base URL.
pub fn absolute_media_url(path: Option<&str>) -> Option<String> {
    let path = path?;
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    let base = get_config().site_base_url.trim_end_matches('/');
    Some(format!("{}{}", base, path))
}

/// Full profile projection returned by login, `me` and directory endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub name: String,
    pub role: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub skills: Vec<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
    pub company: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
    pub founded: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for ProfileResponse {
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
            website: user.website.clone(),
            skills: user.skills.0.clone(),
            experience: user.experience.clone(),
            education: user.education.clone(),
            linkedin: user.linkedin.clone(),
            github: user.github.clone(),
            portfolio: user.portfolio.clone(),
            company: user.company.clone(),
            company_size: user.company_size.clone(),
            industry: user.industry.clone(),
            founded: user.founded.clone(),
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Writable profile fields. Role, id, email, activation state and
/// timestamps are deliberately absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub bio: Option<String>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<String>,
    pub education: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
    #[validate(length(max = 255))]
    pub company: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
    pub founded: Option<String>,
}

/// Skills arrive as raw JSON so non-array payloads can be rejected with a
/// clear message instead of a generic deserialization error.
#[derive(Debug, Deserialize)]
pub struct UpdateSkillsPayload {
    pub skills: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompanyPayload {
    pub company: Option<String>,
    pub company_size: Option<String>,
    pub industry: Option<String>,
    pub founded: Option<String>,
    pub website: Option<String>,
}
