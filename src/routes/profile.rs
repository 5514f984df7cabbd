use axum::{
    extract::{Multipart, State},
    Extension, Json,
};
use tokio::fs;
use uuid::Uuid;

use crate::config::get_config;
use crate::dto::user_dto::{
    ProfileResponse, UpdateCompanyPayload, UpdateProfilePayload, UpdateSkillsPayload,
};
use crate::error::{Error, Result};
use crate::middleware::auth::AuthUser;
use crate::AppState;

const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;
const ALLOWED_AVATAR_TYPES: [(&str, &str); 4] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

pub async fn get_profile(
    Extension(AuthUser(caller)): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    Ok(Json(ProfileResponse::from(&caller)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<ProfileResponse>> {
    let updated = state.user_service.update_profile(&caller, payload).await?;
    Ok(Json(ProfileResponse::from(&updated)))
}

pub async fn update_skills(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Json(payload): Json<UpdateSkillsPayload>,
) -> Result<Json<ProfileResponse>> {
    let updated = state
        .user_service
        .update_skills(&caller, payload.skills)
        .await?;
    Ok(Json(ProfileResponse::from(&updated)))
}

pub async fn update_company(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Json(payload): Json<UpdateCompanyPayload>,
) -> Result<Json<ProfileResponse>> {
    let updated = state.user_service.update_company(&caller, payload).await?;
    Ok(Json(ProfileResponse::from(&updated)))
}

/// Multipart upload; the file is validated before anything is written, so a
/// rejected upload never touches the stored avatar.
pub async fn upload_avatar(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Json<ProfileResponse>> {
    let mut avatar: Option<(String, bytes::Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("avatar") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let data = field.bytes().await?;
        avatar = Some((content_type, data));
    }

    let Some((content_type, data)) = avatar else {
        return Err(Error::BadRequest("No avatar file provided".to_string()));
    };
    let Some((_, ext)) = ALLOWED_AVATAR_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
    else {
        return Err(Error::BadRequest(
            "Invalid file type. Allowed: JPEG, PNG, GIF, WEBP".to_string(),
        ));
    };
    if data.len() > MAX_AVATAR_BYTES {
        return Err(Error::BadRequest(
            "File too large. Maximum size is 5MB".to_string(),
        ));
    }

    let avatar_dir = format!("{}/avatars", get_config().uploads_dir);
    fs::create_dir_all(&avatar_dir).await?;
    let filename = format!("{}.{}", Uuid::new_v4(), ext);
    fs::write(format!("{}/{}", avatar_dir, filename), &data).await?;

    let stored_path = format!("/uploads/avatars/{}", filename);
    let updated = state.user_service.set_avatar(caller.id, &stored_path).await?;
    tracing::info!(user_id = %caller.id, path = %stored_path, "avatar updated");
    Ok(Json(ProfileResponse::from(&updated)))
}
