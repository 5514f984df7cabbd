use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::dto::user_dto::{ProfileResponse, UpdateProfilePayload};
use crate::error::{Error, Result};
use crate::middleware::auth::AuthUser;
use crate::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
) -> Result<Json<Vec<ProfileResponse>>> {
    if !caller.is_staff {
        return Err(Error::Forbidden("Admin access required".to_string()));
    }
    let users = state.user_service.list_all().await?;
    Ok(Json(users.iter().map(ProfileResponse::from).collect()))
}

pub async fn get_me(
    Extension(AuthUser(caller)): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    Ok(Json(ProfileResponse::from(&caller)))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<ProfileResponse>> {
    let updated = state.user_service.update_profile(&caller, payload).await?;
    Ok(Json(ProfileResponse::from(&updated)))
}

pub async fn list_seekers(State(state): State<AppState>) -> Result<Json<Vec<ProfileResponse>>> {
    let users = state.user_service.list_by_role("seeker").await?;
    Ok(Json(users.iter().map(ProfileResponse::from).collect()))
}

pub async fn list_employers(State(state): State<AppState>) -> Result<Json<Vec<ProfileResponse>>> {
    let users = state.user_service.list_by_role("employer").await?;
    Ok(Json(users.iter().map(ProfileResponse::from).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>> {
    let user = state.user_service.get_active(id).await?;
    Ok(Json(ProfileResponse::from(&user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<Json<ProfileResponse>> {
    if caller.id != id && !caller.is_staff {
        return Err(Error::Forbidden(
            "You can only update your own profile".to_string(),
        ));
    }
    let target = state.user_service.get(id).await?;
    let updated = state.user_service.update_profile(&target, payload).await?;
    Ok(Json(ProfileResponse::from(&updated)))
}

/// Admin-only; deactivates rather than deleting.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if !caller.is_staff {
        return Err(Error::Forbidden("Admin access required".to_string()));
    }
    state.user_service.deactivate(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
