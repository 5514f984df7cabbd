use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::dto::saved_dto::{IsSavedResponse, SaveJobPayload, SavedJobResponse};
use crate::error::{Error, Result};
use crate::middleware::auth::AuthUser;
use crate::AppState;

fn require_seeker(caller: &crate::models::user::User) -> Result<()> {
    if !caller.is_seeker() {
        return Err(Error::Forbidden(
            "Only seekers can manage saved jobs".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_saved(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
) -> Result<Json<Vec<SavedJobResponse>>> {
    require_seeker(&caller)?;
    let saved = state.saved_job_service.list(caller.id).await?;
    Ok(Json(
        saved
            .into_iter()
            .map(|(s, j)| SavedJobResponse::from_parts(&s, j.into_response()))
            .collect(),
    ))
}

pub async fn save_job(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Json(payload): Json<SaveJobPayload>,
) -> Result<(StatusCode, Json<SavedJobResponse>)> {
    require_seeker(&caller)?;
    let (saved, job) = state
        .saved_job_service
        .save(caller.id, payload.job_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SavedJobResponse::from_parts(&saved, job.into_response())),
    ))
}

pub async fn unsave_job(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode> {
    require_seeker(&caller)?;
    state
        .saved_job_service
        .remove_by_job(caller.id, job_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn check_saved(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<IsSavedResponse>> {
    require_seeker(&caller)?;
    let is_saved = state.saved_job_service.is_saved(caller.id, job_id).await?;
    Ok(Json(IsSavedResponse { is_saved }))
}
