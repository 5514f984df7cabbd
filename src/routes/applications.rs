use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::dto::application_dto::{
    ApplicationResponse, ApplyPayload, HasAppliedResponse, UpdateStatusPayload,
};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::AppState;

pub async fn apply(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Json(payload): Json<ApplyPayload>,
) -> Result<(StatusCode, Json<ApplicationResponse>)> {
    let (application, job, seeker) = state.application_service.apply(&caller, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse::from_parts(&application, &job, &seeker)),
    ))
}

pub async fn list_applications(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
) -> Result<Json<Vec<ApplicationResponse>>> {
    let details = state.application_service.list_for(&caller).await?;
    Ok(Json(
        details
            .iter()
            .map(|(a, j, s)| ApplicationResponse::from_parts(a, j, s))
            .collect(),
    ))
}

pub async fn my_applications(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
) -> Result<Json<Vec<ApplicationResponse>>> {
    let details = state.application_service.my_applications(&caller).await?;
    Ok(Json(
        details
            .iter()
            .map(|(a, j, s)| ApplicationResponse::from_parts(a, j, s))
            .collect(),
    ))
}

pub async fn for_job(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationResponse>>> {
    let details = state.application_service.for_job(&caller, job_id).await?;
    Ok(Json(
        details
            .iter()
            .map(|(a, j, s)| ApplicationResponse::from_parts(a, j, s))
            .collect(),
    ))
}

pub async fn get_application(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApplicationResponse>> {
    let (application, job, seeker) = state.application_service.get(&caller, id).await?;
    Ok(Json(ApplicationResponse::from_parts(
        &application,
        &job,
        &seeker,
    )))
}

pub async fn update_status(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<Json<ApplicationResponse>> {
    let (application, job, seeker) = state
        .application_service
        .update_status(&caller, id, &payload.status)
        .await?;
    Ok(Json(ApplicationResponse::from_parts(
        &application,
        &job,
        &seeker,
    )))
}

pub async fn check_applied(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<HasAppliedResponse>> {
    let has_applied = state
        .application_service
        .has_applied(caller.id, job_id)
        .await?;
    Ok(Json(HasAppliedResponse { has_applied }))
}

pub async fn delete_application(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.application_service.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
