use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::dto::job_dto::{
    ByEmployerQuery, CreateJobPayload, JobFilters, JobResponse, UpdateJobPayload,
};
use crate::error::{Error, Result};
use crate::middleware::auth::AuthUser;
use crate::AppState;

pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filters): Query<JobFilters>,
) -> Result<Json<Vec<JobResponse>>> {
    let jobs = state.job_service.list(&filters).await?;
    Ok(Json(jobs.into_iter().map(|j| j.into_response()).collect()))
}

pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobResponse>> {
    let job = state.job_service.get_with_poster(id).await?;
    Ok(Json(job.into_response()))
}

pub async fn create_job(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<(StatusCode, Json<JobResponse>)> {
    let job = state.job_service.create(&caller, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(JobResponse::from_job(&job, Some(&caller))),
    ))
}

pub async fn update_job(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<Json<JobResponse>> {
    let job = state.job_service.update(&caller, id, payload).await?;
    Ok(Json(JobResponse::from_job(&job, Some(&caller))))
}

pub async fn delete_job(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.job_service.delete(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn my_jobs(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
) -> Result<Json<Vec<JobResponse>>> {
    let jobs = state.job_service.by_employer(caller.id).await?;
    Ok(Json(jobs.into_iter().map(|j| j.into_response()).collect()))
}

pub async fn by_employer(
    State(state): State<AppState>,
    Query(query): Query<ByEmployerQuery>,
) -> Result<Json<Vec<JobResponse>>> {
    let employer_id = query
        .employer_id
        .ok_or_else(|| Error::BadRequest("employer_id is required".to_string()))?;
    let jobs = state.job_service.by_employer(employer_id).await?;
    Ok(Json(jobs.into_iter().map(|j| j.into_response()).collect()))
}

pub async fn recent_jobs(State(state): State<AppState>) -> Result<Json<Vec<JobResponse>>> {
    let jobs = state.job_service.recent().await?;
    Ok(Json(jobs.into_iter().map(|j| j.into_response()).collect()))
}
