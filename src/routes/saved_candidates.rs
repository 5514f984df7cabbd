use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::dto::saved_dto::{
    IsSavedResponse, SaveCandidatePayload, SavedCandidateResponse, UpdateNotesPayload,
};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::AppState;

pub async fn list_saved(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
) -> Result<Json<Vec<SavedCandidateResponse>>> {
    let saved = state.saved_candidate_service.list(&caller).await?;
    Ok(Json(
        saved
            .iter()
            .map(|(s, c)| SavedCandidateResponse::from_parts(s, c))
            .collect(),
    ))
}

pub async fn save_candidate(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Json(payload): Json<SaveCandidatePayload>,
) -> Result<(StatusCode, Json<SavedCandidateResponse>)> {
    let (saved, candidate) = state.saved_candidate_service.save(&caller, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(SavedCandidateResponse::from_parts(&saved, &candidate)),
    ))
}

pub async fn remove_saved(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.saved_candidate_service.remove(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_by_candidate(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(candidate_id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .saved_candidate_service
        .remove_by_candidate(&caller, candidate_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn check_saved(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<IsSavedResponse>> {
    let is_saved = state
        .saved_candidate_service
        .is_saved(caller.id, candidate_id)
        .await?;
    Ok(Json(IsSavedResponse { is_saved }))
}

pub async fn update_notes(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(candidate_id): Path<Uuid>,
    Json(payload): Json<UpdateNotesPayload>,
) -> Result<Json<SavedCandidateResponse>> {
    let (saved, candidate) = state
        .saved_candidate_service
        .update_notes(&caller, candidate_id, &payload.notes)
        .await?;
    Ok(Json(SavedCandidateResponse::from_parts(&saved, &candidate)))
}
