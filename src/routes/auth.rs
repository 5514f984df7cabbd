use axum::{extract::State, http::StatusCode, Json};

use crate::dto::auth_dto::{
    LoginPayload, LoginResponse, RegisterPayload, RegisterResponse, RegisteredUser,
};
use crate::dto::user_dto::ProfileResponse;
use crate::error::Result;
use crate::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let (user, token) = state.auth_service.register(payload).await?;
    let response = RegisterResponse {
        message: "User registered successfully".to_string(),
        token,
        user: RegisteredUser {
            id: user.id,
            email: user.email,
            username: user.username,
            name: user.name,
            role: user.role,
        },
    };
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>> {
    let (user, token) = state.auth_service.login(payload).await?;
    Ok(Json(LoginResponse {
        user: ProfileResponse::from(&user),
        message: "Login successful".to_string(),
        token,
    }))
}
