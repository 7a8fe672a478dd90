/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in_secs: i64,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in_secs: i64,
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let invalid = || ServerError::Auth("Invalid username or password".to_string());

    let user = watchplan_storage::users::get_by_name(&app_state.pool, &req.username)
        .await?
        .ok_or_else(invalid)?;

    let password_hash = watchplan_storage::users::get_password_hash(&app_state.pool, &user.id)
        .await?
        .ok_or_else(invalid)?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(invalid());
    }

    let pair = app_state.auth_service.issue_token_pair(&user.id)?;

    Ok(Json(LoginResponse {
        access_token: pair.access_token,
        refresh_token: pair.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in_secs: pair.expires_in_secs,
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    let access_token = app_state.auth_service.create_access_token(&user_id)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in_secs: app_state.auth_service.access_token_ttl_secs(),
    }))
}
