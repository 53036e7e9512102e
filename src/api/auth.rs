//! Account endpoints: registration, login, password changes, deletion

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppResult;

use super::{require_field, MessageResponse};

#[derive(Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdatePasswordRequest {
    pub username: Option<String>,
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct DeleteAccountRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/create-account",
    tag = "auth",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Account created", body = MessageResponse),
        (status = 400, description = "Missing field or duplicate username")
    )
)]
pub async fn create_account(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateAccountRequest>,
) -> AppResult<Json<MessageResponse>> {
    let username = require_field(&request.username, "username")?;
    let password = require_field(&request.password, "password")?;

    state.services.accounts.create_account(username, password).await?;

    Ok(Json(MessageResponse::new(format!(
        "Account created successfully for {}",
        username
    ))))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = MessageResponse),
        (status = 400, description = "Missing field"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<MessageResponse>> {
    let username = require_field(&request.username, "username")?;
    let password = require_field(&request.password, "password")?;

    let user = state.services.accounts.authenticate(username, password).await?;

    Ok(Json(MessageResponse::new(format!(
        "Welcome back, {}!",
        user.username
    ))))
}

/// Change password after verifying the old one
#[utoipa::path(
    post,
    path = "/update-password",
    tag = "auth",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Missing field"),
        (status = 401, description = "Old password is wrong"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn update_password(
    State(state): State<crate::AppState>,
    Json(request): Json<UpdatePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let username = require_field(&request.username, "username")?;
    let old_password = require_field(&request.old_password, "old password")?;
    let new_password = require_field(&request.new_password, "new password")?;

    state
        .services
        .accounts
        .update_password(username, old_password, new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// Delete an account and everything it owns
#[utoipa::path(
    delete,
    path = "/delete-account",
    tag = "auth",
    request_body = DeleteAccountRequest,
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 400, description = "Missing field"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn delete_account(
    State(state): State<crate::AppState>,
    Json(request): Json<DeleteAccountRequest>,
) -> AppResult<Json<MessageResponse>> {
    let username = require_field(&request.username, "username")?;
    let password = require_field(&request.password, "password")?;

    state.services.accounts.delete_account(username, password).await?;

    Ok(Json(MessageResponse::new(format!(
        "Account deleted for {}",
        username
    ))))
}
