// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};

use super::ApiJson;
use crate::{
    auth::Auth,
    domain::{Profile, User},
    error::ApiError,
    models::{CreateUserRequest, MessageResponse, UpdateProfileRequest},
    state::AppState,
};

/// Register a user with an empty wallet and watchlist.
///
/// Re-posting an existing `userId` resets the wallet and watchlist.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    tag = "Users",
    responses(
        (status = 201, body = MessageResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 500, description = "Persistence failure")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.users.create_user(request)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully.")),
    ))
}

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    responses(
        (status = 200, body = User),
        (status = 401, description = "Missing or invalid auth token"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_current_user(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<User>, ApiError> {
    state
        .users
        .get_user(&user.user_id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("User not found."))
}

#[utoipa::path(
    get,
    path = "/users/profile",
    tag = "Users",
    responses(
        (status = 200, body = Profile),
        (status = 401, description = "Missing or invalid auth token"),
        (status = 404, description = "Profile not set")
    )
)]
pub async fn get_profile(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Profile>, ApiError> {
    state
        .users
        .get_profile(&user.user_id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Profile not found."))
}

/// Replace the caller's profile. Unregistered callers get a success with no
/// stored change.
#[utoipa::path(
    put,
    path = "/users/profile",
    request_body = UpdateProfileRequest,
    tag = "Users",
    responses(
        (status = 200, body = MessageResponse),
        (status = 400, description = "Missing or invalid field"),
        (status = 401, description = "Missing or invalid auth token")
    )
)]
pub async fn update_profile(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.users.update_profile(&user.user_id, request)?;
    Ok(Json(MessageResponse::new("Profile updated successfully.")))
}
