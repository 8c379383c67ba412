// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::ApiJson;
use crate::{
    auth::Auth,
    domain::Watchlist,
    error::ApiError,
    models::{AddWatchlistItemRequest, MessageResponse},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/watchlist",
    tag = "Watchlist",
    responses(
        (status = 200, body = Watchlist),
        (status = 401, description = "Missing or invalid auth token"),
        (status = 404, description = "Watchlist not found")
    )
)]
pub async fn get_watchlist(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Watchlist>, ApiError> {
    state
        .watchlists
        .get_watchlist(&user.user_id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Watchlist not found."))
}

#[utoipa::path(
    post,
    path = "/watchlist",
    request_body = AddWatchlistItemRequest,
    tag = "Watchlist",
    responses(
        (status = 201, body = MessageResponse),
        (status = 400, description = "Missing or invalid field, or duplicate itemId"),
        (status = 401, description = "Missing or invalid auth token")
    )
)]
pub async fn add_item(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AddWatchlistItemRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.watchlists.add_item(&user.user_id, request)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Item added to watchlist successfully.")),
    ))
}

#[utoipa::path(
    delete,
    path = "/watchlist/{item_id}",
    params(
        ("item_id" = String, Path, description = "Identifier of the watchlist item to remove")
    ),
    tag = "Watchlist",
    responses(
        (status = 200, body = MessageResponse),
        (status = 401, description = "Missing or invalid auth token")
    )
)]
pub async fn remove_item(
    Auth(user): Auth,
    Path(item_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.watchlists.remove_item(&user.user_id, &item_id)?;
    Ok(Json(MessageResponse::new(
        "Item removed from watchlist successfully.",
    )))
}
