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
    domain::Wallet,
    error::ApiError,
    models::{AddTransactionRequest, MessageResponse},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/wallet",
    tag = "Wallet",
    responses(
        (status = 200, body = Wallet),
        (status = 401, description = "Missing or invalid auth token"),
        (status = 404, description = "Wallet not found")
    )
)]
pub async fn get_wallet(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Wallet>, ApiError> {
    state
        .wallets
        .get_wallet(&user.user_id)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Wallet not found."))
}

/// Record a buy or sell.
///
/// `transactionId` is generated when absent and `currency` defaults to `USD`.
#[utoipa::path(
    post,
    path = "/wallet/transaction",
    request_body = AddTransactionRequest,
    tag = "Wallet",
    responses(
        (status = 201, body = MessageResponse),
        (status = 400, description = "Missing or invalid field, or duplicate transactionId"),
        (status = 401, description = "Missing or invalid auth token")
    )
)]
pub async fn add_transaction(
    Auth(user): Auth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AddTransactionRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.wallets.add_transaction(&user.user_id, request)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Transaction added successfully.")),
    ))
}

/// Remove a transaction. Unknown ids succeed without changes.
#[utoipa::path(
    delete,
    path = "/wallet/transaction/{transaction_id}",
    params(
        ("transaction_id" = String, Path, description = "Identifier of the transaction to remove")
    ),
    tag = "Wallet",
    responses(
        (status = 200, body = MessageResponse),
        (status = 401, description = "Missing or invalid auth token")
    )
)]
pub async fn remove_transaction(
    Auth(user): Auth,
    Path(transaction_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .wallets
        .remove_transaction(&user.user_id, &transaction_id)?;
    Ok(Json(MessageResponse::new("Transaction removed successfully.")))
}
