// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::FromRequest,
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_auth,
    domain::{Profile, Transaction, TransactionType, User, Wallet, Watchlist, WatchlistItem},
    error::ApiError,
    models::{
        AddTransactionRequest, AddWatchlistItemRequest, CreateUserRequest, MessageResponse,
        UpdateProfileRequest,
    },
    state::AppState,
};

pub mod health;
pub mod users;
pub mod wallet;
pub mod watchlist;

/// JSON body extractor whose rejection is a 400 with the usual error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/users/me", get(users::get_current_user))
        .route(
            "/users/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/wallet", get(wallet::get_wallet))
        .route("/wallet/transaction", post(wallet::add_transaction))
        .route(
            "/wallet/transaction/{transaction_id}",
            delete(wallet::remove_transaction),
        )
        .route(
            "/watchlist",
            get(watchlist::get_watchlist).post(watchlist::add_item),
        )
        .route("/watchlist/{item_id}", delete(watchlist::remove_item))
        .route_layer(middleware::from_fn_with_state(
            state.auth_config.clone(),
            require_auth,
        ));

    let public_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/users", post(users::create_user));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::readiness,
        users::create_user,
        users::get_current_user,
        users::get_profile,
        users::update_profile,
        wallet::get_wallet,
        wallet::add_transaction,
        wallet::remove_transaction,
        watchlist::get_watchlist,
        watchlist::add_item,
        watchlist::remove_item
    ),
    components(
        schemas(
            User,
            Profile,
            Wallet,
            Transaction,
            TransactionType,
            Watchlist,
            WatchlistItem,
            MessageResponse,
            CreateUserRequest,
            UpdateProfileRequest,
            AddTransactionRequest,
            AddWatchlistItemRequest,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness checks"),
        (name = "Users", description = "Registration and profiles"),
        (name = "Wallet", description = "Transaction ledger"),
        (name = "Watchlist", description = "Tracked assets")
    )
)]
struct ApiDoc;
