// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies used by the REST API. Request fields are
//! optional at the type level so that a missing field is reported as a
//! validation error naming that field, not as a deserialization failure.
//!
//! ## Model Categories
//!
//! - **Users**: sign-up and profile update
//! - **Wallet**: transaction recording
//! - **Watchlist**: tracked assets
//!
//! Domain entities ([`crate::domain`]) are returned as-is in responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Generic Responses
// =============================================================================

/// Confirmation returned by mutating endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// User Models
// =============================================================================

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// External identity of the user (the auth token subject).
    pub user_id: Option<String>,
    pub email: Option<String>,
}

/// Request to replace the user's profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub surname: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub date_of_birth: Option<String>,
}

// =============================================================================
// Wallet Models
// =============================================================================

/// Request to record a wallet transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddTransactionRequest {
    /// Client-chosen id; generated when absent.
    pub transaction_id: Option<String>,
    pub crypto_id: Option<String>,
    pub quantity: Option<f64>,
    /// `BUY` or `SELL` (case-insensitive).
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub done_at: Option<String>,
    pub price_at_purchase: Option<f64>,
    /// Defaults to `USD`; stored upper-case.
    pub currency: Option<String>,
}

// =============================================================================
// Watchlist Models
// =============================================================================

/// Request to start tracking an asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWatchlistItemRequest {
    /// Client-chosen id; generated when absent.
    pub item_id: Option<String>,
    pub crypto_id: Option<String>,
}
