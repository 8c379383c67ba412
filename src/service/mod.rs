// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Application Services
//!
//! Three service contracts sit between the HTTP adapters and the repository:
//!
//! - [`UserService`] - sign-up and profile management
//! - [`WalletService`] - transaction ledger
//! - [`WatchlistService`] - tracked assets
//!
//! [`UserManagementService`] implements all three over a single
//! [`UserRepository`](crate::storage::UserRepository). Inbound requests are
//! validated here, before any persistence call.

pub mod user_management;
pub mod validation;

pub use user_management::UserManagementService;

use crate::domain::{Profile, Transaction, User, Wallet, Watchlist, WatchlistItem};
use crate::models::{
    AddTransactionRequest, AddWatchlistItemRequest, CreateUserRequest, UpdateProfileRequest,
};
use crate::storage::StorageError;

/// Error type for application service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Bad or missing input. Field checks run before any persistence call;
    /// duplicate ids are detected by the store.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The store failed; never retried.
    #[error("persistence failure: {0}")]
    Persistence(#[source] StorageError),
}

impl ServiceError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::DuplicateTransaction(id) => ServiceError::validation(
                "transactionId",
                format!("transactionId {id} already exists."),
            ),
            StorageError::DuplicateWatchlistItem(id) => {
                ServiceError::validation("itemId", format!("itemId {id} already exists."))
            }
            other => ServiceError::Persistence(other),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// User account operations.
pub trait UserService: Send + Sync {
    /// Create a user with an empty wallet and watchlist.
    fn create_user(&self, request: CreateUserRequest) -> ServiceResult<User>;

    fn get_user(&self, user_id: &str) -> ServiceResult<Option<User>>;

    /// Replace the user's profile wholesale. A no-op for unknown users.
    fn update_profile(&self, user_id: &str, request: UpdateProfileRequest) -> ServiceResult<()>;

    /// `None` when the user or the profile does not exist.
    fn get_profile(&self, user_id: &str) -> ServiceResult<Option<Profile>>;
}

/// Wallet ledger operations.
pub trait WalletService: Send + Sync {
    /// Validate and append a transaction. Returns the stored transaction.
    fn add_transaction(
        &self,
        user_id: &str,
        request: AddTransactionRequest,
    ) -> ServiceResult<Transaction>;

    /// Remove a transaction by id. Unknown ids are a no-op.
    fn remove_transaction(&self, user_id: &str, transaction_id: &str) -> ServiceResult<()>;

    fn get_wallet(&self, user_id: &str) -> ServiceResult<Option<Wallet>>;
}

/// Watchlist operations.
pub trait WatchlistService: Send + Sync {
    /// Validate and append an item. Returns the stored item.
    fn add_item(
        &self,
        user_id: &str,
        request: AddWatchlistItemRequest,
    ) -> ServiceResult<WatchlistItem>;

    /// Remove an item by id. Unknown ids are a no-op.
    fn remove_item(&self, user_id: &str, item_id: &str) -> ServiceResult<()>;

    fn get_watchlist(&self, user_id: &str) -> ServiceResult<Option<Watchlist>>;
}
