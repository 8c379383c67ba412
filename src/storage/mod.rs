// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Document Storage
//!
//! Each user aggregate (user, wallet, watchlist, optional profile) is stored
//! as a single JSON document keyed by `userId`.
//!
//! ## Layout
//!
//! ```text
//! users (redb table)
//!   {user_id} -> {
//!     "userId", "email", "profile"?,
//!     "wallet":    { "id", "transactions": [...] },
//!     "watchlist": { "id", "items": [...] },
//!     "createdAt", "updatedAt"
//!   }
//! ```
//!
//! The application layer only sees the [`UserRepository`] port. Every
//! operation touches exactly one document; mutations run inside a single
//! write transaction so appends and removals are atomic per document.

pub mod document;
pub mod user_store;

pub use document::UserDocument;
pub use user_store::RedbUserRepository;

use crate::domain::{Profile, Transaction, User, UserAggregate, Wallet, Watchlist, WatchlistItem};

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The wallet already holds a transaction with this id.
    #[error("duplicate transaction id: {0}")]
    DuplicateTransaction(String),

    /// The watchlist already holds an item with this id.
    #[error("duplicate watchlist item id: {0}")]
    DuplicateWatchlistItem(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence port for the user aggregate.
///
/// All operations are scoped to the aggregate identified by `user_id`.
/// Mutations addressed to a user with no stored document match nothing and
/// succeed without writing. Removing an unknown transaction or item id is a
/// no-op.
pub trait UserRepository: Send + Sync {
    /// Insert or replace the whole aggregate.
    fn save_user(&self, user: &User, wallet: &Wallet, watchlist: &Watchlist) -> StorageResult<()>;

    fn get_user(&self, user_id: &str) -> StorageResult<Option<UserAggregate>>;

    /// Replace the profile of an existing user.
    fn update_profile(&self, user_id: &str, profile: &Profile) -> StorageResult<()>;

    fn get_profile(&self, user_id: &str) -> StorageResult<Option<Profile>>;

    fn get_wallet(&self, user_id: &str) -> StorageResult<Option<Wallet>>;

    /// Append a transaction to the user's wallet.
    ///
    /// Fails with [`StorageError::DuplicateTransaction`] if the id is taken.
    fn add_transaction(&self, user_id: &str, transaction: &Transaction) -> StorageResult<()>;

    /// Delete a transaction from the user's wallet by id.
    fn remove_transaction(&self, user_id: &str, transaction_id: &str) -> StorageResult<()>;

    fn get_watchlist(&self, user_id: &str) -> StorageResult<Option<Watchlist>>;

    /// Append an item to the user's watchlist.
    ///
    /// Fails with [`StorageError::DuplicateWatchlistItem`] if the id is taken.
    fn add_to_watchlist(&self, user_id: &str, item: &WatchlistItem) -> StorageResult<()>;

    /// Delete an item from the user's watchlist by id.
    fn remove_from_watchlist(&self, user_id: &str, item_id: &str) -> StorageResult<()>;

    /// Verify the store can serve reads.
    fn health_check(&self) -> StorageResult<()>;
}
