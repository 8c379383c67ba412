// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Domain Model
//!
//! The aggregate managed by this service is a [`User`] together with exactly
//! one [`Wallet`] and one [`Watchlist`]. The three are created together by
//! [`new_user_aggregate`] and persisted as a single document.
//!
//! All entities derive `Serialize`/`ToSchema` with camelCase field names; the
//! serialized form is the JSON returned by the HTTP API.

pub mod factory;
pub mod user;
pub mod wallet;
pub mod watchlist;

pub use factory::{new_user_aggregate, UserAggregate};
pub use user::{Profile, User};
pub use wallet::{Transaction, TransactionType, Wallet, DEFAULT_CURRENCY};
pub use watchlist::{Watchlist, WatchlistItem};

/// Generate a fresh identifier for wallets, watchlists, transactions and items.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
