// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Portfolio Server - User, Wallet & Watchlist Service
//!
//! Each user owns exactly one wallet (a ledger of crypto buy/sell
//! transactions) and one watchlist (tracked assets). The three are persisted
//! together as one document per user.
//!
//! ## Modules
//!
//! - `domain` - Entities and the user aggregate factory
//! - `storage` - `UserRepository` port and the redb document store
//! - `service` - Validation and the user/wallet/watchlist use cases
//! - `auth` - Cookie JWT verification (middleware + extractor)
//! - `api` - HTTP API handlers (Axum)

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod models;
pub mod service;
pub mod state;
pub mod storage;
