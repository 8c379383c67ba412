// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Cookie-based JWT authentication for the portfolio API.
//!
//! ## Auth Flow
//!
//! 1. The client sends the token in the `authToken` cookie
//! 2. [`middleware::require_auth`] extracts the cookie and hands the token to
//!    the configured [`AuthProvider`]
//! 3. On success the resolved [`AuthenticatedUser`] is attached to the
//!    request extensions and handlers read it through the [`Auth`] extractor
//!
//! ## Outcomes
//!
//! - Missing, malformed, expired or badly signed token → 401
//! - Provider failure → 500
//!
//! The default provider, [`JwtAuthProvider`], verifies HS256 tokens against a
//! symmetric key. The user id is taken from the `userId` claim, falling back
//! to `sub`.

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod provider;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::{require_auth, AuthConfig, DEFAULT_AUTH_COOKIE};
pub use provider::{AuthProvider, JwtAuthProvider};
