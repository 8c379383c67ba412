// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated user representation.

use serde::{Deserialize, Serialize};

use super::AuthError;

/// Claims read from an auth token.
///
/// Tokens issued for this service carry the user id in `userId`; tokens
/// following the JWT convention carry it in `sub`. Either is accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Application user id
    #[serde(default, rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Standard subject claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// Authenticated user attached to a request after successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    /// Token expiry, if the token carried one.
    pub expires_at: Option<i64>,
}

impl AuthenticatedUser {
    /// Build an authenticated user from verified claims.
    pub fn from_claims(claims: TokenClaims) -> Result<Self, AuthError> {
        let user_id = claims
            .user_id
            .filter(|id| !id.is_empty())
            .or(claims.sub.filter(|id| !id.is_empty()))
            .ok_or(AuthError::MissingSubject)?;

        Ok(Self {
            user_id,
            expires_at: claims.exp,
        })
    }
}
