// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token verification providers.

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};

use super::{AuthError, AuthenticatedUser, TokenClaims};

/// Clock skew tolerance for `exp`/`nbf` validation, in seconds.
pub const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Verifies an auth token and resolves the user it belongs to.
///
/// Implementations return [`AuthError::InternalError`] when verification
/// itself could not be carried out; every other error means the token was
/// rejected.
pub trait AuthProvider: Send + Sync {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// HS256 JWT verification against a shared symmetric key.
pub struct JwtAuthProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthProvider {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        // Tokens without `exp` are accepted; `exp` is still checked when present.
        validation.required_spec_claims.clear();
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl AuthProvider for JwtAuthProvider {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(map_jwt_error)?;
        AuthenticatedUser::from_claims(data.claims)
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidKeyFormat => AuthError::InternalError(err.to_string()),
        _ => AuthError::MalformedToken,
    }
}
