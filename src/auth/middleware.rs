// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applied with `route_layer` to the protected router subtree, so requests
//! without a valid token are answered before any handler or service runs.
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/wallet", get(get_wallet))
//!     .route_layer(axum::middleware::from_fn_with_state(
//!         auth_config.clone(),
//!         require_auth,
//!     ));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::COOKIE, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, AuthProvider};

/// Cookie carrying the auth token unless configured otherwise.
pub const DEFAULT_AUTH_COOKIE: &str = "authToken";

/// Authentication configuration.
#[derive(Clone)]
pub struct AuthConfig {
    /// Token verifier
    pub provider: Arc<dyn AuthProvider>,
    /// Name of the cookie carrying the token
    pub cookie_name: String,
}

impl AuthConfig {
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self {
            provider,
            cookie_name: DEFAULT_AUTH_COOKIE.to_string(),
        }
    }

    /// Set the auth cookie name.
    pub fn with_cookie_name(mut self, cookie_name: impl Into<String>) -> Self {
        self.cookie_name = cookie_name.into();
        self
    }
}

/// Authentication middleware function.
///
/// Verifies the token cookie and stores the resolved
/// [`AuthenticatedUser`](super::AuthenticatedUser) in the request extensions.
pub async fn require_auth(
    State(config): State<AuthConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match cookie_value(request.headers(), &config.cookie_name) {
        Some(token) => token,
        None => {
            tracing::debug!(path = %request.uri().path(), "Request without auth token");
            return AuthError::MissingAuthToken.into_response();
        }
    };

    let user = match config.provider.verify(&token) {
        Ok(user) => user,
        Err(AuthError::InternalError(reason)) => {
            tracing::error!(reason = %reason, "Auth provider failed to verify token");
            return AuthError::InternalError(reason).into_response();
        }
        Err(err) => {
            tracing::warn!(
                path = %request.uri().path(),
                error_code = err.error_code(),
                "Rejected auth token"
            );
            return err.into_response();
        }
    };

    tracing::debug!(
        user_id = %user.user_id,
        expires_at = ?user.expires_at,
        "Authenticated request"
    );
    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Find a cookie by name across all `Cookie` headers.
///
/// Empty values count as absent.
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Auth, AuthenticatedUser};
    use axum::{
        body::{to_bytes, Body},
        http::{HeaderValue, Request, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    enum StaticProvider {
        Accepts(&'static str),
        Down,
    }

    impl AuthProvider for StaticProvider {
        fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            match self {
                StaticProvider::Accepts(expected) if *expected == token => Ok(AuthenticatedUser {
                    user_id: "u1".into(),
                    expires_at: None,
                }),
                StaticProvider::Accepts(_) => Err(AuthError::InvalidSignature),
                StaticProvider::Down => Err(AuthError::InternalError("down".into())),
            }
        }
    }

    fn app(provider: StaticProvider, hits: Arc<AtomicUsize>) -> Router {
        let config = AuthConfig::new(Arc::new(provider));
        Router::new()
            .route(
                "/protected",
                get(move |Auth(user): Auth| {
                    let hits = hits.clone();
                    async move {
                        hits.fetch_add(1, Ordering::SeqCst);
                        user.user_id
                    }
                }),
            )
            .route_layer(from_fn_with_state(config, require_auth))
    }

    fn request(cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/protected");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn valid_cookie_reaches_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(StaticProvider::Accepts("good"), hits.clone())
            .oneshot(request(Some("theme=dark; authToken=good")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"u1");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_cookie_is_rejected_before_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(StaticProvider::Accepts("good"), hits.clone())
            .oneshot(request(Some("theme=dark")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Unauthorized: No auth token provided.");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_token_is_rejected_before_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(StaticProvider::Accepts("good"), hits.clone())
            .oneshot(request(Some("authToken=forged")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "Unauthorized: Invalid auth token.");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn provider_failure_returns_500() {
        let hits = Arc::new(AtomicUsize::new(0));
        let response = app(StaticProvider::Down, hits.clone())
            .oneshot(request(Some("authToken=anything")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cookie_value_parses_multiple_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1; b=2"));
        headers.append(COOKIE, HeaderValue::from_static("authToken=abc"));

        assert_eq!(cookie_value(&headers, "authToken").as_deref(), Some("abc"));
        assert_eq!(cookie_value(&headers, "b").as_deref(), Some("2"));
        assert_eq!(cookie_value(&headers, "c"), None);
    }

    #[test]
    fn empty_cookie_counts_as_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("authToken="));
        assert_eq!(cookie_value(&headers, "authToken"), None);
    }
}
