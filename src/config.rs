// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Environment variable names, default values and the [`Config`] loaded from
//! them at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `DATABASE_PATH` | redb file path, or `:memory:` | `data/portfolio.redb` |
//! | `JWT_SYMMETRIC_KEY` | HS256 key for auth tokens | Required |
//! | `AUTH_COOKIE_NAME` | Cookie carrying the auth token | `authToken` |
//! | `TLS_CERT_PATH` | PEM certificate chain | Optional |
//! | `TLS_KEY_PATH` | PEM private key | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! TLS is enabled only when both `TLS_CERT_PATH` and `TLS_KEY_PATH` are set.

use std::{fmt, net::SocketAddr, path::PathBuf};

use thiserror::Error;

use crate::auth::DEFAULT_AUTH_COOKIE;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Path of the redb database file.
///
/// The special value [`IN_MEMORY_DATABASE`] keeps all data in memory, which
/// is lost on shutdown.
pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";

/// Symmetric key used to verify HS256 auth tokens.
pub const JWT_SYMMETRIC_KEY_ENV: &str = "JWT_SYMMETRIC_KEY";
pub const AUTH_COOKIE_NAME_ENV: &str = "AUTH_COOKIE_NAME";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_PATH: &str = "data/portfolio.redb";
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
    #[error("cannot bind to {0:?}")]
    InvalidBindAddress(String),
    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    IncompleteTls,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// Anything other than `json` selects pretty output.
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

#[derive(Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database: DatabaseLocation,
    pub jwt_symmetric_key: String,
    pub auth_cookie_name: String,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var(PORT_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };
        let bind_addr = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBindAddress(format!("{host}:{port}")))?;

        let database = match var(DATABASE_PATH_ENV) {
            Some(path) if path.trim() == IN_MEMORY_DATABASE => DatabaseLocation::InMemory,
            Some(path) => DatabaseLocation::File(PathBuf::from(path)),
            None => DatabaseLocation::File(PathBuf::from(DEFAULT_DATABASE_PATH)),
        };

        let jwt_symmetric_key =
            var(JWT_SYMMETRIC_KEY_ENV).ok_or(ConfigError::Missing(JWT_SYMMETRIC_KEY_ENV))?;
        let auth_cookie_name =
            var(AUTH_COOKIE_NAME_ENV).unwrap_or_else(|| DEFAULT_AUTH_COOKIE.to_string());

        let tls = match (var(TLS_CERT_PATH_ENV), var(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls),
        };

        Ok(Self {
            bind_addr,
            database,
            jwt_symmetric_key,
            auth_cookie_name,
            tls,
            log_format: LogFormat::parse(var(LOG_FORMAT_ENV).as_deref()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("database", &self.database)
            .field("jwt_symmetric_key", &"<redacted>")
            .field("auth_cookie_name", &self.auth_cookie_name)
            .field("tls", &self.tls)
            .field("log_format", &self.log_format)
            .finish()
    }
}
