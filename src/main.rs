// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{error::Error, sync::Arc, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use portfolio_server::{
    api::router,
    auth::{AuthConfig, JwtAuthProvider},
    config::{Config, DatabaseLocation},
    logging,
    state::AppState,
    storage::{RedbUserRepository, UserRepository},
};

/// Time allowed for in-flight requests after a shutdown signal.
const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    logging::init(config.log_format);
    tracing::debug!(?config, "Configuration loaded");

    let repository: Arc<dyn UserRepository> = match &config.database {
        DatabaseLocation::File(path) => {
            tracing::info!(path = %path.display(), "Opening document store");
            Arc::new(RedbUserRepository::open(path)?)
        }
        DatabaseLocation::InMemory => {
            tracing::warn!("Using in-memory document store, data is lost on shutdown");
            Arc::new(RedbUserRepository::in_memory()?)
        }
    };

    let provider = Arc::new(JwtAuthProvider::new(config.jwt_symmetric_key.as_bytes()));
    let auth_config = AuthConfig::new(provider).with_cookie_name(config.auth_cookie_name.clone());

    let app = router(AppState::new(repository, auth_config));

    let handle = Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, draining connections");
        shutdown_handle.graceful_shutdown(Some(SHUTDOWN_GRACE_PERIOD));
    });

    match &config.tls {
        Some(tls) => {
            // Must be installed before any TLS operation.
            if rustls::crypto::ring::default_provider()
                .install_default()
                .is_err()
            {
                tracing::debug!("rustls crypto provider already installed");
            }
            let tls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;

            tracing::info!(addr = %config.bind_addr, "Portfolio server listening on https (docs at /docs)");
            axum_server::bind_rustls(config.bind_addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            tracing::info!(addr = %config.bind_addr, "Portfolio server listening on http (docs at /docs)");
            axum_server::bind(config.bind_addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
