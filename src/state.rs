// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::AuthConfig;
use crate::service::{
    user_management::UserManagementService, UserService, WalletService, WatchlistService,
};
use crate::storage::UserRepository;

/// Shared handler state.
///
/// Services are held as trait objects so tests can substitute their own.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub wallets: Arc<dyn WalletService>,
    pub watchlists: Arc<dyn WatchlistService>,
    /// Checked by the readiness endpoint.
    pub repository: Arc<dyn UserRepository>,
    pub auth_config: AuthConfig,
}

impl AppState {
    /// Wire the default [`UserManagementService`] over `repository`.
    pub fn new(repository: Arc<dyn UserRepository>, auth_config: AuthConfig) -> Self {
        let service = Arc::new(UserManagementService::new(repository.clone()));
        Self {
            users: service.clone(),
            wallets: service.clone(),
            watchlists: service,
            repository,
            auth_config,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// Key used by [`AppState::for_tests`] to verify tokens.
    pub(crate) const TEST_SIGNING_KEY: &'static [u8] = b"test-signing-key";

    /// State over an in-memory repository.
    pub(crate) fn for_tests() -> Self {
        use crate::auth::JwtAuthProvider;
        use crate::storage::RedbUserRepository;

        let repository = Arc::new(RedbUserRepository::in_memory().unwrap());
        let provider = Arc::new(JwtAuthProvider::new(Self::TEST_SIGNING_KEY));
        Self::new(repository, AuthConfig::new(provider))
    }
}
