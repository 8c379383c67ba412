// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Persisted shape of a user aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Profile, User, UserAggregate, Wallet, Watchlist};

/// One stored document per user.
///
/// Wallet and watchlist are embedded; their ids are mirrored on the
/// [`User`] when the aggregate is rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    pub user_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    pub wallet: Wallet,
    pub watchlist: Watchlist,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserDocument {
    /// Build a fresh document from domain entities.
    pub fn from_entities(user: &User, wallet: &Wallet, watchlist: &Watchlist) -> Self {
        let now = Utc::now();
        Self {
            user_id: user.user_id.clone(),
            email: user.email.clone(),
            profile: user.profile.clone(),
            wallet: wallet.clone(),
            watchlist: watchlist.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the content of this document, keeping its creation time.
    pub fn replace_with(&mut self, next: UserDocument) {
        let created_at = self.created_at;
        *self = next;
        self.created_at = created_at;
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Rebuild the domain aggregate.
    pub fn into_aggregate(self) -> UserAggregate {
        let user = User {
            user_id: self.user_id,
            email: self.email,
            wallet_id: self.wallet.id.clone(),
            watchlist_id: self.watchlist.id.clone(),
            profile: self.profile,
        };

        UserAggregate {
            user,
            wallet: self.wallet,
            watchlist: self.watchlist,
        }
    }
}
