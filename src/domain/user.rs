// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User and profile entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Personal details attached to a user.
///
/// A profile is always replaced as a whole; there is no partial update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub surname: String,
    pub date_of_birth: DateTime<Utc>,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        date_of_birth: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            date_of_birth,
        }
    }
}

/// A registered user.
///
/// `user_id` is the external identity (the subject of the auth token).
/// `wallet_id` and `watchlist_id` link to the wallet and watchlist created
/// together with the user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub wallet_id: String,
    pub watchlist_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
}

impl User {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        wallet_id: impl Into<String>,
        watchlist_id: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            wallet_id: wallet_id.into(),
            watchlist_id: watchlist_id.into(),
            profile: None,
        }
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Replace the profile wholesale.
    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }
}
