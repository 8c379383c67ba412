// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Construction of a new user aggregate.

use super::{generate_id, User, Wallet, Watchlist};

/// A user together with the wallet and watchlist it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAggregate {
    pub user: User,
    pub wallet: Wallet,
    pub watchlist: Watchlist,
}

/// Build a new user with an empty wallet and an empty watchlist.
///
/// Wallet and watchlist ids are freshly generated and linked from the user.
pub fn new_user_aggregate(user_id: impl Into<String>, email: impl Into<String>) -> UserAggregate {
    let wallet = Wallet::new(generate_id());
    let watchlist = Watchlist::new(generate_id());
    let user = User::new(user_id, email, wallet.id.clone(), watchlist.id.clone());

    UserAggregate {
        user,
        wallet,
        watchlist,
    }
}
