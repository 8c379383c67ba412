// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Watchlist of tracked crypto assets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A tracked asset. Unlike a transaction it carries no quantity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    pub item_id: String,
    pub crypto_id: String,
    pub added_at: DateTime<Utc>,
}

impl WatchlistItem {
    pub fn new(item_id: impl Into<String>, crypto_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            crypto_id: crypto_id.into(),
            added_at: Utc::now(),
        }
    }
}

/// Watchlist owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Watchlist {
    pub id: String,
    #[serde(default)]
    pub items: Vec<WatchlistItem>,
}

impl Watchlist {
    /// Create an empty watchlist.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, item: WatchlistItem) {
        self.items.push(item);
    }

    /// Remove the item with the given id. Unknown ids are ignored.
    pub fn remove_item(&mut self, item_id: &str) {
        self.items.retain(|item| item.item_id != item_id);
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.item_id == item_id)
    }

    pub fn items(&self) -> &[WatchlistItem] {
        &self.items
    }
}
