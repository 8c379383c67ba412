// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded document store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `users`: user_id → serialized [`UserDocument`] (JSON bytes)
//!
//! redb serializes write transactions, so every read-modify-write below is
//! atomic for the document it touches. Concurrent writers for the same user
//! interleave at operation granularity.

use std::path::Path;

use redb::{
    backends::InMemoryBackend, Database, ReadableDatabase, ReadableTable, TableDefinition,
};

use super::{StorageError, StorageResult, UserDocument, UserRepository};
use crate::domain::{Profile, Transaction, User, UserAggregate, Wallet, Watchlist, WatchlistItem};

/// Primary table: user_id → serialized UserDocument (JSON bytes).
const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// redb implementation of [`UserRepository`].
pub struct RedbUserRepository {
    db: Database,
}

impl RedbUserRepository {
    /// Open (or create) the database file at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;
        Self::with_database(db)
    }

    /// Open a database that lives only in memory.
    pub fn in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Self::with_database(db)
    }

    fn with_database(db: Database) -> StorageResult<Self> {
        // Pre-create the table so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    fn load(&self, user_id: &str) -> StorageResult<Option<UserDocument>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS)?;
        match table.get(user_id)? {
            Some(value) => {
                let doc: UserDocument = serde_json::from_slice(value.value())?;
                Ok(Some(doc))
            }
            None => Ok(None),
        }
    }

    /// Apply `mutate` to an existing document inside one write transaction.
    ///
    /// A missing document matches nothing: nothing is written and the call
    /// succeeds.
    fn modify<F>(&self, user_id: &str, mutate: F) -> StorageResult<()>
    where
        F: FnOnce(&mut UserDocument) -> StorageResult<()>,
    {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(USERS)?;

            let existing_bytes = match table.get(user_id)? {
                Some(existing) => existing.value().to_vec(),
                None => {
                    tracing::debug!(user_id = %user_id, "No document to update");
                    return Ok(());
                }
            };

            let mut doc: UserDocument = serde_json::from_slice(&existing_bytes)?;
            mutate(&mut doc)?;
            doc.touch();

            let json = serde_json::to_vec(&doc)?;
            table.insert(user_id, json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl UserRepository for RedbUserRepository {
    fn save_user(&self, user: &User, wallet: &Wallet, watchlist: &Watchlist) -> StorageResult<()> {
        let next = UserDocument::from_entities(user, wallet, watchlist);

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(USERS)?;

            let existing_bytes = {
                let existing = table.get(user.user_id.as_str())?;
                existing.map(|value| value.value().to_vec())
            };

            let doc = match existing_bytes {
                Some(bytes) => {
                    let mut doc: UserDocument = serde_json::from_slice(&bytes)?;
                    doc.replace_with(next);
                    doc
                }
                None => next,
            };

            let json = serde_json::to_vec(&doc)?;
            table.insert(user.user_id.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;

        tracing::debug!(user_id = %user.user_id, "Saved user document");
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> StorageResult<Option<UserAggregate>> {
        Ok(self.load(user_id)?.map(UserDocument::into_aggregate))
    }

    fn update_profile(&self, user_id: &str, profile: &Profile) -> StorageResult<()> {
        self.modify(user_id, |doc| {
            doc.profile = Some(profile.clone());
            Ok(())
        })
    }

    fn get_profile(&self, user_id: &str) -> StorageResult<Option<Profile>> {
        Ok(self.load(user_id)?.and_then(|doc| doc.profile))
    }

    fn get_wallet(&self, user_id: &str) -> StorageResult<Option<Wallet>> {
        Ok(self.load(user_id)?.map(|doc| doc.wallet))
    }

    fn add_transaction(&self, user_id: &str, transaction: &Transaction) -> StorageResult<()> {
        self.modify(user_id, |doc| {
            if doc.wallet.has_transaction(&transaction.transaction_id) {
                return Err(StorageError::DuplicateTransaction(
                    transaction.transaction_id.clone(),
                ));
            }
            doc.wallet.add_transaction(transaction.clone());
            Ok(())
        })
    }

    fn remove_transaction(&self, user_id: &str, transaction_id: &str) -> StorageResult<()> {
        self.modify(user_id, |doc| {
            doc.wallet.remove_transaction(transaction_id);
            Ok(())
        })
    }

    fn get_watchlist(&self, user_id: &str) -> StorageResult<Option<Watchlist>> {
        Ok(self.load(user_id)?.map(|doc| doc.watchlist))
    }

    fn add_to_watchlist(&self, user_id: &str, item: &WatchlistItem) -> StorageResult<()> {
        self.modify(user_id, |doc| {
            if doc.watchlist.has_item(&item.item_id) {
                return Err(StorageError::DuplicateWatchlistItem(item.item_id.clone()));
            }
            doc.watchlist.add_item(item.clone());
            Ok(())
        })
    }

    fn remove_from_watchlist(&self, user_id: &str, item_id: &str) -> StorageResult<()> {
        self.modify(user_id, |doc| {
            doc.watchlist.remove_item(item_id);
            Ok(())
        })
    }

    fn health_check(&self) -> StorageResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(USERS)?;
        Ok(())
    }
}
