// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Application service backing the user, wallet and watchlist endpoints.

use std::sync::Arc;

use super::{
    validation, ServiceError, ServiceResult, UserService, WalletService, WatchlistService,
};
use crate::domain::{
    generate_id, new_user_aggregate, Profile, Transaction, User, Wallet, Watchlist, WatchlistItem,
};
use crate::models::{
    AddTransactionRequest, AddWatchlistItemRequest, CreateUserRequest, UpdateProfileRequest,
};
use crate::storage::UserRepository;

/// Implements [`UserService`], [`WalletService`] and [`WatchlistService`]
/// over one repository.
#[derive(Clone)]
pub struct UserManagementService {
    repository: Arc<dyn UserRepository>,
}

impl UserManagementService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

/// Use the client-supplied id when it is non-blank, otherwise generate one.
fn id_or_generate(value: Option<String>) -> String {
    value
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate_id)
}

impl UserService for UserManagementService {
    fn create_user(&self, request: CreateUserRequest) -> ServiceResult<User> {
        let user_id = validation::required_text("userId", request.user_id.as_deref())?;
        let email = validation::required_text("email", request.email.as_deref())?;
        validation::email(&email)?;

        let aggregate = new_user_aggregate(user_id, email);
        self.repository
            .save_user(&aggregate.user, &aggregate.wallet, &aggregate.watchlist)?;

        tracing::info!(
            user_id = %aggregate.user.user_id,
            wallet_id = %aggregate.wallet.id,
            watchlist_id = %aggregate.watchlist.id,
            "User created"
        );
        Ok(aggregate.user)
    }

    fn get_user(&self, user_id: &str) -> ServiceResult<Option<User>> {
        Ok(self
            .repository
            .get_user(user_id)?
            .map(|aggregate| aggregate.user))
    }

    fn update_profile(&self, user_id: &str, request: UpdateProfileRequest) -> ServiceResult<()> {
        let name = validation::required_text("name", request.name.as_deref())?;
        let surname = validation::required_text("surname", request.surname.as_deref())?;
        let date_of_birth =
            validation::timestamp("dateOfBirth", request.date_of_birth.as_deref())?;

        self.repository
            .update_profile(user_id, &Profile::new(name, surname, date_of_birth))?;

        tracing::info!(user_id = %user_id, "Profile updated");
        Ok(())
    }

    fn get_profile(&self, user_id: &str) -> ServiceResult<Option<Profile>> {
        Ok(self.repository.get_profile(user_id)?)
    }
}

impl WalletService for UserManagementService {
    fn add_transaction(
        &self,
        user_id: &str,
        request: AddTransactionRequest,
    ) -> ServiceResult<Transaction> {
        let crypto_id = validation::required_text("cryptoId", request.crypto_id.as_deref())?;
        let quantity = validation::positive_number("quantity", request.quantity)?;
        let transaction_type = validation::transaction_type(request.transaction_type.as_deref())?;
        let done_at = validation::timestamp("doneAt", request.done_at.as_deref())?;
        let price_at_purchase =
            validation::positive_number("priceAtPurchase", request.price_at_purchase)?;
        let currency = validation::currency(request.currency.as_deref())?;

        let transaction = Transaction {
            transaction_id: id_or_generate(request.transaction_id),
            crypto_id,
            quantity,
            transaction_type,
            done_at,
            price_at_purchase,
            currency,
        };

        self.repository.add_transaction(user_id, &transaction)?;

        tracing::info!(
            user_id = %user_id,
            transaction_id = %transaction.transaction_id,
            crypto_id = %transaction.crypto_id,
            transaction_type = %transaction.transaction_type,
            "Transaction added"
        );
        Ok(transaction)
    }

    fn remove_transaction(&self, user_id: &str, transaction_id: &str) -> ServiceResult<()> {
        self.repository.remove_transaction(user_id, transaction_id)?;
        tracing::info!(user_id = %user_id, transaction_id = %transaction_id, "Transaction removed");
        Ok(())
    }

    fn get_wallet(&self, user_id: &str) -> ServiceResult<Option<Wallet>> {
        Ok(self.repository.get_wallet(user_id)?)
    }
}

impl WatchlistService for UserManagementService {
    fn add_item(
        &self,
        user_id: &str,
        request: AddWatchlistItemRequest,
    ) -> ServiceResult<WatchlistItem> {
        let crypto_id = validation::required_text("cryptoId", request.crypto_id.as_deref())?;
        let item = WatchlistItem::new(id_or_generate(request.item_id), crypto_id);

        self.repository.add_to_watchlist(user_id, &item)?;

        tracing::info!(
            user_id = %user_id,
            item_id = %item.item_id,
            crypto_id = %item.crypto_id,
            "Watchlist item added"
        );
        Ok(item)
    }

    fn remove_item(&self, user_id: &str, item_id: &str) -> ServiceResult<()> {
        if item_id.trim().is_empty() {
            return Err(ServiceError::validation("itemId", "itemId is required."));
        }
        self.repository.remove_from_watchlist(user_id, item_id)?;
        tracing::info!(user_id = %user_id, item_id = %item_id, "Watchlist item removed");
        Ok(())
    }

    fn get_watchlist(&self, user_id: &str) -> ServiceResult<Option<Watchlist>> {
        Ok(self.repository.get_watchlist(user_id)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TransactionType, UserAggregate};
    use crate::storage::{RedbUserRepository, StorageError, StorageResult};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service() -> UserManagementService {
        UserManagementService::new(Arc::new(RedbUserRepository::in_memory().unwrap()))
    }

    fn service_with_user(user_id: &str) -> UserManagementService {
        let service = service();
        service
            .create_user(CreateUserRequest {
                user_id: Some(user_id.to_string()),
                email: Some("a@b.com".to_string()),
            })
            .unwrap();
        service
    }

    fn valid_transaction() -> AddTransactionRequest {
        AddTransactionRequest {
            transaction_id: None,
            crypto_id: Some("BTC".to_string()),
            quantity: Some(0.001),
            transaction_type: Some("buy".to_string()),
            done_at: Some("2024-05-01T10:00:00Z".to_string()),
            price_at_purchase: Some(30_000.0),
            currency: Some("eur".to_string()),
        }
    }

    /// Repository that counts writes and fails every call.
    #[derive(Default)]
    struct FailingRepository {
        writes: AtomicUsize,
    }

    impl FailingRepository {
        fn fail<T>(&self) -> StorageResult<T> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::Io(std::io::Error::other("disk on fire")))
        }
    }

    impl UserRepository for FailingRepository {
        fn save_user(&self, _: &User, _: &Wallet, _: &Watchlist) -> StorageResult<()> {
            self.fail()
        }
        fn get_user(&self, _: &str) -> StorageResult<Option<UserAggregate>> {
            self.fail()
        }
        fn update_profile(&self, _: &str, _: &Profile) -> StorageResult<()> {
            self.fail()
        }
        fn get_profile(&self, _: &str) -> StorageResult<Option<Profile>> {
            self.fail()
        }
        fn get_wallet(&self, _: &str) -> StorageResult<Option<Wallet>> {
            self.fail()
        }
        fn add_transaction(&self, _: &str, _: &Transaction) -> StorageResult<()> {
            self.fail()
        }
        fn remove_transaction(&self, _: &str, _: &str) -> StorageResult<()> {
            self.fail()
        }
        fn get_watchlist(&self, _: &str) -> StorageResult<Option<Watchlist>> {
            self.fail()
        }
        fn add_to_watchlist(&self, _: &str, _: &WatchlistItem) -> StorageResult<()> {
            self.fail()
        }
        fn remove_from_watchlist(&self, _: &str, _: &str) -> StorageResult<()> {
            self.fail()
        }
        fn health_check(&self) -> StorageResult<()> {
            self.fail()
        }
    }

    #[test]
    fn new_user_has_no_profile() {
        let service = service_with_user("u1");
        assert!(service.get_profile("u1").unwrap().is_none());

        let user = service.get_user("u1").unwrap().unwrap();
        assert_eq!(user.email, "a@b.com");
        assert!(!user.wallet_id.is_empty());
        assert!(!user.watchlist_id.is_empty());
    }

    #[test]
    fn create_user_requires_fields() {
        let service = service();

        let err = service
            .create_user(CreateUserRequest {
                user_id: None,
                email: Some("a@b.com".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { field: "userId", .. }));

        let err = service
            .create_user(CreateUserRequest {
                user_id: Some("u1".to_string()),
                email: Some("not-an-email".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { field: "email", .. }));
    }

    #[test]
    fn create_user_surfaces_persistence_failure() {
        let service = UserManagementService::new(Arc::new(FailingRepository::default()));
        let err = service
            .create_user(CreateUserRequest {
                user_id: Some("u1".to_string()),
                email: Some("a@b.com".to_string()),
            })
            .unwrap_err();
        assert!(matches!(err, ServiceError::Persistence(StorageError::Io(_))));
    }

    #[test]
    fn update_profile_replaces_wholesale() {
        let service = service_with_user("u1");
        service
            .update_profile(
                "u1",
                UpdateProfileRequest {
                    name: Some("Ada".to_string()),
                    surname: Some("Lovelace".to_string()),
                    date_of_birth: Some("1815-12-10".to_string()),
                },
            )
            .unwrap();

        let profile = service.get_profile("u1").unwrap().unwrap();
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.date_of_birth.to_rfc3339(), "1815-12-10T00:00:00+00:00");

        let err = service
            .update_profile(
                "u1",
                UpdateProfileRequest {
                    name: Some("Grace".to_string()),
                    surname: None,
                    date_of_birth: Some("1906-12-09".to_string()),
                },
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { field: "surname", .. }));
        assert_eq!(service.get_profile("u1").unwrap().unwrap().name, "Ada");
    }

    #[test]
    fn mutations_for_unknown_user_succeed_without_creating_it() {
        let service = service();
        service
            .update_profile(
                "ghost",
                UpdateProfileRequest {
                    name: Some("Ada".to_string()),
                    surname: Some("Lovelace".to_string()),
                    date_of_birth: Some("1815-12-10".to_string()),
                },
            )
            .unwrap();
        service.add_transaction("ghost", valid_transaction()).unwrap();
        service.remove_transaction("ghost", "t1").unwrap();
        service.remove_item("ghost", "i1").unwrap();

        assert!(service.get_user("ghost").unwrap().is_none());
        assert!(service.get_profile("ghost").unwrap().is_none());
        assert!(service.get_wallet("ghost").unwrap().is_none());
    }

    #[test]
    fn duplicate_client_ids_are_validation_errors() {
        let service = service_with_user("u1");
        let mut request = valid_transaction();
        request.transaction_id = Some("tx-1".to_string());
        service.add_transaction("u1", request.clone()).unwrap();

        match service.add_transaction("u1", request) {
            Err(ServiceError::Validation { field, message }) => {
                assert_eq!(field, "transactionId");
                assert_eq!(message, "transactionId tx-1 already exists.");
            }
            other => panic!("expected duplicate id rejection, got {other:?}"),
        }
        assert_eq!(service.get_wallet("u1").unwrap().unwrap().transactions().len(), 1);

        let item = AddWatchlistItemRequest {
            item_id: Some("w-1".to_string()),
            crypto_id: Some("ethereum".to_string()),
        };
        service.add_item("u1", item.clone()).unwrap();
        let err = service.add_item("u1", item).unwrap_err();
        assert!(matches!(err, ServiceError::Validation { field: "itemId", .. }));
    }

    #[test]
    fn added_transaction_round_trips_through_wallet() {
        let service = service_with_user("u1");
        let stored = service.add_transaction("u1", valid_transaction()).unwrap();

        assert!(!stored.transaction_id.is_empty());
        assert_eq!(stored.currency, "EUR");
        assert_eq!(stored.transaction_type, TransactionType::Buy);

        let wallet = service.get_wallet("u1").unwrap().unwrap();
        assert_eq!(wallet.transactions(), &[stored]);
    }

    #[test]
    fn add_transaction_keeps_client_id_and_defaults_currency() {
        let service = service_with_user("u1");
        let mut request = valid_transaction();
        request.transaction_id = Some("tx-42".to_string());
        request.currency = None;

        let stored = service.add_transaction("u1", request).unwrap();
        assert_eq!(stored.transaction_id, "tx-42");
        assert_eq!(stored.currency, "USD");
    }

    #[test]
    fn invalid_transactions_never_reach_the_repository() {
        let repository = Arc::new(FailingRepository::default());
        let service = UserManagementService::new(repository.clone());

        let cases: Vec<(&str, AddTransactionRequest)> = vec![
            (
                "cryptoId",
                AddTransactionRequest {
                    crypto_id: Some("".into()),
                    ..valid_transaction()
                },
            ),
            (
                "quantity",
                AddTransactionRequest {
                    quantity: Some(0.0),
                    ..valid_transaction()
                },
            ),
            (
                "quantity",
                AddTransactionRequest {
                    quantity: Some(-1.0),
                    ..valid_transaction()
                },
            ),
            (
                "type",
                AddTransactionRequest {
                    transaction_type: Some("HOLD".into()),
                    ..valid_transaction()
                },
            ),
            (
                "doneAt",
                AddTransactionRequest {
                    done_at: Some("not a date".into()),
                    ..valid_transaction()
                },
            ),
            (
                "priceAtPurchase",
                AddTransactionRequest {
                    price_at_purchase: Some(0.0),
                    ..valid_transaction()
                },
            ),
            (
                "currency",
                AddTransactionRequest {
                    currency: Some(" ".into()),
                    ..valid_transaction()
                },
            ),
        ];

        for (expected_field, request) in cases {
            match service.add_transaction("u1", request) {
                Err(ServiceError::Validation { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("expected validation error for {expected_field}, got {other:?}"),
            }
        }

        assert_eq!(repository.writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn remove_unknown_transaction_is_idempotent() {
        let service = service_with_user("u1");
        service.add_transaction("u1", valid_transaction()).unwrap();

        service.remove_transaction("u1", "missing").unwrap();
        service.remove_transaction("u1", "missing").unwrap();

        assert_eq!(service.get_wallet("u1").unwrap().unwrap().transactions().len(), 1);
    }

    #[test]
    fn watchlist_add_and_remove() {
        let service = service_with_user("u1");
        let item = service
            .add_item(
                "u1",
                AddWatchlistItemRequest {
                    item_id: None,
                    crypto_id: Some("ethereum".to_string()),
                },
            )
            .unwrap();

        let watchlist = service.get_watchlist("u1").unwrap().unwrap();
        assert_eq!(watchlist.items(), &[item.clone()]);

        service.remove_item("u1", &item.item_id).unwrap();
        service.remove_item("u1", "never-existed").unwrap();
        assert!(service.get_watchlist("u1").unwrap().unwrap().items().is_empty());
    }

    #[test]
    fn add_item_requires_crypto_id() {
        let service = service_with_user("u1");
        let err = service
            .add_item("u1", AddWatchlistItemRequest::default())
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { field: "cryptoId", .. }));

        let err = service.remove_item("u1", "  ").unwrap_err();
        assert!(matches!(err, ServiceError::Validation { field: "itemId", .. }));
    }

    #[test]
    fn getters_return_none_for_unknown_user() {
        let service = service();
        assert!(service.get_user("ghost").unwrap().is_none());
        assert!(service.get_profile("ghost").unwrap().is_none());
        assert!(service.get_wallet("ghost").unwrap().is_none());
        assert!(service.get_watchlist("ghost").unwrap().is_none());
    }
}
