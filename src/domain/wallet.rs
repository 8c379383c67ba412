// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet ledger: an ordered list of buy/sell transactions.
//!
//! Transactions are immutable once recorded. The wallet only supports
//! appending a transaction and removing one by id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Currency used when a transaction does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Direction of a wallet transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    /// Parse a transaction type (case-insensitive).
    pub fn parse(s: &str) -> Option<TransactionType> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Some(TransactionType::Buy),
            "SELL" => Some(TransactionType::Sell),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Buy => write!(f, "BUY"),
            TransactionType::Sell => write!(f, "SELL"),
        }
    }
}

/// A single recorded buy or sell of a crypto asset.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    /// Asset identifier (e.g. "bitcoin", "BTC").
    pub crypto_id: String,
    /// Strictly positive amount of the asset.
    pub quantity: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub done_at: DateTime<Utc>,
    /// Strictly positive unit price in `currency`.
    pub price_at_purchase: f64,
    /// Upper-case currency code.
    pub currency: String,
}

/// Wallet owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Wallet {
    /// Create an empty wallet.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            transactions: Vec::new(),
        }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Remove the transaction with the given id. Unknown ids are ignored.
    pub fn remove_transaction(&mut self, transaction_id: &str) {
        self.transactions
            .retain(|tx| tx.transaction_id != transaction_id);
    }

    pub fn has_transaction(&self, transaction_id: &str) -> bool {
        self.transactions
            .iter()
            .any(|tx| tx.transaction_id == transaction_id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx(id: &str) -> Transaction {
        Transaction {
            transaction_id: id.to_string(),
            crypto_id: "bitcoin".to_string(),
            quantity: 0.5,
            transaction_type: TransactionType::Buy,
            done_at: Utc::now(),
            price_at_purchase: 30_000.0,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    #[test]
    fn parse_transaction_type_is_case_insensitive() {
        assert_eq!(TransactionType::parse("buy"), Some(TransactionType::Buy));
        assert_eq!(TransactionType::parse("SELL"), Some(TransactionType::Sell));
        assert_eq!(TransactionType::parse("Sell"), Some(TransactionType::Sell));
        assert_eq!(TransactionType::parse("hold"), None);
        assert_eq!(TransactionType::parse(""), None);
    }

    #[test]
    fn add_and_remove_keep_order() {
        let mut wallet = Wallet::new("w1");
        wallet.add_transaction(sample_tx("t1"));
        wallet.add_transaction(sample_tx("t2"));
        wallet.add_transaction(sample_tx("t3"));

        wallet.remove_transaction("t2");

        let ids: Vec<_> = wallet
            .transactions()
            .iter()
            .map(|tx| tx.transaction_id.as_str())
            .collect();
        assert_eq!(ids, vec!["t1", "t3"]);
    }

    #[test]
    fn remove_unknown_transaction_is_noop() {
        let mut wallet = Wallet::new("w1");
        wallet.add_transaction(sample_tx("t1"));
        wallet.remove_transaction("missing");
        assert_eq!(wallet.transactions().len(), 1);
        assert!(wallet.has_transaction("t1"));
        assert!(!wallet.has_transaction("missing"));
    }

    #[test]
    fn transaction_serializes_type_field() {
        let json = serde_json::to_value(sample_tx("t1")).unwrap();
        assert_eq!(json["type"], "BUY");
        assert_eq!(json["transactionId"], "t1");
        assert_eq!(json["priceAtPurchase"], 30_000.0);
    }
}
