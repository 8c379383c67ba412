// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Field validation for inbound requests.
//!
//! Each helper names the offending field in its error so the HTTP layer can
//! return it verbatim.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use super::{ServiceError, ServiceResult};
use crate::domain::{TransactionType, DEFAULT_CURRENCY};

/// `local@domain.tld`: no whitespace, a single `@`, and a dot in the domain
/// with at least one character on each side.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Require a non-blank string. Returns it trimmed.
pub fn required_text(field: &'static str, value: Option<&str>) -> ServiceResult<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ServiceError::validation(field, format!("{field} is required."))),
    }
}

/// Require a finite number strictly greater than zero.
pub fn positive_number(field: &'static str, value: Option<f64>) -> ServiceResult<f64> {
    match value {
        Some(n) if n.is_finite() && n > 0.0 => Ok(n),
        Some(_) => Err(ServiceError::validation(
            field,
            format!("{field} must be greater than 0."),
        )),
        None => Err(ServiceError::validation(field, format!("{field} is required."))),
    }
}

/// Parse `BUY` / `SELL` (case-insensitive).
pub fn transaction_type(value: Option<&str>) -> ServiceResult<TransactionType> {
    value.and_then(TransactionType::parse).ok_or_else(|| {
        ServiceError::validation("type", "type must be one of BUY, SELL.")
    })
}

/// Parse a timestamp field.
///
/// Accepts RFC 3339 (any offset, normalized to UTC), naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC) and `YYYY-MM-DD` (midnight UTC).
pub fn timestamp(field: &'static str, value: Option<&str>) -> ServiceResult<DateTime<Utc>> {
    let text = required_text(field, value)?;
    parse_timestamp(&text).ok_or_else(|| {
        ServiceError::validation(field, format!("{field} must be a valid date."))
    })
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Normalize a currency code: absent means [`DEFAULT_CURRENCY`], present
/// must be non-blank, stored upper-case.
pub fn currency(value: Option<&str>) -> ServiceResult<String> {
    match value {
        None => Ok(DEFAULT_CURRENCY.to_string()),
        Some(code) => {
            let code = code.trim();
            if code.is_empty() {
                Err(ServiceError::validation(
                    "currency",
                    "currency must not be empty.",
                ))
            } else {
                Ok(code.to_uppercase())
            }
        }
    }
}

/// Check the `local@domain.tld` shape of an address.
pub fn email(value: &str) -> ServiceResult<()> {
    if EMAIL_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ServiceError::validation("email", "email is invalid."))
    }
}
