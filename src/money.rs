use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::AppError;

/// Whole rupiah. Amounts never carry formatting into storage.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema,
)]
#[serde(transparent)]
pub struct Money(i64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("amount is empty")]
    Empty,
    #[error("amount must not be negative")]
    Negative,
    #[error("amount is too large")]
    TooLarge,
    #[error("amount `{0}` is not a valid rupiah value")]
    Malformed(String),
}

impl Money {
    pub const MAX: i64 = 999_999_999_999;

    pub fn new(amount: i64) -> Result<Self, MoneyError> {
        if amount < 0 {
            return Err(MoneyError::Negative);
        }
        if amount > Self::MAX {
            return Err(MoneyError::TooLarge);
        }
        Ok(Self(amount))
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Parses user-entered amounts such as `10.000`, `Rp 8.000` or `12000`.
    /// Dots are thousands separators; decimals are rejected.
    pub fn parse(input: &str) -> Result<Self, MoneyError> {
        let text = input.trim();
        if text.is_empty() {
            return Err(MoneyError::Empty);
        }

        let digits = strip_currency(text);
        if digits.is_empty() {
            return Err(MoneyError::Malformed(input.to_string()));
        }
        if digits.starts_with('-') {
            return Err(MoneyError::Negative);
        }
        if !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(MoneyError::Malformed(input.to_string()));
        }

        if digits.contains('.') {
            let mut groups = digits.split('.');
            let head = groups.next().unwrap_or_default();
            if head.is_empty() || head.len() > 3 {
                return Err(MoneyError::Malformed(input.to_string()));
            }
            if groups.any(|group| group.len() != 3) {
                return Err(MoneyError::Malformed(input.to_string()));
            }
        }

        let plain: String = digits.chars().filter(|c| *c != '.').collect();
        // 13 digits is already past MAX, longer input would overflow i64.
        if plain.trim_start_matches('0').len() > 13 {
            return Err(MoneyError::TooLarge);
        }
        let value = plain
            .parse::<i64>()
            .map_err(|_| MoneyError::Malformed(input.to_string()))?;
        Self::new(value)
    }
}

fn strip_currency(text: &str) -> &str {
    let has_prefix = text
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("rp"));
    if !has_prefix {
        return text;
    }
    let rest = &text[2..];
    let rest = rest.strip_prefix('.').unwrap_or(rest);
    rest.trim_start()
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        write!(f, "Rp {grouped}")
    }
}

/// An amount as clients send it: a JSON number or a formatted string.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum AmountInput {
    Whole(i64),
    Fractional(f64),
    Text(String),
}

impl AmountInput {
    pub fn to_money(&self) -> Result<Money, MoneyError> {
        match self {
            AmountInput::Whole(value) => Money::new(*value),
            AmountInput::Fractional(value) => {
                if value.is_sign_negative() && *value != 0.0 {
                    return Err(MoneyError::Negative);
                }
                if value.fract() != 0.0 || !value.is_finite() {
                    return Err(MoneyError::Malformed(value.to_string()));
                }
                if *value > Money::MAX as f64 {
                    return Err(MoneyError::TooLarge);
                }
                Money::new(*value as i64)
            }
            AmountInput::Text(text) => Money::parse(text),
        }
    }

    /// Converts at the request boundary, naming the offending field.
    pub fn validate(&self, field: &str) -> Result<Money, AppError> {
        self.to_money()
            .map_err(|err| AppError::Validation(format!("{field}: {err}")))
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        AmountInput::Whole(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}
