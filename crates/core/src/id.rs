//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a payment.
///
/// Payment ids are integers handed out by an external allocator (a database
/// sequence in production). Pass them explicitly in tests for determinism.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(u64);

impl PaymentId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for PaymentId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<PaymentId> for u64 {
    fn from(value: PaymentId) -> Self {
        value.0
    }
}

impl FromStr for PaymentId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::validation(format!("PaymentId: {e}")))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_integer_ids() {
        let id: PaymentId = " 42 ".parse().unwrap();
        assert_eq!(id, PaymentId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_non_numeric_ids() {
        let err = "forty-two".parse::<PaymentId>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.starts_with("PaymentId")));
    }
}
