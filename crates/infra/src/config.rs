//! Environment-driven settings for the payment services.

use thiserror::Error;

use donorpay_refcode::{ALPHABET, PREFIX_LENGTH};

pub const BANK_TRANSFER_PREFIX_VAR: &str = "DONORPAY_BANK_TRANSFER_PREFIX";
pub const SOFORT_PREFIX_VAR: &str = "DONORPAY_SOFORT_PREFIX";
pub const FIRST_PAYMENT_ID_VAR: &str = "DONORPAY_FIRST_PAYMENT_ID";
pub const REFERENCE_CODE_ATTEMPTS_VAR: &str = "DONORPAY_REFERENCE_CODE_ATTEMPTS";

const DEFAULT_BANK_TRANSFER_PREFIX: &str = "XW";
const DEFAULT_SOFORT_PREFIX: &str = "XR";
const DEFAULT_FIRST_PAYMENT_ID: u64 = 1;
const DEFAULT_REFERENCE_CODE_ATTEMPTS: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}: invalid reference code prefix {value:?}")]
    InvalidPrefix { key: &'static str, value: String },

    #[error("{key}: expected a positive integer, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfig {
    pub bank_transfer_prefix: String,
    pub sofort_prefix: String,
    pub first_payment_id: u64,
    /// How often a colliding reference code is regenerated before giving up.
    pub reference_code_attempts: u32,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            bank_transfer_prefix: DEFAULT_BANK_TRANSFER_PREFIX.to_string(),
            sofort_prefix: DEFAULT_SOFORT_PREFIX.to_string(),
            first_payment_id: DEFAULT_FIRST_PAYMENT_ID,
            reference_code_attempts: DEFAULT_REFERENCE_CODE_ATTEMPTS,
        }
    }
}

impl PaymentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Unset keys fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bank_transfer_prefix = match lookup(BANK_TRANSFER_PREFIX_VAR) {
            Some(value) => parse_prefix(BANK_TRANSFER_PREFIX_VAR, &value)?,
            None => defaults.bank_transfer_prefix,
        };
        let sofort_prefix = match lookup(SOFORT_PREFIX_VAR) {
            Some(value) => parse_prefix(SOFORT_PREFIX_VAR, &value)?,
            None => defaults.sofort_prefix,
        };
        let first_payment_id = match lookup(FIRST_PAYMENT_ID_VAR) {
            Some(value) => parse_positive(FIRST_PAYMENT_ID_VAR, &value)?,
            None => defaults.first_payment_id,
        };
        let reference_code_attempts = match lookup(REFERENCE_CODE_ATTEMPTS_VAR) {
            Some(value) => {
                let attempts = parse_positive(REFERENCE_CODE_ATTEMPTS_VAR, &value)?;
                u32::try_from(attempts).map_err(|_| ConfigError::InvalidNumber {
                    key: REFERENCE_CODE_ATTEMPTS_VAR,
                    value,
                })?
            }
            None => defaults.reference_code_attempts,
        };

        if bank_transfer_prefix == sofort_prefix {
            tracing::warn!(
                prefix = %sofort_prefix,
                "bank transfer and Sofort share a reference code prefix"
            );
        }

        Ok(Self {
            bank_transfer_prefix,
            sofort_prefix,
            first_payment_id,
            reference_code_attempts,
        })
    }
}

fn parse_prefix(key: &'static str, value: &str) -> Result<String, ConfigError> {
    let prefix = value.trim().to_uppercase();
    let valid = prefix.chars().count() == PREFIX_LENGTH
        && prefix.chars().all(|c| ALPHABET.contains(c));
    if valid {
        Ok(prefix)
    } else {
        Err(ConfigError::InvalidPrefix {
            key,
            value: value.to_string(),
        })
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        let config = PaymentConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, PaymentConfig::default());
        assert_eq!(config.bank_transfer_prefix, "XW");
        assert_eq!(config.sofort_prefix, "XR");
        assert_eq!(config.first_payment_id, 1);
        assert_eq!(config.reference_code_attempts, 10);
    }

    #[test]
    fn overrides_are_normalized() {
        let config = PaymentConfig::from_lookup(lookup_from(&[
            (BANK_TRANSFER_PREFIX_VAR, " ak "),
            (SOFORT_PREFIX_VAR, "ZZ"),
            (FIRST_PAYMENT_ID_VAR, "1000"),
            (REFERENCE_CODE_ATTEMPTS_VAR, "3"),
        ]))
        .unwrap();

        assert_eq!(config.bank_transfer_prefix, "AK");
        assert_eq!(config.sofort_prefix, "ZZ");
        assert_eq!(config.first_payment_id, 1000);
        assert_eq!(config.reference_code_attempts, 3);
    }

    #[test]
    fn prefix_outside_alphabet_is_rejected() {
        // 'O' and 'B' are not in the alphabet.
        let err = PaymentConfig::from_lookup(lookup_from(&[(SOFORT_PREFIX_VAR, "OB")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPrefix { key: SOFORT_PREFIX_VAR, .. }
        ));

        let err = PaymentConfig::from_lookup(lookup_from(&[(BANK_TRANSFER_PREFIX_VAR, "XWX")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPrefix { .. }));
    }

    #[test]
    fn zero_or_garbage_numbers_are_rejected() {
        for value in ["0", "-1", "ten", ""] {
            let err = PaymentConfig::from_lookup(lookup_from(&[(FIRST_PAYMENT_ID_VAR, value)]))
                .unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidNumber { key: FIRST_PAYMENT_ID_VAR, .. }
            ));
        }

        let err = PaymentConfig::from_lookup(lookup_from(&[(
            REFERENCE_CODE_ATTEMPTS_VAR,
            "99999999999",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }
}
