//! Normalization of provider payloads into canonical booking data.
//!
//! Transformers are stateless. Each one validates the fields its provider must
//! send, decides what is stored, and derives the legacy field map from the
//! stored data, so exports never need the original payload.

pub mod credit_card;
pub mod paypal;
pub mod sofort;

pub use credit_card::CreditCardBookingTransformer;
pub use paypal::PayPalBookingTransformer;
pub use sofort::SofortBookingTransformer;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use donorpay_core::{DomainError, DomainResult};

use crate::booking::{BookingData, RawBookingData};
use crate::legacy::{LegacyValues, string_value};

/// Output of a transformer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedBookingData {
    pub booking_data: BookingData,
    pub valuation_date: DateTime<Utc>,
    pub legacy_data: LegacyValues,
    pub transaction_id: String,
}

/// Stringify scalar fields. `null` counts as absent; nested values are rejected.
pub(crate) fn scalar_fields(raw: &RawBookingData) -> DomainResult<BookingData> {
    let mut fields = BookingData::new();
    for (key, value) in raw {
        let text = match value {
            JsonValue::Null => continue,
            JsonValue::String(s) => s.clone(),
            JsonValue::Number(n) => n.to_string(),
            JsonValue::Bool(b) => String::from(if *b { "1" } else { "0" }),
            JsonValue::Array(_) | JsonValue::Object(_) => {
                return Err(DomainError::malformed(format!(
                    "field {key:?} must be a scalar value"
                )));
            }
        };
        fields.insert(key.clone(), text);
    }
    Ok(fields)
}

pub(crate) fn required<'a>(fields: &'a BookingData, key: &str) -> DomainResult<&'a str> {
    match fields.get(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(DomainError::missing_field(key)),
    }
}

/// Copy `booking key -> legacy key` pairs that are present in `fields`.
pub(crate) fn rename(fields: &BookingData, key_map: &[(&str, &str)]) -> LegacyValues {
    key_map
        .iter()
        .filter_map(|(booking_key, legacy_key)| {
            fields
                .get(*booking_key)
                .map(|value| (legacy_key.to_string(), string_value(value.as_str())))
        })
        .collect()
}
