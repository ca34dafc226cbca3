//! Sofort (instant bank transfer) notifications.

use chrono::{DateTime, Utc};

use donorpay_core::{DomainError, DomainResult};

use super::{TransformedBookingData, required, scalar_fields};
use crate::booking::{BookingData, RawBookingData};
use crate::legacy::{LegacyValues, string_value};

pub const TRANSACTION_ID: &str = "transactionId";
pub const VALUATION_DATE: &str = "valuationDate";

pub struct SofortBookingTransformer;

impl SofortBookingTransformer {
    pub fn transform(raw: &RawBookingData) -> DomainResult<TransformedBookingData> {
        let booking_data = scalar_fields(raw)?;
        let transaction_id = required(&booking_data, TRANSACTION_ID)?.to_string();
        let valuation_date = Self::parse_valuation_date(required(&booking_data, VALUATION_DATE)?)?;

        let legacy_data = Self::legacy_data(&booking_data);
        Ok(TransformedBookingData {
            booking_data,
            valuation_date,
            legacy_data,
            transaction_id,
        })
    }

    pub fn legacy_data(booking_data: &BookingData) -> LegacyValues {
        let mut legacy = LegacyValues::new();
        if let Some(transaction_id) = booking_data.get(TRANSACTION_ID) {
            legacy.insert("transaction_id".to_string(), string_value(transaction_id.as_str()));
        }
        if let Some(valuation_date) = booking_data.get(VALUATION_DATE) {
            legacy.insert("valuation_date".to_string(), string_value(valuation_date.as_str()));
        }
        legacy
    }

    fn parse_valuation_date(value: &str) -> DomainResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| DomainError::malformed(format!("{VALUATION_DATE} {value:?}: {e}")))
    }
}
