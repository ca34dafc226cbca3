//! Credit card provider notifications.

use chrono::{DateTime, SecondsFormat, Utc};

use donorpay_core::DomainResult;

use super::{TransformedBookingData, rename, required, scalar_fields};
use crate::booking::{BookingData, RawBookingData};
use crate::legacy::{LegacyValues, string_value};

pub const TRANSACTION_ID: &str = "transactionId";
pub const AMOUNT: &str = "amount";

/// Provider key -> historical field name.
const LEGACY_KEY_MAP: &[(&str, &str)] = &[
    (TRANSACTION_ID, "ext_payment_id"),
    (AMOUNT, "mcp_amount"),
    ("customerId", "ext_payment_account"),
    ("sessionId", "mcp_sessionid"),
    ("auth", "mcp_auth"),
    ("title", "mcp_title"),
    ("country", "mcp_country"),
    ("currency", "mcp_currency"),
    ("expiryDate", "mcp_cc_expiry_date"),
];

const LEGACY_STATUS_PROCESSED: &str = "processed";

pub struct CreditCardBookingTransformer;

impl CreditCardBookingTransformer {
    /// The provider does not send a booking date; `booked_at` becomes the valuation date.
    pub fn transform(
        raw: &RawBookingData,
        booked_at: DateTime<Utc>,
    ) -> DomainResult<TransformedBookingData> {
        let booking_data = scalar_fields(raw)?;
        let transaction_id = required(&booking_data, TRANSACTION_ID)?.to_string();
        required(&booking_data, AMOUNT)?;

        let legacy_data = Self::legacy_data(&booking_data, booked_at);
        Ok(TransformedBookingData {
            booking_data,
            valuation_date: booked_at,
            legacy_data,
            transaction_id,
        })
    }

    pub fn legacy_data(booking_data: &BookingData, valuation_date: DateTime<Utc>) -> LegacyValues {
        let mut legacy = rename(booking_data, LEGACY_KEY_MAP);
        legacy.insert(
            "ext_payment_status".to_string(),
            string_value(LEGACY_STATUS_PROCESSED),
        );
        legacy.insert(
            "ext_payment_timestamp".to_string(),
            string_value(valuation_date.to_rfc3339_opts(SecondsFormat::Secs, false)),
        );
        legacy
    }
}
