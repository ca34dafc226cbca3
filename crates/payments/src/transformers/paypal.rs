//! PayPal instant payment notifications (IPN).

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

use donorpay_core::{DomainError, DomainResult};

use super::{TransformedBookingData, rename, required, scalar_fields};
use crate::booking::{BookingData, RawBookingData};
use crate::legacy::{LegacyValues, string_value};

pub const PAYER_ID: &str = "payer_id";
pub const PAYMENT_DATE: &str = "payment_date";
pub const TRANSACTION_ID: &str = "txn_id";

const PAYMENT_STATUS: &str = "payment_status";
const TRANSACTION_TYPE: &str = "txn_type";
const LEGACY_STATUS_KEY: &str = "ext_payment_status";

/// Personal data PayPal sends along that we must not store.
const SENSITIVE_KEYS: &[&str] = &[
    "first_name",
    "last_name",
    "address_name",
    "address_street",
    "address_status",
    "address_zip",
    "address_city",
    "address_country",
    "address_country_code",
    "payer_email",
    "payer_business_name",
    "contact_phone",
];

/// IPN key -> historical field name.
const LEGACY_KEY_MAP: &[(&str, &str)] = &[
    (PAYER_ID, "paypal_payer_id"),
    ("subscr_id", "paypal_subscr_id"),
    ("payer_status", "paypal_payer_status"),
    ("mc_gross", "paypal_mc_gross"),
    ("mc_currency", "paypal_mc_currency"),
    ("mc_fee", "paypal_mc_fee"),
    ("settle_amount", "paypal_settle_amount"),
    (TRANSACTION_ID, "ext_payment_id"),
    ("subscr_id", "ext_subscr_id"),
    ("payment_type", "ext_payment_type"),
    (PAYMENT_STATUS, LEGACY_STATUS_KEY),
    (PAYER_ID, "ext_payment_account"),
    (PAYMENT_DATE, "ext_payment_timestamp"),
];

/// `payment_date` layout without the trailing zone abbreviation,
/// e.g. `10:54:49 Dec 02, 2012`.
const PAYPAL_DATE_FORMAT: &str = "%H:%M:%S %b %d, %Y";

pub struct PayPalBookingTransformer;

impl PayPalBookingTransformer {
    pub fn transform(raw: &RawBookingData) -> DomainResult<TransformedBookingData> {
        let mut booking_data = scalar_fields(raw)?;
        booking_data.retain(|key, _| !SENSITIVE_KEYS.contains(&key.as_str()));

        required(&booking_data, PAYER_ID)?;
        let valuation_date = Self::parse_payment_date(required(&booking_data, PAYMENT_DATE)?)?;
        let transaction_id = required(&booking_data, TRANSACTION_ID)?.to_string();

        let legacy_data = Self::legacy_data(&booking_data);
        Ok(TransformedBookingData {
            booking_data,
            valuation_date,
            legacy_data,
            transaction_id,
        })
    }

    pub fn legacy_data(booking_data: &BookingData) -> LegacyValues {
        let mut legacy = rename(booking_data, LEGACY_KEY_MAP);
        if let (Some(status), Some(subtype)) = (
            booking_data.get(PAYMENT_STATUS),
            booking_data.get(TRANSACTION_TYPE),
        ) {
            legacy.insert(
                LEGACY_STATUS_KEY.to_string(),
                string_value(format!("{status}/{subtype}")),
            );
        }
        legacy
    }

    /// Parse PayPal's `HH:MM:SS Mon DD, YYYY TZ` timestamps into UTC.
    pub fn parse_payment_date(value: &str) -> DomainResult<DateTime<Utc>> {
        let malformed = || DomainError::malformed(format!("unrecognized PayPal date: {value:?}"));

        let (local, zone) = value.trim().rsplit_once(' ').ok_or_else(malformed)?;
        let offset = zone_offset(zone).ok_or_else(malformed)?;
        let naive =
            NaiveDateTime::parse_from_str(local.trim(), PAYPAL_DATE_FORMAT).map_err(|_| malformed())?;

        offset
            .from_local_datetime(&naive)
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(malformed)
    }
}

/// Zone abbreviations PayPal uses in IPN timestamps.
fn zone_offset(abbreviation: &str) -> Option<FixedOffset> {
    let hours = match abbreviation {
        "UTC" | "GMT" | "Z" => 0,
        "CET" => 1,
        "CEST" => 2,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        _ => return None,
    };
    FixedOffset::east_opt(hours * 3600)
}
