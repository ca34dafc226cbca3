//! Booking protocol shared by the provider-confirmed payment variants.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use donorpay_core::{DomainResult, PaymentId};

use crate::payment::Payment;

/// Provider notification as received: field name to JSON scalar.
pub type RawBookingData = BTreeMap<String, serde_json::Value>;

/// Canonical booking data stored on a payment.
pub type BookingData = BTreeMap<String, String>;

/// Hands out ids for new payments (a database sequence in production).
pub trait PaymentIdAllocator {
    fn new_id(&self) -> PaymentId;
}

/// Result of a successful booking.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    /// The payment itself now carries the booking data.
    Booked,
    /// The payment was left untouched; the booking went to a new follow-up
    /// payment that the caller must persist.
    BookedWithFollowUp(Payment),
}

/// Capability: attach provider-confirmed transaction data.
pub trait Bookable {
    fn is_booked(&self) -> bool;

    /// Book with the provider payload `raw_data`.
    ///
    /// `booked_at` is the business time of the booking. `ids` is only consulted
    /// when the booking produces a new payment.
    fn book_payment(
        &mut self,
        raw_data: &RawBookingData,
        booked_at: DateTime<Utc>,
        ids: &dyn PaymentIdAllocator,
    ) -> DomainResult<BookingOutcome>;
}
