use chrono::{DateTime, Utc};

use donorpay_core::{DomainError, DomainResult, PaymentId};

use crate::booking::{Bookable, BookingData, BookingOutcome, PaymentIdAllocator, RawBookingData};
use crate::euro::Euro;
use crate::interval::PaymentInterval;
use crate::legacy::{LegacyDataTransformer, LegacyPaymentData, LegacyPaymentStatus, LegacyValues};
use crate::method::PaymentMethod;
use crate::payment::Payment;
use crate::transformers::{PayPalBookingTransformer, TransformedBookingData};

/// A PayPal payment.
///
/// Recurring PayPal donations are subscriptions: PayPal notifies us once per
/// billing cycle. The first notification books the payment itself (the
/// *initial* payment). Every later notification books a new follow-up payment
/// whose parent is the initial payment, so each cycle is its own accounting row
/// and the initial booking is never rewritten. Follow-ups never get children of
/// their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayPalPayment {
    id: PaymentId,
    amount: Euro,
    interval: PaymentInterval,
    booking_data: BookingData,
    valuation_date: Option<DateTime<Utc>>,
    transaction_id: Option<String>,
    parent_payment_id: Option<PaymentId>,
}

impl PayPalPayment {
    pub fn new(id: PaymentId, amount: Euro, interval: PaymentInterval) -> Self {
        Self {
            id,
            amount,
            interval,
            booking_data: BookingData::new(),
            valuation_date: None,
            transaction_id: None,
            parent_payment_id: None,
        }
    }

    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn amount(&self) -> Euro {
        self.amount
    }

    pub fn interval(&self) -> PaymentInterval {
        self.interval
    }

    pub fn booking_data(&self) -> &BookingData {
        &self.booking_data
    }

    pub fn valuation_date(&self) -> Option<DateTime<Utc>> {
        self.valuation_date
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn parent_payment_id(&self) -> Option<PaymentId> {
        self.parent_payment_id
    }

    /// Booked, recurring and not itself a follow-up: further bookings
    /// create follow-up payments.
    pub fn is_booked_initial_payment(&self) -> bool {
        self.is_booked() && self.interval.is_recurring() && self.parent_payment_id.is_none()
    }

    fn apply_booking(&mut self, transformed: TransformedBookingData) {
        self.booking_data = transformed.booking_data;
        self.valuation_date = Some(transformed.valuation_date);
        self.transaction_id = Some(transformed.transaction_id);
    }

    fn book_follow_up(
        &self,
        transformed: TransformedBookingData,
        ids: &dyn PaymentIdAllocator,
    ) -> DomainResult<PayPalPayment> {
        // A repeated notification for the initial cycle is not a new cycle.
        if self.transaction_id.as_deref() == Some(transformed.transaction_id.as_str()) {
            return Err(DomainError::already_booked(self.id));
        }

        let mut follow_up = PayPalPayment::new(ids.new_id(), self.amount, self.interval);
        follow_up.parent_payment_id = Some(self.id);
        follow_up.apply_booking(transformed);
        Ok(follow_up)
    }
}

impl Bookable for PayPalPayment {
    fn is_booked(&self) -> bool {
        self.valuation_date.is_some() && !self.booking_data.is_empty()
    }

    fn book_payment(
        &mut self,
        raw_data: &RawBookingData,
        _booked_at: DateTime<Utc>,
        ids: &dyn PaymentIdAllocator,
    ) -> DomainResult<BookingOutcome> {
        if self.is_booked() && !self.is_booked_initial_payment() {
            return Err(DomainError::already_booked(self.id));
        }

        // Transform before allocating, malformed notifications must not use up ids.
        let transformed = PayPalBookingTransformer::transform(raw_data)?;

        if self.is_booked_initial_payment() {
            let follow_up = self.book_follow_up(transformed, ids)?;
            return Ok(BookingOutcome::BookedWithFollowUp(Payment::PayPal(follow_up)));
        }

        self.apply_booking(transformed);
        Ok(BookingOutcome::Booked)
    }
}

impl LegacyDataTransformer for PayPalPayment {
    fn legacy_data(&self) -> LegacyPaymentData {
        let payment_specific_values = if self.is_booked() {
            PayPalBookingTransformer::legacy_data(&self.booking_data)
        } else {
            LegacyValues::new()
        };

        LegacyPaymentData {
            amount_in_euro_cents: self.amount.cents(),
            interval_in_months: self.interval.months(),
            payment_name: PaymentMethod::PayPal.code().to_string(),
            payment_specific_values,
            payment_status: LegacyPaymentStatus::external(self.is_booked()),
        }
    }
}
