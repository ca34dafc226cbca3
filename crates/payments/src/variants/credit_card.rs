use chrono::{DateTime, Utc};

use donorpay_core::{DomainError, DomainResult, PaymentId};

use crate::booking::{Bookable, BookingData, BookingOutcome, PaymentIdAllocator, RawBookingData};
use crate::euro::Euro;
use crate::interval::PaymentInterval;
use crate::legacy::{LegacyDataTransformer, LegacyPaymentData, LegacyPaymentStatus, LegacyValues};
use crate::method::PaymentMethod;
use crate::transformers::CreditCardBookingTransformer;
use crate::transformers::credit_card::TRANSACTION_ID;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditCardPayment {
    id: PaymentId,
    amount: Euro,
    interval: PaymentInterval,
    booking_data: BookingData,
    valuation_date: Option<DateTime<Utc>>,
}

impl CreditCardPayment {
    pub fn new(id: PaymentId, amount: Euro, interval: PaymentInterval) -> Self {
        Self {
            id,
            amount,
            interval,
            booking_data: BookingData::new(),
            valuation_date: None,
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
        self.booking_data.get(TRANSACTION_ID).map(String::as_str)
    }
}

impl Bookable for CreditCardPayment {
    fn is_booked(&self) -> bool {
        self.valuation_date.is_some() && !self.booking_data.is_empty()
    }

    fn book_payment(
        &mut self,
        raw_data: &RawBookingData,
        booked_at: DateTime<Utc>,
        _ids: &dyn PaymentIdAllocator,
    ) -> DomainResult<BookingOutcome> {
        if self.is_booked() {
            return Err(DomainError::already_booked(self.id));
        }

        let transformed = CreditCardBookingTransformer::transform(raw_data, booked_at)?;
        self.booking_data = transformed.booking_data;
        self.valuation_date = Some(transformed.valuation_date);
        Ok(BookingOutcome::Booked)
    }
}

impl LegacyDataTransformer for CreditCardPayment {
    fn legacy_data(&self) -> LegacyPaymentData {
        let payment_specific_values = match self.valuation_date {
            Some(valuation_date) if self.is_booked() => {
                CreditCardBookingTransformer::legacy_data(&self.booking_data, valuation_date)
            }
            _ => LegacyValues::new(),
        };

        LegacyPaymentData {
            amount_in_euro_cents: self.amount.cents(),
            interval_in_months: self.interval.months(),
            payment_name: PaymentMethod::CreditCard.code().to_string(),
            payment_specific_values,
            payment_status: LegacyPaymentStatus::external(self.is_booked()),
        }
    }
}
