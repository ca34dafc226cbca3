use chrono::{DateTime, Utc};

use donorpay_core::{DomainError, DomainResult, PaymentId};
use donorpay_refcode::PaymentReferenceCode;

use crate::booking::{Bookable, BookingData, BookingOutcome, PaymentIdAllocator, RawBookingData};
use crate::euro::Euro;
use crate::interval::PaymentInterval;
use crate::legacy::{
    LegacyDataTransformer, LegacyPaymentData, LegacyPaymentStatus, LegacyValues, string_value,
};
use crate::lifecycle::Anonymisable;
use crate::method::PaymentMethod;
use crate::transformers::SofortBookingTransformer;

/// Sofort instant transfer. One-time only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SofortPayment {
    id: PaymentId,
    amount: Euro,
    interval: PaymentInterval,
    reference_code: Option<PaymentReferenceCode>,
    booking_data: BookingData,
    transaction_id: Option<String>,
    valuation_date: Option<DateTime<Utc>>,
}

impl SofortPayment {
    /// Fails for any interval other than [`PaymentInterval::OneTime`].
    pub fn new(
        id: PaymentId,
        amount: Euro,
        interval: PaymentInterval,
        reference_code: Option<PaymentReferenceCode>,
    ) -> DomainResult<Self> {
        if interval != PaymentInterval::OneTime {
            return Err(DomainError::validation(format!(
                "Sofort payments must be one-time, got an interval of {} months",
                interval.months()
            )));
        }

        Ok(Self {
            id,
            amount,
            interval,
            reference_code,
            booking_data: BookingData::new(),
            transaction_id: None,
            valuation_date: None,
        })
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

    pub fn reference_code(&self) -> Option<&PaymentReferenceCode> {
        self.reference_code.as_ref()
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    pub fn valuation_date(&self) -> Option<DateTime<Utc>> {
        self.valuation_date
    }
}

impl Bookable for SofortPayment {
    fn is_booked(&self) -> bool {
        self.valuation_date.is_some() && !self.booking_data.is_empty()
    }

    fn book_payment(
        &mut self,
        raw_data: &RawBookingData,
        _booked_at: DateTime<Utc>,
        _ids: &dyn PaymentIdAllocator,
    ) -> DomainResult<BookingOutcome> {
        if self.is_booked() {
            return Err(DomainError::already_booked(self.id));
        }

        let transformed = SofortBookingTransformer::transform(raw_data)?;
        self.booking_data = transformed.booking_data;
        self.valuation_date = Some(transformed.valuation_date);
        self.transaction_id = Some(transformed.transaction_id);
        Ok(BookingOutcome::Booked)
    }
}

impl Anonymisable for SofortPayment {
    fn anonymise(&mut self) {
        self.reference_code = None;
    }

    fn is_anonymised(&self) -> bool {
        self.reference_code.is_none()
    }
}

impl LegacyDataTransformer for SofortPayment {
    fn legacy_data(&self) -> LegacyPaymentData {
        let mut payment_specific_values = LegacyValues::new();
        if self.is_booked() {
            payment_specific_values = SofortBookingTransformer::legacy_data(&self.booking_data);
            if let Some(code) = &self.reference_code {
                payment_specific_values
                    .insert("ueb_code".to_string(), string_value(code.formatted()));
            }
        }

        LegacyPaymentData {
            amount_in_euro_cents: self.amount.cents(),
            interval_in_months: self.interval.months(),
            payment_name: PaymentMethod::Sofort.code().to_string(),
            payment_specific_values,
            payment_status: LegacyPaymentStatus::external(self.is_booked()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NoIds;

    impl PaymentIdAllocator for NoIds {
        fn new_id(&self) -> PaymentId {
            panic!("Sofort bookings never allocate ids")
        }
    }

    fn code() -> PaymentReferenceCode {
        PaymentReferenceCode::new("XR", "LMNPRT", "R").unwrap()
    }

    fn payment() -> SofortPayment {
        SofortPayment::new(
            PaymentId::new(9),
            Euro::from_cents(1500),
            PaymentInterval::OneTime,
            Some(code()),
        )
        .unwrap()
    }

    fn notification() -> RawBookingData {
        serde_json::from_value(json!({
            "transactionId": "99999-53245-5483-4891",
            "valuationDate": "2024-01-31T13:00:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn recurring_intervals_fail_at_construction() {
        for interval in [
            PaymentInterval::Monthly,
            PaymentInterval::Quarterly,
            PaymentInterval::HalfYearly,
            PaymentInterval::Yearly,
        ] {
            let err = SofortPayment::new(PaymentId::new(1), Euro::from_cents(100), interval, None)
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{interval:?}");
        }
    }

    #[test]
    fn booking_sets_transaction_data() {
        let mut payment = payment();
        let outcome = payment
            .book_payment(&notification(), Utc::now(), &NoIds)
            .unwrap();

        assert_eq!(outcome, BookingOutcome::Booked);
        assert!(payment.is_booked());
        assert_eq!(payment.transaction_id(), Some("99999-53245-5483-4891"));
        assert!(payment.valuation_date().is_some());
    }

    #[test]
    fn booking_twice_fails() {
        let mut payment = payment();
        payment
            .book_payment(&notification(), Utc::now(), &NoIds)
            .unwrap();

        let err = payment
            .book_payment(&notification(), Utc::now(), &NoIds)
            .unwrap_err();
        assert_eq!(err, DomainError::AlreadyBooked(PaymentId::new(9)));
    }

    #[test]
    fn legacy_export_is_empty_until_booked() {
        let mut payment = payment();
        let legacy = payment.legacy_data();
        assert_eq!(legacy.payment_status, LegacyPaymentStatus::ExternalIncomplete);
        assert!(legacy.payment_specific_values.is_empty());

        payment
            .book_payment(&notification(), Utc::now(), &NoIds)
            .unwrap();
        let legacy = payment.legacy_data();

        assert_eq!(legacy.payment_name, "SUB");
        assert_eq!(legacy.payment_status, LegacyPaymentStatus::ExternalBooked);
        assert_eq!(legacy.payment_specific_values["ueb_code"], json!("XR-LMN-PRT-R"));
        assert_eq!(
            legacy.payment_specific_values["transaction_id"],
            json!("99999-53245-5483-4891")
        );
    }

    #[test]
    fn anonymise_detaches_code_but_keeps_booking() {
        let mut payment = payment();
        payment
            .book_payment(&notification(), Utc::now(), &NoIds)
            .unwrap();

        payment.anonymise();
        payment.anonymise();

        assert!(payment.is_anonymised());
        assert!(payment.is_booked());
        assert!(!payment.legacy_data().payment_specific_values.contains_key("ueb_code"));
    }
}
