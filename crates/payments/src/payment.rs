//! The payment aggregate: one sum type over all variants.
//!
//! Callers that don't care about the concrete variant go through [`Payment`];
//! operations a variant does not support fail with
//! [`DomainError::UnsupportedOperation`] instead of silently doing nothing.

use chrono::{DateTime, Utc};

use donorpay_core::{DomainError, DomainResult, Entity, PaymentId};

use crate::booking::{Bookable, BookingOutcome, PaymentIdAllocator, RawBookingData};
use crate::euro::Euro;
use crate::interval::PaymentInterval;
use crate::legacy::{LegacyDataTransformer, LegacyPaymentData};
use crate::lifecycle::{Anonymisable, Cancellable};
use crate::method::PaymentMethod;
use crate::variants::{
    BankTransferPayment, CreditCardPayment, DirectDebitPayment, FeeChangePayment, PayPalPayment,
    SofortPayment,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payment {
    CreditCard(CreditCardPayment),
    PayPal(PayPalPayment),
    DirectDebit(DirectDebitPayment),
    BankTransfer(BankTransferPayment),
    Sofort(SofortPayment),
    FeeChange(FeeChangePayment),
}

impl Payment {
    pub fn id(&self) -> PaymentId {
        match self {
            Payment::CreditCard(p) => p.id(),
            Payment::PayPal(p) => p.id(),
            Payment::DirectDebit(p) => p.id(),
            Payment::BankTransfer(p) => p.id(),
            Payment::Sofort(p) => p.id(),
            Payment::FeeChange(p) => p.id(),
        }
    }

    pub fn amount(&self) -> Euro {
        match self {
            Payment::CreditCard(p) => p.amount(),
            Payment::PayPal(p) => p.amount(),
            Payment::DirectDebit(p) => p.amount(),
            Payment::BankTransfer(p) => p.amount(),
            Payment::Sofort(p) => p.amount(),
            Payment::FeeChange(p) => p.amount(),
        }
    }

    pub fn interval(&self) -> PaymentInterval {
        match self {
            Payment::CreditCard(p) => p.interval(),
            Payment::PayPal(p) => p.interval(),
            Payment::DirectDebit(p) => p.interval(),
            Payment::BankTransfer(p) => p.interval(),
            Payment::Sofort(p) => p.interval(),
            Payment::FeeChange(p) => p.interval(),
        }
    }

    pub fn method(&self) -> PaymentMethod {
        match self {
            Payment::CreditCard(_) => PaymentMethod::CreditCard,
            Payment::PayPal(_) => PaymentMethod::PayPal,
            Payment::DirectDebit(_) => PaymentMethod::DirectDebit,
            Payment::BankTransfer(_) => PaymentMethod::BankTransfer,
            Payment::Sofort(_) => PaymentMethod::Sofort,
            Payment::FeeChange(_) => PaymentMethod::FeeChange,
        }
    }

    /// Whether the donor has done everything needed for the money to arrive.
    ///
    /// Externally confirmed payments complete when booked. Bank transfers stay
    /// incomplete until accounting matches the transfer, which happens outside
    /// this model.
    pub fn is_completed(&self) -> bool {
        match self {
            Payment::CreditCard(p) => p.is_booked(),
            Payment::PayPal(p) => p.is_booked(),
            Payment::Sofort(p) => p.is_booked(),
            Payment::DirectDebit(_) | Payment::FeeChange(_) => true,
            Payment::BankTransfer(_) => false,
        }
    }

    pub fn is_bookable(&self) -> bool {
        matches!(
            self,
            Payment::CreditCard(_) | Payment::PayPal(_) | Payment::Sofort(_)
        )
    }

    pub fn is_booked(&self) -> bool {
        match self {
            Payment::CreditCard(p) => p.is_booked(),
            Payment::PayPal(p) => p.is_booked(),
            Payment::Sofort(p) => p.is_booked(),
            Payment::DirectDebit(_) | Payment::BankTransfer(_) | Payment::FeeChange(_) => false,
        }
    }

    /// Provider transaction id of a booked payment.
    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            Payment::CreditCard(p) => p.transaction_id(),
            Payment::PayPal(p) => p.transaction_id(),
            Payment::Sofort(p) => p.transaction_id(),
            Payment::DirectDebit(_) | Payment::BankTransfer(_) | Payment::FeeChange(_) => None,
        }
    }

    pub fn parent_payment_id(&self) -> Option<PaymentId> {
        match self {
            Payment::PayPal(p) => p.parent_payment_id(),
            _ => None,
        }
    }

    pub fn book_payment(
        &mut self,
        raw_data: &RawBookingData,
        booked_at: DateTime<Utc>,
        ids: &dyn PaymentIdAllocator,
    ) -> DomainResult<BookingOutcome> {
        match self {
            Payment::CreditCard(p) => p.book_payment(raw_data, booked_at, ids),
            Payment::PayPal(p) => p.book_payment(raw_data, booked_at, ids),
            Payment::Sofort(p) => p.book_payment(raw_data, booked_at, ids),
            Payment::DirectDebit(_) | Payment::BankTransfer(_) | Payment::FeeChange(_) => {
                Err(DomainError::unsupported(format!(
                    "{} payments cannot be booked",
                    self.method()
                )))
            }
        }
    }

    pub fn is_cancellable(&self) -> bool {
        match self {
            Payment::DirectDebit(p) => p.is_cancellable(),
            _ => false,
        }
    }

    pub fn is_restorable(&self) -> bool {
        match self {
            Payment::DirectDebit(p) => p.is_restorable(),
            _ => false,
        }
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        match self {
            Payment::DirectDebit(p) if p.is_cancellable() => {
                p.cancel();
                Ok(())
            }
            Payment::DirectDebit(p) => Err(DomainError::validation(format!(
                "payment {} is already cancelled",
                p.id()
            ))),
            other => Err(DomainError::unsupported(format!(
                "{} payments cannot be cancelled",
                other.method()
            ))),
        }
    }

    pub fn restore(&mut self) -> DomainResult<()> {
        match self {
            Payment::DirectDebit(p) if p.is_restorable() => {
                p.restore();
                Ok(())
            }
            Payment::DirectDebit(p) => Err(DomainError::validation(format!(
                "payment {} is not cancelled",
                p.id()
            ))),
            other => Err(DomainError::unsupported(format!(
                "{} payments cannot be restored",
                other.method()
            ))),
        }
    }

    /// Remove personal data. Variants without personal data are left as they are.
    pub fn anonymise(&mut self) {
        match self {
            Payment::DirectDebit(p) => p.anonymise(),
            Payment::BankTransfer(p) => p.anonymise(),
            Payment::Sofort(p) => p.anonymise(),
            Payment::CreditCard(_) | Payment::PayPal(_) | Payment::FeeChange(_) => {}
        }
    }

    pub fn is_anonymised(&self) -> bool {
        match self {
            Payment::DirectDebit(p) => p.is_anonymised(),
            Payment::BankTransfer(p) => p.is_anonymised(),
            Payment::Sofort(p) => p.is_anonymised(),
            Payment::CreditCard(_) | Payment::PayPal(_) | Payment::FeeChange(_) => true,
        }
    }
}

impl Entity for Payment {
    type Id = PaymentId;

    fn id(&self) -> PaymentId {
        Payment::id(self)
    }
}

impl LegacyDataTransformer for Payment {
    fn legacy_data(&self) -> LegacyPaymentData {
        match self {
            Payment::CreditCard(p) => p.legacy_data(),
            Payment::PayPal(p) => p.legacy_data(),
            Payment::DirectDebit(p) => p.legacy_data(),
            Payment::BankTransfer(p) => p.legacy_data(),
            Payment::Sofort(p) => p.legacy_data(),
            Payment::FeeChange(p) => p.legacy_data(),
        }
    }
}

macro_rules! impl_from_variant {
    ($variant:ident, $t:ty) => {
        impl From<$t> for Payment {
            fn from(value: $t) -> Self {
                Payment::$variant(value)
            }
        }
    };
}

impl_from_variant!(CreditCard, CreditCardPayment);
impl_from_variant!(PayPal, PayPalPayment);
impl_from_variant!(DirectDebit, DirectDebitPayment);
impl_from_variant!(BankTransfer, BankTransferPayment);
impl_from_variant!(Sofort, SofortPayment);
impl_from_variant!(FeeChange, FeeChangePayment);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iban::Iban;
    use crate::legacy::LegacyPaymentStatus;
    use serde_json::json;

    struct NoIds;

    impl PaymentIdAllocator for NoIds {
        fn new_id(&self) -> PaymentId {
            panic!("no follow-ups expected")
        }
    }

    fn id(value: u64) -> PaymentId {
        PaymentId::new(value)
    }

    fn direct_debit() -> Payment {
        DirectDebitPayment::new(
            id(1),
            Euro::from_cents(1000),
            PaymentInterval::Monthly,
            Iban::new("DE12500105170648489890").unwrap(),
            "INGDDEFFXXX",
        )
        .into()
    }

    fn fee_change() -> Payment {
        FeeChangePayment::new(id(2), Euro::from_cents(1200), PaymentInterval::Quarterly).into()
    }

    fn empty_raw() -> RawBookingData {
        serde_json::from_value(json!({ "transactionId": "T" })).unwrap()
    }

    #[test]
    fn shared_fields_are_dispatched() {
        let payment = direct_debit();
        assert_eq!(payment.id(), id(1));
        assert_eq!(Entity::id(&payment), id(1));
        assert_eq!(payment.amount(), Euro::from_cents(1000));
        assert_eq!(payment.interval(), PaymentInterval::Monthly);
        assert_eq!(payment.method(), PaymentMethod::DirectDebit);
    }

    #[test]
    fn fee_change_is_complete_and_not_bookable() {
        let mut payment = fee_change();
        assert!(payment.is_completed());
        assert!(!payment.is_bookable());

        let err = payment.book_payment(&empty_raw(), Utc::now(), &NoIds).unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedOperation(msg) if msg.contains("FCH")));

        let legacy = payment.legacy_data();
        assert_eq!(legacy.payment_name, "FCH");
        assert_eq!(legacy.payment_status, LegacyPaymentStatus::ExternalBooked);
        assert!(legacy.payment_specific_values.is_empty());
    }

    #[test]
    fn only_direct_debit_can_be_cancelled() {
        let mut payment = fee_change();
        assert!(!payment.is_cancellable());
        assert!(matches!(
            payment.cancel(),
            Err(DomainError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            payment.restore(),
            Err(DomainError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn cancel_and_restore_check_current_state() {
        let mut payment = direct_debit();

        assert!(matches!(payment.restore(), Err(DomainError::Validation(_))));
        payment.cancel().unwrap();
        assert!(payment.is_restorable());
        assert!(matches!(payment.cancel(), Err(DomainError::Validation(_))));
        payment.restore().unwrap();
        assert!(payment.is_cancellable());
    }

    #[test]
    fn anonymise_is_safe_on_every_variant() {
        let mut payments = vec![
            direct_debit(),
            fee_change(),
            CreditCardPayment::new(id(3), Euro::from_cents(100), PaymentInterval::OneTime).into(),
            PayPalPayment::new(id(4), Euro::from_cents(100), PaymentInterval::OneTime).into(),
        ];

        for payment in &mut payments {
            let before = (payment.id(), payment.amount(), payment.interval());
            payment.anonymise();
            payment.anonymise();
            assert!(payment.is_anonymised());
            assert_eq!(before, (payment.id(), payment.amount(), payment.interval()));
        }
    }

    #[test]
    fn bank_transfer_is_not_completed_until_matched() {
        let payment: Payment =
            BankTransferPayment::new(id(5), Euro::from_cents(100), PaymentInterval::OneTime, None)
                .into();
        assert!(!payment.is_completed());
        assert!(!payment.is_booked());
        assert_eq!(payment.parent_payment_id(), None);
    }

    #[test]
    fn transaction_id_is_dispatched_for_booked_payments() {
        let mut payment: Payment =
            CreditCardPayment::new(id(6), Euro::from_cents(100), PaymentInterval::OneTime).into();
        assert_eq!(payment.transaction_id(), None);

        let raw: RawBookingData =
            serde_json::from_value(json!({ "transactionId": "cc-6", "amount": "100" })).unwrap();
        payment.book_payment(&raw, Utc::now(), &NoIds).unwrap();

        assert_eq!(payment.transaction_id(), Some("cc-6"));
        assert_eq!(direct_debit().transaction_id(), None);
    }
}
