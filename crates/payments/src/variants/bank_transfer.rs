use donorpay_core::PaymentId;
use donorpay_refcode::PaymentReferenceCode;

use crate::euro::Euro;
use crate::interval::PaymentInterval;
use crate::legacy::{
    LegacyDataTransformer, LegacyPaymentData, LegacyPaymentStatus, LegacyValues, string_value,
};
use crate::lifecycle::Anonymisable;
use crate::method::PaymentMethod;

/// Bank transfer, matched against incoming transfers by its reference code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankTransferPayment {
    id: PaymentId,
    amount: Euro,
    interval: PaymentInterval,
    reference_code: Option<PaymentReferenceCode>,
}

impl BankTransferPayment {
    pub fn new(
        id: PaymentId,
        amount: Euro,
        interval: PaymentInterval,
        reference_code: Option<PaymentReferenceCode>,
    ) -> Self {
        Self {
            id,
            amount,
            interval,
            reference_code,
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

    pub fn reference_code(&self) -> Option<&PaymentReferenceCode> {
        self.reference_code.as_ref()
    }
}

impl Anonymisable for BankTransferPayment {
    fn anonymise(&mut self) {
        self.reference_code = None;
    }

    fn is_anonymised(&self) -> bool {
        self.reference_code.is_none()
    }
}

impl LegacyDataTransformer for BankTransferPayment {
    fn legacy_data(&self) -> LegacyPaymentData {
        let mut payment_specific_values = LegacyValues::new();
        if let Some(code) = &self.reference_code {
            payment_specific_values.insert("ueb_code".to_string(), string_value(code.formatted()));
        }

        LegacyPaymentData {
            amount_in_euro_cents: self.amount.cents(),
            interval_in_months: self.interval.months(),
            payment_name: PaymentMethod::BankTransfer.code().to_string(),
            payment_specific_values,
            payment_status: LegacyPaymentStatus::BankTransfer,
        }
    }
}
