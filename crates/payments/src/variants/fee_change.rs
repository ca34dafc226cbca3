use donorpay_core::PaymentId;

use crate::euro::Euro;
use crate::interval::PaymentInterval;
use crate::legacy::{LegacyDataTransformer, LegacyPaymentData, LegacyPaymentStatus, LegacyValues};
use crate::method::PaymentMethod;

/// Placeholder recording a membership fee change. Carries no provider data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeChangePayment {
    id: PaymentId,
    amount: Euro,
    interval: PaymentInterval,
}

impl FeeChangePayment {
    pub fn new(id: PaymentId, amount: Euro, interval: PaymentInterval) -> Self {
        Self {
            id,
            amount,
            interval,
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
}

impl LegacyDataTransformer for FeeChangePayment {
    fn legacy_data(&self) -> LegacyPaymentData {
        LegacyPaymentData {
            amount_in_euro_cents: self.amount.cents(),
            interval_in_months: self.interval.months(),
            payment_name: PaymentMethod::FeeChange.code().to_string(),
            payment_specific_values: LegacyValues::new(),
            payment_status: LegacyPaymentStatus::ExternalBooked,
        }
    }
}
