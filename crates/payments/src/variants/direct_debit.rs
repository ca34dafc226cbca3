use donorpay_core::{DomainResult, PaymentId};

use crate::euro::Euro;
use crate::iban::Iban;
use crate::interval::PaymentInterval;
use crate::legacy::{
    BankDataGenerator, LegacyDataTransformer, LegacyPaymentData, LegacyPaymentStatus,
    LegacyValues, string_value,
};
use crate::lifecycle::{Anonymisable, Cancellable};
use crate::method::PaymentMethod;

/// Direct debit (SEPA mandate). Complete from the start; the bank pulls the
/// money, so there is nothing to book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectDebitPayment {
    id: PaymentId,
    amount: Euro,
    interval: PaymentInterval,
    iban: Option<Iban>,
    bic: Option<String>,
    cancelled: bool,
}

impl DirectDebitPayment {
    pub fn new(
        id: PaymentId,
        amount: Euro,
        interval: PaymentInterval,
        iban: Iban,
        bic: impl Into<String>,
    ) -> Self {
        let bic = bic.into();
        Self {
            id,
            amount,
            interval,
            iban: Some(iban),
            bic: (!bic.trim().is_empty()).then_some(bic),
            cancelled: false,
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

    pub fn iban(&self) -> Option<&Iban> {
        self.iban.as_ref()
    }

    pub fn bic(&self) -> Option<&str> {
        self.bic.as_deref()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Legacy export with account number, bank code and bank name looked up
    /// from the IBAN. Anonymised payments export without bank details.
    pub fn legacy_data_with_bank_data(
        &self,
        bank_data: &dyn BankDataGenerator,
    ) -> DomainResult<LegacyPaymentData> {
        let mut legacy = self.legacy_data();
        let Some(iban) = &self.iban else {
            return Ok(legacy);
        };

        let data = bank_data.bank_data_from_iban(iban)?;
        let values = &mut legacy.payment_specific_values;
        values.insert("konto".to_string(), string_value(data.account));
        values.insert("blz".to_string(), string_value(data.bank_code));
        values.insert("bankname".to_string(), string_value(data.bank_name));
        if self.bic.is_none() && !data.bic.is_empty() {
            values.insert("bic".to_string(), string_value(data.bic));
        }
        Ok(legacy)
    }
}

impl Cancellable for DirectDebitPayment {
    fn is_cancellable(&self) -> bool {
        !self.cancelled
    }

    fn is_restorable(&self) -> bool {
        self.cancelled
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }

    fn restore(&mut self) {
        self.cancelled = false;
    }
}

impl Anonymisable for DirectDebitPayment {
    fn anonymise(&mut self) {
        self.iban = None;
        self.bic = None;
    }

    fn is_anonymised(&self) -> bool {
        self.iban.is_none() && self.bic.is_none()
    }
}

impl LegacyDataTransformer for DirectDebitPayment {
    fn legacy_data(&self) -> LegacyPaymentData {
        let mut payment_specific_values = LegacyValues::new();
        if let Some(iban) = &self.iban {
            payment_specific_values.insert("iban".to_string(), string_value(iban.as_str()));
        }
        if let Some(bic) = &self.bic {
            payment_specific_values.insert("bic".to_string(), string_value(bic.as_str()));
        }

        LegacyPaymentData {
            amount_in_euro_cents: self.amount.cents(),
            interval_in_months: self.interval.months(),
            payment_name: PaymentMethod::DirectDebit.code().to_string(),
            payment_specific_values,
            payment_status: if self.cancelled {
                LegacyPaymentStatus::Cancelled
            } else {
                LegacyPaymentStatus::DirectDebit
            },
        }
    }
}
