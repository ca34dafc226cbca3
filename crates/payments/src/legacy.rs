//! Export into the pre-refactor payment field layout.
//!
//! Other systems still read this layout, so key names and status letters are
//! frozen even where they look odd.

use std::collections::BTreeMap;

use serde::Serialize;

use donorpay_core::DomainResult;

use crate::iban::Iban;

/// Scalar values keyed by historical field names.
pub type LegacyValues = BTreeMap<String, serde_json::Value>;

/// Deprecated single-letter payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LegacyPaymentStatus {
    #[serde(rename = "N")]
    DirectDebit,
    #[serde(rename = "Z")]
    BankTransfer,
    #[serde(rename = "X")]
    ExternalIncomplete,
    #[serde(rename = "B")]
    ExternalBooked,
    #[serde(rename = "D")]
    Cancelled,
}

impl LegacyPaymentStatus {
    pub fn code(self) -> char {
        match self {
            LegacyPaymentStatus::DirectDebit => 'N',
            LegacyPaymentStatus::BankTransfer => 'Z',
            LegacyPaymentStatus::ExternalIncomplete => 'X',
            LegacyPaymentStatus::ExternalBooked => 'B',
            LegacyPaymentStatus::Cancelled => 'D',
        }
    }

    /// Status of a payment confirmed by an external provider.
    pub fn external(booked: bool) -> Self {
        if booked {
            LegacyPaymentStatus::ExternalBooked
        } else {
            LegacyPaymentStatus::ExternalIncomplete
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPaymentData {
    pub amount_in_euro_cents: u64,
    pub interval_in_months: u8,
    /// 3-letter payment method code.
    pub payment_name: String,
    pub payment_specific_values: LegacyValues,
    pub payment_status: LegacyPaymentStatus,
}

/// Capability: export a payment into [`LegacyPaymentData`].
pub trait LegacyDataTransformer {
    fn legacy_data(&self) -> LegacyPaymentData;
}

/// Bank details derived from an IBAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankData {
    pub bic: String,
    pub account: String,
    pub bank_code: String,
    pub bank_name: String,
}

/// Looks up bank details for direct-debit exports.
pub trait BankDataGenerator {
    fn bank_data_from_iban(&self, iban: &Iban) -> DomainResult<BankData>;
}

pub(crate) fn string_value(value: impl Into<String>) -> serde_json::Value {
    serde_json::Value::String(value.into())
}
