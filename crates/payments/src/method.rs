use core::str::FromStr;

use serde::{Deserialize, Serialize};

use donorpay_core::DomainError;

/// Payment method, identified in exports by a 3-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "MCP")]
    CreditCard,
    #[serde(rename = "PPL")]
    PayPal,
    #[serde(rename = "BEZ")]
    DirectDebit,
    #[serde(rename = "UEB")]
    BankTransfer,
    #[serde(rename = "SUB")]
    Sofort,
    #[serde(rename = "FCH")]
    FeeChange,
}

impl PaymentMethod {
    pub fn code(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "MCP",
            PaymentMethod::PayPal => "PPL",
            PaymentMethod::DirectDebit => "BEZ",
            PaymentMethod::BankTransfer => "UEB",
            PaymentMethod::Sofort => "SUB",
            PaymentMethod::FeeChange => "FCH",
        }
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MCP" => Ok(PaymentMethod::CreditCard),
            "PPL" => Ok(PaymentMethod::PayPal),
            "BEZ" => Ok(PaymentMethod::DirectDebit),
            "UEB" => Ok(PaymentMethod::BankTransfer),
            "SUB" => Ok(PaymentMethod::Sofort),
            "FCH" => Ok(PaymentMethod::FeeChange),
            other => Err(DomainError::validation(format!("unknown payment method: {other}"))),
        }
    }
}
