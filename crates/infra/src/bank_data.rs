//! Bank details for direct-debit exports.

use std::collections::HashMap;

use donorpay_core::DomainResult;
use donorpay_payments::{BankData, BankDataGenerator, Iban};

const GERMAN_BANK_CODE_LENGTH: usize = 8;
const GERMAN_BBAN_LENGTH: usize = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
struct BankEntry {
    bic: String,
    name: String,
}

/// Derives German bank code and account number from the IBAN and resolves
/// BIC and bank name from a fixed table.
///
/// Non-German IBANs carry no account data. Unknown bank codes resolve to an
/// empty BIC and name.
#[derive(Debug, Clone, Default)]
pub struct StaticBankDataGenerator {
    banks: HashMap<String, BankEntry>,
}

impl StaticBankDataGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bank(
        mut self,
        bank_code: impl Into<String>,
        bic: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.banks.insert(
            bank_code.into(),
            BankEntry {
                bic: bic.into(),
                name: name.into(),
            },
        );
        self
    }
}

impl BankDataGenerator for StaticBankDataGenerator {
    fn bank_data_from_iban(&self, iban: &Iban) -> DomainResult<BankData> {
        let bban = iban.bban();
        if iban.country_code() != "DE" || bban.len() != GERMAN_BBAN_LENGTH {
            return Ok(BankData {
                bic: String::new(),
                account: String::new(),
                bank_code: String::new(),
                bank_name: String::new(),
            });
        }

        let (bank_code, account) = bban.split_at(GERMAN_BANK_CODE_LENGTH);
        let entry = self.banks.get(bank_code);
        if entry.is_none() {
            tracing::debug!(bank_code, "no bank data for bank code");
        }

        Ok(BankData {
            bic: entry.map(|e| e.bic.clone()).unwrap_or_default(),
            account: account.to_string(),
            bank_code: bank_code.to_string(),
            bank_name: entry.map(|e| e.name.clone()).unwrap_or_default(),
        })
    }
}
