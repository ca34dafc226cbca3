use serde::{Deserialize, Serialize};

use donorpay_core::{DomainError, DomainResult, ValueObject};

const MIN_LENGTH: usize = 15;
const MAX_LENGTH: usize = 34;

/// International bank account number, normalized and checksum-verified (ISO 13616).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iban(String);

impl ValueObject for Iban {}

impl Iban {
    /// Accepts the printed form with spaces and any letter case.
    pub fn new(value: &str) -> DomainResult<Self> {
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if !(MIN_LENGTH..=MAX_LENGTH).contains(&normalized.len())
            || !normalized.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(DomainError::validation(format!("malformed IBAN: {value:?}")));
        }

        let bytes = normalized.as_bytes();
        if !bytes[..2].iter().all(u8::is_ascii_alphabetic)
            || !bytes[2..4].iter().all(u8::is_ascii_digit)
        {
            return Err(DomainError::validation(format!("malformed IBAN: {value:?}")));
        }

        if mod97(&normalized) != 1 {
            return Err(DomainError::validation(format!(
                "IBAN check digits do not match: {value:?}"
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    /// Basic bank account number (everything after country and check digits).
    pub fn bban(&self) -> &str {
        &self.0[4..]
    }
}

/// Remainder of the rearranged IBAN (letters as 10..35) modulo 97.
fn mod97(normalized: &str) -> u32 {
    let rearranged = normalized[4..].chars().chain(normalized[..4].chars());
    rearranged.fold(0u32, |remainder, c| {
        // Validated as ASCII alphanumeric above.
        let value = c.to_digit(36).unwrap_or(0);
        if value < 10 {
            (remainder * 10 + value) % 97
        } else {
            (remainder * 100 + value) % 97
        }
    })
}

impl core::fmt::Display for Iban {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Iban {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Iban> for String {
    fn from(value: Iban) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_ibans_in_printed_form() {
        let iban = Iban::new("de02 1203 0000 0000 2020 51").unwrap();
        assert_eq!(iban.as_str(), "DE02120300000000202051");
        assert_eq!(iban.country_code(), "DE");
        assert_eq!(iban.bban(), "120300000000202051");

        assert!(Iban::new("AT022050302101023600").is_ok());
        assert!(Iban::new("GB33BUKB20201555555555").is_ok());
    }

    #[test]
    fn rejects_wrong_check_digits() {
        let err = Iban::new("DE02120300000000202052").unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("check digits")));
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["", "DE02", "DE02-1203-0000-0000-2020-51", "0202120300000000202051", "DEXX120300000000202051"] {
            assert!(Iban::new(input).is_err(), "{input:?}");
        }
    }
}
