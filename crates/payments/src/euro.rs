use serde::{Deserialize, Serialize};

use donorpay_core::ValueObject;

/// Amount in euro cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Euro {
    cents: u64,
}

impl ValueObject for Euro {}

impl Euro {
    pub fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }
}

impl core::fmt::Display for Euro {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_as_decimal_euros() {
        assert_eq!(Euro::from_cents(1234).to_string(), "12.34");
        assert_eq!(Euro::from_cents(5).to_string(), "0.05");
        assert_eq!(Euro::from_cents(100_000).to_string(), "1000.00");
    }
}
