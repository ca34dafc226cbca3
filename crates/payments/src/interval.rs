use serde::{Deserialize, Serialize};

use donorpay_core::DomainError;

/// Billing interval, serialized as the number of months (0 = one-time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaymentInterval {
    OneTime = 0,
    Monthly = 1,
    Quarterly = 3,
    HalfYearly = 6,
    Yearly = 12,
}

impl PaymentInterval {
    pub fn months(self) -> u8 {
        self as u8
    }

    pub fn is_recurring(self) -> bool {
        self != PaymentInterval::OneTime
    }
}

impl TryFrom<u8> for PaymentInterval {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PaymentInterval::OneTime),
            1 => Ok(PaymentInterval::Monthly),
            3 => Ok(PaymentInterval::Quarterly),
            6 => Ok(PaymentInterval::HalfYearly),
            12 => Ok(PaymentInterval::Yearly),
            other => Err(DomainError::validation(format!(
                "payment interval must be one of 0, 1, 3, 6, 12 months, got {other}"
            ))),
        }
    }
}

impl From<PaymentInterval> for u8 {
    fn from(value: PaymentInterval) -> Self {
        value.months()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_time_is_not_recurring() {
        assert!(!PaymentInterval::OneTime.is_recurring());
        for interval in [
            PaymentInterval::Monthly,
            PaymentInterval::Quarterly,
            PaymentInterval::HalfYearly,
            PaymentInterval::Yearly,
        ] {
            assert!(interval.is_recurring(), "{interval:?}");
        }
    }

    #[test]
    fn serializes_as_months() {
        assert_eq!(serde_json::to_string(&PaymentInterval::Quarterly).unwrap(), "3");
        let interval: PaymentInterval = serde_json::from_str("12").unwrap();
        assert_eq!(interval, PaymentInterval::Yearly);
    }

    #[test]
    fn rejects_unknown_month_counts() {
        assert!(PaymentInterval::try_from(2).is_err());
        assert!(serde_json::from_str::<PaymentInterval>("24").is_err());
    }
}
