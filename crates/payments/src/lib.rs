//! Payment domain module.
//!
//! Business rules for the payment lifecycle: creation, provider booking,
//! cancellation/restoration, anonymisation and legacy export. Pure,
//! deterministic domain logic (no IO, no HTTP, no storage, no logging).

pub mod booking;
pub mod euro;
pub mod iban;
pub mod interval;
pub mod legacy;
pub mod lifecycle;
pub mod method;
pub mod payment;
pub mod transformers;
pub mod variants;

pub use booking::{Bookable, BookingData, BookingOutcome, PaymentIdAllocator, RawBookingData};
pub use euro::Euro;
pub use iban::Iban;
pub use interval::PaymentInterval;
pub use legacy::{
    BankData, BankDataGenerator, LegacyDataTransformer, LegacyPaymentData, LegacyPaymentStatus,
    LegacyValues,
};
pub use lifecycle::{Anonymisable, Cancellable};
pub use method::PaymentMethod;
pub use payment::Payment;
pub use transformers::TransformedBookingData;
pub use variants::{
    BankTransferPayment, CreditCardPayment, DirectDebitPayment, FeeChangePayment, PayPalPayment,
    SofortPayment,
};
