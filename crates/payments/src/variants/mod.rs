//! The six payment variants.

pub mod bank_transfer;
pub mod credit_card;
pub mod direct_debit;
pub mod fee_change;
pub mod paypal;
pub mod sofort;

pub use bank_transfer::BankTransferPayment;
pub use credit_card::CreditCardPayment;
pub use direct_debit::DirectDebitPayment;
pub use fee_change::FeeChangePayment;
pub use paypal::PayPalPayment;
pub use sofort::SofortPayment;
