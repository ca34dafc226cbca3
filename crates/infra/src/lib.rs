//! Application layer for the payment lifecycle.
//!
//! Wires the pure domain crates to storage, id allocation, reference-code
//! issuing and bank lookups, and exposes the use cases through
//! [`PaymentService`].

pub mod bank_data;
pub mod config;
pub mod id_allocator;
pub mod reference_codes;
pub mod repository;
pub mod use_cases;


pub use bank_data::StaticBankDataGenerator;
pub use config::{ConfigError, PaymentConfig};
pub use id_allocator::SequentialPaymentIdAllocator;
pub use reference_codes::UniqueReferenceCodeGenerator;
pub use repository::{InMemoryPaymentRepository, PaymentRepository, RepositoryError};
pub use use_cases::{
    CreatePaymentRequest, FailureResponse, PaymentBooked, PaymentCreated, PaymentService,
    ServiceError,
};
