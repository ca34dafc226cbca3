//! Domain error model.

use thiserror::Error;

use crate::id::PaymentId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// booking preconditions, malformed provider data). Infrastructure concerns
/// such as missing rows belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (malformed reference code, invalid constructor arguments).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The payment already carries booking data and cannot be booked again.
    #[error("payment {0} is already booked")]
    AlreadyBooked(PaymentId),

    /// A provider payload lacks a field the booking needs.
    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    /// A provider payload is present but cannot be interpreted.
    #[error("malformed booking data: {0}")]
    MalformedBookingData(String),

    /// The payment variant does not support the requested operation.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn already_booked(id: PaymentId) -> Self {
        Self::AlreadyBooked(id)
    }

    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingRequiredField(name.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedBookingData(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }
}
