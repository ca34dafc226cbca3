//! Payment use cases.
//!
//! [`PaymentService`] is the single entry point the rest of the platform
//! talks to. It loads payments from the repository, applies the domain
//! operation, persists the result and logs the transition. All failures are
//! reported as a [`ServiceError`], which maps onto the `{error, message}`
//! shape of [`FailureResponse`].

mod book_payment;
mod create_payment;
mod legacy_export;
mod lifecycle;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use thiserror::Error;

use donorpay_core::{DomainError, PaymentId};
use donorpay_payments::{BankDataGenerator, PaymentIdAllocator};
use donorpay_refcode::{CharacterIndexSource, PaymentReferenceCode, RandomCharacterIndexSource};

use crate::config::PaymentConfig;
use crate::id_allocator::SequentialPaymentIdAllocator;
use crate::reference_codes::UniqueReferenceCodeGenerator;
use crate::repository::{PaymentRepository, RepositoryError};

pub use book_payment::PaymentBooked;
pub use create_payment::{CreatePaymentRequest, PaymentCreated};

/// Use-case level failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Stable machine-readable code for the failure.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Domain(DomainError::Validation(_)) => "validation_error",
            ServiceError::Domain(DomainError::AlreadyBooked(_)) => "already_booked",
            ServiceError::Domain(DomainError::MissingRequiredField(_)) => "missing_required_field",
            ServiceError::Domain(DomainError::MalformedBookingData(_)) => "malformed_booking_data",
            ServiceError::Domain(DomainError::UnsupportedOperation(_)) => "unsupported_operation",
            ServiceError::Repository(RepositoryError::PaymentNotFound(_)) => "payment_not_found",
            ServiceError::Repository(RepositoryError::Storage(_)) => "storage_error",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    pub fn to_response(&self) -> FailureResponse {
        FailureResponse {
            error: self.code(),
            message: self.to_string(),
        }
    }
}

/// Serializable failure body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureResponse {
    pub error: &'static str,
    pub message: String,
}

impl From<ServiceError> for FailureResponse {
    fn from(value: ServiceError) -> Self {
        value.to_response()
    }
}

/// Application service for the payment lifecycle.
///
/// Mutating operations on the same payment id are serialized: each one holds
/// the payment's lock from load to store.
pub struct PaymentService<R, S> {
    repository: R,
    payment_locks: Mutex<HashMap<PaymentId, Arc<Mutex<()>>>>,
    ids: Arc<dyn PaymentIdAllocator + Send + Sync>,
    reference_codes: Mutex<UniqueReferenceCodeGenerator<S>>,
    bank_data: Arc<dyn BankDataGenerator + Send + Sync>,
    config: PaymentConfig,
}

impl<R, S> PaymentService<R, S>
where
    R: PaymentRepository,
    S: CharacterIndexSource,
{
    pub fn new(
        repository: R,
        ids: Arc<dyn PaymentIdAllocator + Send + Sync>,
        reference_codes: UniqueReferenceCodeGenerator<S>,
        bank_data: Arc<dyn BankDataGenerator + Send + Sync>,
        config: PaymentConfig,
    ) -> Self {
        Self {
            repository,
            payment_locks: Mutex::new(HashMap::new()),
            ids,
            reference_codes: Mutex::new(reference_codes),
            bank_data,
            config,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn config(&self) -> &PaymentConfig {
        &self.config
    }

    /// Run a load-modify-store sequence while holding the lock for `payment_id`.
    fn with_payment_lock<T>(
        &self,
        payment_id: PaymentId,
        operation: impl FnOnce() -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let lock = {
            let mut locks = self
                .payment_locks
                .lock()
                .map_err(|_| ServiceError::Internal("payment lock table poisoned".into()))?;
            locks.entry(payment_id).or_default().clone()
        };
        // The guarded state lives in the repository, a poisoned guard carries nothing.
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        operation()
    }

    fn issue_reference_code(&self, prefix: &str) -> Result<PaymentReferenceCode, ServiceError> {
        let mut codes = self
            .reference_codes
            .lock()
            .map_err(|_| ServiceError::Internal("reference code registry lock poisoned".into()))?;
        Ok(codes.issue(prefix)?)
    }
}

impl<R> PaymentService<R, RandomCharacterIndexSource>
where
    R: PaymentRepository,
{
    /// Production wiring: sequential ids from the configured start and random
    /// reference codes.
    pub fn from_config(
        repository: R,
        bank_data: Arc<dyn BankDataGenerator + Send + Sync>,
        config: PaymentConfig,
    ) -> Self {
        let ids = Arc::new(SequentialPaymentIdAllocator::new(config.first_payment_id));
        let reference_codes = UniqueReferenceCodeGenerator::random(config.reference_code_attempts);
        Self::new(repository, ids, reference_codes, bank_data, config)
    }
}

#[cfg(test)]
mod tests {
    use donorpay_core::PaymentId;

    use super::*;

    #[test]
    fn error_codes_are_stable() {
        let cases = [
            (ServiceError::from(DomainError::validation("x")), "validation_error"),
            (
                DomainError::already_booked(PaymentId::new(1)).into(),
                "already_booked",
            ),
            (DomainError::missing_field("txn_id").into(), "missing_required_field"),
            (DomainError::malformed("x").into(), "malformed_booking_data"),
            (DomainError::unsupported("x").into(), "unsupported_operation"),
            (
                RepositoryError::PaymentNotFound(PaymentId::new(1)).into(),
                "payment_not_found",
            ),
            (RepositoryError::Storage("x".into()).into(), "storage_error"),
            (ServiceError::Internal("x".into()), "internal_error"),
        ];

        for (err, code) in cases {
            assert_eq!(err.code(), code);
        }
    }

    #[test]
    fn failure_response_serializes_error_and_message() {
        let err = ServiceError::from(RepositoryError::PaymentNotFound(PaymentId::new(9)));
        let json = serde_json::to_value(FailureResponse::from(err)).unwrap();

        assert_eq!(json["error"], "payment_not_found");
        assert_eq!(json["message"], "payment 9 not found");
    }
}
