//! Payment persistence seam.

mod in_memory;

use std::sync::Arc;

use thiserror::Error;

use donorpay_core::PaymentId;
use donorpay_payments::Payment;

pub use in_memory::InMemoryPaymentRepository;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("payment {0} not found")]
    PaymentNotFound(PaymentId),

    #[error("storage failure: {0}")]
    Storage(String),
}

/// Loads and stores whole payments keyed by id.
///
/// Storing a payment whose id already exists replaces it.
pub trait PaymentRepository: Send + Sync {
    fn store_payment(&self, payment: &Payment) -> Result<(), RepositoryError>;

    fn get_payment_by_id(&self, id: PaymentId) -> Result<Payment, RepositoryError>;

    /// Follow-up payments booked against `parent`, ordered by id.
    fn follow_ups_of(&self, parent: PaymentId) -> Result<Vec<Payment>, RepositoryError>;
}

impl<R> PaymentRepository for Arc<R>
where
    R: PaymentRepository + ?Sized,
{
    fn store_payment(&self, payment: &Payment) -> Result<(), RepositoryError> {
        (**self).store_payment(payment)
    }

    fn get_payment_by_id(&self, id: PaymentId) -> Result<Payment, RepositoryError> {
        (**self).get_payment_by_id(id)
    }

    fn follow_ups_of(&self, parent: PaymentId) -> Result<Vec<Payment>, RepositoryError> {
        (**self).follow_ups_of(parent)
    }
}
