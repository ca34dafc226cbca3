use donorpay_core::PaymentId;
use donorpay_refcode::CharacterIndexSource;

use super::{PaymentService, ServiceError};
use crate::repository::PaymentRepository;

impl<R, S> PaymentService<R, S>
where
    R: PaymentRepository,
    S: CharacterIndexSource,
{
    pub fn cancel_payment(&self, payment_id: PaymentId) -> Result<(), ServiceError> {
        self.with_payment_lock(payment_id, || {
            let mut payment = self.repository.get_payment_by_id(payment_id)?;
            payment.cancel().inspect_err(|err| {
                tracing::warn!(%payment_id, error = %err, "cancellation rejected");
            })?;
            self.repository.store_payment(&payment)?;
            tracing::info!(%payment_id, "payment cancelled");
            Ok(())
        })
    }

    pub fn restore_payment(&self, payment_id: PaymentId) -> Result<(), ServiceError> {
        self.with_payment_lock(payment_id, || {
            let mut payment = self.repository.get_payment_by_id(payment_id)?;
            payment.restore().inspect_err(|err| {
                tracing::warn!(%payment_id, error = %err, "restoration rejected");
            })?;
            self.repository.store_payment(&payment)?;
            tracing::info!(%payment_id, "payment restored");
            Ok(())
        })
    }

    /// Idempotent. Payments without personal data are stored unchanged.
    pub fn anonymise_payment(&self, payment_id: PaymentId) -> Result<(), ServiceError> {
        self.with_payment_lock(payment_id, || {
            let mut payment = self.repository.get_payment_by_id(payment_id)?;
            payment.anonymise();
            self.repository.store_payment(&payment)?;
            tracing::info!(%payment_id, "payment anonymised");
            Ok(())
        })
    }

    /// Anonymise several payments, stopping at the first failure.
    pub fn anonymise_payments(&self, payment_ids: &[PaymentId]) -> Result<usize, ServiceError> {
        for payment_id in payment_ids {
            self.anonymise_payment(*payment_id)?;
        }
        Ok(payment_ids.len())
    }
}
