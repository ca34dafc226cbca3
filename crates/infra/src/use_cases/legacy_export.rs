use donorpay_core::PaymentId;
use donorpay_payments::{LegacyDataTransformer, LegacyPaymentData, Payment};
use donorpay_refcode::CharacterIndexSource;

use super::{PaymentService, ServiceError};
use crate::repository::PaymentRepository;

impl<R, S> PaymentService<R, S>
where
    R: PaymentRepository,
    S: CharacterIndexSource,
{
    /// Export a payment for the legacy system. Direct debits are enriched
    /// with account number, bank code and bank name.
    pub fn legacy_data(&self, payment_id: PaymentId) -> Result<LegacyPaymentData, ServiceError> {
        let payment = self.repository.get_payment_by_id(payment_id)?;
        let legacy = match &payment {
            Payment::DirectDebit(p) => p.legacy_data_with_bank_data(self.bank_data.as_ref())?,
            other => other.legacy_data(),
        };
        tracing::debug!(%payment_id, method = %payment.method(), "legacy data exported");
        Ok(legacy)
    }
}
