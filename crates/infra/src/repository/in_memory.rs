use std::collections::HashMap;
use std::sync::RwLock;

use donorpay_core::PaymentId;
use donorpay_payments::Payment;

use super::{PaymentRepository, RepositoryError};

/// In-memory payment store.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<HashMap<PaymentId, Payment>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.payments.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PaymentRepository for InMemoryPaymentRepository {
    fn store_payment(&self, payment: &Payment) -> Result<(), RepositoryError> {
        let mut payments = self
            .payments
            .write()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))?;
        payments.insert(payment.id(), payment.clone());
        Ok(())
    }

    fn get_payment_by_id(&self, id: PaymentId) -> Result<Payment, RepositoryError> {
        let payments = self
            .payments
            .read()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))?;
        payments
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::PaymentNotFound(id))
    }

    fn follow_ups_of(&self, parent: PaymentId) -> Result<Vec<Payment>, RepositoryError> {
        let payments = self
            .payments
            .read()
            .map_err(|_| RepositoryError::Storage("lock poisoned".to_string()))?;

        let mut follow_ups: Vec<Payment> = payments
            .values()
            .filter(|p| p.parent_payment_id() == Some(parent))
            .cloned()
            .collect();
        follow_ups.sort_by_key(|p| p.id());
        Ok(follow_ups)
    }
}

#[cfg(test)]
mod tests {
    use donorpay_payments::{CreditCardPayment, Euro, PaymentInterval};

    use super::*;

    fn card(id: u64) -> Payment {
        CreditCardPayment::new(
            PaymentId::new(id),
            Euro::from_cents(1000),
            PaymentInterval::OneTime,
        )
        .into()
    }

    #[test]
    fn stores_and_loads_by_id() {
        let repo = InMemoryPaymentRepository::new();
        assert!(repo.is_empty());

        repo.store_payment(&card(1)).unwrap();
        repo.store_payment(&card(2)).unwrap();

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get_payment_by_id(PaymentId::new(2)).unwrap(), card(2));
    }

    #[test]
    fn storing_again_replaces() {
        let repo = InMemoryPaymentRepository::new();
        repo.store_payment(&card(1)).unwrap();
        repo.store_payment(&card(1)).unwrap();
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let repo = InMemoryPaymentRepository::new();
        assert_eq!(
            repo.get_payment_by_id(PaymentId::new(7)),
            Err(RepositoryError::PaymentNotFound(PaymentId::new(7)))
        );
    }
}
