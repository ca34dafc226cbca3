use std::sync::atomic::{AtomicU64, Ordering};

use donorpay_core::PaymentId;
use donorpay_payments::PaymentIdAllocator;

/// Process-local id sequence. Stands in for the database sequence.
#[derive(Debug)]
pub struct SequentialPaymentIdAllocator {
    next: AtomicU64,
}

impl SequentialPaymentIdAllocator {
    pub fn new(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialPaymentIdAllocator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PaymentIdAllocator for SequentialPaymentIdAllocator {
    fn new_id(&self) -> PaymentId {
        PaymentId::new(self.next.fetch_add(1, Ordering::SeqCst))
    }
}
