use chrono::{DateTime, Utc};
use serde::Serialize;

use donorpay_core::{DomainError, PaymentId};
use donorpay_payments::{BookingOutcome, Payment, RawBookingData};
use donorpay_refcode::CharacterIndexSource;

use super::{PaymentService, ServiceError};
use crate::repository::PaymentRepository;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentBooked {
    /// The payment that carries the booking: the requested one, or the new
    /// follow-up for a recurring PayPal payment.
    pub payment_id: PaymentId,
    /// Set when the booking produced a follow-up payment.
    pub parent_payment_id: Option<PaymentId>,
}

impl<R, S> PaymentService<R, S>
where
    R: PaymentRepository,
    S: CharacterIndexSource,
{
    pub fn book_payment(
        &self,
        payment_id: PaymentId,
        raw_data: &RawBookingData,
    ) -> Result<PaymentBooked, ServiceError> {
        self.book_payment_at(payment_id, raw_data, Utc::now())
    }

    /// Book with an explicit booking time.
    pub fn book_payment_at(
        &self,
        payment_id: PaymentId,
        raw_data: &RawBookingData,
        booked_at: DateTime<Utc>,
    ) -> Result<PaymentBooked, ServiceError> {
        self.with_payment_lock(payment_id, || {
            let mut payment = self.repository.get_payment_by_id(payment_id)?;

            let outcome = payment
                .book_payment(raw_data, booked_at, self.ids.as_ref())
                .inspect_err(|err| {
                    tracing::warn!(%payment_id, error = %err, "booking rejected");
                })?;

            match outcome {
                BookingOutcome::Booked => {
                    self.repository.store_payment(&payment)?;
                    tracing::info!(%payment_id, method = %payment.method(), "payment booked");
                    Ok(PaymentBooked {
                        payment_id,
                        parent_payment_id: None,
                    })
                }
                BookingOutcome::BookedWithFollowUp(follow_up) => {
                    self.reject_redelivered_cycle(payment_id, &follow_up)?;
                    self.repository.store_payment(&follow_up)?;
                    tracing::info!(
                        %payment_id,
                        follow_up_id = %follow_up.id(),
                        "follow-up payment booked"
                    );
                    Ok(PaymentBooked {
                        payment_id: follow_up.id(),
                        parent_payment_id: Some(payment_id),
                    })
                }
            }
        })
    }

    /// A billing cycle is booked once: a follow-up whose transaction id is
    /// already carried by an earlier follow-up of the same parent is rejected.
    fn reject_redelivered_cycle(
        &self,
        parent_id: PaymentId,
        follow_up: &Payment,
    ) -> Result<(), ServiceError> {
        let Some(transaction_id) = follow_up.transaction_id() else {
            return Ok(());
        };

        let existing = self.repository.follow_ups_of(parent_id)?;
        match existing
            .iter()
            .find(|p| p.transaction_id() == Some(transaction_id))
        {
            Some(booked) => {
                tracing::warn!(
                    %parent_id,
                    booked_id = %booked.id(),
                    transaction_id,
                    "notification for an already booked cycle"
                );
                Err(DomainError::already_booked(booked.id()).into())
            }
            None => Ok(()),
        }
    }
}
