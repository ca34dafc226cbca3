use serde::{Deserialize, Serialize};

use donorpay_core::{DomainError, PaymentId};
use donorpay_payments::{
    BankTransferPayment, CreditCardPayment, DirectDebitPayment, Euro, FeeChangePayment, Iban,
    Payment, PaymentInterval, PaymentMethod, PayPalPayment, SofortPayment,
};
use donorpay_refcode::CharacterIndexSource;

use super::{PaymentService, ServiceError};
use crate::repository::PaymentRepository;

/// Parameters for a new payment. `iban`/`bic` are only read for direct debit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePaymentRequest {
    pub amount: Euro,
    pub interval: PaymentInterval,
    pub method: PaymentMethod,
    #[serde(default)]
    pub iban: Option<String>,
    #[serde(default)]
    pub bic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentCreated {
    pub payment_id: PaymentId,
    pub method: PaymentMethod,
    /// Formatted reference code for bank transfer and Sofort payments.
    pub reference_code: Option<String>,
}

impl<R, S> PaymentService<R, S>
where
    R: PaymentRepository,
    S: CharacterIndexSource,
{
    pub fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<PaymentCreated, ServiceError> {
        let method = request.method;
        let payment = self.build_payment(request).inspect_err(|err| {
            tracing::warn!(%method, error = %err, "payment creation rejected");
        })?;

        self.repository.store_payment(&payment)?;

        let reference_code = match &payment {
            Payment::BankTransfer(p) => p.reference_code().map(|c| c.formatted()),
            Payment::Sofort(p) => p.reference_code().map(|c| c.formatted()),
            _ => None,
        };
        tracing::info!(
            payment_id = %payment.id(),
            %method,
            amount = %payment.amount(),
            interval = payment.interval().months(),
            "payment created"
        );

        Ok(PaymentCreated {
            payment_id: payment.id(),
            method,
            reference_code,
        })
    }

    fn build_payment(&self, request: CreatePaymentRequest) -> Result<Payment, ServiceError> {
        let CreatePaymentRequest {
            amount,
            interval,
            method,
            iban,
            bic,
        } = request;

        if amount.is_zero() {
            return Err(DomainError::validation("payment amount must be positive").into());
        }

        let payment = match method {
            PaymentMethod::CreditCard => {
                CreditCardPayment::new(self.ids.new_id(), amount, interval).into()
            }
            PaymentMethod::PayPal => PayPalPayment::new(self.ids.new_id(), amount, interval).into(),
            PaymentMethod::DirectDebit => {
                let iban = iban
                    .as_deref()
                    .ok_or_else(|| DomainError::validation("direct debit payments need an IBAN"))?;
                let iban = Iban::new(iban)?;
                let bic = match bic {
                    Some(bic) if !bic.trim().is_empty() => bic,
                    _ => self.bank_data.bank_data_from_iban(&iban)?.bic,
                };
                DirectDebitPayment::new(self.ids.new_id(), amount, interval, iban, bic).into()
            }
            PaymentMethod::BankTransfer => {
                let code = self.issue_reference_code(&self.config.bank_transfer_prefix)?;
                BankTransferPayment::new(self.ids.new_id(), amount, interval, Some(code)).into()
            }
            PaymentMethod::Sofort => {
                if interval.is_recurring() {
                    // Reject before an id or a code is consumed.
                    return Err(DomainError::validation(format!(
                        "Sofort payments must be one-time, got an interval of {} months",
                        interval.months()
                    ))
                    .into());
                }
                let code = self.issue_reference_code(&self.config.sofort_prefix)?;
                SofortPayment::new(self.ids.new_id(), amount, interval, Some(code))?.into()
            }
            PaymentMethod::FeeChange => {
                FeeChangePayment::new(self.ids.new_id(), amount, interval).into()
            }
        };

        Ok(payment)
    }
}
