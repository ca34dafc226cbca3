//! Collision-free reference-code issuing.

use std::collections::HashSet;

use donorpay_core::{DomainError, DomainResult};
use donorpay_refcode::{
    CharacterIndexSource, PaymentReferenceCode, PaymentReferenceCodeGenerator,
    RandomCharacterIndexSource,
};

/// Issues reference codes that have not been handed out before.
///
/// Codes stay registered for good, including those of anonymised payments,
/// so a donor's old code can never be matched to someone else's transfer.
#[derive(Debug)]
pub struct UniqueReferenceCodeGenerator<S> {
    generator: PaymentReferenceCodeGenerator<S>,
    issued: HashSet<PaymentReferenceCode>,
    max_attempts: u32,
}

impl<S: CharacterIndexSource> UniqueReferenceCodeGenerator<S> {
    pub fn new(source: S, max_attempts: u32) -> Self {
        Self {
            generator: PaymentReferenceCodeGenerator::new(source),
            issued: HashSet::new(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Register a code issued elsewhere, e.g. loaded from storage.
    pub fn register(&mut self, code: PaymentReferenceCode) -> bool {
        self.issued.insert(code)
    }

    pub fn is_issued(&self, code: &PaymentReferenceCode) -> bool {
        self.issued.contains(code)
    }

    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    pub fn issue(&mut self, prefix: &str) -> DomainResult<PaymentReferenceCode> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.new_code(prefix)?;
            if self.issued.insert(code.clone()) {
                return Ok(code);
            }
            tracing::debug!(attempt, code = %code, "reference code collision");
        }

        Err(DomainError::validation(format!(
            "could not generate an unused reference code with prefix {prefix} after {} attempts",
            self.max_attempts
        )))
    }
}

impl UniqueReferenceCodeGenerator<RandomCharacterIndexSource> {
    pub fn random(max_attempts: u32) -> Self {
        Self::new(RandomCharacterIndexSource::new(), max_attempts)
    }
}

#[cfg(test)]
mod tests {
    use donorpay_refcode::{CyclingCharacterIndexSource, PaymentReferenceCodeValidator};

    use super::*;

    #[test]
    fn issues_valid_codes() {
        let mut codes = UniqueReferenceCodeGenerator::new(
            CyclingCharacterIndexSource::new(0..12),
            3,
        );
        let first = codes.issue("XW").unwrap();
        let second = codes.issue("XW").unwrap();

        assert_eq!(first.formatted(), "XW-ACD-EFK-4");
        assert_eq!(second.formatted(), "XW-LMN-PRT-K");
        assert!(PaymentReferenceCodeValidator::new().validate(&first.formatted()));
        assert_eq!(codes.issued_count(), 2);
    }

    #[test]
    fn retries_after_collision() {
        // The source repeats ACDEFK before moving on to LMNPRT.
        let source = CyclingCharacterIndexSource::new((0..6).chain(0..6).chain(6..12));
        let mut codes = UniqueReferenceCodeGenerator::new(source, 3);

        assert_eq!(codes.issue("XW").unwrap().formatted(), "XW-ACD-EFK-4");
        assert_eq!(codes.issue("XW").unwrap().formatted(), "XW-LMN-PRT-K");
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut codes = UniqueReferenceCodeGenerator::new(CyclingCharacterIndexSource::new(0..6), 4);
        codes.issue("XW").unwrap();

        let err = codes.issue("XW").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(codes.issued_count(), 1);
    }

    #[test]
    fn same_code_under_another_prefix_is_distinct() {
        let mut codes = UniqueReferenceCodeGenerator::new(CyclingCharacterIndexSource::new(0..6), 1);
        codes.issue("XW").unwrap();
        assert_eq!(codes.issue("XR").unwrap().code(), "ACDEFK");
    }

    #[test]
    fn registered_codes_are_never_reissued() {
        let mut codes = UniqueReferenceCodeGenerator::new(CyclingCharacterIndexSource::new(0..6), 2);
        let existing = PaymentReferenceCode::parse("XW-ACD-EFK-4").unwrap();
        assert!(codes.register(existing.clone()));
        assert!(codes.is_issued(&existing));
        assert!(codes.issue("XW").is_err());
    }

    #[test]
    fn bad_prefix_is_a_validation_error() {
        let mut codes = UniqueReferenceCodeGenerator::random(3);
        assert!(matches!(codes.issue("OO"), Err(DomainError::Validation(_))));
    }
}
