//! Validation of donor-entered reference codes.
//!
//! Donors type (or handwrite) codes into bank transfer forms, so the input may
//! contain spaces, dashes, lowercase letters or stray punctuation. Anything
//! outside the alphabet is dropped before the checksum is compared.

use crate::checksum::ChecksumGenerator;
use crate::code::{ALPHABET, TOTAL_LENGTH};

#[derive(Debug, Clone)]
pub struct PaymentReferenceCodeValidator {
    checksum: ChecksumGenerator,
}

impl PaymentReferenceCodeValidator {
    pub fn new() -> Self {
        Self {
            checksum: ChecksumGenerator::for_reference_codes(),
        }
    }

    pub fn validate(&self, input: &str) -> bool {
        let normalized: String = input
            .to_uppercase()
            .chars()
            .filter(|c| ALPHABET.contains(*c))
            .collect();

        if normalized.len() != TOTAL_LENGTH {
            return false;
        }

        // Alphabet is ASCII, so byte offsets are char offsets here.
        let (body, checksum) = normalized.split_at(TOTAL_LENGTH - 1);
        let expected = self.checksum.create_checksum(body);
        checksum.chars().eq(core::iter::once(expected))
    }
}

impl Default for PaymentReferenceCodeValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::PaymentReferenceCode;
    use crate::generator::{CyclingCharacterIndexSource, PaymentReferenceCodeGenerator};
    use proptest::prelude::*;

    #[test]
    fn accepts_formatted_and_compact_codes() {
        let validator = PaymentReferenceCodeValidator::new();

        assert!(validator.validate("XW-ACD-EFK-4"));
        assert!(validator.validate("XWACDEFK4"));
        assert!(validator.validate("XR-LMN-PRT-R"));
    }

    #[test]
    fn tolerates_case_and_noise() {
        let validator = PaymentReferenceCodeValidator::new();

        assert!(validator.validate("xw-acd-efk-4"));
        assert!(validator.validate("  XW ACD EFK 4\n"));
        assert!(validator.validate("(XW/ACD.EFK_4)"));
        // `O`, `0`, `1` and `B` are not part of the alphabet and get dropped.
        assert!(validator.validate("XWO-ACD-EFK-401B"));
    }

    #[test]
    fn rejects_mutated_code_segment() {
        let validator = PaymentReferenceCodeValidator::new();

        assert!(!validator.validate("XW-ACD-EFL-4"));
        assert!(!validator.validate("XW-LCD-EFK-4"));
    }

    #[test]
    fn rejects_mutated_checksum() {
        let validator = PaymentReferenceCodeValidator::new();
        assert!(!validator.validate("XW-ACD-EFK-C"));
    }

    #[test]
    fn rejects_wrong_lengths() {
        let validator = PaymentReferenceCodeValidator::new();

        assert!(!validator.validate(""));
        assert!(!validator.validate("XW-ACD-EFK"));
        assert!(!validator.validate("XW-ACD-EFK-44"));
        assert!(!validator.validate("XW-ACD-EF-4"));
    }

    #[test]
    fn non_ascii_input_never_panics() {
        let validator = PaymentReferenceCodeValidator::new();
        assert!(!validator.validate("ß€ XW-ACD-EFK-ÄÖ"));
    }

    fn with_checksum(code: &PaymentReferenceCode, checksum: char) -> String {
        format!("{}{}{}", code.prefix(), code.code(), checksum)
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every generated code validates in both formats.
        #[test]
        fn accepts_generated_codes(
            indices in prop::collection::vec(0usize..19, 6),
            prefix in "[ACDEFKLMNPRTWXYZ349]{2}"
        ) {
            let mut generator = PaymentReferenceCodeGenerator::new(
                CyclingCharacterIndexSource::new(indices),
            );
            let code = generator.new_code(&prefix).unwrap();
            let validator = PaymentReferenceCodeValidator::new();

            prop_assert!(validator.validate(&code.formatted()));
            prop_assert!(validator.validate(&code.formatted().to_lowercase()));
        }

        /// Property: replacing the check character always invalidates the code.
        #[test]
        fn rejects_any_other_checksum(
            indices in prop::collection::vec(0usize..19, 6),
            replacement in 0usize..19
        ) {
            let mut generator = PaymentReferenceCodeGenerator::new(
                CyclingCharacterIndexSource::new(indices),
            );
            let code = generator.new_code("XW").unwrap();
            let replacement = ALPHABET.chars().nth(replacement).unwrap();
            prop_assume!(code.checksum().chars().next() != Some(replacement));

            let validator = PaymentReferenceCodeValidator::new();
            prop_assert!(!validator.validate(&with_checksum(&code, replacement)));
        }

        /// Property: changing one code character invalidates the code unless the
        /// changed body happens to map to the same check character.
        #[test]
        fn rejects_mutated_code_character(
            indices in prop::collection::vec(0usize..19, 6),
            position in 0usize..6,
            replacement in 0usize..19
        ) {
            let mut generator = PaymentReferenceCodeGenerator::new(
                CyclingCharacterIndexSource::new(indices),
            );
            let code = generator.new_code("XW").unwrap();
            let replacement = ALPHABET.chars().nth(replacement).unwrap();

            let mut chars: Vec<char> = code.code().chars().collect();
            prop_assume!(chars[position] != replacement);
            chars[position] = replacement;
            let mutated: String = chars.into_iter().collect();

            let checksum = ChecksumGenerator::for_reference_codes();
            let recomputed = checksum.create_checksum(&format!("{}{mutated}", code.prefix()));
            prop_assume!(code.checksum().chars().next() != Some(recomputed));

            let validator = PaymentReferenceCodeValidator::new();
            let input = format!("{}{mutated}{}", code.prefix(), code.checksum());
            prop_assert!(!validator.validate(&input));
        }
    }
}
