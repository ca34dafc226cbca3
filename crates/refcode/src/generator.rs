//! Fresh reference codes from a pluggable character source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::checksum::ChecksumGenerator;
use crate::code::{ALPHABET, CODE_LENGTH, PaymentReferenceCode};
use crate::error::ReferenceCodeError;

/// Supplies positions into the alphabet, one per generated character.
pub trait CharacterIndexSource {
    /// Returns an index in `0..alphabet_len`.
    fn next_index(&mut self, alphabet_len: usize) -> usize;
}

/// Uniformly random indices (production source).
#[derive(Debug, Clone)]
pub struct RandomCharacterIndexSource {
    rng: StdRng,
}

impl RandomCharacterIndexSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence, useful for seeding fixtures.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomCharacterIndexSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterIndexSource for RandomCharacterIndexSource {
    fn next_index(&mut self, alphabet_len: usize) -> usize {
        self.rng.gen_range(0..alphabet_len)
    }
}

/// Replays a fixed list of indices, wrapping around at the end.
///
/// Indices larger than the alphabet are reduced modulo its length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CyclingCharacterIndexSource {
    indices: Vec<usize>,
    position: usize,
}

impl CyclingCharacterIndexSource {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            position: 0,
        }
    }
}

impl CharacterIndexSource for CyclingCharacterIndexSource {
    fn next_index(&mut self, alphabet_len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.position % self.indices.len()];
        self.position = (self.position + 1) % self.indices.len();
        index % alphabet_len
    }
}

#[derive(Debug, Clone)]
pub struct PaymentReferenceCodeGenerator<S> {
    source: S,
    alphabet: Vec<char>,
    checksum: ChecksumGenerator,
}

impl<S: CharacterIndexSource> PaymentReferenceCodeGenerator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            alphabet: ALPHABET.chars().collect(),
            checksum: ChecksumGenerator::for_reference_codes(),
        }
    }

    /// Draws a new code for `prefix`. Fails only if the prefix is malformed.
    pub fn new_code(&mut self, prefix: &str) -> Result<PaymentReferenceCode, ReferenceCodeError> {
        let mut code = String::with_capacity(CODE_LENGTH);
        for _ in 0..CODE_LENGTH {
            let index = self.source.next_index(self.alphabet.len());
            code.push(self.alphabet[index % self.alphabet.len()]);
        }

        let checksum = self.checksum.create_checksum(&format!("{prefix}{code}"));
        PaymentReferenceCode::new(prefix, code, checksum.to_string())
    }
}

impl PaymentReferenceCodeGenerator<RandomCharacterIndexSource> {
    pub fn random() -> Self {
        Self::new(RandomCharacterIndexSource::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::Segment;

    #[test]
    fn generates_code_from_index_sequence() {
        let mut generator =
            PaymentReferenceCodeGenerator::new(CyclingCharacterIndexSource::new(0..12));

        let first = generator.new_code("XW").unwrap();
        assert_eq!(first.formatted(), "XW-ACD-EFK-4");

        let second = generator.new_code("XW").unwrap();
        assert_eq!(second.formatted(), "XW-LMN-PRT-K");
    }

    #[test]
    fn checksum_depends_on_prefix() {
        let mut generator =
            PaymentReferenceCodeGenerator::new(CyclingCharacterIndexSource::new(6..12));

        assert_eq!(generator.new_code("XR").unwrap().formatted(), "XR-LMN-PRT-R");
    }

    #[test]
    fn malformed_prefix_is_rejected() {
        let mut generator =
            PaymentReferenceCodeGenerator::new(CyclingCharacterIndexSource::new([0]));

        let err = generator.new_code("X0").unwrap_err();
        assert!(matches!(
            err,
            ReferenceCodeError::MalformedSegment { segment: Segment::Prefix, .. }
        ));
    }

    #[test]
    fn cycling_source_wraps_and_reduces_indices() {
        let mut source = CyclingCharacterIndexSource::new([1, 20]);
        assert_eq!(source.next_index(19), 1);
        assert_eq!(source.next_index(19), 1);
        assert_eq!(source.next_index(19), 1);

        let mut empty = CyclingCharacterIndexSource::new(Vec::new());
        assert_eq!(empty.next_index(19), 0);
    }

    #[test]
    fn random_source_stays_in_range() {
        let mut source = RandomCharacterIndexSource::seeded(7);
        for _ in 0..1_000 {
            assert!(source.next_index(19) < 19);
        }
    }

    #[test]
    fn random_generator_produces_well_formed_codes() {
        let mut generator = PaymentReferenceCodeGenerator::random();
        for _ in 0..100 {
            let code = generator.new_code("XW").unwrap();
            assert_eq!(code.prefix(), "XW");
            assert_eq!(code.code().len(), CODE_LENGTH);
        }
    }
}
