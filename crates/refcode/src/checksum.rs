//! Check character over an arbitrary alphabet.
//!
//! The algorithm is shared with code outside this crate that validates codes
//! we issued, so it must stay bit-exact: MD5 hex digest, sum of the hex digit
//! values, modulo the alphabet size.

use md5::{Digest, Md5};

use crate::code::ALPHABET;
use crate::error::ReferenceCodeError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumGenerator {
    alphabet: Vec<char>,
}

impl ChecksumGenerator {
    pub fn new(alphabet: &[char]) -> Result<Self, ReferenceCodeError> {
        if alphabet.len() < 2 {
            return Err(ReferenceCodeError::InvalidAlphabet(alphabet.len()));
        }
        Ok(Self {
            alphabet: alphabet.to_vec(),
        })
    }

    /// Generator over the reference-code alphabet.
    pub fn for_reference_codes() -> Self {
        Self {
            alphabet: ALPHABET.chars().collect(),
        }
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    pub fn create_checksum(&self, input: &str) -> char {
        let digest = Md5::digest(input.as_bytes());

        // Each byte carries two hex digits of the digest.
        let digit_sum: usize = digest
            .iter()
            .map(|byte| usize::from(byte >> 4) + usize::from(byte & 0x0f))
            .sum();

        self.alphabet[digit_sum % self.alphabet.len()]
    }
}
