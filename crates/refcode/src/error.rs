use thiserror::Error;

use donorpay_core::DomainError;

use crate::code::Segment;

/// Reference-code construction and parsing failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReferenceCodeError {
    /// A checksum alphabet must offer at least two characters.
    #[error("checksum alphabet needs at least 2 characters, got {0}")]
    InvalidAlphabet(usize),

    #[error("{segment} must consist of {expected_length} characters from {alphabet}")]
    MalformedSegment {
        segment: Segment,
        expected_length: usize,
        alphabet: String,
    },

    #[error("reference code must look like PP-CCC-CCC-S, got {0:?}")]
    MalformedFormat(String),
}

impl From<ReferenceCodeError> for DomainError {
    fn from(value: ReferenceCodeError) -> Self {
        DomainError::validation(value.to_string())
    }
}
