use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use donorpay_core::ValueObject;

use crate::error::ReferenceCodeError;

/// Characters allowed in reference codes.
pub const ALPHABET: &str = "ACDEFKLMNPRTWXYZ349";

pub const PREFIX_LENGTH: usize = 2;
pub const CODE_LENGTH: usize = 6;
pub const CHECKSUM_LENGTH: usize = 1;
pub const TOTAL_LENGTH: usize = PREFIX_LENGTH + CODE_LENGTH + CHECKSUM_LENGTH;

const SEPARATOR: char = '-';

static PREFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| segment_pattern(PREFIX_LENGTH));
static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| segment_pattern(CODE_LENGTH));
static CHECKSUM_PATTERN: LazyLock<Regex> = LazyLock::new(|| segment_pattern(CHECKSUM_LENGTH));

fn segment_pattern(length: usize) -> Regex {
    Regex::new(&format!("^[{ALPHABET}]{{{length}}}$"))
        .expect("reference code alphabet is a valid character class")
}

/// The three parts of a reference code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Prefix,
    Code,
    Checksum,
}

impl Segment {
    pub fn expected_length(self) -> usize {
        match self {
            Segment::Prefix => PREFIX_LENGTH,
            Segment::Code => CODE_LENGTH,
            Segment::Checksum => CHECKSUM_LENGTH,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Segment::Prefix => &*PREFIX_PATTERN,
            Segment::Code => &*CODE_PATTERN,
            Segment::Checksum => &*CHECKSUM_PATTERN,
        }
    }

    fn validate(self, value: &str) -> Result<(), ReferenceCodeError> {
        if self.pattern().is_match(value) {
            Ok(())
        } else {
            Err(ReferenceCodeError::MalformedSegment {
                segment: self,
                expected_length: self.expected_length(),
                alphabet: ALPHABET.to_string(),
            })
        }
    }
}

impl core::fmt::Display for Segment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Segment::Prefix => "prefix",
            Segment::Code => "code",
            Segment::Checksum => "checksum",
        };
        f.write_str(name)
    }
}

/// A payment reference code, e.g. `XW-ACD-EFK-4`.
///
/// The constructor only checks the shape of each segment. Whether the
/// checksum matches is the validator's job, since codes entered by donors
/// are never turned into values directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PaymentReferenceCode {
    prefix: String,
    code: String,
    checksum: String,
}

impl ValueObject for PaymentReferenceCode {}

impl PaymentReferenceCode {
    pub fn new(
        prefix: impl Into<String>,
        code: impl Into<String>,
        checksum: impl Into<String>,
    ) -> Result<Self, ReferenceCodeError> {
        let prefix = prefix.into();
        let code = code.into();
        let checksum = checksum.into();

        Segment::Prefix.validate(&prefix)?;
        Segment::Code.validate(&code)?;
        Segment::Checksum.validate(&checksum)?;

        Ok(Self {
            prefix,
            code,
            checksum,
        })
    }

    /// Parse the dash-delimited human format produced by [`formatted`](Self::formatted).
    pub fn parse(value: &str) -> Result<Self, ReferenceCodeError> {
        let parts: Vec<&str> = value.split(SEPARATOR).collect();
        let [prefix, first_half, second_half, checksum] = parts.as_slice() else {
            return Err(ReferenceCodeError::MalformedFormat(value.to_string()));
        };
        Self::new(*prefix, format!("{first_half}{second_half}"), *checksum)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    pub fn formatted(&self) -> String {
        // Segments are ASCII, byte slicing is safe.
        let (first_half, second_half) = self.code.split_at(CODE_LENGTH / 2);
        format!(
            "{}{SEPARATOR}{first_half}{SEPARATOR}{second_half}{SEPARATOR}{}",
            self.prefix, self.checksum
        )
    }
}

impl core::fmt::Display for PaymentReferenceCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for PaymentReferenceCode {
    type Err = ReferenceCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PaymentReferenceCode {
    type Error = ReferenceCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PaymentReferenceCode> for String {
    fn from(value: PaymentReferenceCode) -> Self {
        value.formatted()
    }
}
