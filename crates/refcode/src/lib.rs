//! Payment reference codes for bank-transfer and Sofort matching.
//!
//! Donors copy these codes by hand into the purpose line of a transfer, so the
//! alphabet leaves out glyphs that are easily confused (`O`/`0`, `I`/`1`, `B`/`8`,
//! `S`/`5`, ...) and every code ends with a check character.
//!
//! Pure domain logic only: no IO, no persistence concerns.

pub mod checksum;
pub mod code;
pub mod error;
pub mod generator;
pub mod validator;

pub use checksum::ChecksumGenerator;
pub use code::{
    ALPHABET, CHECKSUM_LENGTH, CODE_LENGTH, PREFIX_LENGTH, PaymentReferenceCode, Segment,
    TOTAL_LENGTH,
};
pub use error::ReferenceCodeError;
pub use generator::{
    CharacterIndexSource, CyclingCharacterIndexSource, PaymentReferenceCodeGenerator,
    RandomCharacterIndexSource,
};
pub use validator::PaymentReferenceCodeValidator;
