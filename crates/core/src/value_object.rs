//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. Amounts, IBANs and payment reference codes are value
//! objects in this domain.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Constructors
/// validate once, so any instance in hand is known to be well-formed. To
/// "modify" a value object, construct a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Euro { cents: u64 }
///
/// impl ValueObject for Euro {}
///
/// assert_eq!(Euro { cents: 100 }, Euro { cents: 100 });
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
