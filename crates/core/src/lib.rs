//! `donorpay-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the payment crates
//! (identifiers, the error taxonomy, entity/value-object markers).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::PaymentId;
pub use value_object::ValueObject;
