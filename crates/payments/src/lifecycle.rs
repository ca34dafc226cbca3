//! Cancellation and anonymisation capabilities.

/// Capability: reversible cancellation.
pub trait Cancellable {
    fn is_cancellable(&self) -> bool;

    fn is_restorable(&self) -> bool;

    fn cancel(&mut self);

    fn restore(&mut self);
}

/// Capability: irreversible removal of personally identifying data.
///
/// Accounting fields (id, amount, interval, status) survive. Calling
/// `anonymise` on an anonymised payment does nothing.
pub trait Anonymisable {
    fn anonymise(&mut self);

    fn is_anonymised(&self) -> bool;
}
