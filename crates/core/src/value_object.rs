//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A date option is a value object: two options proposing the same instant with
/// the same tallies are indistinguishable, which is why the ledger tracks them
/// by position rather than by identity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
