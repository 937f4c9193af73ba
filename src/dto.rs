//! The contract a DTO type offers to the battery.

use std::hash::{DefaultHasher, Hash, Hasher};

use crate::metadata::Introspect;

/// A data-holder type under contract test.
///
/// `Default` is the no-argument constructor; every case starts from fresh default instances.
///
/// Equality is [`Dto::equals`] rather than `PartialEq`: a DTO may define a deliberately narrow or
/// asymmetric equality, and the battery only checks the sequences it runs, never the equality axioms.
pub trait Dto: Introspect + Default + Hash {
    /// DTO-defined equality. `a.equals(b)` and `b.equals(a)` may disagree.
    fn equals(&self, other: &Self) -> bool;

    /// Copy the fields of `source` into `self`, returning `self`.
    fn populate(&mut self, source: &Self) -> &mut Self;

    /// Hash code compared by the hash cases. Deterministic across calls within one process.
    fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
