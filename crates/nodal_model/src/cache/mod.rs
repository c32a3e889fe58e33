//! Memoized type records consumed by the mapper.
//!
//! A [`CachedType`] is computed once per type and never invalidated.
//! The [`TypeCache`] is safe for concurrent reads with lazy fill: two threads
//! racing on the same type may both compute the record, the first insert wins
//! and the result is identical either way.

// -----------------------------------------------------------------------------
// Modules

mod cached_type;
mod type_cache;

// -----------------------------------------------------------------------------
// Exports

pub use cached_type::{CachedMember, CachedType};
pub use type_cache::TypeCache;
