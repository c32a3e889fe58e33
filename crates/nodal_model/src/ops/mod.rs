//! Shape traits and the views returned by [`Reflect::reflect_ref`]
//! and [`Reflect::reflect_mut`].
//!
//! [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref
//! [`Reflect::reflect_mut`]: crate::Reflect::reflect_mut

// -----------------------------------------------------------------------------
// Modules

mod dictionary_ops;
mod kind;
mod list_ops;
mod object_ops;
mod optional_ops;

// -----------------------------------------------------------------------------
// Exports

pub use dictionary_ops::{Dictionary, DictionaryIter};
pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::{List, ListIter};
pub use object_ops::Object;
pub use optional_ops::Optional;
