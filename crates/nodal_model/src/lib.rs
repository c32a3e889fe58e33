//! Type Model of the `nodal` mapping engine.
//!
//! Every mappable type exposes a static [`TypeInfo`](info::TypeInfo) through
//! [`Typed`](info::Typed), and object-safe access to values through [`Reflect`].
//! A value's shape is one of:
//!
//! - Simple: scalars with a text form (numbers, strings, dates, unit enums ...).
//! - Object: named members in declaration order.
//! - List: an ordered sequence with a declared item type.
//! - Dictionary: key/value entries with declared key and value types.
//! - Optional: the nullable wrapper `Option<T>`.
//!
//! [`TypeCache`](cache::TypeCache) memoizes the derived [`CachedType`](cache::CachedType)
//! records the mapper works on.
//!
//! ## Example
//!
//! ```
//! use nodal_model::{Reflect, info::{Shape, Typed}, cache::TypeCache};
//!
//! #[derive(Reflect, Default)]
//! #[reflect(default)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let cache = TypeCache::new();
//! let point = cache.of::<Point>();
//!
//! assert_eq!(point.shape(), Shape::Object);
//! assert_eq!(point.members().len(), 2);
//! assert_eq!(point.default_name(), "Point");
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Derive output names `::nodal_model`, which must also resolve inside this crate.
extern crate self as nodal_model;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod cache;
pub mod impls;
pub mod info;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use reflection::{FromParent, Reflect};

#[cfg(feature = "derive")]
pub use nodal_model_derive as derive;

#[cfg(feature = "derive")]
pub use nodal_model_derive::Reflect;
