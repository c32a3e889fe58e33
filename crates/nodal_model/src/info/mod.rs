//! Static type information.
//!
//! - [`Type`]: identity of a type, its full path and short ident.
//! - [`TypeInfo`]: one of the info records below, obtained via [`Typed`].
//!     - [`SimpleInfo`]: scalar types with a text form, including unit enums.
//!     - [`ObjectInfo`]: types with named members and construction strategies.
//!     - [`ListInfo`]: sequences with a declared item type.
//!     - [`DictionaryInfo`]: maps with declared key and value types.
//!     - [`OptionalInfo`]: the nullable wrapper `Option<T>`.
//! - [`Shape`]: the classification the mapper branches on.

// -----------------------------------------------------------------------------
// Modules

mod dictionary_info;
mod list_info;
mod object_info;
mod optional_info;
mod simple_info;
mod type_info;

// -----------------------------------------------------------------------------
// Exports

pub use dictionary_info::DictionaryInfo;
pub use list_info::ListInfo;
pub use object_info::{Constructors, MemberInfo, ObjectInfo, ParentConstructor};
pub use optional_info::OptionalInfo;
pub use simple_info::{ParseError, SimpleInfo, ValueKind, VariantInfo, Variants};
pub use type_info::{DynamicTyped, Shape, ShapeError, Type, TypeInfo, Typed};
pub use type_info::{TypedDictionary, TypedList};
