use core::any::{Any, TypeId};
use core::{error, fmt};

use crate::info::{DictionaryInfo, ListInfo, ObjectInfo, OptionalInfo, SimpleInfo};

// -----------------------------------------------------------------------------
// Type

/// Identity of a type: its [`TypeId`], full path and short ident.
///
/// The path comes from [`core::any::type_name`], the ident is supplied by
/// the implementor (the struct name for derived types, `"Vec"` for `Vec<T>`).
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
    ident: &'static str,
}

impl Type {
    /// Creates the identity of `T` with the given short ident.
    #[inline]
    pub fn of<T: Any + ?Sized>(ident: &'static str) -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>(),
            ident,
        }
    }

    /// Returns the [`TypeId`].
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path, e.g. `alloc::vec::Vec<i32>`.
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the short ident, without module path or generics.
    #[inline(always)]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Returns `true` if this is the identity of `T`.
    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

// -----------------------------------------------------------------------------
// Shape

/// The classification a mapped type falls into.
///
/// Optional types do not have a shape of their own,
/// they take the shape of their inner type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Simple,
    Object,
    Array,
    Dictionary,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => f.pad("Simple"),
            Self::Object => f.pad("Object"),
            Self::Array => f.pad("Array"),
            Self::Dictionary => f.pad("Dictionary"),
        }
    }
}

/// Error returned when a [`TypeInfo`] is not the expected variant.
#[derive(Debug)]
pub struct ShapeError {
    pub expected: &'static str,
    pub received: &'static str,
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type info mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for ShapeError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time information of a mappable type.
///
/// Obtained through [`Typed::type_info`] or [`DynamicTyped::reflect_type_info`].
#[derive(Debug)]
pub enum TypeInfo {
    Simple(SimpleInfo),
    Object(ObjectInfo),
    List(ListInfo),
    Dictionary(DictionaryInfo),
    Optional(OptionalInfo),
}

macro_rules! impl_cast_fn {
    ($name:ident, $kind:ident, $info:ident) => {
        #[doc = concat!("Returns the [`", stringify!($info), "`] or a [`ShapeError`].")]
        pub fn $name(&self) -> Result<&$info, ShapeError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ShapeError {
                    expected: stringify!($kind),
                    received: self.variant_name(),
                }),
            }
        }
    };
}

impl TypeInfo {
    /// Returns the [`Type`] of the described type.
    pub fn ty(&self) -> &Type {
        match self {
            Self::Simple(info) => info.ty(),
            Self::Object(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Dictionary(info) => info.ty(),
            Self::Optional(info) => info.ty(),
        }
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    /// Returns the full type path.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Returns the short type ident.
    #[inline]
    pub fn type_ident(&self) -> &'static str {
        self.ty().ident()
    }

    /// Returns `true` if the described type is `T`.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty().is::<T>()
    }

    /// Returns the intrinsic [`Shape`], looking through `Option<T>`.
    pub fn shape(&self) -> Shape {
        match self {
            Self::Simple(_) => Shape::Simple,
            Self::Object(_) => Shape::Object,
            Self::List(_) => Shape::Array,
            Self::Dictionary(_) => Shape::Dictionary,
            Self::Optional(info) => info.inner().shape(),
        }
    }

    /// Returns the member facet of the type, if any.
    ///
    /// Objects always have one; lists and dictionaries may carry members as well.
    pub fn object(&self) -> Option<&ObjectInfo> {
        match self {
            Self::Object(info) => Some(info),
            Self::List(info) => info.object(),
            Self::Dictionary(info) => info.object(),
            _ => None,
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Self::Simple(_) => "Simple",
            Self::Object(_) => "Object",
            Self::List(_) => "List",
            Self::Dictionary(_) => "Dictionary",
            Self::Optional(_) => "Optional",
        }
    }

    impl_cast_fn!(as_simple, Simple, SimpleInfo);
    impl_cast_fn!(as_object, Object, ObjectInfo);
    impl_cast_fn!(as_list, List, ListInfo);
    impl_cast_fn!(as_dictionary, Dictionary, DictionaryInfo);
    impl_cast_fn!(as_optional, Optional, OptionalInfo);
}

// -----------------------------------------------------------------------------
// Typed

/// Static access to the [`TypeInfo`] of a type.
///
/// Usually implemented by `#[derive(Reflect)]`. Manual implementations
/// store the info in a [`NonGenericTypeInfoCell`] or [`GenericTypeInfoCell`].
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: 'static {
    /// Returns the compile-time info of this type.
    fn type_info() -> &'static TypeInfo;
}

/// Dynamic dispatch for [`Typed`], implemented for every `Typed` type.
pub trait DynamicTyped {
    /// See [`Typed::type_info`].
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        T::type_info()
    }
}

/// A [`Typed`] list with a statically known item type.
///
/// Lets `#[reflect(items)]` name the item type of a member list.
pub trait TypedList: Typed {
    type Item: Typed;
}

/// A [`Typed`] dictionary with statically known key and value types.
///
/// Lets `#[reflect(entries)]` name the entry types of a member dictionary.
pub trait TypedDictionary: Typed {
    type Key: Typed;
    type Value: Typed;
}
