use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::Reflect;
use crate::info::{ObjectInfo, Type, TypeInfo, Typed};

/// Information of a map-like type, e.g. `HashMap<K, V>`.
///
/// A dictionary without declared key/value types is a legacy container
/// the mapper refuses to handle.
pub struct DictionaryInfo {
    ty: Type,
    entry: Option<(fn() -> &'static TypeInfo, fn() -> &'static TypeInfo)>,
    constructor: fn() -> Box<dyn Reflect>,
    object: Option<ObjectInfo>,
}

impl DictionaryInfo {
    /// Creates info of dictionary `T` mapping `K` to `V`.
    pub fn new<T: Any, K: Typed, V: Typed>(
        ident: &'static str,
        constructor: fn() -> Box<dyn Reflect>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(ident),
            entry: Some((K::type_info, V::type_info)),
            constructor,
            object: None,
        }
    }

    /// Creates info of a dictionary without declared key/value types.
    pub fn untyped<T: Any>(ident: &'static str, constructor: fn() -> Box<dyn Reflect>) -> Self {
        Self {
            ty: Type::of::<T>(ident),
            entry: None,
            constructor,
            object: None,
        }
    }

    /// Attaches the member facet of a type that is a dictionary with members.
    pub fn with_object(self, object: ObjectInfo) -> Self {
        Self {
            object: Some(object),
            ..self
        }
    }

    /// Returns the [`Type`].
    #[inline(always)]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the key [`TypeInfo`], `None` for legacy dictionaries.
    #[inline]
    pub fn key(&self) -> Option<&'static TypeInfo> {
        self.entry.map(|(k, _)| k())
    }

    /// Returns the value [`TypeInfo`], `None` for legacy dictionaries.
    #[inline]
    pub fn value(&self) -> Option<&'static TypeInfo> {
        self.entry.map(|(_, v)| v())
    }

    /// Creates an empty dictionary.
    #[inline]
    pub fn construct(&self) -> Box<dyn Reflect> {
        (self.constructor)()
    }

    /// Returns the member facet, if any.
    #[inline]
    pub fn object(&self) -> Option<&ObjectInfo> {
        self.object.as_ref()
    }
}

impl fmt::Debug for DictionaryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryInfo")
            .field("ty", &self.ty)
            .field("key", &self.key().map(TypeInfo::ty))
            .field("value", &self.value().map(TypeInfo::ty))
            .field("object", &self.object)
            .finish_non_exhaustive()
    }
}
