use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::Reflect;
use crate::info::{ObjectInfo, Type, TypeInfo, Typed};

/// Information of a list-like type, e.g. `Vec<T>`.
///
/// A list without a declared item type is a legacy container
/// the mapper refuses to handle.
pub struct ListInfo {
    ty: Type,
    item: Option<fn() -> &'static TypeInfo>,
    constructor: fn() -> Box<dyn Reflect>,
    object: Option<ObjectInfo>,
}

impl ListInfo {
    /// Creates info of list `T` holding `Item`s.
    pub fn new<T: Any, Item: Typed>(
        ident: &'static str,
        constructor: fn() -> Box<dyn Reflect>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(ident),
            item: Some(Item::type_info),
            constructor,
            object: None,
        }
    }

    /// Creates info of a list without a declared item type.
    pub fn untyped<T: Any>(ident: &'static str, constructor: fn() -> Box<dyn Reflect>) -> Self {
        Self {
            ty: Type::of::<T>(ident),
            item: None,
            constructor,
            object: None,
        }
    }

    /// Attaches the member facet of a type that is a list with members.
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

    /// Returns the item [`TypeInfo`], `None` for legacy lists.
    #[inline]
    pub fn item(&self) -> Option<&'static TypeInfo> {
        self.item.map(|f| f())
    }

    /// Creates an empty list.
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

impl fmt::Debug for ListInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListInfo")
            .field("ty", &self.ty)
            .field("item", &self.item().map(TypeInfo::ty))
            .field("object", &self.object)
            .finish_non_exhaustive()
    }
}
