//! Containers for static storage of [`TypeInfo`].
//!
//! These back [`Typed`](crate::info::Typed) implementations.
//!
//! - [`NonGenericTypeInfoCell`]: one [`OnceLock`] per non-generic type.
//! - [`GenericTypeInfoCell`]: a `static` inside a generic function is shared by
//!   every instantiation, so the cell keeps one leaked info per [`TypeId`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use nodal_utils::TypeIdMap;

use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Static storage of a non-generic type's [`TypeInfo`].
///
/// ## Example
///
/// ```
/// use nodal_model::Reflect;
/// use nodal_model::impls::NonGenericTypeInfoCell;
/// use nodal_model::info::{ObjectInfo, MemberInfo, TypeInfo, Typed};
/// use nodal_model::ops::{Object, ReflectMut, ReflectRef};
///
/// struct Pair { a: u32 }
///
/// impl Typed for Pair {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Object(
///             ObjectInfo::new::<Pair>("Pair", &[MemberInfo::new::<u32>("a")])
///         ))
///     }
/// }
/// # impl Reflect for Pair {
/// #     fn set(&mut self, v: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> { *self = v.take()?; Ok(()) }
/// #     fn reflect_ref(&self) -> ReflectRef<'_> { ReflectRef::Object(self) }
/// #     fn reflect_mut(&mut self) -> ReflectMut<'_> { ReflectMut::Object(self) }
/// # }
/// # impl Object for Pair {
/// #     fn member(&self, n: &str) -> Option<&dyn Reflect> { (n == "a").then_some(&self.a as _) }
/// #     fn member_mut(&mut self, n: &str) -> Option<&mut dyn Reflect> { (n == "a").then_some(&mut self.a as _) }
/// # }
///
/// let info = Pair::type_info().as_object().unwrap();
/// assert_eq!(info.member("a").unwrap().type_info().type_path(), "u32");
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, initializing it with `f` on first access.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &TypeInfo
    where
        F: FnOnce() -> TypeInfo,
    {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeInfoCell

/// Static storage of a generic type's [`TypeInfo`], one entry per instantiation.
///
/// ## Example
///
/// ```ignore
/// impl<T: Reflect + Typed> Typed for Wrapper<T> {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
///         CELL.get_or_insert::<Self>(|| TypeInfo::Object(
///             ObjectInfo::new::<Self>("Wrapper", &[MemberInfo::new::<T>("inner")])
///         ))
///     }
/// }
/// ```
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for `G`, inserting the result of `f` first
    /// if there is none.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeInfo,
    ) -> &TypeInfo {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&TypeInfo> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // `f` may recurse into other cells, so it runs before the write lock is taken.
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: TypeInfo) -> &TypeInfo {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(value)))
    }
}
