use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::Reflect;
use crate::info::{Type, TypeInfo, Typed};

/// Information of the nullable wrapper `Option<T>`.
pub struct OptionalInfo {
    ty: Type,
    inner: fn() -> &'static TypeInfo,
    none: fn() -> Box<dyn Reflect>,
    some: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
}

impl OptionalInfo {
    /// Creates info of optional `T` wrapping `Inner`.
    ///
    /// `some` wraps a boxed `Inner`, handing the value back if it is another type.
    pub fn new<T: Any, Inner: Typed>(
        ident: &'static str,
        none: fn() -> Box<dyn Reflect>,
        some: fn(Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
    ) -> Self {
        Self {
            ty: Type::of::<T>(ident),
            inner: Inner::type_info,
            none,
            some,
        }
    }

    /// Returns the [`Type`].
    #[inline(always)]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the wrapped type's [`TypeInfo`].
    #[inline]
    pub fn inner(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    /// Creates the empty value.
    #[inline]
    pub fn none(&self) -> Box<dyn Reflect> {
        (self.none)()
    }

    /// Wraps `value` into the present value.
    #[inline]
    pub fn some(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.some)(value)
    }
}

impl fmt::Debug for OptionalInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalInfo")
            .field("ty", &self.ty)
            .field("inner", self.inner().ty())
            .finish_non_exhaustive()
    }
}
