use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::DynamicTyped;
use crate::ops::{Object, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// Object-safe access to a mappable value.
///
/// Usually implemented through `#[derive(Reflect)]`; the built-in
/// implementations cover scalars, `Option<T>`, lists and maps from the
/// standard library, and a few well-known crates.
///
/// # Type Identification
///
/// [`Any::type_id`] on `Box<dyn Reflect>` returns the id of the box itself,
/// use [`Reflect::ty_id`] instead:
///
/// ```
/// # use nodal_model::Reflect;
/// # use core::any::{Any, TypeId};
/// let x: Box<dyn Reflect> = Box::new(32_i32);
///
/// assert!((*x).type_id() == TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
///
/// # Shapes
///
/// [`reflect_ref`](Reflect::reflect_ref) and [`reflect_mut`](Reflect::reflect_mut)
/// expose the value as one of the shape traits:
///
/// ```
/// # use nodal_model::{Reflect, ops::ReflectRef};
/// let v = vec![1, 2, 3];
///
/// let ReflectRef::List(list) = v.reflect_ref() else { unreachable!() };
/// assert_eq!(list.len(), 3);
/// ```
///
/// A type that is both a collection and has members reports the collection
/// shape and overrides [`as_object`](Reflect::as_object) for its members.
pub trait Reflect: DynamicTyped + Any + Send + Sync {
    /// `self` as a trait object.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// `self` as a mutable trait object.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Id of the concrete type behind the trait object.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Replaces this value with `value` if both have the same type.
    ///
    /// On a type mismatch `value` is handed back unchanged.
    ///
    /// ```
    /// # use nodal_model::Reflect;
    /// let mut x = 1_u8;
    /// x.set(Box::new(5_u8)).unwrap();
    /// assert_eq!(x, 5);
    ///
    /// assert!(x.set(Box::new("five".to_string())).is_err());
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns an immutable view of the value's shape.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable view of the value's shape.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Returns the member facet of the value.
    #[inline]
    fn as_object(&self) -> Option<&dyn Object> {
        match self.reflect_ref() {
            ReflectRef::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the mutable member facet of the value.
    #[inline]
    fn as_object_mut(&mut self) -> Option<&mut dyn Object> {
        match self.reflect_mut() {
            ReflectMut::Object(object) => Some(object),
            _ => None,
        }
    }
}

impl dyn Reflect {
    /// Whether the concrete type is `T`.
    ///
    /// ```
    /// # use nodal_model::Reflect;
    /// let x: Box<dyn Reflect> = Box::new(10_i32);
    /// assert!(x.is::<i32>() && !x.is::<i64>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Recovers the concrete box, or hands `self` back for another type.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            match any.downcast::<T>() {
                Ok(value) => Ok(value),
                Err(_) => unreachable!("type id was checked"),
            }
        } else {
            Err(self)
        }
    }

    /// Like [`downcast`](Self::downcast), moving the value out of the box.
    ///
    /// ```
    /// # use nodal_model::Reflect;
    /// let x: Box<dyn Reflect> = Box::new(String::from("hai"));
    /// assert_eq!(x.take::<String>().unwrap(), "hai");
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_info().type_path())
    }
}
