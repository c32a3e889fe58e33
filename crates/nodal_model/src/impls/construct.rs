use alloc::boxed::Box;
use core::any::Any;

use crate::{FromParent, Reflect};

/// Parameterless constructor of a `Default` type.
///
/// Also used as the zero value of simple types.
pub fn default_of<T: Default + Reflect>() -> Box<dyn Reflect> {
    Box::new(T::default())
}

/// Parent constructor of a [`FromParent<P>`] type.
///
/// Returns `None` if `parent` is not a `P`.
pub fn from_parent_of<T, P>(parent: &dyn Reflect) -> Option<Box<dyn Reflect>>
where
    T: FromParent<P> + Reflect,
    P: Any,
{
    let parent = parent.downcast_ref::<P>()?;
    Some(Box::new(T::from_parent(parent)))
}
