use alloc::boxed::Box;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{OptionalInfo, TypeInfo, Typed};
use crate::ops::{Optional, ReflectMut, ReflectRef};

fn none_of<T: Reflect + Typed>() -> Box<dyn Reflect> {
    Box::new(None::<T>)
}

fn some_of<T: Reflect + Typed>(value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
    Ok(Box::new(Some(value.take::<T>()?)))
}

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Optional(OptionalInfo::new::<Self, T>(
                "Option",
                none_of::<T>,
                some_of::<T>,
            ))
        })
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Optional(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Optional(self)
    }
}

impl<T: Reflect + Typed> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|v| v as &dyn Reflect)
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{Shape, Typed};

    #[test]
    fn wraps_and_unwraps() {
        let info = <Option<u16>>::type_info().as_optional().unwrap();
        assert!(info.inner().type_is::<u16>());
        assert_eq!(<Option<u16>>::type_info().shape(), Shape::Simple);

        let some = info.some(Box::new(7_u16)).unwrap();
        assert_eq!(some.downcast_ref::<Option<u16>>(), Some(&Some(7)));

        let none = info.none();
        assert_eq!(none.downcast_ref::<Option<u16>>(), Some(&None));

        assert!(info.some(Box::new(7_u32)).is_err());
    }
}
