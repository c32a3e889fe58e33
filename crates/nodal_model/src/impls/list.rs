use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, TypeInfo, Typed, TypedList};
use crate::ops::{List, ReflectMut, ReflectRef};

macro_rules! impl_list {
    ($ty:ident, $ident:literal, $push:ident) => {
        impl<T: Reflect + Typed> Typed for $ty<T> {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeInfo::List(ListInfo::new::<Self, T>($ident, || {
                        Box::new(<$ty<T>>::new())
                    }))
                })
            }
        }

        impl<T: Reflect + Typed> TypedList for $ty<T> {
            type Item = T;
        }

        impl<T: Reflect + Typed> Reflect for $ty<T> {
            fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::List(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::List(self)
            }
        }

        impl<T: Reflect + Typed> List for $ty<T> {
            #[inline]
            fn len(&self) -> usize {
                <$ty<T>>::len(self)
            }

            #[inline]
            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                self.iter().nth(index).map(|v| v as &dyn Reflect)
            }

            fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                let value = value.take::<T>()?;
                <$ty<T>>::$push(self, value);
                Ok(())
            }
        }
    };
}

impl_list!(Vec, "Vec", push);
impl_list!(VecDeque, "VecDeque", push_back);

#[cfg(test)]
mod tests {
    use alloc::collections::VecDeque;

    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::{List, ReflectMut, ReflectRef};

    #[test]
    fn push_checks_item_type() {
        let info = <VecDeque<i64>>::type_info().as_list().unwrap();
        assert!(info.item().unwrap().type_is::<i64>());

        let mut list = info.construct();
        let ReflectMut::List(list) = list.reflect_mut() else {
            panic!("not a list");
        };
        list.push(Box::new(3_i64)).unwrap();
        list.push(Box::new(4_i64)).unwrap();
        assert!(list.push(Box::new(5_i32)).is_err());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn iterates_in_order() {
        let v = vec![String::from("a"), String::from("b")];
        let ReflectRef::List(list) = v.reflect_ref() else {
            panic!("not a list");
        };
        let items: Vec<&str> = list
            .iter()
            .filter_map(|item| item.downcast_ref::<String>())
            .map(String::as_str)
            .collect();
        assert_eq!(items, ["a", "b"]);
    }

    #[test]
    fn vec_items_by_index() {
        let v = vec![7_u32, 8, 9];
        let ReflectRef::List(list) = v.reflect_ref() else {
            panic!("not a list");
        };
        assert_eq!(list.get(0).and_then(|x| x.downcast_ref::<u32>()), Some(&7));
        assert_eq!(list.get(2).and_then(|x| x.downcast_ref::<u32>()), Some(&9));
        assert!(list.get(3).is_none());
        assert_eq!(list.iter().len(), 3);
    }

    fn _object_safe(_: &dyn List) {}
}
