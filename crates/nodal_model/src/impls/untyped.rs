use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{DictionaryInfo, ListInfo, TypeInfo, Typed};
use crate::ops::{Dictionary, DictionaryIter, List, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// UntypedList

/// A list of arbitrary values without a declared item type.
///
/// Present for interop with loosely typed data; the mapper rejects it
/// in every format because items cannot be constructed without a type.
#[derive(Debug, Default)]
pub struct UntypedList {
    items: Vec<Box<dyn Reflect>>,
}

impl UntypedList {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a value of any type.
    pub fn push_value<T: Reflect>(&mut self, value: T) {
        self.items.push(Box::new(value));
    }
}

impl Typed for UntypedList {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::List(ListInfo::untyped::<Self>("UntypedList", || {
                Box::new(UntypedList::new())
            }))
        })
    }
}

impl Reflect for UntypedList {
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }
}

impl List for UntypedList {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.items.get(index).map(|v| &**v as &dyn Reflect)
    }

    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        self.items.push(value);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// UntypedDictionary

/// A dictionary of arbitrary keys and values without declared types.
///
/// Rejected by the mapper like [`UntypedList`].
#[derive(Debug, Default)]
pub struct UntypedDictionary {
    entries: Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>,
}

impl UntypedDictionary {
    /// Creates an empty dictionary.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry of any key and value types.
    pub fn insert_entry<K: Reflect, V: Reflect>(&mut self, key: K, value: V) {
        self.entries.push((Box::new(key), Box::new(value)));
    }
}

impl Typed for UntypedDictionary {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::Dictionary(DictionaryInfo::untyped::<Self>("UntypedDictionary", || {
                Box::new(UntypedDictionary::new())
            }))
        })
    }
}

impl Reflect for UntypedDictionary {
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Dictionary(self)
    }

    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Dictionary(self)
    }
}

impl Dictionary for UntypedDictionary {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> DictionaryIter<'_> {
        Box::new(
            self.entries
                .iter()
                .map(|(k, v)| (&**k as &dyn Reflect, &**v as &dyn Reflect)),
        )
    }

    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), Box<dyn Reflect>> {
        self.entries.push((key, value));
        Ok(())
    }
}
