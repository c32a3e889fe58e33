use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{DictionaryInfo, TypeInfo, Typed, TypedDictionary};
use crate::ops::{Dictionary, DictionaryIter, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// HashMap

impl<K, V, S> Typed for HashMap<K, V, S>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Dictionary(DictionaryInfo::new::<Self, K, V>("HashMap", || {
                Box::new(HashMap::<K, V, S>::default())
            }))
        })
    }
}

impl<K, V, S> TypedDictionary for HashMap<K, V, S>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    type Key = K;
    type Value = V;
}

impl<K, V, S> Reflect for HashMap<K, V, S>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Dictionary(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Dictionary(self)
    }
}

impl<K, V, S> Dictionary for HashMap<K, V, S>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
    S: BuildHasher + Default + Send + Sync + 'static,
{
    #[inline]
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn iter(&self) -> DictionaryIter<'_> {
        Box::new(HashMap::iter(self).map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)))
    }

    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), Box<dyn Reflect>> {
        let key = key.take::<K>()?;
        let value = value.take::<V>()?;
        HashMap::insert(self, key, value);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

impl<K, V> Typed for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::Dictionary(DictionaryInfo::new::<Self, K, V>("BTreeMap", || {
                Box::new(BTreeMap::<K, V>::new())
            }))
        })
    }
}

impl<K, V> TypedDictionary for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    type Key = K;
    type Value = V;
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Dictionary(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Dictionary(self)
    }
}

impl<K, V> Dictionary for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn iter(&self) -> DictionaryIter<'_> {
        Box::new(BTreeMap::iter(self).map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)))
    }

    fn insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<(), Box<dyn Reflect>> {
        let key = key.take::<K>()?;
        let value = value.take::<V>()?;
        BTreeMap::insert(self, key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;

    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::{ReflectMut, ReflectRef};

    #[test]
    fn btree_map_entries() {
        let info = <BTreeMap<String, u8>>::type_info().as_dictionary().unwrap();
        assert!(info.key().unwrap().type_is::<String>());
        assert!(info.value().unwrap().type_is::<u8>());

        let mut map = info.construct();
        let dict = map.reflect_mut().into_dictionary().unwrap();
        dict.insert(Box::new(String::from("b")), Box::new(2_u8)).unwrap();
        dict.insert(Box::new(String::from("a")), Box::new(1_u8)).unwrap();
        assert!(dict.insert(Box::new(1_u8), Box::new(1_u8)).is_err());

        let ReflectRef::Dictionary(dict) = map.reflect_ref() else {
            panic!("not a dictionary");
        };
        let keys: Vec<&String> = dict
            .iter()
            .filter_map(|(k, _)| k.downcast_ref::<String>())
            .collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn hash_map_is_dictionary() {
        let mut map: std::collections::HashMap<u32, bool> = [(1, true)].into_iter().collect();
        assert!(matches!(map.reflect_mut(), ReflectMut::Dictionary(_)));
        assert!(matches!(map.reflect_ref(), ReflectRef::Dictionary(d) if d.len() == 1));
    }
}
