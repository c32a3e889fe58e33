use core::any::TypeId;
use core::fmt;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::hash::NoOpHashState;

// -----------------------------------------------------------------------------
// TypeIdMap

/// Lookup table from a Rust type to a value, used by the type caches.
///
/// Keys hash through [`NoOpHashState`]: a `TypeId` is random enough to be
/// its own hash.
///
/// ```
/// use core::any::TypeId;
/// use nodal_utils::TypeIdMap;
///
/// let mut names = TypeIdMap::new();
/// names.get_or_insert(TypeId::of::<u8>(), || "u8");
///
/// assert_eq!(names.get(&TypeId::of::<u8>()), Some(&"u8"));
/// assert_eq!(names.get(&TypeId::of::<u16>()), None);
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, NoOpHashState>);

impl<V> TypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(NoOpHashState))
    }

    /// The entry of `type_id`, filled with `make()` when vacant.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, make: impl FnOnce() -> V) -> &mut V {
        match self.0.entry(type_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(make()),
        }
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeIdMap;

    #[test]
    fn vacant_entries_are_filled_once() {
        let mut map = TypeIdMap::new();
        *map.get_or_insert(TypeId::of::<i32>(), || 10) += 1;
        *map.get_or_insert(TypeId::of::<i32>(), || 100) += 1;

        assert_eq!(map.get(&TypeId::of::<i32>()), Some(&12));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn distinct_types_get_distinct_slots() {
        let mut map = TypeIdMap::default();
        assert!(map.is_empty());

        map.get_or_insert(TypeId::of::<str>(), || 'a');
        map.get_or_insert(TypeId::of::<u64>(), || 'b');
        map.get_or_insert(TypeId::of::<&'static str>(), || 'c');

        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&TypeId::of::<u64>()), Some(&'b'));
        assert_eq!(map.get(&TypeId::of::<[u8]>()), None);
    }
}
