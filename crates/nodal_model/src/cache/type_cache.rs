use alloc::sync::Arc;
use core::fmt;
use std::sync::{LazyLock, PoisonError, RwLock};

use nodal_utils::TypeIdMap;

use crate::cache::CachedType;
use crate::info::{TypeInfo, Typed};

/// Registry of [`CachedType`] records keyed by type identity.
///
/// Usually owned by a mapper through an `Arc`; [`TypeCache::global`]
/// gives a process-wide instance for callers that want one.
///
/// # Example
///
/// ```
/// use nodal_model::cache::TypeCache;
///
/// let cache = TypeCache::new();
/// let a = cache.of::<Vec<u32>>();
/// let b = cache.of::<Vec<u32>>();
///
/// assert!(std::sync::Arc::ptr_eq(&a, &b));
/// assert_eq!(cache.len(), 1);
/// ```
pub struct TypeCache {
    entries: RwLock<TypeIdMap<Arc<CachedType>>>,
}

static GLOBAL: LazyLock<Arc<TypeCache>> = LazyLock::new(|| Arc::new(TypeCache::new()));

impl TypeCache {
    /// Creates an empty cache.
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Returns the process-wide cache.
    pub fn global() -> Arc<TypeCache> {
        Arc::clone(&GLOBAL)
    }

    /// Returns the record of the type described by `info`, computing it on first use.
    pub fn get(&self, info: &'static TypeInfo) -> Arc<CachedType> {
        let type_id = info.type_id();

        if let Some(cached) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return Arc::clone(cached);
        }

        // Computed without the lock held; a racing thread builds the same record.
        let cached = Arc::new(CachedType::new(info));

        Arc::clone(
            self.entries
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .get_or_insert(type_id, || cached),
        )
    }

    /// Returns the record of `T`.
    #[inline]
    pub fn of<T: Typed>(&self) -> Arc<CachedType> {
        self.get(T::type_info())
    }

    /// Returns the number of cached types.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no type has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TypeCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TypeCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCache")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use std::thread;

    use super::TypeCache;

    #[test]
    fn concurrent_fill_is_consistent() {
        let cache = Arc::new(TypeCache::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let a = cache.of::<Vec<String>>();
                    let b = cache.of::<Option<i32>>();
                    (a.default_name().to_owned(), b.is_nullable())
                })
            })
            .collect();

        for handle in handles {
            let (name, nullable) = handle.join().unwrap();
            assert_eq!(name, "ArrayOfString");
            assert!(nullable);
        }

        assert_eq!(cache.len(), 2);
        assert!(Arc::ptr_eq(&cache.of::<Vec<String>>(), &cache.of::<Vec<String>>()));
    }

    #[test]
    fn global_is_shared() {
        assert!(Arc::ptr_eq(&TypeCache::global(), &TypeCache::global()));
    }
}
