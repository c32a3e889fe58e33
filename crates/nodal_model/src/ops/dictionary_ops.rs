use alloc::boxed::Box;

use crate::Reflect;

/// Iterator over the entries of a [`Dictionary`].
pub type DictionaryIter<'a> = Box<dyn Iterator<Item = (&'a dyn Reflect, &'a dyn Reflect)> + 'a>;

/// A collection of key/value entries.
pub trait Dictionary: Reflect {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the dictionary holds no entry.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the entries.
    ///
    /// Ordered maps yield entries in key order.
    fn iter(&self) -> DictionaryIter<'_>;

    /// Inserts an entry, replacing the value of an equal key.
    ///
    /// Hands back the key or value that is not the declared type.
    fn insert(&mut self, key: Box<dyn Reflect>, value: Box<dyn Reflect>)
    -> Result<(), Box<dyn Reflect>>;
}
