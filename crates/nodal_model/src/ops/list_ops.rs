use alloc::boxed::Box;

use crate::Reflect;

/// An ordered sequence of values of one item type.
pub trait List: Reflect {
    /// Returns the number of items.
    fn len(&self) -> usize;

    /// Returns `true` if the list holds no item.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the item at `index`.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Appends `value`, handing it back if it is not the item type.
    fn push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;
}

impl dyn List {
    /// Returns an iterator over the items in order.
    #[inline]
    pub fn iter(&self) -> ListIter<'_> {
        ListIter::new(self)
    }
}

/// Iterator over the items of a [`List`].
pub struct ListIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl<'a> ListIter<'a> {
    /// Creates an iterator starting at the first item.
    #[inline]
    pub const fn new(list: &'a dyn List) -> Self {
        Self { list, index: 0 }
    }
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.list.get(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.list.len().saturating_sub(self.index);
        (size, Some(size))
    }
}

impl ExactSizeIterator for ListIter<'_> {}
