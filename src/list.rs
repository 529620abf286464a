use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ListError {
    #[error("Index out of bounds")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Append-only growable array.
///
/// Storage is a `Vec`, but capacity is reserved exactly so growth follows a
/// strict doubling policy starting at one slot, and a clone allocates the
/// same capacity as its source.
#[derive(Debug)]
pub struct DynamicList<T> {
    items: Vec<T>,
}

impl<T> DynamicList<T> {
    pub fn new() -> Self {
        DynamicList { items: Vec::new() }
    }

    pub fn push(&mut self, value: T) {
        if self.items.len() == self.items.capacity() {
            let grow_by = self.items.capacity().max(1);
            self.items.reserve_exact(grow_by);
        }
        self.items.push(value);
    }

    /// Removes the last element. Popping an empty list does nothing.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn get(&self, index: usize) -> Result<&T, ListError> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or(ListError::IndexOutOfBounds { index, len })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ListError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(ListError::IndexOutOfBounds { index, len })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().position(predicate)
    }
}

impl<T> Default for DynamicList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicList<T> {
    fn clone(&self) -> Self {
        let mut items = Vec::with_capacity(self.items.capacity());
        items.extend_from_slice(&self.items);
        DynamicList { items }
    }
}

impl<'a, T> IntoIterator for &'a DynamicList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for DynamicList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = DynamicList::new();
        for value in iter {
            list.push(value);
        }
        list
    }
}
