use std::cell::Cell;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("Index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

const DEFAULT_CAPACITY: usize = 4;

/// Growable, order-preserving list with a mutation counter.
///
/// Capacity doubles whenever the list fills up, so pushing is amortized
/// O(1). Every structural change bumps [`version`](Self::version), as does
/// taking a view with [`as_slice`](Self::as_slice); comparing a saved
/// version against the current one tells whether an observation has been
/// invalidated since it was made.
///
/// Not synchronized; sharing one instance between threads requires external
/// mutual exclusion.
pub struct RefList<T> {
    items: Vec<T>,
    // Authoritative for the doubling policy; `items` is kept reserved to
    // exactly this amount.
    capacity: usize,
    version: Cell<u64>,
}

impl<T> RefList<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a list with room for `capacity` elements before the first
    /// reallocation. A capacity of zero falls back to the default.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            capacity
        };

        Self {
            items: Vec::with_capacity(capacity),
            capacity,
            version: Cell::new(0),
        }
    }

    /// Amount of elements in the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Amount of elements the list can hold before reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current value of the mutation counter.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.get()
    }

    /// Append `item` at the logical end, doubling the capacity first if the
    /// list is full.
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.grow();
        }
        self.items.push(item);
        self.bump();
    }

    pub fn get(&self, index: usize) -> Result<&T, ListError> {
        self.items.get(index).ok_or(ListError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    /// Mutable access to the element at `index`. The borrow is tied to the
    /// list, so it cannot be retained across a structural mutation.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ListError> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(ListError::IndexOutOfRange { index, len })
    }

    /// Remove and return the element at `index`, shifting everything after
    /// it left by one.
    pub fn remove_at(&mut self, index: usize) -> Result<T, ListError> {
        if index >= self.items.len() {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let item = self.items.remove(index);
        self.bump();
        Ok(item)
    }

    /// Remove and return the first element equal to `item`. Returns `None`
    /// without touching the list if no element matches.
    pub fn remove_item(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let index = self.items.iter().position(|existing| existing == item)?;
        self.remove_at(index).ok()
    }

    /// Drop all elements. Capacity is retained.
    pub fn clear(&mut self) {
        self.items.clear();
        self.bump();
    }

    /// View of the live elements, without copying.
    ///
    /// Taking a view bumps the version counter: save [`version`](Self::version)
    /// right after this call and compare it later to detect whether a
    /// structural mutation has invalidated the observation.
    pub fn as_slice(&self) -> &[T] {
        self.bump();
        &self.items
    }

    /// Shrink the allocation to the element count, but only when occupancy
    /// has dropped below 90% of capacity. Reallocates, so any previously
    /// taken view is invalidated and the version counter is bumped.
    pub fn trim_excess(&mut self) {
        let threshold = self.capacity * 9 / 10;
        if self.items.len() < threshold {
            self.items.shrink_to_fit();
            self.capacity = self.items.len();
            self.bump();
        }
    }

    fn grow(&mut self) {
        let new_capacity = if self.capacity == 0 {
            DEFAULT_CAPACITY
        } else {
            self.capacity * 2
        };

        tracing::trace!("Growing list from {} to {new_capacity}.", self.capacity);

        self.items.reserve_exact(new_capacity - self.items.len());
        self.capacity = new_capacity;
    }

    #[inline]
    fn bump(&self) {
        self.version.set(self.version.get() + 1);
    }
}

impl<T> Default for RefList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_then_get_yields_the_item() {
        let mut list = RefList::new();
        list.push(42);

        assert_eq!(list.len(), 1);
        assert_eq!(list.get(list.len() - 1).unwrap(), &42);
    }

    #[test]
    fn capacity_doubles_from_the_default() {
        let mut list = RefList::new();
        assert_eq!(list.capacity(), 4);

        for value in [10, 20, 30, 40, 50] {
            list.push(value);
        }

        // The fifth push triggered a single reallocation.
        assert_eq!(list.capacity(), 8);
        for (index, value) in [10, 20, 30, 40, 50].iter().enumerate() {
            assert_eq!(list.get(index).unwrap(), value);
        }
    }

    #[test]
    fn zero_capacity_falls_back_to_the_default() {
        let list: RefList<i32> = RefList::with_capacity(0);
        assert_eq!(list.capacity(), 4);
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let mut list = RefList::new();
        list.push(1);

        assert!(matches!(
            list.get(1),
            Err(ListError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(matches!(
            list.get_mut(5),
            Err(ListError::IndexOutOfRange { index: 5, len: 1 })
        ));
        assert!(matches!(
            list.remove_at(1),
            Err(ListError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut list = RefList::new();
        list.push(1);

        *list.get_mut(0).unwrap() = 7;
        assert_eq!(list.get(0).unwrap(), &7);
    }

    #[test]
    fn remove_at_preserves_the_order_of_the_rest() {
        let mut list = RefList::new();
        for value in [10, 20, 30, 40, 50] {
            list.push(value);
        }

        assert_eq!(list.remove_at(1).unwrap(), 20);
        assert_eq!(list.as_slice(), &[10, 30, 40, 50]);
    }

    #[test]
    fn remove_item_takes_the_first_match_only() {
        let mut list = RefList::new();
        for value in [1, 2, 2, 3] {
            list.push(value);
        }

        assert_eq!(list.remove_item(&2), Some(2));
        assert_eq!(list.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn remove_item_on_an_absent_value_is_a_no_op() {
        let mut list = RefList::new();
        list.push(1);

        let version = list.version();
        assert_eq!(list.remove_item(&9), None);
        assert_eq!(list.version(), version);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn clear_retains_capacity() {
        let mut list = RefList::new();
        for value in 0..5 {
            list.push(value);
        }

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), 8);
    }

    #[test]
    fn structural_mutations_bump_the_version() {
        let mut list = RefList::new();

        let before = list.version();
        list.push(1);
        assert_ne!(list.version(), before);

        let before = list.version();
        list.remove_at(0).unwrap();
        assert_ne!(list.version(), before);

        let before = list.version();
        list.clear();
        assert_ne!(list.version(), before);
    }

    #[test]
    fn a_view_is_detectably_invalidated_by_later_mutation() {
        let mut list = RefList::new();
        list.push(1);

        let _ = list.as_slice();
        let observed = list.version();

        list.push(2);
        assert_ne!(list.version(), observed);
    }

    #[test]
    fn trim_excess_shrinks_a_sparse_list() {
        let mut list = RefList::new();
        for value in 0..5 {
            list.push(value);
        }
        list.remove_at(4).unwrap();
        list.remove_at(3).unwrap();

        // 3 of 8 slots used.
        let version = list.version();
        list.trim_excess();
        assert_eq!(list.capacity(), 3);
        assert_ne!(list.version(), version);
        assert_eq!(list.as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn trim_excess_leaves_a_mostly_full_list_alone() {
        let mut list = RefList::with_capacity(10);
        for value in 0..9 {
            list.push(value);
        }

        list.trim_excess();
        assert_eq!(list.capacity(), 10);
    }

    #[test]
    fn pushing_after_a_full_trim_reseeds_the_default_capacity() {
        let mut list = RefList::new();
        list.trim_excess();
        assert_eq!(list.capacity(), 0);

        list.push(1);
        assert_eq!(list.capacity(), 4);
        assert_eq!(list.get(0).unwrap(), &1);
    }
}
