use crate::avl_tree::node::Node;
use crate::avl_tree::tree;
use crate::bst;
use crate::compare::{Comparator, Natural};
use crate::entry::Entry;
use crate::error::Result;
use log::debug;
use std::fmt;
use std::ops::Index;
use std::vec;

/// An ordered map implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Keys are ordered by the
/// comparator given at construction, which defaults to `Ord`.
///
/// # Examples
///
/// ```
/// use balanced_trees::avl_tree::AvlMap;
///
/// let mut map = AvlMap::new();
/// map.insert(0, 1).unwrap();
/// map.insert(3, 4).unwrap();
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.height(), 2);
///
/// assert_eq!(map.remove(&0), Ok((0, 1)));
/// assert!(map.remove(&1).is_err());
/// ```
pub struct AvlMap<T, U, C = Natural> {
    tree: tree::Tree<T, U>,
    cmp: C,
}

impl<T, U> AvlMap<T, U>
where
    T: Ord,
{
    /// Constructs a new, empty `AvlMap<T, U>` ordered by `T: Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// ```
    pub fn new() -> Self {
        AvlMap::with_comparator(Natural)
    }
}

impl<T, U, C> AvlMap<T, U, C>
where
    C: Comparator<T>,
{
    /// Constructs a new, empty `AvlMap<T, U, C>` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    /// assert_eq!(map.min(), Some(&2));
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        AvlMap {
            tree: tree::Tree::new(),
            cmp,
        }
    }

    /// Inserts a key-value pair into the map. If an equal key already exists, the map is left
    /// unchanged and `Error::KeyExists` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    /// use balanced_trees::Error;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.insert(1, 1), Ok(()));
    /// assert_eq!(map.insert(1, 2), Err(Error::KeyExists));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Result<()> {
        tree::insert(&mut self.tree, &self.cmp, key, value)
    }

    /// Removes a key-value pair from the map and returns it. Returns `Error::KeyNotFound` if the
    /// key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    /// use balanced_trees::Error;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.remove(&1), Ok((1, 1)));
    /// assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn remove(&mut self, key: &T) -> Result<(T, U)> {
        let entry = tree::remove(&mut self.tree, &self.cmp, key)?;
        Ok(entry.into_pair())
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key(&self, key: &T) -> bool {
        self.tree.find(&self.cmp, key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. Returns
    /// `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get(&self, key: &T) -> Option<&U> {
        self.tree
            .find(&self.cmp, key)
            .map(|id| &self.tree.arena[id].entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &T) -> Option<&mut U> {
        let AvlMap { tree, cmp, .. } = self;
        match tree.find(&*cmp, key) {
            Some(id) => Some(&mut tree.arena[id].entry.value),
            None => None,
        }
    }
}

impl<T, U, C> AvlMap<T, U, C> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.arena.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the height of the tree. An empty map has height 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.height(), 0);
    /// for key in 0..7 {
    ///     map.insert(key, ()).unwrap();
    /// }
    /// assert_eq!(map.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.tree, self.tree.root)
    }

    /// Clears the map, releasing every node. The map can be reused afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing avl map with {} entries", self.len());
        self.tree.clear();
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.min().map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree.max().map(|entry| &entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(2, 2).unwrap();
    /// map.insert(1, 1).unwrap();
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlMapIter<'_, T, U> {
        AvlMapIter {
            inner: self.tree.iter(),
        }
    }
}

impl<T, U, C> IntoIterator for AvlMap<T, U, C> {
    type IntoIter = AvlMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(mut self) -> Self::IntoIter {
        AvlMapIntoIter {
            inner: self.tree.drain(),
        }
    }
}

impl<'a, T, U, C> IntoIterator for &'a AvlMap<T, U, C>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = AvlMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlMap<T, U, C>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct AvlMapIntoIter<T, U> {
    inner: vec::IntoIter<Entry<T, U>>,
}

impl<T, U> Iterator for AvlMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::into_pair)
    }
}

/// An iterator for `AvlMap<T, U, C>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct AvlMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    inner: bst::Iter<'a, Node<T, U>>,
}

impl<'a, T, U> Iterator for AvlMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|node| {
            let Entry { ref key, ref value } = node.entry;
            (key, value)
        })
    }
}

impl<T, U> Default for AvlMap<T, U>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U, C> fmt::Debug for AvlMap<T, U, C>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, T, U, C> Index<&'a T> for AvlMap<T, U, C>
where
    C: Comparator<T>,
{
    type Output = U;

    fn index(&self, key: &T) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}
