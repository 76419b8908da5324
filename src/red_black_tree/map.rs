use crate::bst;
use crate::compare::{Comparator, Natural};
use crate::entry::Entry;
use crate::error::Result;
use crate::red_black_tree::node::Node;
use crate::red_black_tree::tree;
use log::debug;
use std::fmt;
use std::ops::Index;
use std::vec;

/// An ordered map implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors every node red or black.
/// No red node has a red child and every path from a node down to an absent child crosses the
/// same number of black nodes, which bounds the height by twice the logarithm of the length.
/// Keys are ordered by the comparator given at construction, which defaults to `Ord`.
///
/// # Examples
///
/// ```
/// use balanced_trees::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1).unwrap();
/// map.insert(3, 4).unwrap();
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.max(), Some(&3));
///
/// assert_eq!(map.remove(&0), Ok((0, 1)));
/// assert!(map.remove(&1).is_err());
/// ```
pub struct RedBlackMap<T, U, C = Natural> {
    tree: tree::Tree<T, U>,
    cmp: C,
}

impl<T, U> RedBlackMap<T, U>
where
    T: Ord,
{
    /// Constructs a new, empty `RedBlackMap<T, U>` ordered by `T: Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap::with_comparator(Natural)
    }
}

impl<T, U, C> RedBlackMap<T, U, C>
where
    C: Comparator<T>,
{
    /// Constructs a new, empty `RedBlackMap<T, U, C>` ordered by `cmp`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::with_comparator(|a: &u32, b: &u32| b.cmp(a));
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    /// assert_eq!(map.min(), Some(&2));
    /// ```
    pub fn with_comparator(cmp: C) -> Self {
        RedBlackMap {
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
    /// use balanced_trees::red_black_tree::RedBlackMap;
    /// use balanced_trees::Error;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_trees::red_black_tree::RedBlackMap;
    /// use balanced_trees::Error;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut(&mut self, key: &T) -> Option<&mut U> {
        let RedBlackMap { tree, cmp, .. } = self;
        match tree.find(&*cmp, key) {
            Some(id) => Some(&mut tree.arena[id].entry.value),
            None => None,
        }
    }
}

impl<T, U, C> RedBlackMap<T, U, C> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_trees::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the map, releasing every node. The map can be reused afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        debug!("clearing red black map with {} entries", self.len());
        self.tree.clear();
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
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
    /// use balanced_trees::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, 2).unwrap();
    /// map.insert(1, 1).unwrap();
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<'_, T, U> {
        RedBlackMapIter {
            inner: self.tree.iter(),
        }
    }
}

impl<T, U, C> IntoIterator for RedBlackMap<T, U, C> {
    type IntoIter = RedBlackMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(mut self) -> Self::IntoIter {
        RedBlackMapIntoIter {
            inner: self.tree.drain(),
        }
    }
}

impl<'a, T, U, C> IntoIterator for &'a RedBlackMap<T, U, C>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = RedBlackMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `RedBlackMap<T, U, C>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct RedBlackMapIntoIter<T, U> {
    inner: vec::IntoIter<Entry<T, U>>,
}

impl<T, U> Iterator for RedBlackMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Entry::into_pair)
    }
}

/// An iterator for `RedBlackMap<T, U, C>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct RedBlackMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    inner: bst::Iter<'a, Node<T, U>>,
}

impl<'a, T, U> Iterator for RedBlackMapIter<'a, T, U>
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

impl<T, U> Default for RedBlackMap<T, U>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U, C> fmt::Debug for RedBlackMap<T, U, C>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, T, U, C> Index<&'a T> for RedBlackMap<T, U, C>
where
    C: Comparator<T>,
{
    type Output = U;

    fn index(&self, key: &T) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

#[cfg(test)]
mod tests {
    use super::RedBlackMap;
    use crate::error::Error;
    use crate::red_black_tree::node::Color;
    use crate::red_black_tree::tree;

    fn root_key<T, U, C>(map: &RedBlackMap<T, U, C>) -> Option<&T> {
        map.tree.root.map(|root| &map.tree.arena[root].entry.key)
    }

    // counts red nodes whose parent is also red
    fn red_violations<T, U, C>(map: &RedBlackMap<T, U, C>) -> usize {
        map.tree
            .iter()
            .filter(|node| node.color == Color::Red && tree::is_red(&map.tree, node.links.parent))
            .count()
    }

    #[test]
    fn test_len_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.len(), 0);
        assert_eq!(map.get(&0), None);
    }

    #[test]
    fn test_is_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: RedBlackMap<u32, u32> = RedBlackMap::new();
        assert_eq!(map.min(), None);
        assert_eq!(map.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut map = RedBlackMap::new();
        assert_eq!(map.insert(1, 1), Ok(()));
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut map = RedBlackMap::new();
        assert_eq!(map.insert(1, 1), Ok(()));
        assert_eq!(map.insert(1, 3), Err(Error::KeyExists));
        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1).unwrap();
        assert_eq!(map.remove(&1), Ok((1, 1)));
        assert!(!map.contains_key(&1));
        assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
        assert!(map.is_empty());
    }

    #[test]
    fn test_len_tracks_live_nodes() {
        let mut map = RedBlackMap::new();
        for key in 0..64 {
            map.insert(key, key).unwrap();
        }
        assert_eq!(map.insert(7, 0), Err(Error::KeyExists));
        assert_eq!(map.remove(&100), Err(Error::KeyNotFound));
        assert_eq!(map.len(), 64);
        for key in (0..64).filter(|key| key % 2 == 0) {
            map.remove(&key).unwrap();
        }
        assert_eq!(map.len(), 32);
        assert_eq!(map.len(), map.iter().count());
        map.clear();
        assert_eq!(map.len(), 0);
        map.insert(1, 1).unwrap();
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_ascending_inserts() {
        let mut map = RedBlackMap::new();
        for key in 1..=10 {
            map.insert(key, key * 10).unwrap();
        }
        let root = map.tree.root.expect("Expected a non-empty tree.");
        assert_eq!(map.tree.arena[root].color, Color::Black);
        assert_eq!(red_violations(&map), 0);
        assert_eq!(map.len(), 10);
        for key in 1..=10 {
            assert_eq!(map.get(&key), Some(&(key * 10)));
        }
    }

    #[test]
    fn test_remove_root_promotes_successor() {
        let mut map = RedBlackMap::new();
        for key in &[20, 10, 30] {
            map.insert(*key, *key * 10).unwrap();
        }
        assert_eq!(root_key(&map), Some(&20));
        assert_eq!(map.remove(&20), Ok((20, 200)));
        assert_eq!(root_key(&map), Some(&30));
        assert_eq!(map.get(&10), Some(&100));
        assert_eq!(map.get(&30), Some(&300));
        assert_eq!(map.len(), 2);
        assert_eq!(red_violations(&map), 0);
    }

    #[test]
    fn test_min_max() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1).unwrap();
        map.insert(3, 3).unwrap();
        map.insert(5, 5).unwrap();

        assert_eq!(map.min(), Some(&1));
        assert_eq!(map.max(), Some(&5));
    }

    #[test]
    fn test_get_mut() {
        let mut map = RedBlackMap::new();
        map.insert(1, 1).unwrap();
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_custom_comparator() {
        let mut map = RedBlackMap::with_comparator(|a: &String, b: &String| {
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        });
        for word in &["pear", "fig", "banana", "kiwi"] {
            map.insert(word.to_string(), word.len()).unwrap();
        }
        assert_eq!(map.min().map(String::as_str), Some("fig"));
        assert_eq!(map.max().map(String::as_str), Some("banana"));
        assert_eq!(
            map.insert("kiwi".to_string(), 0),
            Err(Error::KeyExists),
        );
        assert_eq!(
            map.iter().map(|(key, _)| key.as_str()).collect::<Vec<&str>>(),
            vec!["fig", "kiwi", "pear", "banana"],
        );
    }

    #[test]
    fn test_identity_mapping() {
        let mut visited = RedBlackMap::new();
        for id in &[4u64, 1, 4, 7, 1] {
            if !visited.contains_key(id) {
                visited.insert(*id, *id).unwrap();
            }
        }
        assert_eq!(visited.len(), 3);
        assert_eq!(visited.get(&7), Some(&7));
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut map = RedBlackMap::new();
        for key in 0..100 {
            map.insert(key, key).unwrap();
        }
        map.clear();
        assert!(map.is_empty());
        assert_eq!(root_key(&map), None);
        assert_eq!(map.insert(1, 2), Ok(()));
        assert_eq!(map[&1], 2);
    }

    #[test]
    fn test_into_iter() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2).unwrap();
        map.insert(5, 6).unwrap();
        map.insert(3, 4).unwrap();

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter() {
        let mut map = RedBlackMap::new();
        map.insert(1, 2).unwrap();
        map.insert(5, 6).unwrap();
        map.insert(3, 4).unwrap();

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
    }

    #[test]
    fn test_debug() {
        let mut map = RedBlackMap::new();
        map.insert(2, 'b').unwrap();
        map.insert(1, 'a').unwrap();
        assert_eq!(format!("{:?}", map), "{1: 'a', 2: 'b'}");
    }
}
