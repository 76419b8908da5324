use crate::bst::{self, Links};
use crate::entry::Entry;

/// A struct representing an internal node of an avl tree.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub height: usize,
    pub links: Links,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U) -> Self {
        Node {
            entry: Entry { key, value },
            height: 1,
            links: Links::default(),
        }
    }
}

impl<T, U> bst::Node for Node<T, U> {
    type Key = T;
    type Value = U;

    fn entry(&self) -> &Entry<T, U> {
        &self.entry
    }

    fn entry_mut(&mut self) -> &mut Entry<T, U> {
        &mut self.entry
    }

    fn into_entry(self) -> Entry<T, U> {
        self.entry
    }

    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}
