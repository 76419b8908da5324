//! Parent-linked binary search tree plumbing shared by the AVL and red-black engines.
//!
//! Nodes live in an `Arena` and refer to each other by `NodeId`. An absent child is `None`; the
//! root's parent is `None`.

use crate::arena::{Arena, NodeId};
use crate::compare::Comparator;
use crate::entry::Entry;
use log::trace;
use std::cmp::Ordering;
use std::mem;
use std::vec;

/// A child position below a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Structural links of a node. The parent link is a back-reference and carries no ownership.
#[derive(Clone, Copy, Debug, Default)]
pub struct Links {
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
    pub parent: Option<NodeId>,
}

/// A node that can be linked into a `Tree`.
pub trait Node {
    type Key;
    type Value;

    fn entry(&self) -> &Entry<Self::Key, Self::Value>;

    fn entry_mut(&mut self) -> &mut Entry<Self::Key, Self::Value>;

    fn into_entry(self) -> Entry<Self::Key, Self::Value>;

    fn links(&self) -> &Links;

    fn links_mut(&mut self) -> &mut Links;
}

/// Outcome of descending the tree looking for a key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Search {
    /// A node holding an equal key.
    Found(NodeId),
    /// The key is absent; a new node belongs below `parent` on `side`, or at the root if `None`.
    Vacant(Option<(NodeId, Side)>),
}

pub struct Tree<N> {
    pub arena: Arena<N>,
    pub root: Option<NodeId>,
}

impl<N> Tree<N> {
    pub fn new() -> Self {
        Tree {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }
}

impl<N> Tree<N>
where
    N: Node,
{
    pub fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let links = self.arena[id].links();
        match side {
            Side::Left => links.left,
            Side::Right => links.right,
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        let links = self.arena[id].links_mut();
        match side {
            Side::Left => links.left = child,
            Side::Right => links.right = child,
        }
    }

    fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.arena[id].links_mut().parent = parent;
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].links().parent
    }

    /// Returns which child of its parent `id` is, or `None` for the root.
    pub fn side_of(&self, id: NodeId) -> Option<Side> {
        self.parent(id).map(|parent| {
            if self.child(parent, Side::Left) == Some(id) {
                Side::Left
            } else {
                Side::Right
            }
        })
    }

    pub fn search<C>(&self, cmp: &C, key: &N::Key) -> Search
    where
        C: Comparator<N::Key>,
    {
        let mut slot = None;
        let mut curr = self.root;
        while let Some(id) = curr {
            let side = match cmp.compare(key, &self.arena[id].entry().key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Search::Found(id),
            };
            slot = Some((id, side));
            curr = self.child(id, side);
        }
        Search::Vacant(slot)
    }

    pub fn find<C>(&self, cmp: &C, key: &N::Key) -> Option<NodeId>
    where
        C: Comparator<N::Key>,
    {
        match self.search(cmp, key) {
            Search::Found(id) => Some(id),
            Search::Vacant(_) => None,
        }
    }

    /// Links a detached node into the vacant slot returned by `search`.
    pub fn attach(&mut self, id: NodeId, slot: Option<(NodeId, Side)>) {
        match slot {
            None => {
                self.root = Some(id);
                self.set_parent(id, None);
            },
            Some((parent, side)) => {
                self.set_child(parent, side, Some(id));
                self.set_parent(id, Some(parent));
            },
        }
    }

    /// Returns the last node reached by repeatedly following `side` from `id`.
    pub fn extreme(&self, mut id: NodeId, side: Side) -> NodeId {
        while let Some(child) = self.child(id, side) {
            id = child;
        }
        id
    }

    pub fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.child(id, Side::Right) {
            return Some(self.extreme(right, Side::Left));
        }
        let mut curr = id;
        while let Some(parent) = self.parent(curr) {
            if self.child(parent, Side::Left) == Some(curr) {
                return Some(parent);
            }
            curr = parent;
        }
        None
    }

    /// Replaces the subtree rooted at `u` with the subtree rooted at `v` in `u`'s parent. The
    /// links of `u` itself are left untouched.
    pub fn transplant(&mut self, u: NodeId, v: Option<NodeId>) {
        let parent = self.parent(u);
        match self.side_of(u) {
            None => self.root = v,
            Some(side) => self.set_child(parent.expect("Expected a parent node."), side, v),
        }
        if let Some(v) = v {
            self.set_parent(v, parent);
        }
    }

    /// Rotates `x` down towards `side`. The child of `x` on the opposite side takes its place and
    /// is returned; in-order key sequence is preserved.
    pub fn rotate(&mut self, x: NodeId, side: Side) -> NodeId {
        let y = self
            .child(x, side.opposite())
            .expect("Expected a child node to rotate into place.");
        trace!("rotating {:?} {:?}", x, side);
        let inner = self.child(y, side);
        self.transplant(x, Some(y));
        self.set_child(x, side.opposite(), inner);
        if let Some(inner) = inner {
            self.set_parent(inner, Some(x));
        }
        self.set_child(y, side, Some(x));
        self.set_parent(x, Some(y));
        y
    }

    /// Exchanges the entries of two nodes, leaving the structure untouched.
    pub fn swap_entries(&mut self, a: NodeId, b: NodeId) {
        let (x, y) = self.arena.pair_mut(a, b);
        mem::swap(x.entry_mut(), y.entry_mut());
    }

    pub fn min(&self) -> Option<&Entry<N::Key, N::Value>> {
        self.root
            .map(|root| self.arena[self.extreme(root, Side::Left)].entry())
    }

    pub fn max(&self) -> Option<&Entry<N::Key, N::Value>> {
        self.root
            .map(|root| self.arena[self.extreme(root, Side::Right)].entry())
    }

    pub fn iter(&self) -> Iter<'_, N> {
        Iter {
            tree: self,
            next: self.root.map(|root| self.extreme(root, Side::Left)),
        }
    }

    /// Frees every node and returns the entries in key order.
    pub fn drain(&mut self) -> vec::IntoIter<Entry<N::Key, N::Value>> {
        let mut ids = Vec::with_capacity(self.arena.len());
        let mut next = self.root.map(|root| self.extreme(root, Side::Left));
        while let Some(id) = next {
            ids.push(id);
            next = self.successor(id);
        }
        let entries = ids
            .into_iter()
            .map(|id| self.arena.free(id).into_entry())
            .collect::<Vec<_>>();
        self.clear();
        entries.into_iter()
    }
}

/// In-order iterator over the nodes of a `Tree`.
pub struct Iter<'a, N> {
    tree: &'a Tree<N>,
    next: Option<NodeId>,
}

impl<'a, N> Iterator for Iter<'a, N>
where
    N: Node,
{
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let id = self.next?;
        self.next = tree.successor(id);
        Some(&tree.arena[id])
    }
}
