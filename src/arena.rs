//! Slot storage for tree nodes addressed by index.

use crate::error::Result;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to a node stored in an `Arena<N>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

enum Slot<N> {
    Occupied(N),
    Vacant(Option<NodeId>),
}

/// A single-type allocator backed by one `Vec`.
///
/// Freed slots are threaded onto a free list and reused by the next allocation, so a handle stays
/// valid until the node it refers to is freed. Clearing the arena drops every node at once.
pub struct Arena<N> {
    head: Option<NodeId>,
    slots: Vec<Slot<N>>,
    len: usize,
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Arena {
            head: None,
            slots: Vec::new(),
            len: 0,
        }
    }

    /// Stores `node` and returns its handle. Fails without side effects if the backing vector
    /// cannot grow.
    pub fn try_allocate(&mut self, node: N) -> Result<NodeId> {
        match self.head.take() {
            None => {
                self.slots.try_reserve(1)?;
                self.slots.push(Slot::Occupied(node));
                self.len += 1;
                Ok(NodeId(self.slots.len() - 1))
            },
            Some(id) => {
                let vacant_slot = mem::replace(&mut self.slots[id.0], Slot::Occupied(node));
                match vacant_slot {
                    Slot::Vacant(next_id) => {
                        self.head = next_id;
                        self.len += 1;
                        Ok(id)
                    },
                    Slot::Occupied(_) => panic!("Error: free list points at an occupied slot."),
                }
            },
        }
    }

    /// Releases the node behind `id` and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to a live node.
    pub fn free(&mut self, id: NodeId) -> N {
        if id.0 >= self.slots.len() {
            panic!("Error: attempting to free invalid slot.");
        }
        let old_slot = mem::replace(&mut self.slots[id.0], Slot::Vacant(self.head));
        match old_slot {
            Slot::Vacant(next_id) => {
                self.slots[id.0] = Slot::Vacant(next_id);
                panic!("Error: attempting to free vacant slot.");
            },
            Slot::Occupied(node) => {
                self.head = Some(id);
                self.len -= 1;
                node
            },
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&N> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut N> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Returns mutable references to two distinct live nodes.
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or either handle does not refer to a live node.
    pub fn pair_mut(&mut self, a: NodeId, b: NodeId) -> (&mut N, &mut N) {
        assert_ne!(a, b, "Error: expected two distinct slots.");
        let (low, high, swapped) = if a.0 < b.0 { (a.0, b.0, false) } else { (b.0, a.0, true) };
        let (head, tail) = self.slots.split_at_mut(high);
        let pair = match (&mut head[low], &mut tail[0]) {
            (Slot::Occupied(x), Slot::Occupied(y)) => (x, y),
            _ => panic!("Error: entry out of bounds."),
        };
        if swapped {
            (pair.1, pair.0)
        } else {
            pair
        }
    }

    /// Returns the number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn clear(&mut self) {
        self.head = None;
        self.slots.clear();
        self.len = 0;
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id).expect("Error: entry out of bounds.")
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id).expect("Error: entry out of bounds.")
    }
}
