use crate::arena::NodeId;
use crate::avl_tree::node::Node;
use crate::bst::{self, Search, Side};
use crate::compare::Comparator;
use crate::entry::Entry;
use crate::error::{Error, Result};
use log::trace;
use std::cmp;

pub type Tree<T, U> = bst::Tree<Node<T, U>>;

pub fn height<T, U>(tree: &Tree<T, U>, id: Option<NodeId>) -> usize {
    match id {
        None => 0,
        Some(id) => tree.arena[id].height,
    }
}

fn update<T, U>(tree: &mut Tree<T, U>, id: NodeId) {
    let left_height = height(tree, tree.child(id, Side::Left));
    let right_height = height(tree, tree.child(id, Side::Right));
    tree.arena[id].height = cmp::max(left_height, right_height) + 1;
}

fn balance_factor<T, U>(tree: &Tree<T, U>, id: NodeId) -> i32 {
    (height(tree, tree.child(id, Side::Left)) as i32)
        - (height(tree, tree.child(id, Side::Right)) as i32)
}

// the demoted node is updated first since it is now a child of the promoted one
fn rotate<T, U>(tree: &mut Tree<T, U>, id: NodeId, side: Side) -> NodeId {
    let promoted = tree.rotate(id, side);
    update(tree, id);
    update(tree, promoted);
    promoted
}

// returns the root of the rebalanced subtree
fn balance<T, U>(tree: &mut Tree<T, U>, id: NodeId) -> NodeId {
    update(tree, id);

    let factor = balance_factor(tree, id);
    if factor > 1 {
        let child = tree
            .child(id, Side::Left)
            .expect("Expected left child node to be `Some`.");
        if balance_factor(tree, child) < 0 {
            trace!("left-right case at {:?}", id);
            rotate(tree, child, Side::Left);
        }
        rotate(tree, id, Side::Right)
    } else if factor < -1 {
        let child = tree
            .child(id, Side::Right)
            .expect("Expected right child node to be `Some`.");
        if balance_factor(tree, child) > 0 {
            trace!("right-left case at {:?}", id);
            rotate(tree, child, Side::Right);
        }
        rotate(tree, id, Side::Left)
    } else {
        id
    }
}

// walks parent links from `start` to the root, fixing heights and balance along the way
fn rebalance_from<T, U>(tree: &mut Tree<T, U>, start: Option<NodeId>) {
    let mut curr = start;
    while let Some(id) = curr {
        let subtree_root = balance(tree, id);
        curr = tree.parent(subtree_root);
    }
}

pub fn insert<T, U, C>(tree: &mut Tree<T, U>, cmp: &C, key: T, value: U) -> Result<()>
where
    C: Comparator<T>,
{
    let slot = match tree.search(cmp, &key) {
        Search::Found(_) => return Err(Error::KeyExists),
        Search::Vacant(slot) => slot,
    };
    let id = tree.arena.try_allocate(Node::new(key, value))?;
    tree.attach(id, slot);
    rebalance_from(tree, slot.map(|(parent, _)| parent));
    Ok(())
}

pub fn remove<T, U, C>(tree: &mut Tree<T, U>, cmp: &C, key: &T) -> Result<Entry<T, U>>
where
    C: Comparator<T>,
{
    let id = tree.find(cmp, key).ok_or(Error::KeyNotFound)?;

    // a node with two children trades entries with its successor, whose slot is excised instead
    let (excised, start) = match (tree.child(id, Side::Left), tree.child(id, Side::Right)) {
        (Some(_), Some(right)) => {
            let successor = tree.extreme(right, Side::Left);
            tree.swap_entries(id, successor);
            let start = tree.parent(successor);
            let replacement = tree.child(successor, Side::Right);
            tree.transplant(successor, replacement);
            (successor, start)
        },
        (left, right) => {
            let start = tree.parent(id);
            tree.transplant(id, left.or(right));
            (id, start)
        },
    };

    let node = tree.arena.free(excised);
    rebalance_from(tree, start);
    Ok(node.entry)
}
