use crate::arena::NodeId;
use crate::bst::{self, Search, Side};
use crate::compare::Comparator;
use crate::entry::Entry;
use crate::error::{Error, Result};
use crate::red_black_tree::node::{Color, Node};
use log::trace;

pub type Tree<T, U> = bst::Tree<Node<T, U>>;

// absent children count as black
pub fn is_red<T, U>(tree: &Tree<T, U>, id: Option<NodeId>) -> bool {
    match id {
        None => false,
        Some(id) => tree.arena[id].color == Color::Red,
    }
}

fn set_color<T, U>(tree: &mut Tree<T, U>, id: NodeId, color: Color) {
    tree.arena[id].color = color;
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
    insert_fixup(tree, id);
    Ok(())
}

fn insert_fixup<T, U>(tree: &mut Tree<T, U>, mut id: NodeId) {
    loop {
        let mut parent = match tree.parent(id) {
            Some(parent) if is_red(tree, Some(parent)) => parent,
            _ => break,
        };
        let grandparent = tree
            .parent(parent)
            .expect("Expected a red node to have a parent.");
        let side = tree
            .side_of(parent)
            .expect("Expected a red node to have a parent.");

        match tree.child(grandparent, side.opposite()) {
            Some(uncle) if is_red(tree, Some(uncle)) => {
                trace!("red uncle below {:?}", grandparent);
                set_color(tree, parent, Color::Black);
                set_color(tree, uncle, Color::Black);
                set_color(tree, grandparent, Color::Red);
                id = grandparent;
            },
            _ => {
                if tree.child(parent, side.opposite()) == Some(id) {
                    trace!("inner grandchild {:?}", id);
                    tree.rotate(parent, side);
                    id = parent;
                    parent = tree.parent(id).expect("Expected a parent after rotation.");
                }
                trace!("outer grandchild {:?}", id);
                set_color(tree, parent, Color::Black);
                set_color(tree, grandparent, Color::Red);
                tree.rotate(grandparent, side.opposite());
            },
        }
    }

    if let Some(root) = tree.root {
        set_color(tree, root, Color::Black);
    }
}

pub fn remove<T, U, C>(tree: &mut Tree<T, U>, cmp: &C, key: &T) -> Result<Entry<T, U>>
where
    C: Comparator<T>,
{
    let id = tree.find(cmp, key).ok_or(Error::KeyNotFound)?;

    // `child` takes the excised slot and may be absent, so its parent is tracked separately
    let (excised, child, parent) = match (tree.child(id, Side::Left), tree.child(id, Side::Right)) {
        (Some(_), Some(right)) => {
            let successor = tree.extreme(right, Side::Left);
            tree.swap_entries(id, successor);
            let child = tree.child(successor, Side::Right);
            let parent = tree.parent(successor);
            tree.transplant(successor, child);
            (successor, child, parent)
        },
        (left, right) => {
            let child = left.or(right);
            let parent = tree.parent(id);
            tree.transplant(id, child);
            (id, child, parent)
        },
    };

    let node = tree.arena.free(excised);
    if node.color == Color::Black {
        remove_fixup(tree, child, parent);
    }
    Ok(node.entry)
}

// `id` carries an extra black; push it up or absorb it with rotations
fn remove_fixup<T, U>(tree: &mut Tree<T, U>, mut id: Option<NodeId>, mut parent: Option<NodeId>) {
    while id != tree.root && !is_red(tree, id) {
        let curr_parent = match parent {
            Some(curr_parent) => curr_parent,
            None => break,
        };
        let side = if tree.child(curr_parent, Side::Left) == id {
            Side::Left
        } else {
            Side::Right
        };
        let mut sibling = tree
            .child(curr_parent, side.opposite())
            .expect("Expected a doubly black node to have a sibling.");

        if is_red(tree, Some(sibling)) {
            trace!("red sibling below {:?}", curr_parent);
            set_color(tree, sibling, Color::Black);
            set_color(tree, curr_parent, Color::Red);
            tree.rotate(curr_parent, side);
            sibling = tree
                .child(curr_parent, side.opposite())
                .expect("Expected a doubly black node to have a sibling.");
        }

        let near = tree.child(sibling, side);
        let far = tree.child(sibling, side.opposite());
        if !is_red(tree, near) && !is_red(tree, far) {
            trace!("black sibling with black children below {:?}", curr_parent);
            set_color(tree, sibling, Color::Red);
            id = Some(curr_parent);
            parent = tree.parent(curr_parent);
        } else {
            if !is_red(tree, far) {
                trace!("near nephew red below {:?}", curr_parent);
                set_color(tree, near.expect("Expected a red nephew."), Color::Black);
                set_color(tree, sibling, Color::Red);
                tree.rotate(sibling, side.opposite());
                sibling = tree
                    .child(curr_parent, side.opposite())
                    .expect("Expected a doubly black node to have a sibling.");
            }
            trace!("far nephew red below {:?}", curr_parent);
            let parent_color = tree.arena[curr_parent].color;
            set_color(tree, sibling, parent_color);
            set_color(tree, curr_parent, Color::Black);
            if let Some(far) = tree.child(sibling, side.opposite()) {
                set_color(tree, far, Color::Black);
            }
            tree.rotate(curr_parent, side);
            id = tree.root;
            parent = None;
        }
    }

    if let Some(id) = id {
        set_color(tree, id, Color::Black);
    }
}
