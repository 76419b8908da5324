//! Three-way key comparison supplied when a map is constructed.

use std::cmp::Ordering;

/// A total order over keys of type `T`.
///
/// Every `Fn(&T, &T) -> Ordering` implements `Comparator<T>`, so closures and function pointers
/// can be handed to `with_comparator` directly.
///
/// # Examples
///
/// ```
/// use balanced_trees::compare::{Comparator, Natural};
/// use std::cmp::Ordering;
///
/// assert_eq!(Natural.compare(&1, &2), Ordering::Less);
///
/// let reverse = |a: &u32, b: &u32| b.cmp(a);
/// assert_eq!(reverse.compare(&1, &2), Ordering::Greater);
/// ```
pub trait Comparator<T> {
    /// Returns the ordering of `a` relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The ordering given by `T: Ord`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Natural;

impl<T> Comparator<T> for Natural
where
    T: Ord,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
