use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// A set with a deterministic iteration order. This is used wherever a set needs to be hashed
/// or compared structurally, for example when sets of states act as the states of a
/// subset construction.
pub type OrderedSet<S> = BTreeSet<S>;
/// A map with a deterministic iteration order.
pub type OrderedMap<K, V> = BTreeMap<K, V>;

/// A partition groups elements of type `I` into disjoint classes. It is the result of a
/// partition refinement, where each class collects states that cannot be distinguished.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<OrderedSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<OrderedSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a OrderedSet<I>;
    type IntoIter = std::slice::Iter<'a, OrderedSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators which yield elements of type `I`.
    /// Empty classes are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<OrderedSet<_>>())
                .filter(|class| !class.is_empty())
                .collect(),
        )
    }
}

impl<I: Hash + Eq + Ord> From<Vec<OrderedSet<I>>> for Partition<I> {
    fn from(value: Vec<OrderedSet<I>>) -> Self {
        Self(value)
    }
}

/// Greatest common divisor, used to pick strides that visit every element of a cyclic
/// sequence exactly once.
pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_equality_ignores_class_order() {
        let left = Partition::new([vec![0, 1], vec![2]]);
        let right = Partition::new([vec![2], vec![1, 0]]);
        assert_eq!(left, right);
        assert_eq!(left.size(), 2);
    }

    #[test]
    fn gcd_of_small_numbers() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(7, 3), 1);
        assert_eq!(gcd(5, 0), 5);
    }
}
