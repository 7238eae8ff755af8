use crate::{Alphabet, Label};

/// A synchronization policy decides whether and how labels of different automata fire
/// together when the automata are run in parallel, see [`Product`](crate::transformations::Product)
/// and [`MixPlay`](crate::MixPlay).
///
/// Synchronizing two labels produces a label, which allows policies that merge distinct labels
/// into one, for example an output `!m` of one automaton with the matching input `?m` of another.
pub trait Synchronization<L: Label> {
    /// Returns the label that results from firing `left` and `right` together, or `None` if
    /// they do not synchronize.
    fn synchronize(&self, left: &L, right: &L) -> Option<L>;

    /// Returns the labels of `left` and `right` that can synchronize with some label of the
    /// respective other alphabet.
    fn synchronizable(&self, left: &Alphabet<L>, right: &Alphabet<L>) -> Alphabet<L> {
        let from_left = left
            .iter()
            .filter(|l| right.iter().any(|r| self.synchronize(l, r).is_some()));
        let from_right = right
            .iter()
            .filter(|r| left.iter().any(|l| self.synchronize(l, r).is_some()));
        from_left.chain(from_right).cloned().collect()
    }

    /// Computes the synchronizing set of a collection of alphabets, which is the union of
    /// [`Self::synchronizable`] over all pairs of distinct alphabets. Labels outside of this set
    /// occur in at most one alphabet and never need a partner.
    fn synchronizing(&self, alphabets: &[Alphabet<L>]) -> Alphabet<L> {
        let mut out = Alphabet::new();
        for (i, left) in alphabets.iter().enumerate() {
            for right in &alphabets[i + 1..] {
                out.extend(self.synchronizable(left, right));
            }
        }
        out
    }

    /// Returns true if `label` synchronizes with some label of `alphabet`.
    fn synchronize_with(&self, label: &L, alphabet: &Alphabet<L>) -> bool {
        alphabet.iter().any(|l| self.synchronize(label, l).is_some())
    }
}

/// Synchronizes two labels if and only if they are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DefaultSynchronization;

impl<L: Label> Synchronization<L> for DefaultSynchronization {
    fn synchronize(&self, left: &L, right: &L) -> Option<L> {
        (left == right).then(|| left.clone())
    }

    fn synchronizable(&self, left: &Alphabet<L>, right: &Alphabet<L>) -> Alphabet<L> {
        left.intersection(right).cloned().collect()
    }

    fn synchronize_with(&self, label: &L, alphabet: &Alphabet<L>) -> bool {
        alphabet.contains(label)
    }
}

impl<L: Label, S: Synchronization<L> + ?Sized> Synchronization<L> for &S {
    fn synchronize(&self, left: &L, right: &L) -> Option<L> {
        (**self).synchronize(left, right)
    }
    fn synchronizable(&self, left: &Alphabet<L>, right: &Alphabet<L>) -> Alphabet<L> {
        (**self).synchronizable(left, right)
    }
    fn synchronizing(&self, alphabets: &[Alphabet<L>]) -> Alphabet<L> {
        (**self).synchronizing(alphabets)
    }
    fn synchronize_with(&self, label: &L, alphabet: &Alphabet<L>) -> bool {
        (**self).synchronize_with(label, alphabet)
    }
}

impl<L: Label, S: Synchronization<L> + ?Sized> Synchronization<L> for Box<S> {
    fn synchronize(&self, left: &L, right: &L) -> Option<L> {
        (**self).synchronize(left, right)
    }
    fn synchronizable(&self, left: &Alphabet<L>, right: &Alphabet<L>) -> Alphabet<L> {
        (**self).synchronizable(left, right)
    }
    fn synchronizing(&self, alphabets: &[Alphabet<L>]) -> Alphabet<L> {
        (**self).synchronizing(alphabets)
    }
    fn synchronize_with(&self, label: &L, alphabet: &Alphabet<L>) -> bool {
        (**self).synchronize_with(label, alphabet)
    }
}
