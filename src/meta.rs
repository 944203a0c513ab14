//! Control state of Heap's algorithm.
//!
//! A [`MetaPerm`] knows nothing about the elements being permuted. It only
//! tracks the control array and the cursor, and hands out the [`IndexPair`]
//! to swap next.

use core::{fmt, num::NonZeroUsize, ptr};

use tracing::trace;

pub(crate) use internal::Container;

/// A pair of distinct indexes `(j, i)` with `j < i`.
///
/// Swapping the elements at these indexes turns the current permutation
/// into the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexPair(usize, NonZeroUsize);

impl IndexPair {
    /// Creates an `IndexPair` from a pair of indexes.
    ///
    /// # Safety
    ///
    /// * `j` must be less than `i`, which also makes `i` non-zero.
    #[inline]
    pub(crate) unsafe fn new(j: usize, i: usize) -> IndexPair {
        debug_assert!(j < i);
        // SAFETY: The caller must ensure that `j < i`, so `i` is non-zero.
        IndexPair(j, unsafe { NonZeroUsize::new_unchecked(i) })
    }

    /// Returns `(j, i)`, lower index first.
    #[inline]
    pub fn get(self) -> (usize, usize) {
        (self.0, self.1.get())
    }

    /// Applies the transposition to `slice`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not below `slice.len()`.
    #[inline]
    pub fn swap<T>(self, slice: &mut [T]) {
        let (j, i) = self.get();
        slice.swap(j, i);
    }

    /// Applies the transposition to `slice` with no bounds check.
    ///
    /// # Safety
    ///
    /// `i` must be below `slice.len()`; `j` then is too.
    #[inline]
    pub unsafe fn swap_unchecked<T>(self, slice: &mut [T]) {
        let (j, i) = self.get();
        let base = slice.as_mut_ptr();
        // SAFETY: The caller must ensure that `j` and `i` are inside `slice`,
        // and the two pointers never alias since `j < i`.
        unsafe { ptr::swap_nonoverlapping(base.add(j), base.add(i), 1) }
    }
}

impl fmt::Display for IndexPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (j, i) = self.get();
        write!(f, "{j}<->{i}")
    }
}

/// Iterative Heap's algorithm over `n` positions.
///
/// The control array starts at all zeros and `control()[k] <= k` holds
/// whenever it is observed. The cursor stays in `0..n` until every
/// permutation has been produced, then rests at `n`.
#[derive(Debug, Clone)]
pub struct MetaPerm<C: Container> {
    container: C,
    cursor: usize,
}

impl<const N: usize> MetaPerm<Const<N>> {
    /// Creates a new `MetaPerm` of constant length `N`.
    #[inline]
    pub const fn new_const() -> Self {
        MetaPerm {
            container: Const { c: [0; N] },
            cursor: 0,
        }
    }

    /// Creates a new `MetaPerm` of the same length as an array.
    #[inline]
    pub const fn from_array<T>(_arr: &[T; N]) -> Self {
        Self::new_const()
    }
}

impl MetaPerm<Dyn> {
    /// Creates a new `MetaPerm` of dynamic length `n`.
    pub fn new(n: usize) -> Self {
        MetaPerm {
            container: Dyn {
                c: vec![0; n].into_boxed_slice(),
            },
            cursor: 0,
        }
    }
}

impl<C: Container> MetaPerm<C> {
    /// Returns the number of positions being permuted.
    #[inline]
    pub fn len(&self) -> usize {
        self.container.control().len()
    }

    /// Returns `true` if there are no positions to permute.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cursor.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the control array.
    #[inline]
    pub fn control(&self) -> &[usize] {
        self.container.control()
    }

    /// Returns to the initial state.
    pub fn reset(&mut self) {
        self.container.control_mut().fill(0);
        self.cursor = 0;
    }

    /// Returns the index pair producing the next permutation,
    /// or `None` if all permutations are exhausted.
    ///
    /// Every returned pair leaves the cursor at 0, so the search for the
    /// following swap restarts from the lowest depth.
    #[inline]
    pub fn gen(&mut self) -> Option<IndexPair> {
        let c = self.container.control_mut();
        let n = c.len();
        let mut i = self.cursor;

        while i < n {
            if c[i] < i {
                // Odd depths rotate through the positions below them,
                // even depths always swap with the head.
                let j = if i & 1 != 0 { c[i] } else { 0 };
                c[i] += 1;
                self.cursor = 0;

                // SAFETY: `j` is either 0 or `c[i]` before the increment,
                // and both are less than `i` here.
                return Some(unsafe { IndexPair::new(j, i) });
            }

            c[i] = 0;
            i += 1;
        }

        self.cursor = n;
        None
    }

    /// Permutes the target with this `MetaPerm` in place, calling `f` on
    /// the initial state and after every swap.
    ///
    /// This `MetaPerm` is reset before permuting. Stops at the first error
    /// returned by `f`.
    ///
    /// # Panics
    ///
    /// Panics if the target length differs from this `MetaPerm`.
    pub fn try_permute<T, E>(
        &mut self,
        target: &mut [T],
        mut f: impl FnMut(&[T]) -> Result<(), E>,
    ) -> Result<(), E> {
        assert!(self.len() == target.len(), "length mismatch");
        self.reset();
        loop {
            f(target)?;

            let Some(p) = self.gen() else {
                return Ok(());
            };
            trace!(swap = %p, "next permutation");
            // SAFETY: We have checked that the lengths are equal.
            unsafe { p.swap_unchecked(target) }
        }
    }

    /// Infallible version of [`MetaPerm::try_permute`].
    ///
    /// # Panics
    ///
    /// Panics if the target length differs from this `MetaPerm`.
    pub fn permute<T>(&mut self, target: &mut [T], mut f: impl FnMut(&[T])) {
        let _ = self.try_permute(target, |perm| {
            f(perm);
            Ok::<(), core::convert::Infallible>(())
        });
    }
}

impl<C: Container> Iterator for MetaPerm<C> {
    type Item = IndexPair;

    #[inline]
    fn next(&mut self) -> Option<IndexPair> {
        self.gen()
    }
}

/// Constant-sized container used by `MetaPerm`.
#[derive(Debug, Clone)]
pub struct Const<const N: usize> {
    c: [usize; N],
}

impl<const N: usize> Container for Const<N> {
    #[inline]
    fn control(&self) -> &[usize] {
        &self.c
    }

    #[inline]
    fn control_mut(&mut self) -> &mut [usize] {
        &mut self.c
    }
}

/// Dynamic-sized container used by `MetaPerm`.
#[derive(Debug, Clone)]
pub struct Dyn {
    c: Box<[usize]>,
}

impl Container for Dyn {
    #[inline]
    fn control(&self) -> &[usize] {
        &self.c
    }

    #[inline]
    fn control_mut(&mut self) -> &mut [usize] {
        &mut self.c
    }
}

mod internal {
    /// Storage for the control array of a `MetaPerm`.
    ///
    /// Its length is the number of positions being permuted and never changes.
    pub trait Container {
        /// Returns the control array.
        fn control(&self) -> &[usize];

        /// Returns the control array mutably.
        fn control_mut(&mut self) -> &mut [usize];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs<C: Container>(mp: MetaPerm<C>) -> Vec<(usize, usize)> {
        mp.map(IndexPair::get).collect()
    }

    #[test]
    fn no_swaps_below_two() {
        assert!(pairs(MetaPerm::new(0)).is_empty());
        assert!(pairs(MetaPerm::new(1)).is_empty());
        assert!(pairs(MetaPerm::<Const<1>>::new_const()).is_empty());
    }

    #[test]
    fn three_alternates_head_swaps() {
        assert_eq!(
            pairs(MetaPerm::new(3)),
            [(0, 1), (0, 2), (0, 1), (0, 2), (0, 1)]
        );
    }

    #[test]
    fn odd_depth_rotates_through_lower_positions() {
        let all = pairs(MetaPerm::<Const<4>>::new_const());
        assert_eq!(all.len(), 23);

        let deepest: Vec<_> = all.iter().copied().filter(|&(_, i)| i == 3).collect();
        assert_eq!(deepest, [(0, 3), (1, 3), (2, 3)]);
    }

    #[test]
    fn const_and_dyn_agree() {
        assert_eq!(
            pairs(MetaPerm::<Const<6>>::new_const()),
            pairs(MetaPerm::new(6))
        );
    }

    #[test]
    fn stays_exhausted() {
        let mut mp = MetaPerm::new(2);
        assert_eq!(mp.gen().map(IndexPair::get), Some((0, 1)));
        assert_eq!(mp.gen(), None);
        assert_eq!(mp.cursor(), 2);
        assert_eq!(mp.gen(), None);
        assert_eq!(mp.control(), [0, 0]);
    }

    #[test]
    fn cursor_resets_after_swap() {
        let mut mp = MetaPerm::new(5);
        while mp.gen().is_some() {
            assert_eq!(mp.cursor(), 0);
            for (k, &ck) in mp.control().iter().enumerate() {
                assert!(ck <= k, "control[{k}] = {ck}");
            }
        }
    }

    #[test]
    fn reset_restarts_the_walk() {
        let mut mp = MetaPerm::new(4);
        let first = mp.by_ref().take(7).collect::<Vec<_>>();
        mp.reset();
        assert_eq!(mp.by_ref().take(7).collect::<Vec<_>>(), first);
    }

    #[test]
    fn permute_emits_every_state() {
        let mut arr = ['a', 'b', 'c'];
        let mut seen = Vec::new();
        MetaPerm::from_array(&arr).permute(&mut arr, |p| seen.push(p.iter().collect::<String>()));
        assert_eq!(seen, ["abc", "bac", "cab", "acb", "bca", "cba"]);
    }

    #[test]
    fn try_permute_stops_on_error() {
        let mut v = vec![1, 2, 3, 4];
        let mut calls = 0;
        let res = MetaPerm::new(4).try_permute(&mut v, |_| {
            calls += 1;
            if calls == 5 {
                Err("stop")
            } else {
                Ok(())
            }
        });
        assert_eq!(res, Err("stop"));
        assert_eq!(calls, 5);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn permute_checks_length() {
        MetaPerm::new(3).permute(&mut [1, 2], |_| {});
    }

    #[test]
    fn display_pair() {
        let p = MetaPerm::new(2).gen().map(|p| p.to_string());
        assert_eq!(p.as_deref(), Some("0<->1"));
    }

    #[test]
    fn checked_swap_matches_unchecked() {
        let mut checked = [10, 20, 30, 40];
        let mut unchecked = checked;
        for p in MetaPerm::<Const<4>>::new_const() {
            p.swap(&mut checked);
            // SAFETY: Pairs of a length-4 `MetaPerm` stay below 4.
            unsafe { p.swap_unchecked(&mut unchecked) }
            assert_eq!(checked, unchecked);
        }
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn checked_swap_out_of_bounds() {
        // The second pair of a length-3 walk is (0, 2).
        let mut short = [1, 2];
        for p in MetaPerm::new(3) {
            p.swap(&mut short);
        }
    }
}
