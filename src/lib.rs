//! # heapperm
//!
//! Enumerates every permutation of a sequence in place, using the iterative
//! form of [Heap's algorithm](https://en.wikipedia.org/wiki/Heap%27s_algorithm).
//!
//! Consecutive permutations differ by exactly one transposition, and `n`
//! elements always produce `n!` permutations. Equal elements are treated as
//! distinct positions, so duplicates are not collapsed.
//!
//! ## Examples
//!
//! The following example permutes the array in place and prints all possible permutations:
//!
//! ```
//! use heapperm::Perm;
//! let mut arr = [1, 2, 3];
//! arr.permute(|perm| println!("{:?}", perm));
//! ```
//!
//! To stop early, return an error from [`Perm::try_permute`].

#![warn(missing_docs, rust_2018_idioms)]

pub mod args;
mod error;
pub mod meta;
pub mod sink;

use std::{fmt, io};

use tracing::{debug, trace};

pub use error::{Error, Result};
use meta::*;
use sink::LineSink;

/// Trait for permuting arrays and slices.
pub trait Perm: internal::Sealed {
    /// Walks through all possible permutations in place,
    /// stopping at the first error returned by `f`.
    fn try_permute<E>(&mut self, f: impl FnMut(&Self) -> std::result::Result<(), E>)
        -> std::result::Result<(), E>;

    /// Walks through all possible permutations in place.
    fn permute(&mut self, mut f: impl FnMut(&Self)) {
        let _ = self.try_permute(|perm| {
            f(perm);
            Ok::<(), std::convert::Infallible>(())
        });
    }
}

impl<T, const N: usize> Perm for [T; N] {
    #[inline]
    fn try_permute<E>(
        &mut self,
        mut f: impl FnMut(&[T; N]) -> std::result::Result<(), E>,
    ) -> std::result::Result<(), E> {
        let mut mp = MetaPerm::from_array(self);
        loop {
            f(self)?;
            if let Some(p) = mp.gen() {
                trace!(swap = %p, "next permutation");
                // SAFETY: `mp` has the same length as the array.
                unsafe { p.swap_unchecked(self) }
            } else {
                return Ok(());
            }
        }
    }
}

impl<T> Perm for [T] {
    #[inline]
    fn try_permute<E>(
        &mut self,
        f: impl FnMut(&[T]) -> std::result::Result<(), E>,
    ) -> std::result::Result<(), E> {
        MetaPerm::new(self.len()).try_permute(self, f)
    }
}

/// Returns `n!`, the number of permutations of `n` elements,
/// or `None` if it does not fit in a `u128`.
pub fn count(n: usize) -> Option<u128> {
    (2..=n as u128).try_fold(1u128, |acc, k| acc.checked_mul(k))
}

/// Writes every permutation of `values` to `sink`, one line each.
///
/// Returns the number of lines written. `values` is left in an
/// unspecified order.
pub fn generate<T, W>(values: &mut [T], sink: &mut LineSink<W>) -> Result<u64>
where
    T: fmt::Display,
    W: io::Write,
{
    let n = values.len();
    debug!(n, expected = ?count(n), "generating permutations");

    let before = sink.emitted();
    values.try_permute(|perm| sink.emit(perm))?;
    let written = sink.emitted() - before;

    debug!(written, "generation complete");
    Ok(written)
}

mod internal {
    pub trait Sealed {}

    impl<T> Sealed for [T] {}
    impl<T, const N: usize> Sealed for [T; N] {}
}
