//! Line-oriented output sink.

use std::{
    fmt,
    io::{self, Write},
};

/// Writes each permutation as one line of space-separated elements.
///
/// A permutation of no elements is written as an empty line.
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: W,
    emitted: u64,
}

impl<W: Write> LineSink<W> {
    /// Creates a sink over `writer`.
    pub fn new(writer: W) -> Self {
        LineSink { writer, emitted: 0 }
    }

    /// Writes one permutation.
    pub fn emit<T: fmt::Display>(&mut self, perm: &[T]) -> io::Result<()> {
        let mut elems = perm.iter();
        if let Some(first) = elems.next() {
            write!(self.writer, "{first}")?;
            for elem in elems {
                write!(self.writer, " {elem}")?;
            }
        }
        self.writer.write_all(b"\n")?;
        self.emitted += 1;
        Ok(())
    }

    /// Returns the number of permutations written so far.
    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Flushes the sink and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
