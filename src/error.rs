use std::num::ParseIntError;

/// Errors raised at the boundaries of permutation generation.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A command-line token is not an integer.
    #[error("argument {position} is not an integer: {token:?}")]
    InvalidArgument {
        /// 1-based position among the values.
        position: usize,
        /// The offending token.
        token: String,
        /// Why parsing failed.
        #[source]
        source: ParseIntError,
    },

    /// Writing to the output sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;
