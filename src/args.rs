//! Parsing of the integers to permute.

use std::num::ParseIntError;

use crate::{Error, Result};

/// How an integer token is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Radix {
    /// Base 10 only, with an optional sign.
    #[default]
    Decimal,
    /// A `0x` prefix selects base 16 and a leading `0` selects base 8,
    /// as with C's `%i` conversion.
    Auto,
}

impl Radix {
    /// Parses a single token.
    pub fn parse(self, token: &str) -> std::result::Result<i64, ParseIntError> {
        match self {
            Radix::Decimal => token.parse(),
            Radix::Auto => parse_prefixed(token),
        }
    }
}

fn parse_prefixed(token: &str) -> std::result::Result<i64, ParseIntError> {
    let (sign, body) = match token.strip_prefix('-') {
        Some(rest) => ('-', rest),
        None => ('+', token.strip_prefix('+').unwrap_or(token)),
    };

    let (digits, radix) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        (hex, 16)
    } else if body.len() > 1 && body.starts_with('0') {
        (&body[1..], 8)
    } else {
        (body, 10)
    };

    // The explicit sign makes a second sign inside `digits` invalid.
    i64::from_str_radix(&format!("{sign}{digits}"), radix)
}

/// Parses every token, failing on the first one that is not an integer.
pub fn parse_values<S: AsRef<str>>(tokens: &[S], radix: Radix) -> Result<Vec<i64>> {
    tokens
        .iter()
        .enumerate()
        .map(|(idx, token)| {
            let token = token.as_ref();
            radix.parse(token).map_err(|source| Error::InvalidArgument {
                position: idx + 1,
                token: token.to_owned(),
                source,
            })
        })
        .collect()
}
