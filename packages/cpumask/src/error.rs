use thiserror::Error;

use crate::MAX_CORES;

/// Errors that can occur when building a [`CoreSet`][crate::CoreSet] from text.
#[derive(Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A core index was outside the capacity of the set. The set was not modified.
    ///
    /// The parsers treat this as a per-token problem: the core is skipped and parsing
    /// continues with the next token.
    #[error("core {core} is out of range (0-{})", MAX_CORES - 1)]
    OutOfRange {
        /// The rejected core index.
        core: usize,
    },

    /// A range was given with its start greater than its end. This aborts the parse.
    #[error("invalid range {start}-{end}")]
    InvalidRange {
        /// The first value of the range, as parsed.
        start: i64,

        /// The last value of the range, as parsed.
        end: i64,
    },

    /// A hexadecimal mask contained no digits after the optional `0x` prefix.
    #[error("empty hex string")]
    EmptyInput,

    /// A hexadecimal mask contained a character that is not a hex digit.
    ///
    /// Bits parsed from less significant digits before the failure remain set.
    #[error("invalid hex character '{character}'")]
    InvalidCharacter {
        /// The offending character.
        character: char,
    },
}

/// A specialized `Result` type for cpumask operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            Error::OutOfRange { core: 1024 }.to_string(),
            "core 1024 is out of range (0-1023)"
        );
        assert_eq!(
            Error::InvalidRange { start: 5, end: 3 }.to_string(),
            "invalid range 5-3"
        );
        assert_eq!(Error::EmptyInput.to_string(), "empty hex string");
        assert_eq!(
            Error::InvalidCharacter { character: 'g' }.to_string(),
            "invalid hex character 'g'"
        );
    }
}
