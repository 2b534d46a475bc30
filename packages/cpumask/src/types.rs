// Public API types for the cpumask command-line tool.
//
// These types are used by main.rs and exposed via the crate's public API.

use std::io;

use thiserror::Error;

/// Which representation the tool was given to convert from.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum InputSource {
    /// A core list such as `0,2,4-7`.
    Cores(String),
    /// A hexadecimal cpumask such as `0xf5`.
    Mask(String),
}

/// Input parameters for the `run` function.
///
/// This is the parsed and validated input that the core logic operates on.
#[doc(hidden)]
#[derive(Clone, Debug)]
#[allow(
    clippy::exhaustive_structs,
    reason = "This is a hidden struct for internal/test use only"
)]
pub struct RunInput {
    /// The value to convert.
    pub source: InputSource,
    /// Print extra framing and ready-to-paste arguments for pinning tools.
    pub verbose: bool,
}

/// Errors that can occur during a run.
#[doc(hidden)]
#[derive(Debug, Error)]
#[allow(
    clippy::exhaustive_enums,
    reason = "This is a hidden enum for internal/test use only"
)]
pub enum RunError {
    /// The input could not be parsed.
    #[error(transparent)]
    Parse(#[from] crate::Error),
    /// The results could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
