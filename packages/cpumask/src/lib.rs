#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Conversion between the two textual forms of a processor affinity set: a human-readable
//! core list and a hexadecimal bitmask, as accepted by process pinning tools (`taskset -c`)
//! and frameworks that take a `--cpumask` parameter.
//!
//! Example core list: `0,2,4-7`
//!
//! The same set as a cpumask: `0xf5`
//!
//! # Format
//!
//! A core list is a comma-separated list of items, where each item is either:
//!
//! * a single core index (e.g. `1`)
//! * an inclusive range of core indexes (e.g. `4-7`)
//!
//! A cpumask is a hexadecimal number, optionally prefixed with `0x`, in which bit `i` is set
//! if core `i` is selected.
//!
//! Core indexes range from 0 to [`MAX_CORES`]` - 1`.
//!
//! # Example
//!
//! ```
//! let cores = cpumask::parse_list("0,2,4-7").unwrap();
//!
//! assert_eq!(cpumask::emit_hex(&cores), "0xf5");
//! assert_eq!(cores.count(), 6);
//!
//! let cores = cpumask::parse_hex("0x36").unwrap();
//!
//! assert_eq!(cpumask::emit_list(&cores), "1,2,4,5");
//! ```
//!
//! Runs of two cores are listed as two items rather than as a range, to keep short lists easy
//! to read. Runs of three or more become a range.

mod core_set;
mod emit;
mod error;
mod parse;
mod types;

use std::io::Write;

pub use core_set::*;
pub use emit::*;
pub use error::*;
pub use parse::*;
pub use types::*;

/// Core logic of the command-line tool, extracted for testability.
///
/// Parses the input into a [`CoreSet`] and writes the hex mask, core list and core count
/// to `out`. Nothing is written if parsing fails.
#[doc(hidden)]
pub fn run(
    input: &RunInput,
    out: &mut impl Write,
) -> std::result::Result<CoreSet, RunError> {
    let mut cores = CoreSet::new();

    let (description, value) = match &input.source {
        InputSource::Cores(list) => {
            cores.extend_from_list(list)?;
            ("core list", list)
        }
        InputSource::Mask(hex) => {
            cores.extend_from_hex(hex)?;
            ("hex mask", hex)
        }
    };

    let hex = emit_hex(&cores);
    let list = emit_list(&cores);

    if input.verbose {
        writeln!(out, "Parsed {description}: {value}")?;
        writeln!(out)?;
        writeln!(out, "Results:")?;
        writeln!(out, "--------")?;
    }

    writeln!(out, "Hex mask:   {hex}")?;
    writeln!(out, "Core list:  {list}")?;
    writeln!(out, "Core count: {}", cores.count())?;

    if input.verbose {
        writeln!(out)?;
        writeln!(out, "Usage with SPDK:")?;
        writeln!(out, "  --cpumask {hex}")?;
        writeln!(out)?;
        writeln!(out, "Usage with taskset:")?;
        writeln!(out, "  taskset -c {list}")?;
    }

    Ok(cores)
}
