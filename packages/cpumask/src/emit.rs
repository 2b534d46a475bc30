use std::fmt;

use itertools::Itertools;

use crate::CoreSet;
use crate::core_set::BITS_PER_WORD;

/// What [`emit_list()`] returns for a set without any cores.
pub const NO_CORES_SELECTED: &str = "(no cores selected)";

/// Formats the set as a `0x`-prefixed lowercase hexadecimal cpumask, e.g. `0xf5`.
///
/// An empty set is `0x0`. Equivalent to formatting with `{:#x}`.
#[must_use]
pub fn emit_hex(cores: &CoreSet) -> String {
    format!("{cores:#x}")
}

/// Formats the set as a compact core list, e.g. `0,2,4-7`.
///
/// Runs of three or more consecutive cores become a range. Runs of exactly two cores are
/// written out as two items (`4,5`), not as a range. An empty set is [`NO_CORES_SELECTED`].
/// Equivalent to formatting with `{}`.
#[must_use]
pub fn emit_list(cores: &CoreSet) -> String {
    cores.to_string()
}

/// A maximal run of consecutive cores.
struct Run {
    first: usize,
    last: usize,
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { first, last } = *self;

        if first == last {
            write!(f, "{first}")
        } else if last == first.saturating_add(1) {
            write!(f, "{first},{last}")
        } else {
            write!(f, "{first}-{last}")
        }
    }
}

impl fmt::Display for CoreSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(NO_CORES_SELECTED);
        }

        // Within a run, core minus position is constant.
        let runs = self
            .iter()
            .enumerate()
            .chunk_by(|&(position, core)| core.wrapping_sub(position));

        let mut separator = "";

        for (_, mut run) in &runs {
            let (_, first) = run.next().expect("chunks are never empty");
            let last = run.last().map_or(first, |(_, core)| core);

            write!(f, "{separator}{}", Run { first, last })?;
            separator = ",";
        }

        Ok(())
    }
}

impl fmt::LowerHex for CoreSet {
    /// Writes the mask in hexadecimal without leading zeros. The alternate flag (`{:#x}`)
    /// adds the `0x` prefix.
    #[expect(
        clippy::integer_division,
        reason = "we want the index of the word holding the highest core"
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }

        let Some(highest) = self.highest() else {
            return f.write_str("0");
        };

        let significant_words = self
            .words()
            .get(..=highest / BITS_PER_WORD)
            .expect("highest core is always within capacity");

        let mut words = significant_words.iter().rev();

        match words.next() {
            Some(&top) if top != 0 => write!(f, "{top:x}")?,
            // The word holding the highest core cannot be zero, but if it were we have
            // nothing meaningful to print.
            _ => return f.write_str("0"),
        }

        // Every lower word is padded so the digits line up with their bit positions.
        for word in words {
            write!(f, "{word:016x}")?;
        }

        Ok(())
    }
}
