use crate::Error;

/// The number of cores a [`CoreSet`] can hold. Valid core indexes are `0..MAX_CORES`.
pub const MAX_CORES: usize = 1024;

/// Width of one storage word, in bits.
pub(crate) const BITS_PER_WORD: usize = u64::BITS as usize;

const WORD_COUNT: usize = MAX_CORES.div_ceil(BITS_PER_WORD);

/// A fixed-capacity set of processor core indexes, stored as a bit vector.
///
/// Core `i` lives in bit `i % 64` of word `i / 64`. The set cannot grow beyond [`MAX_CORES`];
/// attempts to add a core outside of that range are rejected without modifying the set.
///
/// The set also tracks the highest core it contains, which the printers use to know where
/// the meaningful part of the bit vector ends.
///
/// # Example
///
/// ```
/// use cpumask::CoreSet;
///
/// let mut cores = CoreSet::new();
/// cores.add(3).unwrap();
/// cores.add_range(8, 10).unwrap();
///
/// assert!(cores.contains(9));
/// assert_eq!(cores.count(), 4);
/// assert_eq!(cores.highest(), Some(10));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CoreSet {
    words: [u64; WORD_COUNT],

    // Always equal to the greatest set bit. Only ever moved by `add()`.
    highest: Option<usize>,
}

impl CoreSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            words: [0; WORD_COUNT],
            highest: None,
        }
    }

    /// The number of distinct cores the set can hold.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Constant forwarder.
    #[expect(
        clippy::unused_self,
        reason = "capacity is part of the set API even though every set has the same one"
    )]
    pub const fn capacity(&self) -> usize {
        MAX_CORES
    }

    /// Adds a single core to the set.
    ///
    /// Adding a core that is already present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `core` is not below [`MAX_CORES`]. The set is not
    /// modified in that case.
    pub fn add(&mut self, core: usize) -> crate::Result<()> {
        let Some((word_index, mask)) = locate(core) else {
            return Err(Error::OutOfRange { core });
        };

        let word = self
            .words
            .get_mut(word_index)
            .expect("locate() only returns word indexes within the storage array");
        *word |= mask;

        self.highest = Some(self.highest.map_or(core, |highest| highest.max(core)));

        Ok(())
    }

    /// Adds every core in the closed range `start..=end` to the set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `start > end`, in which case nothing is added.
    ///
    /// Returns [`Error::OutOfRange`] naming the first rejected core if the range extends past
    /// [`MAX_CORES`]. All cores of the range that do fit are still added.
    pub fn add_range(&mut self, start: usize, end: usize) -> crate::Result<()> {
        if start > end {
            return Err(Error::InvalidRange {
                start: i64::try_from(start).unwrap_or(i64::MAX),
                end: i64::try_from(end).unwrap_or(i64::MAX),
            });
        }

        let last_valid = MAX_CORES.saturating_sub(1);

        for core in start..=end.min(last_valid) {
            self.add(core)?;
        }

        if end > last_valid {
            return Err(Error::OutOfRange {
                core: start.max(MAX_CORES),
            });
        }

        Ok(())
    }

    /// Whether the set contains `core`. Always `false` for cores beyond the capacity.
    #[must_use]
    pub fn contains(&self, core: usize) -> bool {
        locate(core)
            .and_then(|(word_index, mask)| self.words.get(word_index).map(|word| word & mask))
            .is_some_and(|bit| bit != 0)
    }

    /// The highest core in the set, or `None` if the set is empty.
    #[must_use]
    pub const fn highest(&self) -> Option<usize> {
        self.highest
    }

    /// Whether the set contains no cores.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.highest.is_none()
    }

    /// The number of cores in the set.
    #[must_use]
    pub fn count(&self) -> usize {
        self.words
            .iter()
            .map(|word| word.count_ones() as usize)
            .sum()
    }

    /// Iterates over the cores in the set in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.highest
            .into_iter()
            .flat_map(|highest| 0..=highest)
            .filter(|&core| self.contains(core))
    }

    /// The storage words from least significant (cores 0-63) to most significant.
    pub(crate) const fn words(&self) -> &[u64] {
        &self.words
    }
}

impl Default for CoreSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the storage word and bit mask of a core, or `None` if the core does not fit.
#[expect(
    clippy::integer_division,
    clippy::modulo_arithmetic,
    reason = "word and bit index are the quotient and remainder of the core index"
)]
fn locate(core: usize) -> Option<(usize, u64)> {
    if core >= MAX_CORES {
        return None;
    }

    let word_index = core / BITS_PER_WORD;
    let bit_index = core % BITS_PER_WORD;

    Some((word_index, 1_u64 << bit_index))
}
