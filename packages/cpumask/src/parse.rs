use crate::{CoreSet, Error};

/// Parses a core list such as `0,2,4-7` into a new [`CoreSet`].
///
/// See [`CoreSet::extend_from_list()`] for the accepted syntax.
///
/// # Errors
///
/// Returns [`Error::InvalidRange`] if any range has its start greater than its end.
pub fn parse_list(list: &str) -> crate::Result<CoreSet> {
    let mut cores = CoreSet::new();
    cores.extend_from_list(list)?;
    Ok(cores)
}

/// Parses a hexadecimal cpumask such as `0xf5` into a new [`CoreSet`].
///
/// See [`CoreSet::extend_from_hex()`] for the accepted syntax.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] if there are no digits and [`Error::InvalidCharacter`] if
/// a character is not a hex digit.
pub fn parse_hex(hex: &str) -> crate::Result<CoreSet> {
    let mut cores = CoreSet::new();
    cores.extend_from_hex(hex)?;
    Ok(cores)
}

impl CoreSet {
    /// Adds the cores of a comma-separated core list to the set.
    ///
    /// Each item is either a single core (`5`) or an inclusive range (`4-7`). Whitespace
    /// before an item is ignored and empty items are skipped.
    ///
    /// Numbers are read leniently: leading digits are used and anything that is not a
    /// number reads as `0`, so `12abc` means core 12 and `abc` means core 0.
    ///
    /// Cores that do not fit in the set are logged and skipped; the rest of the list is
    /// still applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if a range has its start greater than its end.
    /// Processing stops at that item; items before it remain applied.
    pub fn extend_from_list(&mut self, list: &str) -> crate::Result<()> {
        for item in list.split(',').filter(|item| !item.is_empty()) {
            let item = item.trim_start();

            if let Some((start, end)) = item.split_once('-') {
                match self.add_range_item(start, end) {
                    Ok(()) => {}
                    // Whatever part of the range fits has already been added.
                    Err(error @ Error::OutOfRange { .. }) => {
                        log::warn!("dropping the part of '{item}' beyond capacity: {error}");
                    }
                    Err(error) => return Err(error),
                }
            } else if let Err(error) = self.add(to_core(parse_lenient(item))) {
                log::warn!("skipping '{item}': {error}");
            }
        }

        log::debug!("core list '{list}' parsed, {} cores set", self.count());

        Ok(())
    }

    fn add_range_item(&mut self, start: &str, end: &str) -> crate::Result<()> {
        let start = parse_lenient(start);
        let end = parse_lenient(end);

        if start > end {
            return Err(Error::InvalidRange { start, end });
        }

        self.add_range(to_core(start), to_core(end))
    }

    /// Adds the cores of a hexadecimal cpumask to the set.
    ///
    /// The mask may carry a `0x` or `0X` prefix and uses digits of either case. The rightmost
    /// digit holds cores 0-3, the next one cores 4-7 and so on. Digits that would describe
    /// cores beyond the capacity of the set are ignored without being inspected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if no digits follow the prefix.
    ///
    /// Returns [`Error::InvalidCharacter`] on the first character that is not a hex digit,
    /// scanning from the right. Cores from the digits already scanned remain in the set.
    pub fn extend_from_hex(&mut self, hex: &str) -> crate::Result<()> {
        let digits = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);

        if digits.is_empty() {
            return Err(Error::EmptyInput);
        }

        let nibble_positions = (0..self.capacity()).step_by(BITS_PER_NIBBLE);

        for (character, first_core) in digits.chars().rev().zip(nibble_positions) {
            let nibble = character
                .to_digit(16)
                .ok_or(Error::InvalidCharacter { character })?;

            for bit in 0..BITS_PER_NIBBLE {
                if nibble & (1 << bit) != 0 {
                    self.add(first_core.saturating_add(bit))?;
                }
            }
        }

        log::debug!("hex mask '{hex}' parsed, {} cores set", self.count());

        Ok(())
    }
}

const BITS_PER_NIBBLE: usize = 4;

/// Reads an integer the way C `atoi()` does: leading whitespace, an optional sign and then
/// as many decimal digits as there are. Text without digits reads as zero. Saturates
/// instead of overflowing.
fn parse_lenient(text: &str) -> i64 {
    let text = text.trim_start();

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let magnitude = unsigned
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0_i64, |value, digit| {
            value.saturating_mul(10).saturating_add(i64::from(digit))
        });

    if negative {
        magnitude.saturating_neg()
    } else {
        magnitude
    }
}

/// Converts a parsed value to a core index. Negative values only occur on the end of a range,
/// which is rejected before getting here, so they clamp to zero.
fn to_core(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn cores_of(cores: &CoreSet) -> Vec<usize> {
        cores.iter().collect()
    }

    #[test]
    fn parse_list_smoke_test() {
        assert_eq!(cores_of(&parse_list("").unwrap()), Vec::<usize>::new());

        assert_eq!(cores_of(&parse_list("555").unwrap()), vec![555]);

        assert_eq!(cores_of(&parse_list("0,1,2,3").unwrap()), vec![0, 1, 2, 3]);

        assert_eq!(cores_of(&parse_list("2,3,1").unwrap()), vec![1, 2, 3]);

        assert_eq!(
            cores_of(&parse_list("0-5,1-6").unwrap()),
            vec![0, 1, 2, 3, 4, 5, 6]
        );

        assert_eq!(
            cores_of(&parse_list("0,2,4-7").unwrap()),
            vec![0, 2, 4, 5, 6, 7]
        );
    }

    #[test]
    fn list_tolerates_leading_whitespace() {
        assert_eq!(
            cores_of(&parse_list("1, 3,\t5-6").unwrap()),
            vec![1, 3, 5, 6]
        );
    }

    #[test]
    fn list_skips_empty_items() {
        assert_eq!(cores_of(&parse_list(",1,,2,").unwrap()), vec![1, 2]);
    }

    #[test]
    fn list_reads_numbers_leniently() {
        assert_eq!(cores_of(&parse_list("abc").unwrap()), vec![0]);
        assert_eq!(cores_of(&parse_list("12abc").unwrap()), vec![12]);
        assert_eq!(cores_of(&parse_list("+7").unwrap()), vec![7]);
        assert_eq!(cores_of(&parse_list("-3").unwrap()), vec![0, 1, 2, 3]);
        assert_eq!(
            parse_list("2-").unwrap_err(),
            Error::InvalidRange { start: 2, end: 0 }
        );
    }

    #[test]
    fn last_core_is_accepted() {
        assert_eq!(cores_of(&parse_list("1023").unwrap()), vec![1023]);
    }

    #[test]
    fn out_of_range_core_is_skipped() {
        let cores = parse_list("1024").unwrap();

        assert!(cores.is_empty());
        assert_eq!(cores.count(), 0);
    }

    #[test]
    fn out_of_range_core_does_not_stop_parse() {
        assert_eq!(cores_of(&parse_list("1,99999,3").unwrap()), vec![1, 3]);
        assert_eq!(
            cores_of(&parse_list("1022-1030,5").unwrap()),
            vec![5, 1022, 1023]
        );
    }

    #[test]
    fn huge_numbers_saturate() {
        assert!(parse_list("99999999999999999999999999").unwrap().is_empty());
    }

    #[test]
    fn reversed_range_is_error() {
        assert_eq!(
            parse_list("5-3").unwrap_err(),
            Error::InvalidRange { start: 5, end: 3 }
        );
        assert_eq!(
            parse_list("5--3").unwrap_err(),
            Error::InvalidRange { start: 5, end: -3 }
        );
    }

    #[test]
    fn reversed_range_stops_processing() {
        let mut cores = CoreSet::new();

        cores.extend_from_list("1,5-3,7").unwrap_err();

        assert_eq!(cores_of(&cores), vec![1]);
    }

    #[test]
    fn parse_hex_smoke_test() {
        assert_eq!(cores_of(&parse_hex("0x1").unwrap()), vec![0]);
        assert_eq!(
            cores_of(&parse_hex("0xff").unwrap()),
            vec![0, 1, 2, 3, 4, 5, 6, 7]
        );
        assert_eq!(cores_of(&parse_hex("f5").unwrap()), vec![0, 2, 4, 5, 6, 7]);
        assert_eq!(cores_of(&parse_hex("0XA").unwrap()), vec![1, 3]);
        assert_eq!(cores_of(&parse_hex("0x0").unwrap()), Vec::<usize>::new());
        assert_eq!(cores_of(&parse_hex("0x000100").unwrap()), vec![8]);
    }

    #[test]
    fn hex_spans_words() {
        assert_eq!(
            cores_of(&parse_hex("0x10000000000000001").unwrap()),
            vec![0, 64]
        );
    }

    #[test]
    fn hex_mixed_case() {
        assert_eq!(parse_hex("0xAbC").unwrap(), parse_hex("abc").unwrap());
    }

    #[test]
    fn hex_empty_is_error() {
        assert_eq!(parse_hex("").unwrap_err(), Error::EmptyInput);
        assert_eq!(parse_hex("0x").unwrap_err(), Error::EmptyInput);
        assert_eq!(parse_hex("0X").unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn hex_invalid_character_is_error() {
        assert_eq!(
            parse_hex("0xg").unwrap_err(),
            Error::InvalidCharacter { character: 'g' }
        );
        assert_eq!(
            parse_hex("0x 1").unwrap_err(),
            Error::InvalidCharacter { character: ' ' }
        );
    }

    #[test]
    fn hex_invalid_character_keeps_earlier_digits() {
        let mut cores = CoreSet::new();

        cores.extend_from_hex("0xz3").unwrap_err();

        assert_eq!(cores_of(&cores), vec![0, 1]);
    }

    #[test]
    fn hex_beyond_capacity_is_ignored() {
        // 256 digits fill the set; the extra leading digit is never looked at.
        let full = format!("z{}", "f".repeat(256));

        let cores = parse_hex(&full).unwrap();

        assert_eq!(cores.count(), 1024);
        assert_eq!(cores.highest(), Some(1023));
    }

    #[test]
    fn lenient_integers() {
        assert_eq!(parse_lenient(""), 0);
        assert_eq!(parse_lenient("  42"), 42);
        assert_eq!(parse_lenient("42 "), 42);
        assert_eq!(parse_lenient("-42"), -42);
        assert_eq!(parse_lenient("+42"), 42);
        assert_eq!(parse_lenient("x42"), 0);
        assert_eq!(parse_lenient("99999999999999999999"), i64::MAX);
        assert_eq!(parse_lenient("-99999999999999999999"), -i64::MAX);
    }
}
