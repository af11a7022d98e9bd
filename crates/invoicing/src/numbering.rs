//! Invoice numbering sequence.
//!
//! Numbering is advisory and collision-tolerant: the next number is one past
//! the highest numeric suffix among existing `INV-` numbers. Manually edited
//! or imported numbers that don't parse are simply ignored by the scan, so
//! uniqueness is not guaranteed.

/// Fixed prefix of generated invoice numbers.
pub const NUMBER_PREFIX: &str = "INV-";

/// Next number in the sequence given the numbers already in use.
///
/// Zero-padded to a minimum width of 3; the width grows past `INV-999`.
pub fn next_number<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
    let max = existing
        .into_iter()
        .filter_map(|number| number.strip_prefix(NUMBER_PREFIX))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{NUMBER_PREFIX}{:03}", max + 1)
}
