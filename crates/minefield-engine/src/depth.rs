//! Depth range symbols.
//!
//! A mine's distance below the vessel is shown as one letter: `a..=z` for
//! ranges 1 to 26 and `A..=Z` for 27 to 52. The same alphabet describes mine
//! depths in field files.

/// Largest range a single symbol can express.
pub const MAX_RANGE: i32 = 52;

/// A column without a mine.
pub const EMPTY_SYMBOL: char = '.';

/// A mine the vessel has already reached or passed.
pub const MISSED_SYMBOL: char = '*';

/// Symbol for a positive depth range.
///
/// # Panics
///
/// Panics if `range` is outside `1..=52`. A range the alphabet cannot express
/// means the caller skipped a missed-mine check or indexed an invalid depth.
pub fn encode_range(range: i32) -> char {
    assert!(
        (1..=MAX_RANGE).contains(&range),
        "depth range {range} cannot be encoded, expected 1..={MAX_RANGE}"
    );
    // In range, so the narrowing is lossless.
    let offset = range as u8;
    if offset <= 26 {
        char::from(b'a' + offset - 1)
    } else {
        char::from(b'A' + offset - 27)
    }
}

/// Range expressed by `symbol`, or `None` if it is not a range letter.
pub fn decode_range(symbol: char) -> Option<i32> {
    match symbol {
        'a'..='z' => Some(symbol as i32 - 'a' as i32 + 1),
        'A'..='Z' => Some(symbol as i32 - 'A' as i32 + 27),
        _ => None,
    }
}
