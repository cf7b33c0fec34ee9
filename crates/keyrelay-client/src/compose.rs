//! Line-to-records expansion.

use keyrelay_core::{encode, CharacterEvent};

/// Expands one typed line into the wire records to send.
///
/// Each Unicode scalar value becomes one record.  A line that is not blank
/// after trimming whitespace is followed by a carriage-return record, which
/// the server types as Enter.  A blank line yields its whitespace characters
/// and no Enter.
///
/// `line` must not include its line terminator.
pub fn records_for_line(line: &str) -> Vec<Vec<u8>> {
    let mut records: Vec<Vec<u8>> = line
        .chars()
        .filter_map(|c| CharacterEvent::new(c.to_string()))
        .map(|event| encode(&event))
        .collect();

    if !line.trim().is_empty() {
        records.push(encode(&CharacterEvent::carriage_return()));
    }
    records
}
