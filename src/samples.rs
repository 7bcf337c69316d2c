//! Sample inputs for testing and demonstration.
//!
//! Each sample exercises a different input path of the pipeline.

/// Range endpoints covering exactly one full 10×3 sheet.
pub fn full_sheet_range() -> (&'static str, &'static str) {
    ("AQ00200", "AQ00229")
}

/// Range endpoints that spill one label onto a second page.
pub fn overflow_range() -> (&'static str, &'static str) {
    ("AQ00200", "AQ00230")
}

/// Serial blob for the first few tags of [`full_sheet_range`], with the
/// mixed line endings a browser textarea produces.
pub fn serial_blob() -> &'static str {
    "4CE0460D0G\r\n4CE0460D0H\r\n4CE0460D0J\n4CE0460D0K\n"
}

/// Explicit list mixing comma-delimited, tab-delimited, and bare lines,
/// with blank lines interspersed.
pub fn mixed_list() -> &'static str {
    "AQ00231,4CE0460D0L\nAQ00232\t4CE0460D0M\n\nDock Station 3\n   \nAQ00234\n"
}

/// A list entry whose barcode value the encoder rejects.
pub fn unencodable_list() -> &'static str {
    "Büro-Drucker\nAQ00240\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::parse_explicit_list;

    #[test]
    fn samples_parse_to_records() {
        let (start, end) = full_sheet_range();
        let tags = crate::tags::expand_range(start, end).unwrap();
        assert_eq!(tags.len(), 30);

        let records = parse_explicit_list(mixed_list().lines());
        assert_eq!(records.len(), 4);

        assert!(!crate::tags::split_serial_lines(serial_blob()).is_empty());
    }
}
