//! Tag expansion – turns range endpoints or raw tag lists into ordered
//! label records.
//!
//! A tag is `letters+ digits+` (e.g. `"A0042"`): a maximal run of ASCII
//! letters followed by a maximal run of ASCII digits, anchored at the start
//! of the string. Anything after the digit run is ignored, matching the
//! first-match semantics of the original range syntax.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One label to place on the sheet: the printed text plus the value encoded
/// into the barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRecord {
    /// Human-readable identifier, drawn under the barcode.
    pub text: String,
    /// Value handed to the barcode encoder.
    pub barcode: String,
}

impl LabelRecord {
    pub fn new(text: impl Into<String>, barcode: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            barcode: barcode.into(),
        }
    }

    /// Record whose barcode carries the tag itself.
    pub fn from_tag(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            barcode: tag.clone(),
            text: tag,
        }
    }
}

/// Failures while interpreting range endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// The tag does not start with letters followed by digits.
    #[error("malformed tag {0:?}: expected letters followed by digits")]
    Malformed(String),
    /// The start number comes after the end number.
    #[error("reversed range: {start:?} is numbered after {end:?}")]
    Reversed { start: String, end: String },
    /// The digit run does not fit in a 64-bit number.
    #[error("tag number in {0:?} is too large")]
    NumberOutOfRange(String),
}

/// A tag split into its alphabetic prefix and digit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParsedTag<'a> {
    prefix: &'a str,
    digits: &'a str,
}

/// Split a tag into prefix and digits with two independent scans.
///
/// Explicit outcomes instead of an opaque pattern match:
/// - no leading letters → [`TagError::Malformed`]
/// - no digits after the letters → [`TagError::Malformed`]
/// - trailing characters after the digit run → accepted and ignored
fn split_tag(tag: &str) -> Result<ParsedTag<'_>, TagError> {
    let letters_end = tag
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(tag.len());
    if letters_end == 0 {
        return Err(TagError::Malformed(tag.to_string()));
    }

    let rest = &tag[letters_end..];
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return Err(TagError::Malformed(tag.to_string()));
    }

    Ok(ParsedTag {
        prefix: &tag[..letters_end],
        digits: &rest[..digits_end],
    })
}

/// Expand an inclusive tag range into the ordered list of tags it covers.
///
/// `expand_range("A007", "A012")` yields `A007` through `A012`. The numeral
/// width is fixed at the longer of the two endpoint digit runs, so every tag
/// in the range has uniform length; numerals that outgrow the width are
/// printed at their natural length rather than truncated.
///
/// Endpoints with differing prefixes (case-sensitive) expand to an empty
/// list – callers treat that as "no items", not as a hard failure.
pub fn expand_range(start_tag: &str, end_tag: &str) -> Result<Vec<String>, TagError> {
    let start = split_tag(start_tag)?;
    let end = split_tag(end_tag)?;

    if start.prefix != end.prefix {
        log::warn!(
            "range endpoints {start_tag:?} and {end_tag:?} have different prefixes; \
             expanding to nothing"
        );
        return Ok(Vec::new());
    }

    let start_num: u64 = start
        .digits
        .parse()
        .map_err(|_| TagError::NumberOutOfRange(start_tag.to_string()))?;
    let end_num: u64 = end
        .digits
        .parse()
        .map_err(|_| TagError::NumberOutOfRange(end_tag.to_string()))?;

    if start_num > end_num {
        return Err(TagError::Reversed {
            start: start_tag.to_string(),
            end: end_tag.to_string(),
        });
    }

    let width = start.digits.len().max(end.digits.len());
    let mut tags = Vec::new();
    for n in start_num..=end_num {
        tags.push(format!("{}{:0width$}", start.prefix, n));
    }
    Ok(tags)
}

/// Pair expanded tags with user-supplied serial numbers by position.
///
/// When the serial list runs out the tag itself becomes the barcode value;
/// with no serials at all every record carries its tag in both fields.
pub fn pair_with_serials(tags: &[String], serials: &[String]) -> Vec<LabelRecord> {
    tags.iter()
        .enumerate()
        .map(|(i, tag)| match serials.get(i) {
            Some(serial) => LabelRecord::new(tag.clone(), serial.clone()),
            None => LabelRecord::from_tag(tag.clone()),
        })
        .collect()
}

/// Parse an explicit tag list, one record per non-blank line.
///
/// A line is split on its first tab or comma: two-part lines become
/// `{text, barcode}` with both sides trimmed, separator-less lines use the
/// whole line for both fields. Blank lines are dropped, never turned into
/// placeholder records.
pub fn parse_explicit_list<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<LabelRecord> {
    let mut records = Vec::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once(['\t', ',']) {
            Some((text, barcode)) => records.push(LabelRecord::new(text.trim(), barcode.trim())),
            None => records.push(LabelRecord::from_tag(line)),
        }
    }
    records
}

/// Split a raw textarea blob into trimmed, non-blank lines.
///
/// Splits on any run of CR/LF so pasted Windows or Unix line endings both
/// work.
pub fn split_serial_lines(raw: &str) -> Vec<String> {
    raw.split(['\r', '\n'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
