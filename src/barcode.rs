//! Code 128 encoding – wraps the `barcoders` symbology behind a validating
//! facade that yields raw module patterns (1 = bar, 0 = space).

use barcoders::sym::code128::Code128;
use thiserror::Error;

/// Character-set selector `barcoders` expects at the front of the data.
/// Set B covers the full printable ASCII range, which is what asset tags and
/// serial numbers use.
const CHARSET_B: char = '\u{0181}';

/// A value the barcode capability refuses to encode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarcodeError {
    #[error("barcode value is empty")]
    Empty,
    #[error("barcode value {0:?} contains characters outside printable ASCII")]
    Unencodable(String),
    #[error("barcode encoding failed: {0}")]
    Sym(String),
}

/// Encode a value as a Code 128 module pattern.
///
/// The pattern includes start code, data, checksum, and stop code; quiet
/// zones are the renderer's business. Control characters and anything
/// outside printable ASCII are rejected up front so the error names the
/// offending value instead of surfacing an encoder internal.
pub fn encode(value: &str) -> Result<Vec<u8>, BarcodeError> {
    if value.is_empty() {
        return Err(BarcodeError::Empty);
    }
    if !value.chars().all(|c| (' '..='~').contains(&c)) {
        return Err(BarcodeError::Unencodable(value.to_string()));
    }

    let code = Code128::new(format!("{CHARSET_B}{value}"))
        .map_err(|e| BarcodeError::Sym(e.to_string()))?;
    Ok(code.encode())
}

/// Drawn width of a module pattern, in points.
pub fn module_span(modules: &[u8], module_width: f32) -> f32 {
    modules.len() as f32 * module_width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_plain_tag() {
        let modules = encode("A0042").unwrap();
        assert!(modules.len() > 50, "suspiciously short: {}", modules.len());
        assert!(modules.iter().all(|&m| m == 0 || m == 1));
        // Start and stop patterns both begin and end on a bar.
        assert_eq!(modules.first(), Some(&1));
        assert_eq!(modules.last(), Some(&1));
    }

    #[test]
    fn longer_values_make_wider_symbols() {
        let short = encode("A1").unwrap();
        let long = encode("A1-SERIAL-0042").unwrap();
        assert!(long.len() > short.len());
    }

    #[test]
    fn empty_value_is_rejected() {
        assert_eq!(encode(""), Err(BarcodeError::Empty));
    }

    #[test]
    fn non_ascii_is_rejected() {
        assert!(matches!(encode("café"), Err(BarcodeError::Unencodable(_))));
        assert!(matches!(encode("A\t1"), Err(BarcodeError::Unencodable(_))));
    }

    #[test]
    fn span_scales_with_module_width() {
        let modules = encode("XY9").unwrap();
        let w = module_span(&modules, 0.4);
        assert!((w - modules.len() as f32 * 0.4).abs() < f32::EPSILON);
    }
}
