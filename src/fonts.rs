//! Font measurement using `ttf-parser`.
//!
//! Labels are centered by measured text width. The PDF itself uses the
//! builtin Helvetica faces, so by default widths come from Helvetica-like
//! heuristic metrics; loading a real TTF/OTF switches measurement to actual
//! glyph advances.

/// A loaded font face with the metrics measurement needs.
#[derive(Clone)]
struct FontData {
    /// Raw font bytes (kept alive for ttf-parser's zero-copy API).
    bytes: Vec<u8>,
    units_per_em: f32,
}

/// Measures text for the two faces the sheet uses: regular and bold.
#[derive(Default)]
pub struct FontManager {
    regular: Option<FontData>,
    bold: Option<FontData>,
}

impl FontManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a TTF/OTF face from bytes for the given weight.
    pub fn load_font(&mut self, bold: bool, bytes: Vec<u8>) -> Result<(), String> {
        let face = ttf_parser::Face::parse(&bytes, 0)
            .map_err(|e| format!("Failed to parse font: {e}"))?;

        let data = FontData {
            units_per_em: face.units_per_em() as f32,
            bytes,
        };
        if bold {
            self.bold = Some(data);
        } else {
            self.regular = Some(data);
        }
        Ok(())
    }

    /// Measure the width of a string at a given font size, in points.
    ///
    /// With real font bytes loaded we sum glyph advances; otherwise an
    /// average character width heuristic (0.5 × font_size per char, bold
    /// ~10 % wider) stands in for the builtin Helvetica metrics.
    pub fn measure_text_width(&self, text: &str, font_size: f32, bold: bool) -> f32 {
        let avg = if bold { 0.55 } else { 0.5 };
        let data = if bold { &self.bold } else { &self.regular };
        let Some(data) = data else {
            return text.chars().count() as f32 * font_size * avg;
        };

        if let Ok(face) = ttf_parser::Face::parse(&data.bytes, 0) {
            let scale = font_size / data.units_per_em;
            let mut width = 0.0f32;
            for ch in text.chars() {
                match face.glyph_index(ch) {
                    Some(gid) => {
                        width += face.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale;
                    }
                    // Missing glyph falls back to the heuristic advance.
                    None => width += font_size * avg,
                }
            }
            width
        } else {
            text.chars().count() as f32 * font_size * avg
        }
    }

    /// Whether real font bytes are loaded for either face.
    pub fn has_real_fonts(&self) -> bool {
        self.regular.is_some() || self.bold.is_some()
    }
}
