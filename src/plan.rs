//! Sheet plan – the intermediate representation between grid layout and PDF
//! rendering. This is the "frozen" structure that encodes exactly which cell
//! of which page holds which label, with every element position resolved.
//!
//! Coordinates are in PDF points with the origin at the page top-left; the
//! renderer flips to PDF's bottom-left origin. Text positions are baselines.

use serde::{Deserialize, Serialize};

/// A complete sheet ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetPlan {
    /// Document title embedded in the PDF metadata.
    #[serde(default = "SheetPlan::default_title")]
    pub title: String,
    /// Width of each page in PDF points (1 pt = 1/72 inch).
    pub page_width_pt: f32,
    /// Height of each page in PDF points.
    pub page_height_pt: f32,
    /// Ordered list of pages.
    pub pages: Vec<PageCells>,
}

/// One page of filled cells, in placement order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageCells {
    pub page_index: usize,
    pub cells: Vec<LabelCell>,
}

/// One filled grid cell: the cell rectangle plus its positioned elements.
///
/// `barcode` is `None` when the record's value could not be encoded; the
/// title and caption are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelCell {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    pub title: PlacedText,
    pub barcode: Option<PlacedBarcode>,
    pub caption: PlacedText,
}

/// A single centered line of text. `y` is the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub bold: bool,
}

/// A positioned Code 128 graphic. `y` is the top edge of the bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedBarcode {
    pub x: f32,
    pub y: f32,
    /// Width of one module in points; total width = modules × this.
    pub module_width: f32,
    /// Bar height in points.
    pub height: f32,
    /// Module pattern, 1 = bar, 0 = space.
    pub modules: Vec<u8>,
}

impl SheetPlan {
    fn default_title() -> String {
        "asset tags".to_string()
    }

    /// Total number of placed labels across all pages.
    pub fn cell_count(&self) -> usize {
        self.pages.iter().map(|p| p.cells.len()).sum()
    }

    /// Serialise to JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialise from JSON.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

impl PlacedBarcode {
    /// Drawn width of the whole symbol in points.
    pub fn span(&self) -> f32 {
        self.modules.len() as f32 * self.module_width
    }
}
