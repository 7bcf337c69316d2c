//! Grid layout engine – places an ordered run of label records onto a
//! paginated grid of fixed-size cells.
//!
//! Placement is a pure function of input order and configuration: cells fill
//! row-major (left to right, top to bottom) and a new page starts exactly
//! when the grid is full. There is no reordering and no packing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fonts::FontManager;
use crate::label::plan_label;
use crate::plan::{PageCells, SheetPlan};
use crate::tags::LabelRecord;

/// One millimetre in PDF points.
pub const MM: f32 = 2.834_646;

/// Layout failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// Nothing to place – the caller gets a failure, never a blank document.
    #[error("no label records to lay out")]
    EmptyInput,
    /// The PDF backend refused the plan.
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Sheet geometry and label styling.
///
/// The defaults reproduce the production label stock: A4, 10 rows × 3
/// columns, 5 mm side margins, 10 mm top/bottom margins. Cell size is the
/// printable area divided evenly by the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Document title embedded in the PDF metadata.
    pub title: String,
    /// Static line printed at the top of every label.
    pub title_line: String,

    /// Page width in points (default: A4 = 595.28).
    pub page_width_pt: f32,
    /// Page height in points (default: A4 = 841.89).
    pub page_height_pt: f32,
    /// Grid rows per page.
    pub rows: usize,
    /// Grid columns per page.
    pub cols: usize,
    /// Left/right page margin in points.
    pub margin_x_pt: f32,
    /// Top/bottom page margin in points.
    pub margin_y_pt: f32,

    /// Title line font size in points (Helvetica-Bold).
    pub title_size_pt: f32,
    /// Caption font size in points (Helvetica).
    pub caption_size_pt: f32,
    /// Width of one barcode module in points.
    pub module_width_pt: f32,
    /// Barcode bar height in points.
    pub bar_height_pt: f32,

    /// Title baseline height above the cell bottom, in points.
    pub title_rise_pt: f32,
    /// Barcode bottom edge height above the cell bottom, in points.
    pub barcode_rise_pt: f32,
    /// Caption baseline height above the cell bottom, in points.
    pub caption_rise_pt: f32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            title: "asset tags".to_string(),
            title_line: "Property of Aquera".to_string(),
            // A4: 210mm × 297mm = 595.28 × 841.89 points
            page_width_pt: 595.28,
            page_height_pt: 841.89,
            rows: 10,
            cols: 3,
            margin_x_pt: 5.0 * MM,
            margin_y_pt: 10.0 * MM,
            title_size_pt: 8.0,
            caption_size_pt: 8.0,
            module_width_pt: 0.4,
            bar_height_pt: 4.0 * MM,
            title_rise_pt: 13.0 * MM,
            barcode_rise_pt: 7.0 * MM,
            caption_rise_pt: 3.0 * MM,
        }
    }
}

impl SheetConfig {
    /// Cell width: printable width divided evenly by the column count.
    pub fn cell_width(&self) -> f32 {
        (self.page_width_pt - 2.0 * self.margin_x_pt) / self.cols as f32
    }

    /// Cell height: printable height divided evenly by the row count.
    pub fn cell_height(&self) -> f32 {
        (self.page_height_pt - 2.0 * self.margin_y_pt) / self.rows as f32
    }

    /// Labels per page.
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }
}

/// Place records onto the grid in input order and return the finished plan.
///
/// A `(row, col)` cursor starts at the top-left cell; `col` advances first,
/// wrapping to the next row, and a full grid finalizes the page. The last
/// page is kept even when partially filled – the remaining cells stay blank.
pub fn lay_out(
    records: &[LabelRecord],
    config: &SheetConfig,
    fonts: &FontManager,
) -> Result<SheetPlan, SheetError> {
    if records.is_empty() {
        return Err(SheetError::EmptyInput);
    }

    let cell_w = config.cell_width();
    let cell_h = config.cell_height();

    let mut plan = SheetPlan {
        title: config.title.clone(),
        page_width_pt: config.page_width_pt,
        page_height_pt: config.page_height_pt,
        pages: Vec::new(),
    };

    let mut current_page = PageCells {
        page_index: 0,
        cells: Vec::new(),
    };
    let mut row = 0usize;
    let mut col = 0usize;

    for record in records {
        let x = config.margin_x_pt + col as f32 * cell_w;
        let y = config.margin_y_pt + row as f32 * cell_h;
        current_page
            .cells
            .push(plan_label(record, x, y, cell_w, cell_h, config, fonts));

        col += 1;
        if col == config.cols {
            col = 0;
            row += 1;
        }
        if row == config.rows {
            row = 0;
            plan.pages.push(current_page);
            current_page = PageCells {
                page_index: plan.pages.len(),
                cells: Vec::new(),
            };
        }
    }

    if !current_page.cells.is_empty() {
        plan.pages.push(current_page);
    }
    Ok(plan)
}
