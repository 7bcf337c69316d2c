//! Label renderer planning – positions one record's elements inside one
//! cell rectangle.
//!
//! Element order inside a cell, top to bottom: title line (Helvetica-Bold),
//! Code 128 graphic, caption (Helvetica). Each is centered horizontally on
//! its own measured width. Vertical positions are fixed rises above the cell
//! bottom, so short stacks sit identically on every label.

use crate::barcode;
use crate::fonts::FontManager;
use crate::plan::{LabelCell, PlacedBarcode, PlacedText};
use crate::sheet::SheetConfig;
use crate::tags::LabelRecord;

/// Plan one cell.
///
/// A record whose barcode value cannot be encoded keeps its title and
/// caption; the graphic alone is dropped (with a warning) so one bad value
/// never sinks the rest of the sheet.
pub fn plan_label(
    record: &LabelRecord,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    config: &SheetConfig,
    fonts: &FontManager,
) -> LabelCell {
    let cell_bottom = y + height;

    let title_width = fonts.measure_text_width(&config.title_line, config.title_size_pt, true);
    let title = PlacedText {
        text: config.title_line.clone(),
        x: x + (width - title_width) / 2.0,
        y: cell_bottom - config.title_rise_pt,
        font_size: config.title_size_pt,
        bold: true,
    };

    let barcode = match barcode::encode(&record.barcode) {
        Ok(modules) => {
            let span = barcode::module_span(&modules, config.module_width_pt);
            Some(PlacedBarcode {
                x: x + (width - span) / 2.0,
                y: cell_bottom - config.barcode_rise_pt - config.bar_height_pt,
                module_width: config.module_width_pt,
                height: config.bar_height_pt,
                modules,
            })
        }
        Err(e) => {
            log::warn!("Skipping barcode for label {:?} — {e}", record.text);
            None
        }
    };

    let caption_width = fonts.measure_text_width(&record.text, config.caption_size_pt, false);
    let caption = PlacedText {
        text: record.text.clone(),
        x: x + (width - caption_width) / 2.0,
        y: cell_bottom - config.caption_rise_pt,
        font_size: config.caption_size_pt,
        bold: false,
    };

    LabelCell {
        x,
        y,
        width,
        height,
        title,
        barcode,
        caption,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_one(record: &LabelRecord) -> LabelCell {
        let config = SheetConfig::default();
        let fonts = FontManager::new();
        let (w, h) = (config.cell_width(), config.cell_height());
        plan_label(record, 0.0, 0.0, w, h, &config, &fonts)
    }

    #[test]
    fn elements_are_centered() {
        let cell = plan_one(&LabelRecord::from_tag("A0042"));
        let mid = cell.x + cell.width / 2.0;

        let title_w = FontManager::new().measure_text_width(&cell.title.text, 8.0, true);
        assert!((cell.title.x + title_w / 2.0 - mid).abs() < 0.01);

        let bc = cell.barcode.expect("barcode present");
        assert!((bc.x + bc.span() / 2.0 - mid).abs() < 0.01);
    }

    #[test]
    fn elements_stack_top_to_bottom() {
        let cell = plan_one(&LabelRecord::from_tag("A0042"));
        let bc = cell.barcode.as_ref().expect("barcode present");
        // Top-left origin: smaller y is higher on the page.
        assert!(cell.title.y < bc.y);
        assert!(bc.y + bc.height < cell.caption.y);
        assert!(cell.caption.y < cell.y + cell.height);
    }

    #[test]
    fn unencodable_value_keeps_title_and_caption() {
        let cell = plan_one(&LabelRecord::new("Büro-Drucker", "Büro-Drucker"));
        assert!(cell.barcode.is_none());
        assert_eq!(cell.title.text, "Property of Aquera");
        assert_eq!(cell.caption.text, "Büro-Drucker");
    }

    #[test]
    fn empty_barcode_value_keeps_title_and_caption() {
        let cell = plan_one(&LabelRecord::new("spare", ""));
        assert!(cell.barcode.is_none());
        assert_eq!(cell.caption.text, "spare");
    }
}
