//! PDF renderer – takes a [`SheetPlan`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API).

use printpdf::*;

use crate::plan::{LabelCell, PlacedBarcode, PlacedText, SheetPlan};
use crate::sheet::SheetError;

/// Render a SheetPlan into PDF bytes.
///
/// The plan must hold at least one page; [`crate::sheet::lay_out`] refuses
/// empty input, but a hand-built or deserialised plan can still arrive here
/// empty and is rejected the same way.
pub fn render_pdf(plan: &SheetPlan) -> Result<Vec<u8>, SheetError> {
    if plan.pages.is_empty() {
        return Err(SheetError::EmptyInput);
    }

    let page_w = Mm(plan.page_width_pt * 0.352778); // pt → mm
    let page_h = Mm(plan.page_height_pt * 0.352778);

    let mut doc = PdfDocument::new(&plan.title);

    let mut pages = Vec::new();
    for page_cells in &plan.pages {
        let mut ops = Vec::new();
        for cell in &page_cells.cells {
            render_cell(&mut ops, cell, plan.page_height_pt);
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }

    doc.with_pages(pages);
    let bytes = doc.save(&PdfSaveOptions::default(), &mut Vec::new());

    Ok(bytes)
}

fn black() -> Color {
    Color::Rgb(Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        icc_profile: None,
    })
}

/// Emit one cell's ops: title, bars (when present), caption.
fn render_cell(ops: &mut Vec<Op>, cell: &LabelCell, page_height: f32) {
    write_text(ops, &cell.title, page_height);
    if let Some(bc) = &cell.barcode {
        draw_barcode(ops, bc, page_height);
    }
    write_text(ops, &cell.caption, page_height);
}

fn write_text(ops: &mut Vec<Op>, placed: &PlacedText, page_height: f32) {
    if placed.text.is_empty() {
        return;
    }
    let font = if placed.bold {
        BuiltinFont::HelveticaBold
    } else {
        BuiltinFont::Helvetica
    };

    // PDF coordinate system: origin at bottom-left. The plan uses origin at
    // top-left with baseline y-positions. Convert:
    let baseline_y = page_height - placed.y;

    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(placed.x),
            y: Pt(baseline_y),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(placed.font_size),
        font,
    });
    ops.push(Op::SetFillColor { col: black() });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(to_winansi(&placed.text))],
        font,
    });
    ops.push(Op::EndTextSection);
}

/// Draw the module pattern as filled rectangles. Consecutive 1-modules are
/// merged into a single rect, so a typical symbol needs a few dozen draw ops
/// instead of one per module.
fn draw_barcode(ops: &mut Vec<Op>, bc: &PlacedBarcode, page_height: f32) {
    ops.push(Op::SetFillColor { col: black() });

    let y_top = page_height - bc.y;
    let y_bottom = y_top - bc.height;

    let mut i = 0usize;
    while i < bc.modules.len() {
        if bc.modules[i] != 1 {
            i += 1;
            continue;
        }
        let run_start = i;
        while i < bc.modules.len() && bc.modules[i] == 1 {
            i += 1;
        }
        let x1 = bc.x + run_start as f32 * bc.module_width;
        let x2 = bc.x + i as f32 * bc.module_width;
        fill_rect(ops, x1, y_bottom, x2, y_top);
    }
}

/// Push a filled axis-aligned rectangle.
fn fill_rect(ops: &mut Vec<Op>, x1: f32, y1: f32, x2: f32, y2: f32) {
    ops.push(Op::DrawPolygon {
        polygon: Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    LinePoint {
                        p: Point {
                            x: Pt(x1),
                            y: Pt(y1),
                        },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point {
                            x: Pt(x2),
                            y: Pt(y1),
                        },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point {
                            x: Pt(x2),
                            y: Pt(y2),
                        },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point {
                            x: Pt(x1),
                            y: Pt(y2),
                        },
                        bezier: false,
                    },
                ],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        },
    });
}

/// Map a string to WinAnsi bytes wrapped in a String so printpdf writes the
/// bytes unchanged into the PDF stream (builtin fonts use WinAnsiEncoding,
/// so each glyph is one byte 0x00–0xFF). Characters outside Latin-1 degrade
/// to `?`.
fn to_winansi(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect();
    // SAFETY: intentionally non-UTF-8 for the 0x80–0xFF range; printpdf
    // passes these bytes straight to the PDF stream, decoded there by
    // WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}
