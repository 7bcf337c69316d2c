//! Pipeline – ties tag expansion, grid layout, and PDF rendering into a
//! single function call.

use thiserror::Error;

use crate::fonts::FontManager;
use crate::plan::SheetPlan;
use crate::render::render_pdf;
use crate::sheet::{lay_out, SheetConfig, SheetError};
use crate::tags::{expand_range, pair_with_serials, parse_explicit_list, LabelRecord, TagError};

/// Anything the pipeline can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Tag(#[from] TagError),
    #[error(transparent)]
    Sheet(#[from] SheetError),
}

/// What the boundary hands us: either a numeric range with optional serial
/// numbers, or a raw tag list blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRequest {
    /// Expand `start..=end` and pair each tag with a serial by position.
    Range {
        start: String,
        end: String,
        serials: Vec<String>,
    },
    /// One record per non-blank line, optionally `text<TAB|,>barcode`.
    List { raw: String },
}

/// Turn a request into the ordered label records it describes.
///
/// An empty result is a legal outcome (prefix-mismatched range, blank list);
/// boundaries are expected to report it to the user instead of calling
/// [`generate_document`] with nothing.
pub fn build_records(request: &SheetRequest) -> Result<Vec<LabelRecord>, TagError> {
    match request {
        SheetRequest::Range {
            start,
            end,
            serials,
        } => {
            let tags = expand_range(start, end)?;
            Ok(pair_with_serials(&tags, serials))
        }
        SheetRequest::List { raw } => Ok(parse_explicit_list(raw.lines())),
    }
}

/// Full pipeline: request → PDF bytes.
///
/// Returns `(pdf_bytes, sheet_plan)` so callers can report page counts or
/// persist the plan.
pub fn generate(request: &SheetRequest, config: &SheetConfig) -> Result<(Vec<u8>, SheetPlan), Error> {
    let records = build_records(request)?;
    let fonts = FontManager::new();
    let plan = lay_out(&records, config, &fonts)?;
    let bytes = render_pdf(&plan)?;
    Ok((bytes, plan))
}

/// The single operation exposed to boundaries: records → PDF byte stream.
pub fn generate_document(records: &[LabelRecord], config: &SheetConfig) -> Result<Vec<u8>, Error> {
    let fonts = FontManager::new();
    let plan = lay_out(records, config, &fonts)?;
    Ok(render_pdf(&plan)?)
}

/// Compute only the sheet plan (no PDF rendering) – useful for testing and
/// for callers that render separately.
pub fn plan_sheet(
    records: &[LabelRecord],
    config: &SheetConfig,
    fonts: &FontManager,
) -> Result<SheetPlan, Error> {
    Ok(lay_out(records, config, fonts)?)
}

/// Render a previously computed plan.
pub fn render_plan(plan: &SheetPlan) -> Result<Vec<u8>, Error> {
    Ok(render_pdf(plan)?)
}
