//! # label-forge – Asset-tag label sheet generator
//!
//! Turns asset-tag identifiers (an explicit list, or a numeric start/end
//! range) into a printable A4 sheet of adhesive labels. Each label carries a
//! static title line, a scannable Code 128 barcode, and the human-readable
//! tag. The pipeline stages are:
//!
//! 1. **Expand** – range endpoints / raw lines → label records ([`tags`])
//! 2. **Lay out** – records → paginated 10×3 grid plan ([`sheet`], [`label`])
//! 3. **Render** – plan → PDF bytes via printpdf ([`render`])
//!
//! A C-compatible FFI surface is exposed via the [`ffi`] module.

pub mod barcode;
pub mod ffi;
pub mod fonts;
pub mod label;
pub mod pipeline;
pub mod plan;
pub mod render;
pub mod samples;
pub mod sheet;
pub mod tags;

// Re-exports for convenience
pub use pipeline::{generate, generate_document, Error, SheetRequest};
pub use sheet::{SheetConfig, SheetError};
pub use tags::{expand_range, pair_with_serials, parse_explicit_list, LabelRecord, TagError};
