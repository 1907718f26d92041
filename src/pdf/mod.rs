//! Minimal PDF producer for the export pipeline.
//!
//! The export pipeline rasterizes the CV and hands this module one bitmap
//! slice per page; this module assembles those slices into a single PDF
//! file. Only the features the export needs are implemented: a page tree,
//! Flate-compressed image XObjects (with soft-mask alpha), document
//! metadata, and a conventional xref/trailer epilogue.

mod image;
mod object;
mod writer;

pub use image::PageImage;
pub use object::{Object, ObjectRef, ObjectSerializer};
pub use writer::{PagePlacement, PdfConfig, PdfWriter};
