//! The document export pipeline.
//!
//! Turns the mounted CV preview into a downloadable, paginated PDF. One
//! run moves through six named phases, each isolated in its own module so
//! a fix touches one phase rather than a monolith:
//!
//! 1. **locate** — find the rendered template in the live document;
//! 2. **isolate** (`staging`) — deep-clone it into an off-screen container
//!    at true A4 pixel size;
//! 3. **stabilize** — settle delay, bounded asset wait, visibility
//!    normalization;
//! 4. **rasterize** (`raster`) — capture the staged clone as one bitmap;
//! 5. **paginate** — fit and split the bitmap onto A4 pages;
//! 6. **finalize** — assemble the PDF bytes and remove the staging
//!    container on every exit path.
//!
//! Failures are classified into the [`Error`](crate::error::Error)
//! taxonomy at this boundary; callers never branch on phase identity. The
//! pipeline is not reentrant; callers disable the export trigger while a
//! run is in flight.

mod locate;
mod paginate;
mod raster;
mod staging;
mod stabilize;

pub use locate::PREVIEW_CONTAINER_ID;
pub use paginate::{paginate, PageSlice};
pub use raster::{is_blank, Rasterizer, TinySkiaRasterizer, OVERSAMPLE};
pub use staging::STAGING_ID;

use std::time::Duration;

use image::RgbaImage;

use crate::dom::Document;
use crate::error::{Error, Result};
use crate::geometry::PageSpec;
use crate::pdf::{PageImage, PagePlacement, PdfConfig, PdfWriter};

/// Canonical extension of exported documents.
pub const FILE_EXTENSION: &str = ".pdf";

/// Tunables for one pipeline instance.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output page size
    pub page: PageSpec,
    /// Margin reserved on all four page edges, in millimeters
    pub margin_mm: f32,
    /// Fixed delay after staging so layout settles before capture
    pub settle_delay: Duration,
    /// Overall deadline for font and image readiness
    pub asset_deadline: Duration,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page: PageSpec::A4,
            margin_mm: 10.0,
            settle_delay: Duration::from_millis(500),
            asset_deadline: Duration::from_secs(10),
        }
    }
}

/// The finished export.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Normalized filename, extension included
    pub filename: String,
    /// Complete PDF file
    pub bytes: Vec<u8>,
    /// Number of pages in the document
    pub page_count: usize,
}

/// One-shot export runner. Holds no state across runs.
pub struct ExportPipeline {
    config: ExportConfig,
    rasterizer: Box<dyn Rasterizer>,
}

impl ExportPipeline {
    /// Pipeline with default configuration and the shipped rasterizer.
    pub fn new() -> Self {
        Self::with_rasterizer(ExportConfig::default(), Box::new(TinySkiaRasterizer::new()))
    }

    /// Pipeline with explicit configuration and rasterizer. Tests inject a
    /// fake rasterizer here to decouple pagination from real rendering.
    pub fn with_rasterizer(config: ExportConfig, rasterizer: Box<dyn Rasterizer>) -> Self {
        Self { config, rasterizer }
    }

    /// Run the full pipeline against the live document.
    ///
    /// `target_id` is the caller's element id fallback for discovery;
    /// `filename` may omit the `.pdf` extension. On any exit path the
    /// staging container is removed before returning.
    pub fn export(
        &self,
        document: &mut Document,
        target_id: &str,
        filename: &str,
    ) -> Result<ExportArtifact> {
        let filename = normalize_filename(filename);
        log::info!("export started: target '{target_id}', file '{filename}'");

        let target = locate::locate(document, target_id)?.clone();
        staging::stage(document, &target, self.config.page);

        let captured = self.capture_staged(document);
        // Guaranteed cleanup, success or failure
        staging::cleanup(document);
        let bitmap = captured?;

        let slices = paginate::paginate(&bitmap, self.config.page, self.config.margin_mm)?;
        let bytes = self.assemble(&slices, &filename)?;
        let page_count = slices.len();
        log::info!("export finished: {page_count} page(s), {} bytes", bytes.len());

        Ok(ExportArtifact {
            filename,
            bytes,
            page_count,
        })
    }

    /// Phases 3 and 4, run while the staging container is mounted.
    fn capture_staged(&self, document: &mut Document) -> Result<RgbaImage> {
        stabilize::settle(self.config.settle_delay);
        stabilize::await_assets(document, self.config.asset_deadline)?;

        let staged = document
            .find_first_mut(&|n| n.id.as_deref() == Some(staging::STAGING_ID))
            .ok_or_else(|| Error::NotFound("staging container vanished".to_string()))?;
        stabilize::normalize_visibility(staged);

        let had_text = staged.has_renderable_text();
        let bitmap = self.rasterizer.rasterize(staged)?;

        // Blank output degrades to a warning: a slow image load is not
        // reliably distinguishable from a genuinely empty CV within the
        // deadline budget. Skip the pixel scan when the staged subtree had
        // text, which cannot capture blank.
        if !had_text && raster::is_blank(&bitmap) {
            log::warn!("capture is entirely background-colored; exporting anyway");
        }

        Ok(bitmap)
    }

    /// Phase 6: encode the page slices into one PDF.
    fn assemble(&self, slices: &[PageSlice], filename: &str) -> Result<Vec<u8>> {
        let title = filename
            .strip_suffix(FILE_EXTENSION)
            .unwrap_or(filename)
            .to_string();
        let mut writer = PdfWriter::with_config(PdfConfig::default().with_title(title));
        for slice in slices {
            let image = PageImage::from_rgba(&slice.image)?;
            let placement = PagePlacement::from_mm(
                self.config.page,
                slice.x_mm,
                slice.y_mm,
                slice.width_mm,
                slice.height_mm,
            );
            writer.add_image_page(self.config.page, image, placement);
        }
        writer.finish()
    }
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Append the canonical extension when the caller omitted it.
pub fn normalize_filename(name: &str) -> String {
    let trimmed = name.trim();
    let base = if trimmed.is_empty() { "CV" } else { trimmed };
    if base.to_lowercase().ends_with(FILE_EXTENSION) {
        base.to_string()
    } else {
        format!("{base}{FILE_EXTENSION}")
    }
}
