//! # CV Forge
//!
//! Wizard-driven CV builder with a paginated A4 PDF export pipeline.
//!
//! ## Core Features
//!
//! ### Editing
//! - **Structured record**: personal details, formations, experiences,
//!   skills, languages, certifications, interests, references
//! - **Step wizard**: five sequential form steps with whole-record updates
//! - **Style customization**: closed option sets (fonts, sizes, spacing,
//!   colors) merged as total defaults plus sparse overrides
//! - **Two templates**: classic single-column and sidebar two-column, both
//!   pure functions of record and style
//!
//! ### Export
//! - **Six-phase pipeline**: locate, isolate, stabilize, rasterize,
//!   paginate, finalize
//! - **Capture convention**: 794 px A4 width at 96 dpi, 2x oversampling
//! - **Pagination**: width-fit with ceil page splitting, fixed 10 mm margin
//! - **PDF assembly**: Flate-compressed image XObjects with soft masks,
//!   document metadata, single-pass xref
//!
//! ## Quick Start
//!
//! ```ignore
//! use cvforge::{App, DirectoryDownloadSink};
//!
//! # fn main() -> cvforge::Result<()> {
//! let mut app = App::new();
//! app.select_template(1)?;
//! app.load_example();
//!
//! let mut sink = DirectoryDownloadSink::new("/tmp");
//! app.export(&mut sink)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Units, page geometry
pub mod geometry;

// CV data model and style configuration
pub mod record;
pub mod style;

// Retained element tree the templates render into
pub mod dom;

// Template variants
pub mod template;

// Export pipeline (locate, isolate, stabilize, rasterize, paginate, finalize)
pub mod export;

// PDF assembly
pub mod pdf;

// Wizard navigation and application shell
pub mod app;
pub mod wizard;

// Re-exports
pub use app::{App, DirectoryDownloadSink, DownloadSink, Notification, NotificationKind, Screen};
pub use error::{Error, Result};
pub use export::{ExportArtifact, ExportConfig, ExportPipeline};
pub use record::CVRecord;
pub use style::{StyleConfig, StyleOverrides};
pub use template::TemplateId;
pub use wizard::{Step, Wizard};

/// Crate name, used as the PDF producer string.
pub const NAME: &str = "cvforge";

/// Crate version from the manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_identity() {
        assert_eq!(NAME, "cvforge");
        assert!(!VERSION.is_empty());
    }
}
