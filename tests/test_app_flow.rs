//! End-to-end application flow: gallery to wizard to export.

use std::time::Duration;

use image::{Rgba, RgbaImage};

use cvforge::dom::Node;
use cvforge::error::Error;
use cvforge::export::{ExportConfig, ExportPipeline, Rasterizer, STAGING_ID};
use cvforge::record::CVRecord;
use cvforge::{App, DirectoryDownloadSink, DownloadSink, NotificationKind, Screen, Step};

struct FixedRasterizer;

impl Rasterizer for FixedRasterizer {
    fn rasterize(&self, _root: &Node) -> cvforge::Result<RgbaImage> {
        Ok(RgbaImage::from_pixel(794, 1123, Rgba([40, 40, 40, 255])))
    }
}

fn test_app() -> App {
    let config = ExportConfig {
        settle_delay: Duration::ZERO,
        asset_deadline: Duration::from_millis(100),
        ..ExportConfig::default()
    };
    App::with_pipeline(ExportPipeline::with_rasterizer(
        config,
        Box::new(FixedRasterizer),
    ))
}

struct RejectingSink;

impl DownloadSink for RejectingSink {
    fn deliver(&mut self, _filename: &str, _bytes: &[u8]) -> cvforge::Result<()> {
        Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "disk full",
        )))
    }
}

#[test]
fn test_gallery_to_final_step() {
    let mut app = test_app();
    assert_eq!(app.screen(), Screen::TemplateGallery);
    app.select_template(1).unwrap();
    assert_eq!(app.screen(), Screen::Wizard);
    assert_eq!(app.wizard().current(), Step::PersonalInfo);

    while app.wizard().can_advance() {
        app.wizard_mut().advance();
    }
    assert_eq!(app.wizard().current(), Step::Final);
}

#[test]
fn test_export_writes_file_and_notifies() {
    let mut app = test_app();
    app.select_template(1).unwrap();
    app.load_example();
    app.take_notifications();

    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectoryDownloadSink::new(dir.path());
    app.export(&mut sink).unwrap();

    let path = dir.path().join("CV_Sacha_Diarra.pdf");
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));

    let notes = app.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Success);
    assert!(!app.wizard().export_in_flight());
}

#[test]
fn test_export_with_placeholder_record_uses_fallback_name() {
    let mut app = test_app();
    app.select_template(2).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectoryDownloadSink::new(dir.path());
    app.export(&mut sink).unwrap();

    assert!(dir.path().join("CV_Mon_CV.pdf").exists());
}

#[test]
fn test_failed_delivery_notifies_and_releases_guard() {
    let mut app = test_app();
    app.select_template(1).unwrap();
    app.load_example();
    app.take_notifications();

    let result = app.export(&mut RejectingSink);
    assert!(result.is_err());

    let notes = app.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Error);
    // Guard released and staging gone, so a retry works
    assert!(!app.wizard().export_in_flight());
    assert!(!app.document().contains_id(STAGING_ID));

    let dir = tempfile::tempdir().unwrap();
    let mut sink = DirectoryDownloadSink::new(dir.path());
    app.export(&mut sink).unwrap();
}

#[test]
fn test_record_edits_reach_the_preview() {
    let mut app = test_app();
    app.select_template(1).unwrap();

    let mut record = CVRecord::with_placeholders();
    record.personal.first_name = "Aminata".into();
    record.personal.last_name = "Traoré".into();
    app.replace_record(record);

    let mut found = false;
    for root in &app.document().roots {
        if root.text_content().contains("Aminata Traoré") {
            found = true;
        }
    }
    assert!(found, "preview does not reflect the edited record");
}

#[test]
fn test_switching_templates_resets_wizard() {
    let mut app = test_app();
    app.select_template(1).unwrap();
    app.wizard_mut().advance();
    app.wizard_mut().advance();

    app.back_to_gallery();
    app.select_template(2).unwrap();
    assert_eq!(app.wizard().current(), Step::PersonalInfo);
}
