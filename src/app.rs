//! Application shell.
//!
//! Pure composition: owns the three state containers (record, style
//! configuration, template selection), the screen cursor, the mounted
//! document the preview renders into, and the export wiring. Every state
//! update is a whole-value replacement; no container is patched in place.
//!
//! Exit and error states surface as [`Notification`] values the hosting UI
//! drains and shows as toasts; nothing fails silently.

use std::path::PathBuf;

use crate::dom::{Document, Node};
use crate::error::Result;
use crate::export::{ExportPipeline, PREVIEW_CONTAINER_ID};
use crate::record::CVRecord;
use crate::style::{StyleConfig, StyleOverrides};
use crate::template::{render, TemplateId};
use crate::wizard::Wizard;

/// Scale of the on-screen preview wrapper. Export strips this.
const PREVIEW_SCALE: f32 = 0.5;

/// The top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Template-selection gallery, shown before the wizard
    TemplateGallery,
    /// The step-by-step form
    Wizard,
    /// Style customization panel, returns to the wizard on close
    Customizer,
    /// Full-size preview
    Preview,
}

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
}

/// A transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,
    /// Short headline
    pub title: String,
    /// Supporting detail
    pub message: String,
}

/// Destination for exported document bytes.
///
/// The crate's analogue of the browser's "save blob as file" action; the
/// only outbound side channel the application has.
pub trait DownloadSink {
    /// Persist `bytes` under `filename`.
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<()>;
}

/// Sink writing downloads into a directory.
#[derive(Debug, Clone)]
pub struct DirectoryDownloadSink {
    dir: PathBuf,
}

impl DirectoryDownloadSink {
    /// Deliver into the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for DirectoryDownloadSink {
    fn deliver(&mut self, filename: &str, bytes: &[u8]) -> Result<()> {
        let path = self.dir.join(filename);
        std::fs::write(&path, bytes)?;
        log::info!("saved export to {}", path.display());
        Ok(())
    }
}

/// The assembled application.
pub struct App {
    record: CVRecord,
    style: StyleConfig,
    template: TemplateId,
    screen: Screen,
    wizard: Wizard,
    document: Document,
    pipeline: ExportPipeline,
    notifications: Vec<Notification>,
}

impl App {
    /// Fresh application: gallery screen, placeholder record, default
    /// style, classic template preselected.
    pub fn new() -> Self {
        Self::with_pipeline(ExportPipeline::new())
    }

    /// Application with an explicit export pipeline (tests inject one with
    /// a fake rasterizer).
    pub fn with_pipeline(pipeline: ExportPipeline) -> Self {
        let mut app = Self {
            record: CVRecord::with_placeholders(),
            style: StyleConfig::default(),
            template: TemplateId::Classic,
            screen: Screen::TemplateGallery,
            wizard: Wizard::new(),
            document: Document::new(),
            pipeline,
            notifications: Vec::new(),
        };
        app.mount_preview();
        app
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Current record.
    pub fn record(&self) -> &CVRecord {
        &self.record
    }

    /// Current style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Current template.
    pub fn template(&self) -> TemplateId {
        self.template
    }

    /// The wizard state.
    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Mutable wizard access for step navigation.
    pub fn wizard_mut(&mut self) -> &mut Wizard {
        &mut self.wizard
    }

    /// The live document holding the mounted preview.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Pick a template from the gallery and enter the wizard. Unknown
    /// indices fail fast; there is no silent fallback.
    pub fn select_template(&mut self, index: u8) -> Result<()> {
        self.template = TemplateId::from_index(index)?;
        self.screen = Screen::Wizard;
        self.wizard.reset();
        self.mount_preview();
        Ok(())
    }

    /// Leave the wizard for the gallery.
    pub fn back_to_gallery(&mut self) {
        self.screen = Screen::TemplateGallery;
    }

    /// Open the customization panel.
    pub fn open_customizer(&mut self) {
        self.screen = Screen::Customizer;
    }

    /// Close the customizer, back to the wizard.
    pub fn close_customizer(&mut self) {
        self.screen = Screen::Wizard;
    }

    /// Show the full-size preview.
    pub fn show_preview(&mut self) {
        self.screen = Screen::Preview;
    }

    /// Close the preview, back to the wizard.
    pub fn close_preview(&mut self) {
        self.screen = Screen::Wizard;
    }

    /// Replace the record wholesale and remount the preview. The form
    /// steps always supply a complete next record; there is no
    /// partial-patch path.
    pub fn replace_record(&mut self, record: CVRecord) {
        self.record = record;
        self.mount_preview();
    }

    /// Overlay style overrides onto the current configuration.
    pub fn apply_style(&mut self, overrides: &StyleOverrides) {
        self.style = self.style.merged(overrides);
        self.mount_preview();
    }

    /// Replace the record with the example dataset.
    pub fn load_example(&mut self) {
        self.replace_record(CVRecord::example());
        self.notify_success("Exemple chargé !", "Les données d'exemple ont été chargées.");
    }

    /// Rebuild the scaled preview subtree in the live document.
    fn mount_preview(&mut self) {
        self.document.remove_by_id(PREVIEW_CONTAINER_ID);
        let template_root = render(self.template, &self.record, &self.style);
        let container = Node::new("div")
            .with_id(PREVIEW_CONTAINER_ID)
            .styled(|s| s.transform_scale = Some(PREVIEW_SCALE))
            .with_child(template_root);
        self.document.append(container);
    }

    /// Default export filename derived from the record, matching the
    /// `CV_{first}_{last}` convention with non-alphanumerics collapsed.
    pub fn default_filename(&self) -> String {
        let first = non_empty_or(&self.record.personal.first_name, "Mon");
        let last = non_empty_or(&self.record.personal.last_name, "CV");
        sanitize_filename(&format!("CV_{first}_{last}"))
    }

    /// Run the export pipeline and deliver the result to `sink`.
    ///
    /// Always resolves the in-flight state: exactly one success or error
    /// notification is pushed per call, and the wizard guard is released
    /// on every path.
    pub fn export(&mut self, sink: &mut dyn DownloadSink) -> Result<()> {
        if !self.wizard.begin_export() {
            log::warn!("export requested while one is already in flight; ignored");
            return Ok(());
        }

        let filename = self.default_filename();
        let outcome = self
            .pipeline
            .export(&mut self.document, PREVIEW_CONTAINER_ID, &filename)
            .and_then(|artifact| {
                sink.deliver(&artifact.filename, &artifact.bytes)?;
                Ok(artifact)
            });
        self.wizard.finish_export();

        match outcome {
            Ok(artifact) => {
                self.notify_success(
                    "CV exporté avec succès !",
                    &format!("Votre CV a été téléchargé ({} page(s)).", artifact.page_count),
                );
                Ok(())
            }
            Err(err) => {
                log::error!("export failed: {err}");
                self.notify_error("Erreur d'exportation", &err.to_string());
                Err(err)
            }
        }
    }

    /// Pending notifications, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drain pending notifications for display.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    fn notify_success(&mut self, title: &str, message: &str) {
        self.notifications.push(Notification {
            kind: NotificationKind::Success,
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn notify_error(&mut self, title: &str, message: &str) {
        self.notifications.push(Notification {
            kind: NotificationKind::Error,
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

/// Collapse anything outside `[A-Za-z0-9]` to underscores.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
