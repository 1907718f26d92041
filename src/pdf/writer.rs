//! PDF document assembly.
//!
//! Builds the complete export file: header, one page per captured bitmap,
//! image XObjects, document metadata, xref table, and trailer. Every page is
//! a MediaBox plus a tiny content stream that paints one image with a `cm`
//! placement matrix.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{Error, Result};
use crate::geometry::{mm_to_pt, PageSpec};
use crate::pdf::image::PageImage;
use crate::pdf::object::{Object, ObjectRef, ObjectSerializer};

/// Document-level configuration.
#[derive(Debug, Clone)]
pub struct PdfConfig {
    /// PDF version written in the header
    pub version: String,
    /// Document title (Info dictionary)
    pub title: Option<String>,
    /// Creator application
    pub creator: Option<String>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            version: "1.7".to_string(),
            title: None,
            creator: Some(crate::NAME.to_string()),
        }
    }
}

impl PdfConfig {
    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Where an image lands on its page, in PostScript points with the PDF's
/// bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    /// X of the image's left edge
    pub x_pt: f32,
    /// Y of the image's bottom edge
    pub y_pt: f32,
    /// Displayed width
    pub width_pt: f32,
    /// Displayed height
    pub height_pt: f32,
}

impl PagePlacement {
    /// Convert a placement given in millimeters from the page's top-left
    /// corner (capture convention) into PDF point coordinates.
    pub fn from_mm(page: PageSpec, x_mm: f32, y_mm: f32, width_mm: f32, height_mm: f32) -> Self {
        Self {
            x_pt: mm_to_pt(x_mm),
            y_pt: mm_to_pt(page.height_mm - y_mm - height_mm),
            width_pt: mm_to_pt(width_mm),
            height_pt: mm_to_pt(height_mm),
        }
    }
}

struct PageData {
    spec: PageSpec,
    image: PageImage,
    placement: PagePlacement,
}

/// PDF writer producing one image page per captured slice.
pub struct PdfWriter {
    config: PdfConfig,
    pages: Vec<PageData>,
    next_obj_id: u32,
}

impl PdfWriter {
    /// Create a writer with default configuration.
    pub fn new() -> Self {
        Self::with_config(PdfConfig::default())
    }

    /// Create a writer with the given configuration.
    pub fn with_config(config: PdfConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
            next_obj_id: 1,
        }
    }

    /// Append a page showing one bitmap at the given placement.
    pub fn add_image_page(&mut self, spec: PageSpec, image: PageImage, placement: PagePlacement) {
        self.pages.push(PageData {
            spec,
            image,
            placement,
        });
    }

    /// Number of pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn alloc_obj_id(&mut self) -> u32 {
        let id = self.next_obj_id;
        self.next_obj_id += 1;
        id
    }

    /// Assemble the complete document.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(Error::EncodingFailure("document has no pages".to_string()));
        }

        let serializer = ObjectSerializer::new();
        let mut output = Vec::new();
        let mut xref_offsets: Vec<(u32, usize)> = Vec::new();

        writeln!(output, "%PDF-{}", self.config.version)?;
        // Binary marker so transports treat the file as binary
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        let catalog_id = self.alloc_obj_id();
        let pages_id = self.alloc_obj_id();

        // Pre-allocate ids so page objects can reference their resources
        struct PageIds {
            page: u32,
            content: u32,
            image: u32,
            mask: Option<u32>,
        }
        let mut ids: Vec<PageIds> = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            ids.push(PageIds {
                page: self.next_obj_id,
                content: self.next_obj_id + 1,
                image: self.next_obj_id + 2,
                mask: page.image.soft_mask.as_ref().map(|_| self.next_obj_id + 3),
            });
            self.next_obj_id += if page.image.soft_mask.is_some() { 4 } else { 3 };
        }

        let mut page_refs: Vec<Object> = Vec::new();
        let mut objects: Vec<(u32, Object)> = Vec::new();

        for (page, page_ids) in self.pages.iter().zip(&ids) {
            let (page_w, page_h) = page.spec.size_pt();
            let p = page.placement;

            // Content stream: place the page image with a cm matrix
            let content = format!(
                "q\n{} 0 0 {} {} {} cm\n/Im1 Do\nQ\n",
                fmt_coord(p.width_pt),
                fmt_coord(p.height_pt),
                fmt_coord(p.x_pt),
                fmt_coord(p.y_pt),
            );
            let content_obj = Object::Stream {
                dict: HashMap::new(),
                data: bytes::Bytes::from(content.into_bytes()),
            };

            let mut image_dict = page.image.build_xobject_dict();
            if let Some(mask_id) = page_ids.mask {
                image_dict.insert(
                    "SMask".to_string(),
                    Object::Reference(ObjectRef::new(mask_id, 0)),
                );
            }
            let image_obj = Object::Stream {
                dict: image_dict,
                data: bytes::Bytes::from(page.image.data.clone()),
            };

            let resources = ObjectSerializer::dict(vec![(
                "XObject",
                ObjectSerializer::dict(vec![(
                    "Im1",
                    ObjectSerializer::reference(page_ids.image, 0),
                )]),
            )]);

            let page_obj = ObjectSerializer::dict(vec![
                ("Type", ObjectSerializer::name("Page")),
                ("Parent", ObjectSerializer::reference(pages_id, 0)),
                (
                    "MediaBox",
                    ObjectSerializer::rect(0.0, 0.0, page_w as f64, page_h as f64),
                ),
                ("Contents", ObjectSerializer::reference(page_ids.content, 0)),
                ("Resources", resources),
            ]);

            page_refs.push(ObjectSerializer::reference(page_ids.page, 0));
            objects.push((page_ids.page, page_obj));
            objects.push((page_ids.content, content_obj));
            objects.push((page_ids.image, image_obj));
            if let (Some(mask_id), Some(mask_dict), Some(mask_data)) = (
                page_ids.mask,
                page.image.build_soft_mask_dict(),
                page.image.soft_mask.clone(),
            ) {
                objects.push((
                    mask_id,
                    Object::Stream {
                        dict: mask_dict,
                        data: bytes::Bytes::from(mask_data),
                    },
                ));
            }
        }

        let pages_obj = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            ("Kids", Object::Array(page_refs)),
            ("Count", ObjectSerializer::integer(self.pages.len() as i64)),
        ]);
        let catalog_obj = ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Catalog")),
            ("Pages", ObjectSerializer::reference(pages_id, 0)),
        ]);

        // Info dictionary
        let info_id = self.alloc_obj_id();
        let mut info_entries = Vec::new();
        if let Some(title) = &self.config.title {
            info_entries.push(("Title", ObjectSerializer::string(title)));
        }
        if let Some(creator) = &self.config.creator {
            info_entries.push(("Creator", ObjectSerializer::string(creator)));
            info_entries.push(("Producer", ObjectSerializer::string(creator)));
        }
        let creation_date = chrono::Local::now().format("D:%Y%m%d%H%M%S").to_string();
        info_entries.push(("CreationDate", ObjectSerializer::string(&creation_date)));
        let info_obj = ObjectSerializer::dict(info_entries);

        xref_offsets.push((catalog_id, output.len()));
        output.extend_from_slice(&serializer.serialize_indirect(catalog_id, 0, &catalog_obj));

        xref_offsets.push((pages_id, output.len()));
        output.extend_from_slice(&serializer.serialize_indirect(pages_id, 0, &pages_obj));

        for (obj_id, obj) in &objects {
            xref_offsets.push((*obj_id, output.len()));
            output.extend_from_slice(&serializer.serialize_indirect(*obj_id, 0, obj));
        }

        xref_offsets.push((info_id, output.len()));
        output.extend_from_slice(&serializer.serialize_indirect(info_id, 0, &info_obj));

        // Xref table
        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", self.next_obj_id)?;
        writeln!(output, "0000000000 65535 f ")?;
        xref_offsets.sort_by_key(|(id, _)| *id);
        for (_, offset) in &xref_offsets {
            writeln!(output, "{:010} 00000 n ", offset)?;
        }

        let trailer = ObjectSerializer::dict(vec![
            ("Size", ObjectSerializer::integer(self.next_obj_id as i64)),
            ("Root", ObjectSerializer::reference(catalog_id, 0)),
            ("Info", ObjectSerializer::reference(info_id, 0)),
        ]);
        writeln!(output, "trailer")?;
        output.extend_from_slice(&serializer.serialize(&trailer));
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        Ok(output)
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a coordinate for a content stream, trimming trailing zeros.
fn fmt_coord(value: f32) -> String {
    let formatted = format!("{:.3}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
