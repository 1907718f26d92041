//! DOM-to-bitmap capture.
//!
//! [`Rasterizer`] is the capability the pipeline depends on: given a staged
//! subtree, produce an RGBA bitmap. Tests substitute a fake that returns a
//! synthetic bitmap; the shipped implementation lays the tree out with a
//! simplified block/flex model and paints it with `tiny-skia`.
//!
//! Text is rendered as glyph boxes (per-character rectangles sized by case
//! and font size) rather than shaped outlines. That keeps capture
//! deterministic and font-free while preserving the text's footprint, which
//! is what pagination and fit-to-page care about.

use base64::Engine;
use image::RgbaImage;
use tiny_skia::{Paint, PathBuilder, Pixmap, PixmapPaint, Rect as SkiaRect, Transform};

use crate::dom::{Display, Node, TextAlign};
use crate::error::{Error, Result};
use crate::style::Color;
use crate::template::EXPORT_EXCLUDE_CLASS;

/// Fixed oversampling factor for capture.
pub const OVERSAMPLE: f32 = 2.0;

/// Line height multiplier applied to the font size.
const LINE_HEIGHT: f32 = 1.4;
/// Approximate glyph advance as a fraction of the font size.
const CHAR_ADVANCE: f32 = 0.6;
/// Default body font size when no ancestor sets one.
const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Produces a bitmap from a staged subtree.
pub trait Rasterizer {
    /// Capture `root` at its styled width. Fails with
    /// [`Error::RenderFailure`] when a bitmap cannot be produced.
    fn rasterize(&self, root: &Node) -> Result<RgbaImage>;
}

/// The shipped `tiny-skia` implementation.
#[derive(Debug, Clone)]
pub struct TinySkiaRasterizer {
    oversample: f32,
}

impl TinySkiaRasterizer {
    /// Create a rasterizer at the standard oversampling factor.
    pub fn new() -> Self {
        Self {
            oversample: OVERSAMPLE,
        }
    }
}

impl Default for TinySkiaRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for TinySkiaRasterizer {
    fn rasterize(&self, root: &Node) -> Result<RgbaImage> {
        let width = root
            .style
            .width_px
            .ok_or_else(|| Error::RenderFailure("capture root has no fixed width".to_string()))?;

        let ctx = InheritedStyle::default();
        let height = measure(root, width, &ctx).max(root.style.min_height_px.unwrap_or(0.0));

        let px_w = (width * self.oversample).round() as u32;
        let px_h = (height * self.oversample).ceil() as u32;
        let mut pixmap = Pixmap::new(px_w.max(1), px_h.max(1)).ok_or_else(|| {
            Error::RenderFailure(format!("cannot allocate {px_w}x{px_h} capture surface"))
        })?;

        // Opaque background fill so transparent regions stay white
        pixmap.fill(tiny_skia::Color::WHITE);

        let transform = Transform::from_scale(self.oversample, self.oversample);
        paint(root, &mut pixmap, transform, 0.0, 0.0, width, &ctx);

        let bitmap = RgbaImage::from_raw(px_w, px_h, pixmap.take())
            .ok_or_else(|| Error::RenderFailure("capture buffer size mismatch".to_string()))?;
        Ok(bitmap)
    }
}

/// Style values that cascade from ancestors.
#[derive(Debug, Clone)]
struct InheritedStyle {
    font_size: f32,
    color: Color,
    opacity: f32,
}

impl Default for InheritedStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            color: Color::BLACK,
            opacity: 1.0,
        }
    }
}

impl InheritedStyle {
    fn cascade(&self, node: &Node) -> Self {
        Self {
            font_size: node.style.font_size_px.unwrap_or(self.font_size),
            color: node.style.color.unwrap_or(self.color),
            opacity: self.opacity * node.style.opacity,
        }
    }
}

fn is_skipped(node: &Node) -> bool {
    node.has_class(EXPORT_EXCLUDE_CLASS)
        || node.style.display == Display::None
        || !node.style.visible
}

/// Resolve a child's width inside a flex row.
fn child_width(child: &Node, avail: f32, unsized_share: f32) -> f32 {
    if let Some(px) = child.style.width_px {
        px
    } else if let Some(frac) = child.style.width_frac {
        avail * frac
    } else {
        unsized_share
    }
}

/// Share of the row left over for children with no explicit width.
fn unsized_share(children: &[&Node], avail: f32) -> f32 {
    let mut taken = 0.0;
    let mut unsized_count = 0;
    for child in children {
        if let Some(px) = child.style.width_px {
            taken += px;
        } else if let Some(frac) = child.style.width_frac {
            taken += avail * frac;
        } else {
            unsized_count += 1;
        }
    }
    if unsized_count == 0 {
        0.0
    } else {
        ((avail - taken) / unsized_count as f32).max(0.0)
    }
}

/// Number of wrapped lines a text occupies at the given width.
fn text_line_count(text: &str, font_size: f32, width: f32) -> usize {
    let chars_per_line = (width / (font_size * CHAR_ADVANCE)).floor().max(1.0) as usize;
    text.lines()
        .map(|line| {
            let len = line.chars().count();
            if len == 0 {
                1
            } else {
                len.div_ceil(chars_per_line)
            }
        })
        .sum::<usize>()
        .max(1)
}

/// Compute a node's height at the given available width.
fn measure(node: &Node, width: f32, inherited: &InheritedStyle) -> f32 {
    if is_skipped(node) {
        return 0.0;
    }
    let ctx = inherited.cascade(node);
    let pad = &node.style.padding;
    let content_width = (width - pad.left - pad.right).max(0.0);

    let mut content_height = 0.0;
    if let Some(text) = &node.text {
        if !text.trim().is_empty() {
            content_height +=
                text_line_count(text, ctx.font_size, content_width) as f32 * ctx.font_size
                    * LINE_HEIGHT;
        }
    }

    match node.style.display {
        Display::FlexRow => {
            let children: Vec<&Node> = node.children.iter().collect();
            let share = unsized_share(&children, content_width);
            let mut row_height: f32 = 0.0;
            for child in &children {
                let w = child_width(child, content_width, share);
                let h = measure(child, w, &ctx) + child.style.margin_bottom_px;
                row_height = row_height.max(h);
            }
            content_height += row_height;
        }
        Display::Block => {
            for child in &node.children {
                content_height += measure(child, content_width, &ctx);
                if !is_skipped(child) {
                    content_height += child.style.margin_bottom_px;
                }
            }
        }
        Display::None => {}
    }

    let mut height = content_height + pad.top + pad.bottom;
    if let Some(min) = node.style.min_height_px {
        height = height.max(min);
    }
    if let Some(fixed) = node.style.height_px {
        height = fixed;
    }
    height
}

/// Paint a node at (x, y) and return the height it occupied.
fn paint(
    node: &Node,
    pixmap: &mut Pixmap,
    transform: Transform,
    x: f32,
    y: f32,
    width: f32,
    inherited: &InheritedStyle,
) -> f32 {
    if is_skipped(node) {
        return 0.0;
    }
    let ctx = inherited.cascade(node);
    let height = measure(node, width, inherited);

    if let Some(bg) = node.style.background {
        fill_rect(
            pixmap,
            transform,
            x,
            y,
            width,
            height,
            bg,
            ctx.opacity,
            node.style.border_radius_px,
        );
    }

    if node.tag == "img" {
        draw_image(node, pixmap, transform, x, y, width, height, ctx.opacity);
    }

    let pad = &node.style.padding;
    let content_x = x + pad.left;
    let content_width = (width - pad.left - pad.right).max(0.0);
    let mut cursor_y = y + pad.top;

    if let Some(text) = &node.text {
        if !text.trim().is_empty() {
            cursor_y += draw_text(
                pixmap,
                transform,
                text,
                content_x,
                cursor_y,
                content_width,
                &ctx,
                node.style.text_align,
                node.style.bold,
            );
        }
    }

    match node.style.display {
        Display::FlexRow => {
            let children: Vec<&Node> = node.children.iter().collect();
            let share = unsized_share(&children, content_width);
            let mut cursor_x = content_x;
            for child in &children {
                let w = child_width(child, content_width, share);
                paint(child, pixmap, transform, cursor_x, cursor_y, w, &ctx);
                cursor_x += w;
            }
        }
        Display::Block => {
            for child in &node.children {
                let used = paint(child, pixmap, transform, content_x, cursor_y, content_width, &ctx);
                if !is_skipped(child) {
                    cursor_y += used + child.style.margin_bottom_px;
                }
            }
        }
        Display::None => {}
    }

    if let Some((thickness, color)) = node.style.border_bottom {
        fill_rect(
            pixmap,
            transform,
            x,
            y + height - thickness,
            width,
            thickness,
            color,
            ctx.opacity,
            0.0,
        );
    }

    height
}

#[allow(clippy::too_many_arguments)]
fn fill_rect(
    pixmap: &mut Pixmap,
    transform: Transform,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    color: Color,
    opacity: f32,
    radius: f32,
) {
    if width <= 0.0 || height <= 0.0 {
        return;
    }
    let Some(rect) = SkiaRect::from_xywh(x, y, width, height) else {
        return;
    };
    let mut builder = PathBuilder::new();
    // Fully rounded boxes (photo frames) become ovals; small radii are
    // visually negligible at capture resolution and fall back to a rect.
    if radius >= width.min(height) / 2.0 {
        builder.push_oval(rect);
    } else {
        builder.push_rect(rect);
    }
    let Some(path) = builder.finish() else {
        return;
    };

    let mut paint = Paint::default();
    let (r, g, b) = color.to_f32();
    paint.set_color(
        tiny_skia::Color::from_rgba(r, g, b, opacity.clamp(0.0, 1.0))
            .unwrap_or(tiny_skia::Color::BLACK),
    );
    paint.anti_alias = true;
    pixmap.fill_path(&path, &paint, tiny_skia::FillRule::Winding, transform, None);
}

/// Draw wrapped glyph-box text and return the height consumed.
#[allow(clippy::too_many_arguments)]
fn draw_text(
    pixmap: &mut Pixmap,
    transform: Transform,
    text: &str,
    x: f32,
    y: f32,
    width: f32,
    ctx: &InheritedStyle,
    align: TextAlign,
    bold: bool,
) -> f32 {
    let font_size = ctx.font_size;
    let advance = font_size * CHAR_ADVANCE;
    let chars_per_line = (width / advance).floor().max(1.0) as usize;
    let line_height = font_size * LINE_HEIGHT;

    let mut paint = Paint::default();
    let (r, g, b) = ctx.color.to_f32();
    paint.set_color(
        tiny_skia::Color::from_rgba(r, g, b, ctx.opacity.clamp(0.0, 1.0))
            .unwrap_or(tiny_skia::Color::BLACK),
    );

    let glyph_width = if bold { advance * 0.85 } else { advance * 0.75 };
    let mut line_index = 0usize;
    for source_line in text.lines() {
        let chars: Vec<char> = source_line.chars().collect();
        let mut start = 0;
        loop {
            let end = (start + chars_per_line).min(chars.len());
            let line = &chars[start..end];
            let line_y = y + line_index as f32 * line_height;
            let line_px_width = line.len() as f32 * advance;
            let mut cursor_x = match align {
                TextAlign::Left | TextAlign::Justify => x,
                TextAlign::Center => x + (width - line_px_width).max(0.0) / 2.0,
                TextAlign::Right => x + (width - line_px_width).max(0.0),
            };

            let mut builder = PathBuilder::new();
            for ch in line {
                if !ch.is_whitespace() {
                    // Glyph box: ascender-height for caps and digits,
                    // x-height for the rest, as the footprint of real text
                    let glyph_height = if ch.is_uppercase() || ch.is_ascii_digit() {
                        font_size * 0.8
                    } else {
                        font_size * 0.6
                    };
                    let top = line_y + font_size - glyph_height;
                    if let Some(rect) =
                        SkiaRect::from_xywh(cursor_x, top, glyph_width, glyph_height)
                    {
                        builder.push_rect(rect);
                    }
                }
                cursor_x += advance;
            }
            if let Some(path) = builder.finish() {
                pixmap.fill_path(&path, &paint, tiny_skia::FillRule::Winding, transform, None);
            }

            line_index += 1;
            start = end;
            if start >= chars.len() {
                break;
            }
        }
        if chars.is_empty() {
            line_index += 1;
        }
    }
    (line_index.max(1)) as f32 * line_height
}

/// Decode and draw a photo carried as a data URI. Decode failures degrade
/// to the placeholder fill rather than failing the capture.
#[allow(clippy::too_many_arguments)]
fn draw_image(
    node: &Node,
    pixmap: &mut Pixmap,
    transform: Transform,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    opacity: f32,
) {
    let Some(src) = node.attr("src") else {
        return;
    };
    match decode_data_uri(src) {
        Ok(photo) => {
            let resized = image::imageops::resize(
                &photo,
                (width.max(1.0)) as u32,
                (height.max(1.0)) as u32,
                image::imageops::FilterType::Triangle,
            );
            let (w, h) = resized.dimensions();
            let Some(size) = tiny_skia::IntSize::from_wh(w, h) else {
                return;
            };
            if let Some(source) = Pixmap::from_vec(resized.into_raw(), size) {
                let mut paint = PixmapPaint::default();
                paint.opacity = opacity.clamp(0.0, 1.0);
                pixmap.draw_pixmap(
                    0,
                    0,
                    source.as_ref(),
                    &paint,
                    transform.pre_translate(x, y),
                    None,
                );
            }
        }
        Err(err) => {
            log::warn!("photo decode failed, drawing placeholder: {err}");
            fill_rect(
                pixmap,
                transform,
                x,
                y,
                width,
                height,
                Color::rgb(0xd1, 0xd5, 0xdb),
                opacity,
                node.style.border_radius_px,
            );
        }
    }
}

/// Decode a `data:image/...;base64,` URI into RGBA pixels.
fn decode_data_uri(uri: &str) -> Result<RgbaImage> {
    let payload = uri
        .split_once("base64,")
        .map(|(_, rest)| rest)
        .ok_or_else(|| Error::RenderFailure("photo src is not a base64 data URI".to_string()))?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::RenderFailure(format!("photo base64: {e}")))?;
    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| Error::RenderFailure(format!("photo decode: {e}")))?;
    Ok(decoded.to_rgba8())
}

/// Whether every pixel in the capture equals the opaque white background.
pub fn is_blank(bitmap: &RgbaImage) -> bool {
    bitmap
        .pixels()
        .all(|p| p.0 == [0xFF, 0xFF, 0xFF, 0xFF])
}
