//! Bitmap-to-page layout.
//!
//! Converts one captured bitmap into per-page slices with millimeter
//! placements. A fixed margin is reserved on all sides; the bitmap is fit
//! into the remaining content box preserving its aspect ratio:
//!
//! - proportionally wider than the content box: scaled to the full content
//!   width and centered vertically on a single page;
//! - otherwise: scaled to the full content width, and when the scaled
//!   height exceeds one page's capacity, split top-to-bottom into
//!   `ceil(scaled_height / capacity)` pages, each receiving its vertical
//!   crop of the source bitmap. The final partial slice is top-aligned.
//!
//! Single-page output is the common case and takes the direct path.

use image::RgbaImage;

use crate::error::{Error, Result};
use crate::geometry::PageSpec;

/// One output page: a cropped bitmap and where it lands, in millimeters
/// from the page's top-left corner.
#[derive(Debug, Clone)]
pub struct PageSlice {
    /// The cropped (not re-rasterized) bitmap for this page
    pub image: RgbaImage,
    /// Left edge in mm
    pub x_mm: f32,
    /// Top edge in mm
    pub y_mm: f32,
    /// Displayed width in mm
    pub width_mm: f32,
    /// Displayed height in mm
    pub height_mm: f32,
}

/// Split `bitmap` into page slices for `page` with `margin_mm` on all sides.
pub fn paginate(bitmap: &RgbaImage, page: PageSpec, margin_mm: f32) -> Result<Vec<PageSlice>> {
    let (src_w, src_h) = bitmap.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(Error::EncodingFailure("empty capture bitmap".to_string()));
    }

    let (content_w, content_h) = page.content_box(margin_mm);
    if content_w <= 0.0 || content_h <= 0.0 {
        return Err(Error::EncodingFailure(format!(
            "margin {margin_mm} mm leaves no content area on a {} x {} mm page",
            page.width_mm, page.height_mm
        )));
    }

    let aspect = src_w as f32 / src_h as f32;
    let content_aspect = content_w / content_h;

    // Width-fit: mm of page per source pixel
    let scale = content_w / src_w as f32;
    let scaled_h = src_h as f32 * scale;

    if aspect >= content_aspect || scaled_h <= content_h {
        // Single page: width-fit, centered vertically
        let y = margin_mm + (content_h - scaled_h).max(0.0) / 2.0;
        return Ok(vec![PageSlice {
            image: bitmap.clone(),
            x_mm: margin_mm,
            y_mm: y,
            width_mm: content_w,
            height_mm: scaled_h,
        }]);
    }

    // Multi-page: split the source into page-capacity slices, in reading order
    let capacity_px = content_h / scale;
    let page_count = (src_h as f32 / capacity_px).ceil() as u32;
    log::debug!(
        "capture {}x{} px spans {} pages ({} px per page)",
        src_w,
        src_h,
        page_count,
        capacity_px
    );

    // Rounded per-index boundaries so consecutive crops share an edge and
    // tile the source with no duplicated or dropped rows
    let boundary = |index: u32| -> u32 {
        if index >= page_count {
            src_h
        } else {
            ((index as f32 * capacity_px).round() as u32).min(src_h)
        }
    };

    let mut slices = Vec::with_capacity(page_count as usize);
    for index in 0..page_count {
        let top = boundary(index);
        let bottom = boundary(index + 1);
        if bottom <= top {
            break;
        }
        let slice_h = bottom - top;
        let crop = image::imageops::crop_imm(bitmap, 0, top, src_w, slice_h).to_image();
        slices.push(PageSlice {
            image: crop,
            x_mm: margin_mm,
            y_mm: margin_mm,
            width_mm: content_w,
            height_mm: slice_h as f32 * scale,
        });
    }

    Ok(slices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const MARGIN: f32 = 10.0;

    fn bitmap(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
    }

    #[test]
    fn test_empty_bitmap_is_an_error() {
        let empty = RgbaImage::new(0, 0);
        assert!(paginate(&empty, PageSpec::A4, MARGIN).is_err());
    }

    #[test]
    fn test_excessive_margin_is_an_error() {
        assert!(paginate(&bitmap(100, 100), PageSpec::A4, 150.0).is_err());
    }

    #[test]
    fn test_near_page_aspect_content_fits_one_page() {
        // Slightly wider than the A4 content box (190 x 277 mm)
        let slices = paginate(&bitmap(1920, 2770), PageSpec::A4, MARGIN).unwrap();
        assert_eq!(slices.len(), 1);
        let s = &slices[0];
        assert!((s.width_mm - 190.0).abs() < 0.01);
        // scaled height = 190 * 2770/1920 mm
        assert!((s.height_mm - 190.0 * 2770.0 / 1920.0).abs() < 0.1);
        assert!((s.x_mm - MARGIN).abs() < 0.01);
    }

    #[test]
    fn test_wide_content_centers_vertically() {
        let slices = paginate(&bitmap(2000, 500), PageSpec::A4, MARGIN).unwrap();
        assert_eq!(slices.len(), 1);
        let s = &slices[0];
        assert!((s.width_mm - 190.0).abs() < 0.01);
        // scaled height = 190 * 500/2000 = 47.5 mm, centered in 277 mm
        assert!((s.height_mm - 47.5).abs() < 0.01);
        let expected_y = MARGIN + (277.0 - 47.5) / 2.0;
        assert!((s.y_mm - expected_y).abs() < 0.01);
    }

    #[test]
    fn test_tall_content_splits_with_ceil() {
        // Width-fit scale = 190/794 mm per px -> capacity ~1157.6 px per page
        let capacity = 277.0 / (190.0 / 794.0);
        let src_h = (capacity * 2.5) as u32;
        let slices = paginate(&bitmap(794, src_h), PageSpec::A4, MARGIN).unwrap();
        assert_eq!(slices.len(), 3);
        // Full pages are full-capacity, the last slice is partial and
        // top-aligned
        assert!((slices[0].height_mm - 277.0).abs() < 0.5);
        assert!((slices[1].height_mm - 277.0).abs() < 0.5);
        assert!(slices[2].height_mm < 277.0 / 2.0 + 1.0);
        for s in &slices {
            assert!((s.y_mm - MARGIN).abs() < 0.01);
        }
    }

    #[test]
    fn test_slices_cover_source_in_reading_order() {
        let capacity = 277.0 / (190.0 / 794.0);
        let src_h = (capacity * 1.5) as u32;
        let slices = paginate(&bitmap(794, src_h), PageSpec::A4, MARGIN).unwrap();
        assert_eq!(slices.len(), 2);
        let total: u32 = slices.iter().map(|s| s.image.height()).sum();
        assert_eq!(total, src_h);
        assert!(slices[0].image.height() >= slices[1].image.height());
    }

    #[test]
    fn test_multi_page_crops_tile_without_overlap() {
        let capacity = 277.0 / (190.0 / 794.0);
        // Heights whose cumulative rounded boundaries drift off a whole
        // multiple of the capacity
        for src_h in [2893, (capacity * 2.5) as u32, (capacity * 4.0) as u32 + 1] {
            let slices = paginate(&bitmap(794, src_h), PageSpec::A4, MARGIN).unwrap();
            assert!(slices.len() > 1);
            let total: u32 = slices.iter().map(|s| s.image.height()).sum();
            assert_eq!(total, src_h, "crops must cover every source row once");
            // Each full page stays within one row of the capacity
            for s in &slices[..slices.len() - 1] {
                let h = s.image.height() as f32;
                assert!((h - capacity).abs() <= 1.0, "page crop height {h}");
            }
        }
    }

    #[test]
    fn test_barely_overflowing_content_gets_two_pages() {
        let capacity = 277.0 / (190.0 / 794.0);
        let src_h = capacity as u32 + 40;
        let slices = paginate(&bitmap(794, src_h), PageSpec::A4, MARGIN).unwrap();
        assert_eq!(slices.len(), 2);
    }
}
