//! Page metrics and unit conversions.
//!
//! The conversions that tie capture space to PDF page space, used by the
//! staging, pagination, and writing steps.
//!
//! Conventions (used consistently across the crate):
//! - Capture space is CSS pixels at 96 dpi (an A4 page is 794 x 1123 px).
//! - PDF page space is millimeters, converted to PostScript points
//!   (1 pt = 1/72 inch) only at write time.

/// CSS pixels per millimeter at 96 dpi.
pub const PX_PER_MM: f32 = 96.0 / 25.4;

/// PostScript points per millimeter.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

/// Convert millimeters to PostScript points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Convert millimeters to CSS pixels at 96 dpi.
pub fn mm_to_px(mm: f32) -> f32 {
    mm * PX_PER_MM
}

/// Physical page specification in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    /// Page width in millimeters
    pub width_mm: f32,
    /// Page height in millimeters
    pub height_mm: f32,
}

impl PageSpec {
    /// ISO A4 portrait (210 x 297 mm).
    pub const A4: PageSpec = PageSpec {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    /// Page dimensions in PostScript points, rounded to integers the way
    /// PDF producers conventionally emit A4 (595 x 842).
    pub fn size_pt(&self) -> (f32, f32) {
        (mm_to_pt(self.width_mm).round(), mm_to_pt(self.height_mm).round())
    }

    /// Page dimensions in whole CSS pixels at 96 dpi (A4: 794 x 1123).
    pub fn size_px(&self) -> (u32, u32) {
        (
            mm_to_px(self.width_mm).round() as u32,
            mm_to_px(self.height_mm).ceil() as u32,
        )
    }

    /// Content box after reserving `margin_mm` on all four sides.
    ///
    /// Returns (content_width_mm, content_height_mm).
    pub fn content_box(&self, margin_mm: f32) -> (f32, f32) {
        (
            (self.width_mm - 2.0 * margin_mm).max(0.0),
            (self.height_mm - 2.0 * margin_mm).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_pt() {
        // 25.4 mm = 1 inch = 72 pt
        assert!((mm_to_pt(25.4) - 72.0).abs() < 0.001);
    }

    #[test]
    fn test_mm_to_px() {
        // 25.4 mm = 1 inch = 96 CSS px
        assert!((mm_to_px(25.4) - 96.0).abs() < 0.001);
    }

    #[test]
    fn test_a4_pixel_size() {
        let (w, h) = PageSpec::A4.size_px();
        assert_eq!(w, 794);
        assert_eq!(h, 1123);
    }

    #[test]
    fn test_a4_point_size() {
        let (w, h) = PageSpec::A4.size_pt();
        assert_eq!(w, 595.0);
        assert_eq!(h, 842.0);
    }

    #[test]
    fn test_content_box() {
        let (w, h) = PageSpec::A4.content_box(10.0);
        assert!((w - 190.0).abs() < 0.001);
        assert!((h - 277.0).abs() < 0.001);
    }
}
