//! Style configuration for the template renderer.
//!
//! Every visual customization the templates understand lives here as one flat
//! configuration record with a total default. An explicit configuration is
//! always the default overlaid with zero or more field overrides
//! ([`StyleConfig::merged`]); no field is ever left undefined.
//!
//! Typography and spacing options are closed enumerated sets, mirroring the
//! customizer's select lists; only colors are free-form values.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Create a color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rgb` or `#rrggbb` hex color string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let expand = |d: u8| d << 4 | d;
        match digits.len() {
            3 => {
                let n = u16::from_str_radix(digits, 16)
                    .map_err(|_| Error::InvalidColor(hex.to_string()))?;
                Ok(Self::rgb(
                    expand(((n >> 8) & 0xF) as u8),
                    expand(((n >> 4) & 0xF) as u8),
                    expand((n & 0xF) as u8),
                ))
            }
            6 => {
                let n = u32::from_str_radix(digits, 16)
                    .map_err(|_| Error::InvalidColor(hex.to_string()))?;
                Ok(Self::rgb((n >> 16) as u8, (n >> 8) as u8, n as u8))
            }
            _ => Err(Error::InvalidColor(hex.to_string())),
        }
    }

    /// Format as a lowercase `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels as 0.0..=1.0 floats, for rasterizer paints.
    pub fn to_f32(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

/// Body text font choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyFont {
    /// Open Sans (default)
    OpenSans,
    /// Arial
    Arial,
    /// Helvetica
    Helvetica,
    /// Times
    Times,
}

impl BodyFont {
    /// Display label for the customizer.
    pub fn label(&self) -> &'static str {
        match self {
            BodyFont::OpenSans => "OpenSans",
            BodyFont::Arial => "Arial",
            BodyFont::Helvetica => "Helvetica",
            BodyFont::Times => "Times",
        }
    }
}

/// Section heading font choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingFont {
    /// Visby CF (default)
    VisbyCf,
    /// Open Sans
    OpenSans,
    /// Arial
    Arial,
    /// Helvetica
    Helvetica,
}

impl HeadingFont {
    /// Display label for the customizer.
    pub fn label(&self) -> &'static str {
        match self {
            HeadingFont::VisbyCf => "VisbyCF",
            HeadingFont::OpenSans => "OpenSans",
            HeadingFont::Arial => "Arial",
            HeadingFont::Helvetica => "Helvetica",
        }
    }
}

/// Body text size steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodySize {
    /// 12px
    Px12,
    /// 14px (default)
    Px14,
    /// 16px
    Px16,
    /// 18px
    Px18,
}

impl BodySize {
    /// Size in CSS pixels.
    pub fn px(&self) -> f32 {
        match self {
            BodySize::Px12 => 12.0,
            BodySize::Px14 => 14.0,
            BodySize::Px16 => 16.0,
            BodySize::Px18 => 18.0,
        }
    }
}

/// Name heading size steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameSize {
    /// 28px
    Px28,
    /// 32px (default)
    Px32,
    /// 36px
    Px36,
    /// 40px
    Px40,
}

impl NameSize {
    /// Size in CSS pixels.
    pub fn px(&self) -> f32 {
        match self {
            NameSize::Px28 => 28.0,
            NameSize::Px32 => 32.0,
            NameSize::Px36 => 36.0,
            NameSize::Px40 => 40.0,
        }
    }
}

/// Section heading size steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingSize {
    /// 16px
    Px16,
    /// 18px (default)
    Px18,
    /// 20px
    Px20,
    /// 22px
    Px22,
}

impl HeadingSize {
    /// Size in CSS pixels.
    pub fn px(&self) -> f32 {
        match self {
            HeadingSize::Px16 => 16.0,
            HeadingSize::Px18 => 18.0,
            HeadingSize::Px20 => 20.0,
            HeadingSize::Px22 => 22.0,
        }
    }
}

/// Margin between major blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockMargin {
    /// 10px
    Px10,
    /// 15px
    Px15,
    /// 20px (default)
    Px20,
    /// 25px
    Px25,
}

impl BlockMargin {
    /// Size in CSS pixels.
    pub fn px(&self) -> f32 {
        match self {
            BlockMargin::Px10 => 10.0,
            BlockMargin::Px15 => 15.0,
            BlockMargin::Px20 => 20.0,
            BlockMargin::Px25 => 25.0,
        }
    }
}

/// Margin between contents inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentMargin {
    /// 5px
    Px5,
    /// 10px (default)
    Px10,
    /// 15px
    Px15,
    /// 20px
    Px20,
}

impl ContentMargin {
    /// Size in CSS pixels.
    pub fn px(&self) -> f32 {
        match self {
            ContentMargin::Px5 => 5.0,
            ContentMargin::Px10 => 10.0,
            ContentMargin::Px15 => 15.0,
            ContentMargin::Px20 => 20.0,
        }
    }
}

/// Inner padding steps, shared by the vertical and horizontal axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddingStep {
    /// 15px
    Px15,
    /// 20px (default)
    Px20,
    /// 25px
    Px25,
    /// 30px
    Px30,
}

impl PaddingStep {
    /// Size in CSS pixels.
    pub fn px(&self) -> f32 {
        match self {
            PaddingStep::Px15 => 15.0,
            PaddingStep::Px20 => 20.0,
            PaddingStep::Px25 => 25.0,
            PaddingStep::Px30 => 30.0,
        }
    }
}

/// Display mode for period strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    /// Keep periods exactly as entered (default)
    AsEntered,
    /// Rewrite month names to MM/YYYY where recognizable
    MonthSlashYear,
    /// Keep only 4-digit years
    YearOnly,
    /// Rewrite numeric months to French month names where recognizable
    MonthNameYear,
}

/// The complete style configuration with a total default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Name color in the header
    pub name_color: Color,
    /// Job title color
    pub job_title_color: Color,
    /// Main-column section title color
    pub section_title_color: Color,
    /// Company / institution line color
    pub company_color: Color,
    /// Language level bar color
    pub level_bar_color: Color,
    /// Sidebar background color
    pub sidebar_bg_color: Color,
    /// Sidebar section title color
    pub sidebar_title_color: Color,
    /// Sidebar label color
    pub sidebar_label_color: Color,
    /// Sidebar body text color
    pub sidebar_text_color: Color,

    /// Round the photo (circle) instead of soft corners
    pub photo_rounded: bool,
    /// Draw a timeline rail next to dated entries
    pub show_timeline: bool,
    /// Break the line after sidebar labels
    pub line_break_after_labels: bool,
    /// Render the name in uppercase
    pub name_uppercase: bool,
    /// Justify the profile paragraph
    pub justify_profile: bool,
    /// Suppress the small leading glyph on contact lines
    pub hide_info_icons: bool,
    /// Replace the license text with the abbreviated "Permis B" label
    pub reduce_license_display: bool,

    /// Body text font
    pub body_font: BodyFont,
    /// Body text size
    pub body_size: BodySize,
    /// Name heading size
    pub name_size: NameSize,
    /// Section heading font
    pub heading_font: HeadingFont,
    /// Section heading size
    pub heading_size: HeadingSize,

    /// Margin between major blocks
    pub block_margin: BlockMargin,
    /// Margin between contents inside a block
    pub content_margin: ContentMargin,
    /// Vertical inner padding
    pub vertical_padding: PaddingStep,
    /// Horizontal inner padding
    pub horizontal_padding: PaddingStep,

    /// Period display mode
    pub date_format: DateFormat,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            name_color: Color::rgb(0x09, 0x41, 0x02),
            job_title_color: Color::rgb(0x66, 0x66, 0x66),
            section_title_color: Color::rgb(0x09, 0x41, 0x02),
            company_color: Color::rgb(0x33, 0x33, 0x33),
            level_bar_color: Color::rgb(0x09, 0x41, 0x02),
            sidebar_bg_color: Color::rgb(0xea, 0xf5, 0xed),
            sidebar_title_color: Color::rgb(0x09, 0x41, 0x02),
            sidebar_label_color: Color::rgb(0x33, 0x33, 0x33),
            sidebar_text_color: Color::rgb(0x33, 0x33, 0x33),

            photo_rounded: true,
            show_timeline: false,
            line_break_after_labels: true,
            name_uppercase: false,
            justify_profile: true,
            hide_info_icons: false,
            reduce_license_display: false,

            body_font: BodyFont::OpenSans,
            body_size: BodySize::Px14,
            name_size: NameSize::Px32,
            heading_font: HeadingFont::VisbyCf,
            heading_size: HeadingSize::Px18,

            block_margin: BlockMargin::Px20,
            content_margin: ContentMargin::Px10,
            vertical_padding: PaddingStep::Px20,
            horizontal_padding: PaddingStep::Px20,

            date_format: DateFormat::AsEntered,
        }
    }
}

impl StyleConfig {
    /// Overlay `overrides` onto this configuration, field by field.
    ///
    /// Fields that are `None` in the overrides keep their current value.
    pub fn merged(&self, overrides: &StyleOverrides) -> StyleConfig {
        let mut config = self.clone();
        macro_rules! overlay {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = overrides.$field {
                    config.$field = value;
                })*
            };
        }
        overlay!(
            name_color,
            job_title_color,
            section_title_color,
            company_color,
            level_bar_color,
            sidebar_bg_color,
            sidebar_title_color,
            sidebar_label_color,
            sidebar_text_color,
            photo_rounded,
            show_timeline,
            line_break_after_labels,
            name_uppercase,
            justify_profile,
            hide_info_icons,
            reduce_license_display,
            body_font,
            body_size,
            name_size,
            heading_font,
            heading_size,
            block_margin,
            content_margin,
            vertical_padding,
            horizontal_padding,
            date_format,
        );
        config
    }

    /// Express this full configuration as overrides for every field.
    pub fn as_overrides(&self) -> StyleOverrides {
        StyleOverrides {
            name_color: Some(self.name_color),
            job_title_color: Some(self.job_title_color),
            section_title_color: Some(self.section_title_color),
            company_color: Some(self.company_color),
            level_bar_color: Some(self.level_bar_color),
            sidebar_bg_color: Some(self.sidebar_bg_color),
            sidebar_title_color: Some(self.sidebar_title_color),
            sidebar_label_color: Some(self.sidebar_label_color),
            sidebar_text_color: Some(self.sidebar_text_color),
            photo_rounded: Some(self.photo_rounded),
            show_timeline: Some(self.show_timeline),
            line_break_after_labels: Some(self.line_break_after_labels),
            name_uppercase: Some(self.name_uppercase),
            justify_profile: Some(self.justify_profile),
            hide_info_icons: Some(self.hide_info_icons),
            reduce_license_display: Some(self.reduce_license_display),
            body_font: Some(self.body_font),
            body_size: Some(self.body_size),
            name_size: Some(self.name_size),
            heading_font: Some(self.heading_font),
            heading_size: Some(self.heading_size),
            block_margin: Some(self.block_margin),
            content_margin: Some(self.content_margin),
            vertical_padding: Some(self.vertical_padding),
            horizontal_padding: Some(self.horizontal_padding),
            date_format: Some(self.date_format),
        }
    }
}

/// A partial style configuration: every field optional.
///
/// The customizer edits one of these; the renderer always consumes the merge
/// of the defaults and the current overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOverrides {
    /// See [`StyleConfig::name_color`]
    pub name_color: Option<Color>,
    /// See [`StyleConfig::job_title_color`]
    pub job_title_color: Option<Color>,
    /// See [`StyleConfig::section_title_color`]
    pub section_title_color: Option<Color>,
    /// See [`StyleConfig::company_color`]
    pub company_color: Option<Color>,
    /// See [`StyleConfig::level_bar_color`]
    pub level_bar_color: Option<Color>,
    /// See [`StyleConfig::sidebar_bg_color`]
    pub sidebar_bg_color: Option<Color>,
    /// See [`StyleConfig::sidebar_title_color`]
    pub sidebar_title_color: Option<Color>,
    /// See [`StyleConfig::sidebar_label_color`]
    pub sidebar_label_color: Option<Color>,
    /// See [`StyleConfig::sidebar_text_color`]
    pub sidebar_text_color: Option<Color>,
    /// See [`StyleConfig::photo_rounded`]
    pub photo_rounded: Option<bool>,
    /// See [`StyleConfig::show_timeline`]
    pub show_timeline: Option<bool>,
    /// See [`StyleConfig::line_break_after_labels`]
    pub line_break_after_labels: Option<bool>,
    /// See [`StyleConfig::name_uppercase`]
    pub name_uppercase: Option<bool>,
    /// See [`StyleConfig::justify_profile`]
    pub justify_profile: Option<bool>,
    /// See [`StyleConfig::hide_info_icons`]
    pub hide_info_icons: Option<bool>,
    /// See [`StyleConfig::reduce_license_display`]
    pub reduce_license_display: Option<bool>,
    /// See [`StyleConfig::body_font`]
    pub body_font: Option<BodyFont>,
    /// See [`StyleConfig::body_size`]
    pub body_size: Option<BodySize>,
    /// See [`StyleConfig::name_size`]
    pub name_size: Option<NameSize>,
    /// See [`StyleConfig::heading_font`]
    pub heading_font: Option<HeadingFont>,
    /// See [`StyleConfig::heading_size`]
    pub heading_size: Option<HeadingSize>,
    /// See [`StyleConfig::block_margin`]
    pub block_margin: Option<BlockMargin>,
    /// See [`StyleConfig::content_margin`]
    pub content_margin: Option<ContentMargin>,
    /// See [`StyleConfig::vertical_padding`]
    pub vertical_padding: Option<PaddingStep>,
    /// See [`StyleConfig::horizontal_padding`]
    pub horizontal_padding: Option<PaddingStep>,
    /// See [`StyleConfig::date_format`]
    pub date_format: Option<DateFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex_long() {
        let color = Color::from_hex("#094102").unwrap();
        assert_eq!(color, Color::rgb(0x09, 0x41, 0x02));
    }

    #[test]
    fn test_color_from_hex_short() {
        let color = Color::from_hex("#fff").unwrap();
        assert_eq!(color, Color::WHITE);
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert!(Color::from_hex("#zzz").is_err());
        assert!(Color::from_hex("094102ff").is_err());
    }

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::rgb(0xea, 0xf5, 0xed);
        assert_eq!(Color::from_hex(&color.to_hex()).unwrap(), color);
    }

    #[test]
    fn test_merge_empty_overrides_is_identity() {
        let defaults = StyleConfig::default();
        assert_eq!(defaults.merged(&StyleOverrides::default()), defaults);
    }

    #[test]
    fn test_merge_full_override_replaces_everything() {
        let defaults = StyleConfig::default();
        let custom = StyleConfig {
            name_color: Color::rgb(0x0a, 0x23, 0x42),
            sidebar_bg_color: Color::rgb(0x0a, 0x23, 0x42),
            sidebar_text_color: Color::WHITE,
            photo_rounded: false,
            name_uppercase: true,
            body_size: BodySize::Px16,
            heading_font: HeadingFont::Arial,
            block_margin: BlockMargin::Px25,
            date_format: DateFormat::YearOnly,
            ..StyleConfig::default()
        };
        assert_eq!(defaults.merged(&custom.as_overrides()), custom);
    }

    #[test]
    fn test_merge_partial_override() {
        let defaults = StyleConfig::default();
        let overrides = StyleOverrides {
            name_uppercase: Some(true),
            body_size: Some(BodySize::Px18),
            ..StyleOverrides::default()
        };
        let merged = defaults.merged(&overrides);
        assert!(merged.name_uppercase);
        assert_eq!(merged.body_size, BodySize::Px18);
        // Untouched fields keep their defaults
        assert_eq!(merged.name_color, defaults.name_color);
        assert_eq!(merged.heading_size, defaults.heading_size);
    }

    #[test]
    fn test_default_matches_reference_palette() {
        let defaults = StyleConfig::default();
        assert_eq!(defaults.name_color.to_hex(), "#094102");
        assert_eq!(defaults.sidebar_bg_color.to_hex(), "#eaf5ed");
        assert!(defaults.photo_rounded);
        assert!(defaults.justify_profile);
        assert_eq!(defaults.body_size.px(), 14.0);
        assert_eq!(defaults.name_size.px(), 32.0);
    }
}
