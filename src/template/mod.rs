//! CV template rendering.
//!
//! A template is a pure function from a record and a style configuration to
//! an element tree. Rendering never mutates its inputs and never touches the
//! document; the caller decides where to mount the result.
//!
//! Every template root carries the [`MARKER_CLASS`] class and the
//! [`MARKER_ATTR`] attribute so the export pipeline can locate it without
//! knowing which template produced it. Subtrees that must not appear in the
//! exported document carry [`EXPORT_EXCLUDE_CLASS`].

mod classic;
mod sidebar;

use crate::dom::Node;
use crate::error::{Error, Result};
use crate::record::{CVRecord, Proficiency};
use crate::style::{DateFormat, StyleConfig};

/// Class present on every template root.
pub const MARKER_CLASS: &str = "cv-template";
/// Attribute present on every template root; its value names the template.
pub const MARKER_ATTR: &str = "data-cv-template";
/// Class marking subtrees that are dropped from exports.
pub const EXPORT_EXCLUDE_CLASS: &str = "no-export";

/// The available templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    /// Light sidebar, French section headings
    Classic,
    /// Dark sidebar, English section headings
    Sidebar,
}

impl TemplateId {
    /// All templates, in gallery order.
    pub const ALL: [TemplateId; 2] = [TemplateId::Classic, TemplateId::Sidebar];

    /// Resolve a 1-based gallery index.
    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            1 => Ok(TemplateId::Classic),
            2 => Ok(TemplateId::Sidebar),
            other => Err(Error::UnknownTemplate(other)),
        }
    }

    /// The 1-based gallery index.
    pub fn index(&self) -> u8 {
        match self {
            TemplateId::Classic => 1,
            TemplateId::Sidebar => 2,
        }
    }

    /// Stable name used as the marker attribute value.
    pub fn name(&self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::Sidebar => "sidebar",
        }
    }
}

/// Render `record` with `style` using the given template.
pub fn render(id: TemplateId, record: &CVRecord, style: &StyleConfig) -> Node {
    let body = match id {
        TemplateId::Classic => classic::render(record, style),
        TemplateId::Sidebar => sidebar::render(record, style),
    };
    body.with_class(MARKER_CLASS)
        .with_class(&format!("cv-template-{}", id.index()))
        .with_attr(MARKER_ATTR, id.name())
}

/// First name for display, with a neutral fallback when blank.
pub(crate) fn display_first_name(record: &CVRecord) -> &str {
    let first = record.personal.first_name.trim();
    if first.is_empty() {
        "Votre"
    } else {
        first
    }
}

/// Last name for display, with a neutral fallback when blank.
pub(crate) fn display_last_name(record: &CVRecord) -> &str {
    let last = record.personal.last_name.trim();
    if last.is_empty() {
        "Nom"
    } else {
        last
    }
}

/// Full display name, honoring the uppercase toggle.
pub(crate) fn display_name(record: &CVRecord, style: &StyleConfig) -> String {
    let name = format!(
        "{} {}",
        display_first_name(record),
        display_last_name(record)
    );
    if style.name_uppercase {
        name.to_uppercase()
    } else {
        name
    }
}

/// License line, honoring the abbreviation toggle.
pub(crate) fn license_text<'a>(license: &'a str, style: &StyleConfig) -> &'a str {
    if style.reduce_license_display {
        "Permis B"
    } else {
        license
    }
}

/// Split a free-text description into bullet lines.
///
/// Lines are split on `\n`; blank lines are dropped; each remaining line is
/// prefixed with a bullet unless it already starts with one.
pub(crate) fn description_lines(description: &str) -> Vec<String> {
    description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.starts_with('•') {
                line.to_string()
            } else {
                format!("• {line}")
            }
        })
        .collect()
}

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

fn month_number(word: &str) -> Option<usize> {
    let lower = word.to_lowercase();
    MONTHS.iter().position(|m| *m == lower).map(|i| i + 1)
}

fn is_year(token: &str) -> bool {
    token.len() == 4 && token.chars().all(|c| c.is_ascii_digit())
}

/// Reformat a free-text period according to the configured date format.
///
/// Recognizes French month names and `MM/YYYY` tokens; anything else passes
/// through unchanged. [`DateFormat::AsEntered`] is the identity.
pub(crate) fn format_period(period: &str, format: DateFormat) -> String {
    match format {
        DateFormat::AsEntered => period.to_string(),
        DateFormat::YearOnly => {
            let years: Vec<&str> = period
                .split(|c: char| !c.is_ascii_digit())
                .filter(|t| is_year(t))
                .collect();
            if years.is_empty() {
                period.to_string()
            } else {
                years.join(" - ")
            }
        }
        DateFormat::MonthSlashYear => {
            let tokens: Vec<&str> = period.split_whitespace().collect();
            let mut out: Vec<String> = Vec::with_capacity(tokens.len());
            let mut i = 0;
            while i < tokens.len() {
                match month_number(tokens[i]) {
                    Some(month) if i + 1 < tokens.len() && is_year(tokens[i + 1]) => {
                        out.push(format!("{:02}/{}", month, tokens[i + 1]));
                        i += 2;
                    }
                    _ => {
                        out.push(tokens[i].to_string());
                        i += 1;
                    }
                }
            }
            out.join(" ")
        }
        DateFormat::MonthNameYear => {
            let rewrite = |token: &str| -> String {
                if let Some((mm, yyyy)) = token.split_once('/') {
                    if yyyy.len() == 4 && is_year(yyyy) {
                        if let Ok(m) = mm.parse::<usize>() {
                            if (1..=12).contains(&m) {
                                let month = MONTHS[m - 1];
                                let mut name = month.to_string();
                                if let Some(first) = name.get(..1) {
                                    let cap = first.to_uppercase();
                                    name.replace_range(..1, &cap);
                                }
                                return format!("{name} {yyyy}");
                            }
                        }
                    }
                }
                token.to_string()
            };
            period
                .split_whitespace()
                .map(rewrite)
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

/// Fraction of the level bar filled for a proficiency level.
pub(crate) fn level_fraction(level: Proficiency) -> f32 {
    match level {
        Proficiency::Debutant => 0.25,
        Proficiency::NiveauScolaire => 0.4,
        Proficiency::Intermediaire => 0.55,
        Proficiency::Courant => 0.7,
        Proficiency::Bilingue => 0.9,
        Proficiency::Natif => 1.0,
    }
}

/// Photo block shared by both templates.
///
/// Renders an image element when a photo is present, otherwise a placeholder
/// with the same dimensions and corner treatment so the layout is identical
/// either way.
pub(crate) fn photo_node(photo: &str, style: &StyleConfig) -> Node {
    let size = 128.0;
    let radius = if style.photo_rounded { size / 2.0 } else { 8.0 };
    if photo.trim().is_empty() {
        Node::new("div").with_class("photo-placeholder").styled(|s| {
            s.width_px = Some(size);
            s.height_px = Some(size);
            s.border_radius_px = radius;
            s.background = Some(crate::style::Color::rgb(0xd1, 0xd5, 0xdb));
        })
    } else {
        Node::new("img")
            .with_class("photo")
            .with_attr("src", photo)
            .styled(|s| {
                s.width_px = Some(size);
                s.height_px = Some(size);
                s.border_radius_px = radius;
            })
    }
}

/// Strip the leading icon glyph from a contact line when icons are hidden.
pub(crate) fn contact_line(icon: &str, text: &str, style: &StyleConfig) -> String {
    if style.hide_info_icons {
        text.to_string()
    } else {
        format!("{icon} {text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(TemplateId::from_index(1).unwrap(), TemplateId::Classic);
        assert_eq!(TemplateId::from_index(2).unwrap(), TemplateId::Sidebar);
        assert!(matches!(
            TemplateId::from_index(3),
            Err(Error::UnknownTemplate(3))
        ));
        assert!(TemplateId::from_index(0).is_err());
    }

    #[test]
    fn test_index_round_trip() {
        for id in TemplateId::ALL {
            assert_eq!(TemplateId::from_index(id.index()).unwrap(), id);
        }
    }

    #[test]
    fn test_description_lines_bullets() {
        let lines = description_lines("first\n\n• already bulleted\n  third  \n");
        assert_eq!(
            lines,
            vec!["• first", "• already bulleted", "• third"]
        );
    }

    #[test]
    fn test_description_lines_empty() {
        assert!(description_lines("").is_empty());
        assert!(description_lines("\n \n").is_empty());
    }

    #[test]
    fn test_display_name_fallbacks() {
        let record = CVRecord::new();
        let style = StyleConfig::default();
        assert_eq!(display_name(&record, &style), "Votre Nom");
    }

    #[test]
    fn test_display_name_uppercase() {
        let mut record = CVRecord::new();
        record.personal.first_name = "Sacha".into();
        record.personal.last_name = "Diarra".into();
        let style = StyleConfig {
            name_uppercase: true,
            ..StyleConfig::default()
        };
        assert_eq!(display_name(&record, &style), "SACHA DIARRA");
    }

    #[test]
    fn test_format_period_as_entered() {
        assert_eq!(
            format_period("janvier 2020 - mars 2022", DateFormat::AsEntered),
            "janvier 2020 - mars 2022"
        );
    }

    #[test]
    fn test_format_period_year_only() {
        assert_eq!(
            format_period("janvier 2020 - mars 2022", DateFormat::YearOnly),
            "2020 - 2022"
        );
        assert_eq!(
            format_period("en cours", DateFormat::YearOnly),
            "en cours"
        );
    }

    #[test]
    fn test_format_period_month_slash_year() {
        assert_eq!(
            format_period("janvier 2020 - mars 2022", DateFormat::MonthSlashYear),
            "01/2020 - 03/2022"
        );
    }

    #[test]
    fn test_format_period_month_name_year() {
        assert_eq!(
            format_period("01/2020 - 03/2022", DateFormat::MonthNameYear),
            "Janvier 2020 - Mars 2022"
        );
    }

    #[test]
    fn test_license_text() {
        let style = StyleConfig::default();
        assert_eq!(license_text("Permis B - véhicule personnel", &style), "Permis B - véhicule personnel");
        let reduced = StyleConfig {
            reduce_license_display: true,
            ..StyleConfig::default()
        };
        assert_eq!(license_text("Permis B - véhicule personnel", &reduced), "Permis B");
    }

    #[test]
    fn test_photo_placeholder_matches_photo_geometry() {
        let style = StyleConfig::default();
        let with_photo = photo_node("data:image/png;base64,AAAA", &style);
        let placeholder = photo_node("", &style);
        assert_eq!(with_photo.tag, "img");
        assert_eq!(placeholder.tag, "div");
        assert_eq!(with_photo.style.width_px, placeholder.style.width_px);
        assert_eq!(with_photo.style.height_px, placeholder.style.height_px);
        assert_eq!(
            with_photo.style.border_radius_px,
            placeholder.style.border_radius_px
        );
    }

    #[test]
    fn test_photo_corner_treatment() {
        let rounded = StyleConfig::default();
        assert_eq!(photo_node("", &rounded).style.border_radius_px, 64.0);
        let soft = StyleConfig {
            photo_rounded: false,
            ..StyleConfig::default()
        };
        assert_eq!(photo_node("", &soft).style.border_radius_px, 8.0);
    }

    #[test]
    fn test_render_carries_markers() {
        let record = CVRecord::example();
        let style = StyleConfig::default();
        for id in TemplateId::ALL {
            let root = render(id, &record, &style);
            assert!(root.has_class(MARKER_CLASS));
            assert!(root.has_class(&format!("cv-template-{}", id.index())));
            assert_eq!(root.attr(MARKER_ATTR), Some(id.name()));
        }
    }
}
