//! The classic template: light sidebar on the left, French section headings.

use crate::dom::{Display, Edges, Node, TextAlign};
use crate::record::{CVRecord, Experience, Formation};
use crate::style::{Color, StyleConfig};

use super::{
    contact_line, description_lines, display_name, format_period, level_fraction, license_text,
    photo_node,
};

const SIDEBAR_FRAC: f32 = 0.32;

/// Render the full template tree. Pure; never mutates its inputs.
pub(super) fn render(record: &CVRecord, style: &StyleConfig) -> Node {
    Node::new("div")
        .styled(|s| {
            s.display = Display::FlexRow;
            s.background = Some(Color::WHITE);
            s.min_height_px = Some(1123.0);
            s.font_family = Some(style.body_font.label().to_string());
            s.font_size_px = Some(style.body_size.px());
        })
        .with_child(sidebar(record, style))
        .with_child(main_column(record, style))
}

fn section_title(text: &str, color: Color, style: &StyleConfig) -> Node {
    Node::text("h2", text).styled(|s| {
        s.color = Some(color);
        s.font_family = Some(style.heading_font.label().to_string());
        s.font_size_px = Some(style.heading_size.px());
        s.bold = true;
        s.margin_bottom_px = style.content_margin.px();
        s.border_bottom = Some((1.0, color));
    })
}

fn sidebar_section(title: &str, style: &StyleConfig, children: Vec<Node>) -> Node {
    Node::new("section")
        .styled(|s| s.margin_bottom_px = style.block_margin.px())
        .with_child(section_title(title, style.sidebar_title_color, style))
        .with_children(children)
}

fn sidebar(record: &CVRecord, style: &StyleConfig) -> Node {
    let mut column = Node::new("aside").with_class("sidebar").styled(|s| {
        s.width_frac = Some(SIDEBAR_FRAC);
        s.background = Some(style.sidebar_bg_color);
        s.color = Some(style.sidebar_text_color);
        s.padding = Edges::symmetric(style.vertical_padding.px(), style.horizontal_padding.px());
    });

    column = column.with_child(
        Node::new("div")
            .styled(|s| {
                s.margin_bottom_px = style.block_margin.px();
                s.text_align = TextAlign::Center;
            })
            .with_child(photo_node(&record.personal.photo, style)),
    );

    let contacts = contact_lines(record, style);
    if !contacts.is_empty() {
        column = column.with_child(sidebar_section("Informations", style, contacts));
    }

    let languages: Vec<Node> = record
        .languages
        .iter()
        .filter(|l| !l.name.trim().is_empty())
        .map(|l| {
            Node::new("div")
                .styled(|s| s.margin_bottom_px = style.content_margin.px())
                .with_child(label_line(&l.name, style))
                .with_child(level_bar(level_fraction(l.level), style))
        })
        .collect();
    if !languages.is_empty() {
        column = column.with_child(sidebar_section("Langues", style, languages));
    }

    let mut skills = Vec::new();
    skills.extend(skill_list(&record.skills.soft_skills, style));
    skills.extend(skill_list(&record.skills.hard_skills, style));
    if !skills.is_empty() {
        column = column.with_child(sidebar_section("Compétences", style, skills));
    }

    let certifications: Vec<Node> = record
        .certifications
        .iter()
        .filter(|c| !c.name.trim().is_empty())
        .map(|c| body_line(&c.name, style))
        .collect();
    if !certifications.is_empty() {
        column = column.with_child(sidebar_section("Certifications", style, certifications));
    }

    let interests: Vec<Node> = record
        .interests
        .iter()
        .filter(|i| !i.trim().is_empty())
        .map(|i| body_line(i, style))
        .collect();
    if !interests.is_empty() {
        column = column.with_child(sidebar_section("Centres d'intérêt", style, interests));
    }

    column
}

fn contact_lines(record: &CVRecord, style: &StyleConfig) -> Vec<Node> {
    let p = &record.personal;
    let license = license_text(&p.license, style);
    let entries: [(&str, &str); 5] = [
        ("📧", p.email.as_str()),
        ("📞", p.phone.as_str()),
        ("📍", p.address.as_str()),
        ("🎂", p.age.as_str()),
        ("🚗", license),
    ];
    entries
        .iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(icon, text)| {
            let line = contact_line(icon, text, style);
            if style.line_break_after_labels {
                body_line(&line, style)
            } else {
                body_line(&line, style).styled(|s| s.margin_bottom_px = 0.0)
            }
        })
        .collect()
}

fn label_line(text: &str, style: &StyleConfig) -> Node {
    Node::text("p", text).styled(|s| {
        s.color = Some(style.sidebar_label_color);
        s.bold = true;
    })
}

fn body_line(text: &str, style: &StyleConfig) -> Node {
    Node::text("p", text).styled(|s| {
        s.color = Some(style.sidebar_text_color);
        s.margin_bottom_px = 4.0;
    })
}

fn level_bar(fraction: f32, style: &StyleConfig) -> Node {
    Node::new("div")
        .with_class("level-track")
        .styled(|s| {
            s.height_px = Some(6.0);
            s.border_radius_px = 3.0;
            s.background = Some(Color::rgb(0xd1, 0xd5, 0xdb));
        })
        .with_child(Node::new("div").with_class("level-fill").styled(|s| {
            s.width_frac = Some(fraction);
            s.height_px = Some(6.0);
            s.border_radius_px = 3.0;
            s.background = Some(style.level_bar_color);
        }))
}

fn skill_list(items: &[String], style: &StyleConfig) -> Vec<Node> {
    items
        .iter()
        .filter(|i| !i.trim().is_empty())
        .map(|i| body_line(i, style))
        .collect()
}

fn main_column(record: &CVRecord, style: &StyleConfig) -> Node {
    let mut column = Node::new("main").with_class("main").styled(|s| {
        s.width_frac = Some(1.0 - SIDEBAR_FRAC);
        s.padding = Edges::symmetric(style.vertical_padding.px(), style.horizontal_padding.px());
    });

    column = column.with_child(header(record, style));

    let profile = record.personal.profile.trim();
    if !profile.is_empty() {
        column = column.with_child(
            main_section(
                "Profil",
                style,
                vec![Node::text("p", profile).styled(|s| {
                    if style.justify_profile {
                        s.text_align = TextAlign::Justify;
                    }
                })],
            ),
        );
    }

    let experiences: Vec<Node> = record
        .experiences
        .iter()
        .filter(|e| !e.title.trim().is_empty())
        .map(|e| experience_entry(e, style))
        .collect();
    if !experiences.is_empty() {
        column = column.with_child(main_section(
            "Expériences professionnelles",
            style,
            experiences,
        ));
    }

    let formations: Vec<Node> = record
        .formations
        .iter()
        .filter(|f| !f.title.trim().is_empty())
        .map(|f| formation_entry(f, style))
        .collect();
    if !formations.is_empty() {
        column = column.with_child(main_section("Formations", style, formations));
    }

    let references: Vec<Node> = record
        .references
        .iter()
        .filter(|r| !r.name.trim().is_empty())
        .map(|r| {
            Node::new("div")
                .styled(|s| s.margin_bottom_px = style.content_margin.px())
                .with_child(Node::text("p", &r.name).styled(|s| s.bold = true))
                .with_child(Node::text("p", &r.title).styled(|s| {
                    s.color = Some(style.company_color);
                }))
        })
        .collect();
    if !references.is_empty() {
        column = column.with_child(main_section("Références", style, references));
    }

    column
}

fn header(record: &CVRecord, style: &StyleConfig) -> Node {
    let mut node = Node::new("header")
        .styled(|s| s.margin_bottom_px = style.block_margin.px())
        .with_child(
            Node::text("h1", &display_name(record, style)).styled(|s| {
                s.color = Some(style.name_color);
                s.font_family = Some(style.heading_font.label().to_string());
                s.font_size_px = Some(style.name_size.px());
                s.bold = true;
            }),
        );
    let job_title = record.personal.job_title.trim();
    if !job_title.is_empty() {
        node = node.with_child(Node::text("p", job_title).styled(|s| {
            s.color = Some(style.job_title_color);
            s.font_size_px = Some(style.body_size.px() + 2.0);
        }));
    }
    node
}

fn main_section(title: &str, style: &StyleConfig, children: Vec<Node>) -> Node {
    Node::new("section")
        .styled(|s| s.margin_bottom_px = style.block_margin.px())
        .with_child(section_title(title, style.section_title_color, style))
        .with_children(children)
}

fn entry_frame(style: &StyleConfig) -> Node {
    let mut node = Node::new("article");
    node.style.margin_bottom_px = style.content_margin.px();
    if style.show_timeline {
        node.style.padding.left = 12.0;
        node = node.with_class("timeline");
    }
    node
}

fn experience_entry(exp: &Experience, style: &StyleConfig) -> Node {
    let mut node = entry_frame(style)
        .with_child(Node::text("h3", exp.title.trim()).styled(|s| s.bold = true));
    let company = exp.company.trim();
    if !company.is_empty() {
        node = node.with_child(Node::text("p", company).styled(|s| {
            s.color = Some(style.company_color);
        }));
    }
    node = node.with_child(period_line(&exp.period, style));
    node.with_children(
        description_lines(&exp.description)
            .iter()
            .map(|line| Node::text("p", line)),
    )
}

fn formation_entry(formation: &Formation, style: &StyleConfig) -> Node {
    let node = entry_frame(style)
        .with_child(Node::text("h3", formation.title.trim()).styled(|s| s.bold = true))
        .with_child(period_line(&formation.period, style));
    node.with_children(
        description_lines(&formation.description)
            .iter()
            .map(|line| Node::text("p", line)),
    )
}

fn period_line(period: &str, style: &StyleConfig) -> Node {
    Node::text("p", &format_period(period, style.date_format)).styled(|s| {
        s.color = Some(style.job_title_color);
        s.font_size_px = Some(style.body_size.px() - 2.0);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::new_entry_id;
    use crate::style::DateFormat;

    #[test]
    fn test_blank_entries_are_skipped() {
        let mut record = CVRecord::example();
        record.experiences.push(Experience {
            id: new_entry_id(),
            title: "   ".into(),
            company: "Ghost Corp".into(),
            period: "2020".into(),
            description: "should not appear".into(),
        });
        let root = render(&record, &StyleConfig::default());
        assert!(!root.text_content().contains("Ghost Corp"));
    }

    #[test]
    fn test_empty_record_has_no_sections() {
        let root = render(&CVRecord::new(), &StyleConfig::default());
        let text = root.text_content();
        assert!(!text.contains("Expériences"));
        assert!(!text.contains("Formations"));
        assert!(!text.contains("Langues"));
        // The header fallback is always present
        assert!(text.contains("Votre Nom"));
    }

    #[test]
    fn test_example_record_renders_all_sections() {
        let root = render(&CVRecord::example(), &StyleConfig::default());
        let text = root.text_content();
        for heading in [
            "Informations",
            "Langues",
            "Compétences",
            "Profil",
            "Expériences professionnelles",
            "Formations",
        ] {
            assert!(text.contains(heading), "missing section {heading}");
        }
    }

    #[test]
    fn test_bullets_applied_to_description() {
        let mut record = CVRecord::new();
        record.experiences.push(Experience {
            id: new_entry_id(),
            title: "Dev".into(),
            company: String::new(),
            period: String::new(),
            description: "built things\n• shipped things".into(),
        });
        let text = render(&record, &StyleConfig::default()).text_content();
        assert!(text.contains("• built things"));
        assert!(text.contains("• shipped things"));
        assert!(!text.contains("• • shipped things"));
    }

    #[test]
    fn test_hide_info_icons_keeps_text() {
        let mut record = CVRecord::new();
        record.personal.email = "sacha@example.com".into();
        let style = StyleConfig {
            hide_info_icons: true,
            ..StyleConfig::default()
        };
        let text = render(&record, &style).text_content();
        assert!(text.contains("sacha@example.com"));
        assert!(!text.contains('📧'));
    }

    #[test]
    fn test_date_format_flows_to_periods() {
        let mut record = CVRecord::new();
        record.experiences.push(Experience {
            id: new_entry_id(),
            title: "Dev".into(),
            company: String::new(),
            period: "janvier 2020 - mars 2022".into(),
            description: String::new(),
        });
        let style = StyleConfig {
            date_format: DateFormat::YearOnly,
            ..StyleConfig::default()
        };
        let text = render(&record, &style).text_content();
        assert!(text.contains("2020 - 2022"));
        assert!(!text.contains("janvier"));
    }

    #[test]
    fn test_render_is_pure() {
        let record = CVRecord::example();
        let style = StyleConfig::default();
        let before = record.clone();
        let first = render(&record, &style);
        let second = render(&record, &style);
        assert_eq!(first, second);
        assert_eq!(record, before);
    }
}
