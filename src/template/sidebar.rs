//! The sidebar template: education and skills in the side column, English
//! section headings, header inside the main column.

use crate::dom::{Display, Edges, Node, TextAlign};
use crate::record::{CVRecord, Experience};
use crate::style::{Color, StyleConfig};

use super::{
    contact_line, description_lines, display_name, format_period, level_fraction, license_text,
    photo_node,
};

const SIDEBAR_FRAC: f32 = 0.35;

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
        .with_child(side_column(record, style))
        .with_child(main_column(record, style))
}

fn heading(text: &str, color: Color, style: &StyleConfig) -> Node {
    Node::text("h2", text).styled(|s| {
        s.color = Some(color);
        s.font_family = Some(style.heading_font.label().to_string());
        s.font_size_px = Some(style.heading_size.px());
        s.bold = true;
        s.margin_bottom_px = style.content_margin.px();
    })
}

fn side_section(title: &str, style: &StyleConfig, children: Vec<Node>) -> Node {
    Node::new("section")
        .styled(|s| s.margin_bottom_px = style.block_margin.px())
        .with_child(heading(title, style.sidebar_title_color, style))
        .with_children(children)
}

fn side_text(text: &str, style: &StyleConfig) -> Node {
    Node::text("p", text).styled(|s| {
        s.color = Some(style.sidebar_text_color);
        s.margin_bottom_px = 4.0;
    })
}

fn side_column(record: &CVRecord, style: &StyleConfig) -> Node {
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

    let p = &record.personal;
    let license = license_text(&p.license, style);
    let contact_entries: [(&str, &str); 4] = [
        ("📧", p.email.as_str()),
        ("📞", p.phone.as_str()),
        ("📍", p.address.as_str()),
        ("🚗", license),
    ];
    let contacts: Vec<Node> = contact_entries
        .iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(icon, text)| side_text(&contact_line(icon, text, style), style))
        .collect();
    if !contacts.is_empty() {
        column = column.with_child(side_section("Contact", style, contacts));
    }

    let formations: Vec<Node> = record
        .formations
        .iter()
        .filter(|f| !f.title.trim().is_empty())
        .map(|f| {
            Node::new("div")
                .styled(|s| s.margin_bottom_px = style.content_margin.px())
                .with_child(Node::text("p", f.title.trim()).styled(|s| {
                    s.color = Some(style.sidebar_label_color);
                    s.bold = true;
                }))
                .with_child(side_text(&format_period(&f.period, style.date_format), style))
        })
        .collect();
    if !formations.is_empty() {
        column = column.with_child(side_section("Education", style, formations));
    }

    let skills: Vec<Node> = record
        .skills
        .soft_skills
        .iter()
        .chain(record.skills.hard_skills.iter())
        .filter(|i| !i.trim().is_empty())
        .map(|i| side_text(i, style))
        .collect();
    if !skills.is_empty() {
        column = column.with_child(side_section("Skills", style, skills));
    }

    let languages: Vec<Node> = record
        .languages
        .iter()
        .filter(|l| !l.name.trim().is_empty())
        .map(|l| {
            Node::new("div")
                .styled(|s| s.margin_bottom_px = style.content_margin.px())
                .with_child(side_text(
                    &format!("{} ({})", l.name, l.level.label()),
                    style,
                ))
                .with_child(
                    Node::new("div")
                        .with_class("level-track")
                        .styled(|s| {
                            s.height_px = Some(6.0);
                            s.border_radius_px = 3.0;
                            s.background = Some(Color::rgb(0xd1, 0xd5, 0xdb));
                        })
                        .with_child(Node::new("div").with_class("level-fill").styled(|s| {
                            s.width_frac = Some(level_fraction(l.level));
                            s.height_px = Some(6.0);
                            s.border_radius_px = 3.0;
                            s.background = Some(style.level_bar_color);
                        })),
                )
        })
        .collect();
    if !languages.is_empty() {
        column = column.with_child(side_section("Langues", style, languages));
    }

    let certifications: Vec<Node> = record
        .certifications
        .iter()
        .filter(|c| !c.name.trim().is_empty())
        .map(|c| side_text(&c.name, style))
        .collect();
    if !certifications.is_empty() {
        column = column.with_child(side_section("Certification", style, certifications));
    }

    column
}

fn main_column(record: &CVRecord, style: &StyleConfig) -> Node {
    let mut column = Node::new("main").with_class("main").styled(|s| {
        s.width_frac = Some(1.0 - SIDEBAR_FRAC);
        s.padding = Edges::symmetric(style.vertical_padding.px(), style.horizontal_padding.px());
    });

    let mut header = Node::new("header")
        .styled(|s| {
            s.margin_bottom_px = style.block_margin.px();
            s.border_bottom = Some((2.0, style.name_color));
        })
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
        header = header.with_child(Node::text("p", job_title).styled(|s| {
            s.color = Some(style.job_title_color);
            s.font_size_px = Some(style.body_size.px() + 2.0);
        }));
    }
    column = column.with_child(header);

    let profile = record.personal.profile.trim();
    if !profile.is_empty() {
        column = column.with_child(main_section(
            "Profile",
            style,
            vec![Node::text("p", profile).styled(|s| {
                if style.justify_profile {
                    s.text_align = TextAlign::Justify;
                }
            })],
        ));
    }

    let experiences: Vec<Node> = record
        .experiences
        .iter()
        .filter(|e| !e.title.trim().is_empty())
        .map(|e| experience_entry(e, style))
        .collect();
    if !experiences.is_empty() {
        column = column.with_child(main_section("Work Experience", style, experiences));
    }

    let interests: Vec<Node> = record
        .interests
        .iter()
        .filter(|i| !i.trim().is_empty())
        .map(|i| Node::text("p", i))
        .collect();
    if !interests.is_empty() {
        column = column.with_child(main_section("Centres d'intérêt", style, interests));
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
        column = column.with_child(main_section("References", style, references));
    }

    column
}

fn main_section(title: &str, style: &StyleConfig, children: Vec<Node>) -> Node {
    Node::new("section")
        .styled(|s| s.margin_bottom_px = style.block_margin.px())
        .with_child(heading(title, style.section_title_color, style))
        .with_children(children)
}

fn experience_entry(exp: &Experience, style: &StyleConfig) -> Node {
    let mut node = Node::new("article")
        .styled(|s| {
            s.margin_bottom_px = style.content_margin.px();
            if style.show_timeline {
                s.padding.left = 12.0;
            }
        })
        .with_child(Node::text("h3", exp.title.trim()).styled(|s| s.bold = true));
    let company = exp.company.trim();
    let period = format_period(&exp.period, style.date_format);
    let subtitle = match (company.is_empty(), period.trim().is_empty()) {
        (false, false) => format!("{company} | {period}"),
        (false, true) => company.to_string(),
        (true, false) => period,
        (true, true) => String::new(),
    };
    if !subtitle.is_empty() {
        node = node.with_child(Node::text("p", &subtitle).styled(|s| {
            s.color = Some(style.company_color);
            s.font_size_px = Some(style.body_size.px() - 2.0);
        }));
    }
    node.with_children(
        description_lines(&exp.description)
            .iter()
            .map(|line| Node::text("p", line)),
    )
}
