//! Integration tests for template rendering.
//!
//! Exercises both template variants through the public API: marker
//! contract, section skipping, bullet formatting, and style flow.

use cvforge::dom::Node;
use cvforge::record::{new_entry_id, CVRecord, Experience, Skills};
use cvforge::style::{StyleConfig, StyleOverrides};
use cvforge::template::{render, TemplateId, EXPORT_EXCLUDE_CLASS, MARKER_ATTR, MARKER_CLASS};

fn count_nodes(root: &Node, pred: impl Fn(&Node) -> bool) -> usize {
    let mut count = 0;
    root.walk(&mut |n| {
        if pred(n) {
            count += 1;
        }
    });
    count
}

#[test]
fn test_both_templates_carry_the_marker_contract() {
    let record = CVRecord::example();
    let style = StyleConfig::default();
    for id in TemplateId::ALL {
        let root = render(id, &record, &style);
        assert!(root.has_class(MARKER_CLASS), "{id:?} missing marker class");
        assert_eq!(root.attr(MARKER_ATTR), Some(id.name()));
    }
}

#[test]
fn test_templates_render_example_record_content() {
    let record = CVRecord::example();
    let style = StyleConfig::default();
    for id in TemplateId::ALL {
        let text = render(id, &record, &style).text_content();
        assert!(text.contains("Sacha"), "{id:?} missing first name");
        assert!(text.contains("Diarra"), "{id:?} missing last name");
        assert!(
            text.contains(&record.personal.email),
            "{id:?} missing email"
        );
    }
}

#[test]
fn test_empty_sections_are_omitted_entirely() {
    let record = CVRecord::new();
    let style = StyleConfig::default();
    for id in TemplateId::ALL {
        let root = render(id, &record, &style);
        // No section element renders for empty collections
        assert_eq!(count_nodes(&root, |n| n.tag == "section"), 0);
    }
}

#[test]
fn test_whitespace_only_entries_are_skipped() {
    let mut record = CVRecord::new();
    record.experiences.push(Experience {
        id: new_entry_id(),
        title: "  \t ".into(),
        company: "Invisible Inc".into(),
        period: "2021".into(),
        description: String::new(),
    });
    for id in TemplateId::ALL {
        let text = render(id, &record, &style_default()).text_content();
        assert!(!text.contains("Invisible Inc"), "{id:?} rendered blank entry");
    }
}

#[test]
fn test_description_bullets_apply_once_per_line() {
    let mut record = CVRecord::new();
    record.experiences.push(Experience {
        id: new_entry_id(),
        title: "Dev".into(),
        company: String::new(),
        period: String::new(),
        description: "a\nb\n• c".into(),
    });
    for id in TemplateId::ALL {
        let root = render(id, &record, &style_default());
        let bullets = count_nodes(&root, |n| {
            n.text.as_deref().is_some_and(|t| t.starts_with('•'))
        });
        assert_eq!(bullets, 3, "{id:?} bullet count");
        assert!(!root.text_content().contains("• •"));
    }
}

#[test]
fn test_comma_separated_skills_render_as_entries() {
    use cvforge::record::split_list;
    let mut record = CVRecord::new();
    record.skills = Skills {
        soft_skills: split_list(" Team spirit ,  , Organized "),
        hard_skills: Vec::new(),
    };
    assert_eq!(record.skills.soft_skills, vec!["Team spirit", "Organized"]);
    for id in TemplateId::ALL {
        let text = render(id, &record, &style_default()).text_content();
        assert!(text.contains("Team spirit"), "{id:?} missing skill");
        assert!(text.contains("Organized"), "{id:?} missing skill");
    }
}

#[test]
fn test_style_overrides_flow_through_render() {
    let record = CVRecord::example();
    let style = StyleConfig::default().merged(&StyleOverrides {
        name_uppercase: Some(true),
        ..StyleOverrides::default()
    });
    for id in TemplateId::ALL {
        let text = render(id, &record, &style).text_content();
        assert!(text.contains("SACHA DIARRA"), "{id:?} name not uppercased");
    }
}

#[test]
fn test_templates_never_mark_content_excluded() {
    let record = CVRecord::example();
    for id in TemplateId::ALL {
        let root = render(id, &record, &style_default());
        assert_eq!(
            count_nodes(&root, |n| n.has_class(EXPORT_EXCLUDE_CLASS)),
            0,
            "{id:?} marked CV content as excluded"
        );
    }
}

#[test]
fn test_templates_differ_in_structure() {
    let record = CVRecord::example();
    let style = StyleConfig::default();
    let classic = render(TemplateId::Classic, &record, &style);
    let sidebar = render(TemplateId::Sidebar, &record, &style);
    assert_ne!(classic, sidebar);
}

fn style_default() -> StyleConfig {
    StyleConfig::default()
}
