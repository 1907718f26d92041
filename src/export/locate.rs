//! Export-target discovery.
//!
//! Finds the mounted template subtree to capture. The host page wraps the
//! template in preview chrome (scaled containers, cards, tab panels), so
//! discovery must not depend on that structure. Strategies run in a fixed
//! order and the first candidate with actual content wins:
//!
//! 1. the reserved marker class placed by the template renderer (first in
//!    document order when several match),
//! 2. the reserved marker attribute,
//! 3. the element id supplied by the caller,
//! 4. the first element child of the known preview container.
//!
//! A candidate with no text and no children is empty markup and does not
//! count as found.

use crate::dom::{Document, Node};
use crate::error::{Error, Result};
use crate::template::{MARKER_ATTR, MARKER_CLASS};

/// Id of the preview container used by the structural fallback.
pub const PREVIEW_CONTAINER_ID: &str = "cv-preview-container";

/// Locate the subtree to export.
pub fn locate<'a>(document: &'a Document, target_id: &str) -> Result<&'a Node> {
    let candidates = [
        document.find_by_class(MARKER_CLASS),
        document.find_by_attr(MARKER_ATTR),
        document.find_by_id(target_id),
        document
            .find_by_id(PREVIEW_CONTAINER_ID)
            .and_then(|container| container.children.first()),
    ];

    for candidate in candidates.into_iter().flatten() {
        if has_content(candidate) {
            return Ok(candidate);
        }
        log::debug!(
            "skipping empty export candidate <{}> (no renderable content)",
            candidate.tag
        );
    }

    Err(Error::NotFound(format!(
        "no CV element with content (marker '{MARKER_CLASS}', id '{target_id}', \
         or container '{PREVIEW_CONTAINER_ID}')"
    )))
}

/// Empty markup is treated as not found, not as an empty success.
fn has_content(node: &Node) -> bool {
    node.has_renderable_text() || !node.children.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CVRecord;
    use crate::style::StyleConfig;
    use crate::template::{render, TemplateId};

    fn mounted_template() -> Node {
        render(
            TemplateId::Classic,
            &CVRecord::example(),
            &StyleConfig::default(),
        )
    }

    #[test]
    fn test_empty_document_is_not_found() {
        let doc = Document::new();
        assert!(matches!(
            locate(&doc, "anything"),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_marker_class_wins() {
        let mut doc = Document::new();
        doc.append(Node::new("div").with_id("by-id").with_child(Node::text("p", "decoy")));
        doc.append(mounted_template());
        let found = locate(&doc, "by-id").unwrap();
        assert!(found.has_class(MARKER_CLASS));
    }

    #[test]
    fn test_duplicate_markers_resolve_to_first_in_document_order() {
        let mut doc = Document::new();
        let first = mounted_template().with_id("first");
        let second = mounted_template().with_id("second");
        doc.append(first);
        doc.append(second);
        let found = locate(&doc, "ignored").unwrap();
        assert_eq!(found.id.as_deref(), Some("first"));
    }

    #[test]
    fn test_caller_id_fallback() {
        let mut doc = Document::new();
        doc.append(
            Node::new("div")
                .with_id("custom-root")
                .with_child(Node::text("p", "content")),
        );
        let found = locate(&doc, "custom-root").unwrap();
        assert_eq!(found.id.as_deref(), Some("custom-root"));
    }

    #[test]
    fn test_preview_container_fallback() {
        let mut doc = Document::new();
        doc.append(
            Node::new("div")
                .with_id(PREVIEW_CONTAINER_ID)
                .with_child(Node::new("div").with_child(Node::text("p", "cv body"))),
        );
        let found = locate(&doc, "missing").unwrap();
        assert!(found.has_renderable_text());
    }

    #[test]
    fn test_empty_marker_falls_through() {
        let mut doc = Document::new();
        // Marker present but empty: discovery must keep looking
        doc.append(Node::new("div").with_class(MARKER_CLASS));
        doc.append(
            Node::new("div")
                .with_id("real-cv")
                .with_child(Node::text("p", "content")),
        );
        let found = locate(&doc, "real-cv").unwrap();
        assert_eq!(found.id.as_deref(), Some("real-cv"));
    }

    #[test]
    fn test_all_candidates_empty_is_not_found() {
        let mut doc = Document::new();
        doc.append(Node::new("div").with_class(MARKER_CLASS));
        doc.append(Node::new("div").with_id(PREVIEW_CONTAINER_ID));
        assert!(locate(&doc, "missing").is_err());
    }
}
