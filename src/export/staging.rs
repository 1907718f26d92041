//! Off-screen staging for capture.
//!
//! The live preview shows the template scaled down inside layout chrome;
//! capturing it directly would bake that scale into the export. Staging
//! deep-clones the located subtree into a container parked outside the
//! viewport, fixed to one A4 page's pixel width at 96 dpi, with natural
//! content height so overflow is paginated instead of clipped.

use crate::dom::{Display, Document, Edges, Node};
use crate::geometry::PageSpec;
use crate::style::Color;

/// Id of the staging container while an export is in flight.
pub const STAGING_ID: &str = "cv-export-stage";

/// Uniform inner padding of the staged page, in CSS pixels.
pub const PAGE_PADDING_PX: f32 = 40.0;
/// Horizontal offset that parks the container outside the viewport.
const OFF_SCREEN_LEFT_PX: f32 = -10_000.0;

/// Clone `target` into a fresh off-screen staging container appended to the
/// document, fixed to one page's pixel width at 96 dpi with the page height
/// as a minimum so short CVs still fill one page. Returns the container id.
pub fn stage(document: &mut Document, target: &Node, page: PageSpec) -> &'static str {
    // A staging container left behind by an interrupted run would shadow
    // this one; replace it.
    if document.remove_by_id(STAGING_ID) {
        log::warn!("removed stale staging container from a previous export");
    }

    let mut clone = target.clone();
    strip_preview_transforms(&mut clone);

    let (page_w, page_h) = page.size_px();
    let container = Node::new("div")
        .with_id(STAGING_ID)
        .styled(|s| {
            s.display = Display::Block;
            s.left_px = Some(OFF_SCREEN_LEFT_PX);
            s.width_px = Some(page_w as f32);
            s.min_height_px = Some(page_h as f32);
            // height stays unset: natural content height, no clipping
            s.padding = Edges::all(PAGE_PADDING_PX);
            s.background = Some(Color::WHITE);
        })
        .with_child(clone);

    document.append(container);
    STAGING_ID
}

/// Remove the staging container. Safe to call on every exit path; returns
/// whether anything was removed.
pub fn cleanup(document: &mut Document) -> bool {
    document.remove_by_id(STAGING_ID)
}

/// Drop any transform scale inherited from preview-mode wrappers so the
/// clone renders at true size.
fn strip_preview_transforms(node: &mut Node) {
    node.walk_mut(&mut |n| {
        if n.style.transform_scale.is_some() {
            n.style.transform_scale = None;
        }
    });
}
