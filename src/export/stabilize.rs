//! Pre-capture stabilization.
//!
//! Three concerns before the bitmap is taken: a fixed settle delay after the
//! staging mutation so layout has recalculated, a deadline-bounded wait for
//! fonts and images to finish loading, and force-normalizing visibility so
//! collapsed interactive state never leaks into the exported document.

use std::thread;
use std::time::{Duration, Instant};

use crate::dom::{Display, Document, Node};
use crate::error::{Error, Result};

/// Poll interval while waiting for asset readiness.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Block for the fixed settle delay.
pub fn settle(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

/// Wait until the document's fonts and images are ready, or fail with
/// [`Error::RenderTimeout`] once `deadline` has elapsed.
pub fn await_assets(document: &Document, deadline: Duration) -> Result<()> {
    let started = Instant::now();
    loop {
        let now = Instant::now();
        if document.assets.is_ready(now) {
            return Ok(());
        }
        let waited = now.duration_since(started);
        if waited >= deadline {
            log::error!(
                "assets not ready after {} ms, giving up",
                waited.as_millis()
            );
            return Err(Error::RenderTimeout {
                waited_ms: waited.as_millis() as u64,
            });
        }
        thread::sleep(POLL_INTERVAL.min(deadline - waited));
    }
}

/// Force every node in the subtree visible.
///
/// Collapsed panels and animation states leave `display: none`, zero
/// opacity, or hidden visibility behind; an exported CV must show all
/// populated sections regardless.
pub fn normalize_visibility(root: &mut Node) {
    root.walk_mut(&mut |node| {
        node.style.visible = true;
        if node.style.opacity < 1.0 {
            node.style.opacity = 1.0;
        }
        if node.style.display == Display::None {
            node.style.display = Display::Block;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::AssetClock;

    #[test]
    fn test_await_ready_assets_returns_immediately() {
        let doc = Document::new();
        assert!(await_assets(&doc, Duration::from_millis(10)).is_ok());
    }

    #[test]
    fn test_await_delayed_assets() {
        let mut doc = Document::new();
        doc.assets = AssetClock::ready_after(Duration::from_millis(40));
        assert!(await_assets(&doc, Duration::from_secs(2)).is_ok());
    }

    #[test]
    fn test_await_hung_assets_times_out() {
        let mut doc = Document::new();
        doc.assets = AssetClock::never();
        let err = await_assets(&doc, Duration::from_millis(60)).unwrap_err();
        match err {
            Error::RenderTimeout { waited_ms } => assert!(waited_ms >= 60),
            other => panic!("expected RenderTimeout, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_visibility() {
        let mut root = Node::new("div")
            .styled(|s| s.opacity = 0.0)
            .with_child(Node::new("section").styled(|s| s.display = Display::None))
            .with_child(Node::text("p", "hidden").styled(|s| s.visible = false));

        normalize_visibility(&mut root);

        root.walk(&mut |node| {
            assert!(node.style.visible);
            assert_eq!(node.style.opacity, 1.0);
            assert_ne!(node.style.display, Display::None);
        });
    }

    #[test]
    fn test_normalize_keeps_flex_layout() {
        let mut root = Node::new("div").styled(|s| s.display = Display::FlexRow);
        normalize_visibility(&mut root);
        assert_eq!(root.style.display, Display::FlexRow);
    }
}
