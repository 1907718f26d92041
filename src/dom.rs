//! A minimal retained element tree.
//!
//! Templates render into this tree, the preview mounts it, and the export
//! pipeline walks it. It deliberately models only what those consumers need:
//! tags, ids, classes, attributes, text, a small inline-style record, and
//! children. Queries run in document order (pre-order, depth first), so
//! "first match" always means first in the tree as rendered.
//!
//! # Architecture
//!
//! - [`Node`] is an element with builder-style constructors.
//! - [`InlineStyle`] carries the style properties the rasterizer understands.
//! - [`Document`] owns the root nodes plus an [`AssetClock`] that reports
//!   when fonts and images become usable, which the export pipeline polls
//!   before capturing.

use std::time::Instant;

use crate::style::Color;

/// Text alignment for a node's own text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Left aligned (default)
    #[default]
    Left,
    /// Centered
    Center,
    /// Right aligned
    Right,
    /// Justified
    Justify,
}

/// Layout mode for a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    /// Children stack vertically (default)
    #[default]
    Block,
    /// Children flow horizontally, sized by their width properties
    FlexRow,
    /// The subtree is not rendered
    None,
}

/// Padding or margin on all four edges, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    /// Uniform edges.
    pub fn all(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    /// Distinct vertical and horizontal edges.
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }
}

/// The inline style properties the renderer and rasterizer understand.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineStyle {
    /// Layout mode for children
    pub display: Display,
    /// Hidden nodes keep their layout box but paint nothing
    pub visible: bool,
    /// Uniform opacity, 0.0..=1.0
    pub opacity: f32,
    /// CSS `transform: scale(n)` on the subtree, if any
    pub transform_scale: Option<f32>,
    /// Background fill
    pub background: Option<Color>,
    /// Text color
    pub color: Option<Color>,
    /// Font size in CSS pixels
    pub font_size_px: Option<f32>,
    /// Font family name
    pub font_family: Option<String>,
    /// Bold text
    pub bold: bool,
    /// Fixed width in CSS pixels
    pub width_px: Option<f32>,
    /// Width as a fraction of the parent's content width, 0.0..=1.0
    pub width_frac: Option<f32>,
    /// Fixed height in CSS pixels
    pub height_px: Option<f32>,
    /// Minimum height in CSS pixels
    pub min_height_px: Option<f32>,
    /// Bottom margin in CSS pixels
    pub margin_bottom_px: f32,
    /// Inner padding
    pub padding: Edges,
    /// Corner radius in CSS pixels (photo frames, level bars)
    pub border_radius_px: f32,
    /// Bottom border, as (thickness px, color)
    pub border_bottom: Option<(f32, Color)>,
    /// Text alignment
    pub text_align: TextAlign,
    /// Absolute horizontal offset in CSS pixels (off-screen staging)
    pub left_px: Option<f32>,
}

impl Default for InlineStyle {
    fn default() -> Self {
        Self {
            display: Display::Block,
            visible: true,
            opacity: 1.0,
            transform_scale: None,
            background: None,
            color: None,
            font_size_px: None,
            font_family: None,
            bold: false,
            width_px: None,
            width_frac: None,
            height_px: None,
            min_height_px: None,
            margin_bottom_px: 0.0,
            padding: Edges::default(),
            border_radius_px: 0.0,
            border_bottom: None,
            text_align: TextAlign::Left,
            left_px: None,
        }
    }
}

/// An element in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Tag name ("div", "p", "h1", "img", ...)
    pub tag: String,
    /// Element id, unique within a document by convention
    pub id: Option<String>,
    /// Class list
    pub classes: Vec<String>,
    /// Data attributes as (name, value) pairs
    pub attrs: Vec<(String, String)>,
    /// Own text content
    pub text: Option<String>,
    /// Inline style
    pub style: InlineStyle,
    /// Child elements, in document order
    pub children: Vec<Node>,
}

impl Node {
    /// Create an empty element with the given tag.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            text: None,
            style: InlineStyle::default(),
            children: Vec::new(),
        }
    }

    /// Shorthand for an element that only carries text.
    pub fn text(tag: &str, text: &str) -> Self {
        Self::new(tag).with_text(text)
    }

    /// Set the element id.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Append a class.
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Append a data attribute.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Replace the inline style.
    pub fn with_style(mut self, style: InlineStyle) -> Self {
        self.style = style;
        self
    }

    /// Mutate the inline style in place.
    pub fn styled(mut self, f: impl FnOnce(&mut InlineStyle)) -> Self {
        f(&mut self.style);
        self
    }

    /// Append one child.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Look up a data attribute by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Concatenated text of this node and all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            if !out.is_empty() && !text.is_empty() {
                out.push(' ');
            }
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }

    /// Whether the subtree contains any non-whitespace text.
    pub fn has_renderable_text(&self) -> bool {
        !self.text_content().trim().is_empty()
    }

    /// First node in document order matching the predicate, self included.
    pub fn find_first(&self, pred: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_first(pred))
    }

    /// Mutable variant of [`Node::find_first`].
    pub fn find_first_mut(&mut self, pred: &dyn Fn(&Node) -> bool) -> Option<&mut Node> {
        if pred(self) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|c| c.find_first_mut(pred))
    }

    /// Visit every node in document order.
    pub fn walk(&self, f: &mut dyn FnMut(&Node)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Visit every node in document order, mutably.
    pub fn walk_mut(&mut self, f: &mut dyn FnMut(&mut Node)) {
        f(self);
        for child in &mut self.children {
            child.walk_mut(f);
        }
    }
}

/// When the document's external assets become usable.
///
/// `None` means the asset class never settles, which models a load that
/// hangs past any deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetClock {
    /// When fonts finish loading
    pub fonts_ready_at: Option<Instant>,
    /// When images finish decoding
    pub images_ready_at: Option<Instant>,
}

impl AssetClock {
    /// Assets are ready immediately.
    pub fn ready() -> Self {
        let now = Instant::now();
        Self {
            fonts_ready_at: Some(now),
            images_ready_at: Some(now),
        }
    }

    /// Assets become ready after `delay` from now.
    pub fn ready_after(delay: std::time::Duration) -> Self {
        let at = Instant::now() + delay;
        Self {
            fonts_ready_at: Some(at),
            images_ready_at: Some(at),
        }
    }

    /// Assets never become ready.
    pub fn never() -> Self {
        Self {
            fonts_ready_at: None,
            images_ready_at: None,
        }
    }

    /// Whether every asset class is ready at `now`.
    pub fn is_ready(&self, now: Instant) -> bool {
        matches!(self.fonts_ready_at, Some(at) if at <= now)
            && matches!(self.images_ready_at, Some(at) if at <= now)
    }
}

impl Default for AssetClock {
    fn default() -> Self {
        Self::ready()
    }
}

/// An element tree with root-level mount points.
#[derive(Debug, Clone)]
pub struct Document {
    /// Root elements, in mount order
    pub roots: Vec<Node>,
    /// Asset readiness clock
    pub assets: AssetClock,
}

impl Document {
    /// An empty document whose assets are ready immediately.
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            assets: AssetClock::ready(),
        }
    }

    /// Mount a root element.
    pub fn append(&mut self, node: Node) {
        self.roots.push(node);
    }

    /// First node matching the predicate, across roots in mount order.
    pub fn find_first(&self, pred: &dyn Fn(&Node) -> bool) -> Option<&Node> {
        self.roots.iter().find_map(|r| r.find_first(pred))
    }

    /// Mutable variant of [`Document::find_first`].
    pub fn find_first_mut(&mut self, pred: &dyn Fn(&Node) -> bool) -> Option<&mut Node> {
        self.roots.iter_mut().find_map(|r| r.find_first_mut(pred))
    }

    /// First node carrying the given class.
    pub fn find_by_class(&self, class: &str) -> Option<&Node> {
        self.find_first(&|n| n.has_class(class))
    }

    /// First node carrying the given data attribute.
    pub fn find_by_attr(&self, name: &str) -> Option<&Node> {
        self.find_first(&|n| n.attr(name).is_some())
    }

    /// Node with the given id, if any.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.find_first(&|n| n.id.as_deref() == Some(id))
    }

    /// Whether a node with the given id exists.
    pub fn contains_id(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Detach the node with the given id, wherever it sits in the tree.
    ///
    /// Returns true when a node was removed.
    pub fn remove_by_id(&mut self, id: &str) -> bool {
        fn remove_in(children: &mut Vec<Node>, id: &str) -> bool {
            if let Some(pos) = children.iter().position(|n| n.id.as_deref() == Some(id)) {
                children.remove(pos);
                return true;
            }
            children.iter_mut().any(|n| remove_in(&mut n.children, id))
        }
        remove_in(&mut self.roots, id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
