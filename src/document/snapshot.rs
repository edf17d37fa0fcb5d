//! In-memory document loaded from a JSON snapshot.
//!
//! A snapshot records what a rendered page looks like at one instant: the
//! window, the root-level layout tokens, and the flow box of every element
//! that matters for comment layout. [`SnapshotDocument`] then plays the part
//! of the browser: it answers geometry queries, applies transforms and
//! absolute positions written by the layout passes, and measures probe
//! lengths with [`length`](super::length).
//!
//! Hidden bubbles keep their geometry, like `visibility: hidden`.

use super::length::{rendered_width, LengthContext};
use super::Document;
use crate::model::{
    BubbleKind, CommentId, ElementId, ElementRole, Offset, Point, Rect, RoleQuery, Side, Size,
    SnapshotError, Viewport,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Font size used when a snapshot does not specify one.
pub const DEFAULT_ROOT_FONT_SIZE: f64 = 16.0;

fn default_root_font_size() -> f64 {
    DEFAULT_ROOT_FONT_SIZE
}

/// On-disk snapshot format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSnapshot {
    /// Window scroll offsets and size.
    #[serde(default)]
    pub viewport: Viewport,

    /// Root font size, for `em`/`rem` tokens.
    #[serde(default = "default_root_font_size")]
    pub root_font_size: f64,

    /// Root custom properties, e.g. `"--comment-gap": "0.5rem"`.
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,

    /// Elements in document order. Parents must precede their children.
    #[serde(default)]
    pub elements: Vec<RawElement>,
}

/// Element kinds as written in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleName {
    /// Comment anchor.
    Anchor,
    /// Pin container.
    Pin,
    /// Anything else.
    Content,
    /// Block bubble.
    Block,
    /// Pinned inline bubble.
    Pinned,
    /// Overlay bubble.
    Overlay,
}

impl RoleName {
    fn with_side(self, side: Side) -> ElementRole {
        match self {
            RoleName::Anchor => ElementRole::Anchor,
            RoleName::Pin => ElementRole::Pin,
            RoleName::Content => ElementRole::Content,
            RoleName::Block => ElementRole::bubble(BubbleKind::Block, side),
            RoleName::Pinned => ElementRole::bubble(BubbleKind::Pinned, side),
            RoleName::Overlay => ElementRole::bubble(BubbleKind::Overlay, side),
        }
    }
}

/// One element of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawElement {
    /// What the element is.
    pub role: RoleName,

    /// Alignment side; only meaningful for bubbles.
    #[serde(default)]
    pub side: Side,

    /// Comment identifier. An empty string counts as absent.
    #[serde(default)]
    pub comment_id: Option<String>,

    /// Index of the parent element.
    #[serde(default)]
    pub parent: Option<usize>,

    /// Flow box in document coordinates. For overlays only the size matters.
    pub rect: Rect,

    /// Initial hidden flag.
    #[serde(default)]
    pub hidden: bool,
}

/// Mutable style state the layout passes and the toggle write to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementState {
    /// Visual transform.
    pub transform: Option<Offset>,
    /// Absolute left/top in document coordinates.
    pub position: Option<Point>,
    /// Temporarily invisible while being measured.
    pub invisible: bool,
    /// User-toggled hidden flag.
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Node {
    role: ElementRole,
    parent: Option<ElementId>,
    comment_id: Option<CommentId>,
    flow: Rect,
    state: ElementState,
}

/// In-memory [`Document`].
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotDocument {
    viewport: Viewport,
    root_font_size: f64,
    tokens: BTreeMap<String, String>,
    nodes: Vec<Node>,
}

impl Default for SnapshotDocument {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            root_font_size: DEFAULT_ROOT_FONT_SIZE,
            tokens: BTreeMap::new(),
            nodes: Vec::new(),
        }
    }
}

impl SnapshotDocument {
    /// Start building a document in code.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// Validate a parsed snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed viewport or font size, a parent that
    /// does not precede its child, or a non-finite or negative element box.
    pub fn from_raw(raw: RawSnapshot) -> Result<Self, SnapshotError> {
        let vp = raw.viewport;
        let finite = [vp.scroll_x, vp.scroll_y, vp.width, vp.height]
            .iter()
            .all(|v| v.is_finite());
        if !finite || vp.width < 0.0 || vp.height < 0.0 {
            return Err(SnapshotError::InvalidViewport(format!(
                "{}x{} scrolled to ({}, {})",
                vp.width, vp.height, vp.scroll_x, vp.scroll_y
            )));
        }
        if !raw.root_font_size.is_finite() || raw.root_font_size <= 0.0 {
            return Err(SnapshotError::InvalidFontSize(raw.root_font_size));
        }

        let mut nodes = Vec::with_capacity(raw.elements.len());
        for (index, element) in raw.elements.into_iter().enumerate() {
            nodes.push(validate_element(index, element)?);
        }

        Ok(Self {
            viewport: vp,
            root_font_size: raw.root_font_size,
            tokens: raw.tokens,
            nodes,
        })
    }

    /// Parse and validate a JSON snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Parse`] for malformed JSON and any error from
    /// [`SnapshotDocument::from_raw`].
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Read a JSON snapshot from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Read`] if the file cannot be read, otherwise
    /// the same errors as [`SnapshotDocument::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every element, in document order.
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = ElementId> {
        (0..self.nodes.len()).map(ElementId::new)
    }

    /// Style state of an element.
    pub fn state(&self, element: ElementId) -> Option<&ElementState> {
        self.node(element).map(|n| &n.state)
    }

    /// Rendered box in document coordinates.
    ///
    /// An element moves with every ancestor that has been absolutely
    /// positioned or transformed.
    pub fn document_rect(&self, element: ElementId) -> Option<Rect> {
        let node = self.node(element)?;
        let mut rect = node.flow;
        let mut current = Some(node);
        while let Some(n) = current {
            rect = rect.translated(n.displacement());
            current = n.parent.and_then(|p| self.node(p));
        }
        Some(rect)
    }

    /// Whether the element or any ancestor is invisible while being measured.
    pub fn is_painted(&self, element: ElementId) -> bool {
        let mut current = self.node(element);
        while let Some(n) = current {
            if n.state.invisible {
                return false;
            }
            current = n.parent.and_then(|p| self.node(p));
        }
        true
    }

    /// Change the window size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    /// Change the scroll offsets.
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.viewport = self.viewport.scrolled_to(x, y);
    }

    /// Set a root custom property.
    pub fn set_token(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.tokens.insert(name.into(), value.into());
    }

    /// Move an element's flow box, as a reflow would.
    pub fn reflow(&mut self, element: ElementId, flow: Rect) {
        if let Some(node) = self.nodes.get_mut(element.get()) {
            node.flow = flow;
        }
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(element.get())
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(element.get())
    }

    fn length_context(&self) -> LengthContext {
        LengthContext {
            font_size: self.root_font_size,
            viewport: self.viewport,
            containing_width: self.viewport.width,
        }
    }
}

impl Node {
    fn new(
        role: ElementRole,
        parent: Option<ElementId>,
        comment_id: Option<CommentId>,
        flow: Rect,
    ) -> Self {
        Self {
            role,
            parent,
            comment_id,
            flow,
            state: ElementState::default(),
        }
    }

    /// How far absolute positioning and the transform move this box, and
    /// with it every descendant.
    fn displacement(&self) -> Offset {
        let moved = self.state.position.map_or(Offset::ZERO, |p| {
            Offset::new(p.x - self.flow.left, p.y - self.flow.top)
        });
        let transform = self.state.transform.unwrap_or(Offset::ZERO);
        Offset::new(moved.dx + transform.dx, moved.dy + transform.dy)
    }
}

fn validate_element(index: usize, element: RawElement) -> Result<Node, SnapshotError> {
    let invalid = |reason: String| SnapshotError::InvalidElement { index, reason };

    if let Some(parent) = element.parent {
        if parent >= index {
            return Err(invalid(format!("parent {} must precede the element", parent)));
        }
    }

    let r = element.rect;
    if ![r.left, r.top, r.width, r.height].iter().all(|v| v.is_finite()) {
        return Err(invalid("rect must be finite".to_string()));
    }
    if r.width < 0.0 || r.height < 0.0 {
        return Err(invalid(format!(
            "rect size {}x{} must not be negative",
            r.width, r.height
        )));
    }

    let comment_id = element
        .comment_id
        .filter(|id| !id.is_empty())
        .map(CommentId::new)
        .transpose()
        .map_err(|e| invalid(e.to_string()))?;

    let mut node = Node::new(
        element.role.with_side(element.side),
        element.parent.map(ElementId::new),
        comment_id,
        element.rect,
    );
    node.state.hidden = element.hidden;
    Ok(node)
}

impl Document for SnapshotDocument {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn query(&self, query: RoleQuery) -> Vec<ElementId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| query.matches(&node.role))
            .map(|(index, _)| ElementId::new(index))
            .collect()
    }

    fn role(&self, element: ElementId) -> Option<ElementRole> {
        self.node(element).map(|n| n.role)
    }

    fn comment_id(&self, element: ElementId) -> Option<CommentId> {
        self.node(element).and_then(|n| n.comment_id.clone())
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).and_then(|n| n.parent)
    }

    fn root_property(&self, name: &str) -> Option<String> {
        self.tokens.get(name).cloned()
    }

    fn measure_length(&mut self, value: &str) -> f64 {
        let width = rendered_width(value, &self.length_context());
        let probe = ElementId::new(self.nodes.len());
        self.nodes.push(Node::new(
            ElementRole::Content,
            None,
            None,
            Rect::new(0.0, 0.0, width, 0.0),
        ));
        let measured = self.bounding_rect(probe).map_or(f64::NAN, |r| r.width);
        self.nodes.pop();
        measured
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        let scroll = self.viewport.scroll_offset();
        self.document_rect(element)
            .map(|r| r.translated(Offset::new(-scroll.dx, -scroll.dy)))
    }

    fn offset_size(&self, element: ElementId) -> Option<Size> {
        self.node(element).map(|n| n.flow.size())
    }

    fn set_transform(&mut self, element: ElementId, transform: Option<Offset>) {
        if let Some(node) = self.node_mut(element) {
            node.state.transform = transform;
        }
    }

    fn prepare_measurement(&mut self, element: ElementId) {
        if let Some(node) = self.node_mut(element) {
            node.state.position = Some(Point::new(0.0, 0.0));
            node.state.invisible = true;
        }
    }

    fn place(&mut self, element: ElementId, position: Point) {
        if let Some(node) = self.node_mut(element) {
            node.state.position = Some(position);
        }
    }

    fn reveal(&mut self, element: ElementId) {
        if let Some(node) = self.node_mut(element) {
            node.state.invisible = false;
        }
    }

    fn is_hidden(&self, element: ElementId) -> bool {
        self.node(element).is_some_and(|n| n.state.hidden)
    }

    fn set_hidden(&mut self, element: ElementId, hidden: bool) {
        if let Some(node) = self.node_mut(element) {
            node.state.hidden = hidden;
        }
    }
}

/// Builds a [`SnapshotDocument`] element by element.
///
/// Each method appends in document order and returns the new element's id.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    doc: SnapshotDocument,
}

impl SnapshotBuilder {
    /// Set the window.
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.doc.viewport = viewport;
        self
    }

    /// Set the root font size.
    pub fn root_font_size(mut self, px: f64) -> Self {
        self.doc.root_font_size = px;
        self
    }

    /// Set a root custom property.
    pub fn token(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.doc.set_token(name, value);
        self
    }

    fn push(&mut self, node: Node) -> ElementId {
        let id = ElementId::new(self.doc.nodes.len());
        self.doc.nodes.push(node);
        id
    }

    /// Zero-size anchor at document position `at`. An empty `id` builds an
    /// anchor without an identifier.
    pub fn anchor(&mut self, id: &str, at: Point) -> ElementId {
        let comment_id = CommentId::new(id).ok();
        self.push(Node::new(
            ElementRole::Anchor,
            None,
            comment_id,
            Rect::new(at.x, at.y, 0.0, 0.0),
        ))
    }

    /// Overlay bubble of intrinsic `size`, not yet positioned. An empty `id`
    /// builds an overlay without an identifier.
    pub fn overlay(&mut self, id: &str, side: Side, size: Size) -> ElementId {
        let comment_id = CommentId::new(id).ok();
        self.push(Node::new(
            ElementRole::bubble(BubbleKind::Overlay, side),
            None,
            comment_id,
            Rect::from_origin(Point::default(), size),
        ))
    }

    /// Zero-width pin at `at` holding a bubble of `size` that extends toward
    /// `side`. Returns the bubble; the pin precedes it.
    pub fn pinned(&mut self, at: Point, side: Side, size: Size) -> ElementId {
        let pin = self.push(Node::new(
            ElementRole::Pin,
            None,
            None,
            Rect::new(at.x, at.y, 0.0, size.height),
        ));
        let left = match side {
            Side::Left => at.x - size.width,
            Side::Right => at.x,
        };
        self.push(Node::new(
            ElementRole::bubble(BubbleKind::Pinned, side),
            Some(pin),
            None,
            Rect::new(left, at.y, size.width, size.height),
        ))
    }

    /// Block bubble occupying `rect`.
    pub fn block(&mut self, side: Side, rect: Rect) -> ElementId {
        self.push(Node::new(
            ElementRole::bubble(BubbleKind::Block, side),
            None,
            None,
            rect,
        ))
    }

    /// Plain content element, optionally nested in `parent`.
    pub fn content(&mut self, parent: Option<ElementId>, rect: Rect) -> ElementId {
        self.push(Node::new(ElementRole::Content, parent, None, rect))
    }

    /// Finish building.
    pub fn build(self) -> SnapshotDocument {
        self.doc
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
