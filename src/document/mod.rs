//! Access to the live document.
//!
//! The layout passes never touch a concrete document. They read geometry and
//! styles, and write positions back, through the [`Document`] trait. Hosts
//! implement it over whatever tree they own; [`SnapshotDocument`] is the
//! in-memory implementation used by the command-line host and the tests.

pub mod length;
pub mod snapshot;

pub use hit_test::HitTestResult;
pub use snapshot::{ElementState, RawElement, RawSnapshot, SnapshotBuilder, SnapshotDocument};

use crate::model::{
    CommentId, ElementId, ElementRole, Offset, Point, Rect, RoleQuery, Size, Viewport,
};

/// Narrow read/write interface to a rendered document.
///
/// All geometry is in CSS pixels. Lookups that cannot be answered return
/// `None`; callers treat that as "skip this element".
pub trait Document {
    /// Current scroll offsets and inner size of the window.
    fn viewport(&self) -> Viewport;

    /// All elements matching `query`, in document order.
    fn query(&self, query: RoleQuery) -> Vec<ElementId>;

    /// Role of an element.
    fn role(&self, element: ElementId) -> Option<ElementRole>;

    /// Comment identifier carried by an element, if any.
    fn comment_id(&self, element: ElementId) -> Option<CommentId>;

    /// Parent element, `None` at the root.
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// First anchor in document order carrying `id`.
    fn find_anchor(&self, id: &CommentId) -> Option<ElementId> {
        self.query(RoleQuery::Anchors)
            .into_iter()
            .find(|&anchor| self.comment_id(anchor).as_ref() == Some(id))
    }

    /// Raw text of a custom property on the root element's computed style.
    fn root_property(&self, name: &str) -> Option<String>;

    /// Rendered width, in pixels, of a throwaway element whose width is set to
    /// `value`.
    ///
    /// Implementations must remove the probe before returning. The result may
    /// be zero or non-finite when the document cannot make sense of `value`.
    fn measure_length(&mut self, value: &str) -> f64;

    /// Border box relative to the viewport, including any visual transform.
    fn bounding_rect(&self, element: ElementId) -> Option<Rect>;

    /// Layout size of an element, ignoring transforms.
    fn offset_size(&self, element: ElementId) -> Option<Size>;

    /// Replace an element's visual transform; `None` clears it.
    fn set_transform(&mut self, element: ElementId, transform: Option<Offset>);

    /// Make an element absolutely positioned at the document origin and
    /// invisible, so its intrinsic size can be read without bias from a
    /// previous position.
    fn prepare_measurement(&mut self, element: ElementId);

    /// Set an absolutely positioned element's left/top, in document
    /// coordinates.
    fn place(&mut self, element: ElementId, position: Point);

    /// Undo the invisibility applied by [`Document::prepare_measurement`].
    fn reveal(&mut self, element: ElementId);

    /// Whether the element carries the hidden flag.
    fn is_hidden(&self, element: ElementId) -> bool;

    /// Set or clear the hidden flag.
    fn set_hidden(&mut self, element: ElementId, hidden: bool);
}
