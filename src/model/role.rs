//! Typed element roles.
//!
//! Roles stand in for the class/attribute conventions of the host markup:
//! instead of matching selector strings, the layout passes ask the document
//! for "all pinned bubbles" or "the anchor with this identifier".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of its anchor a bubble is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Drawn to the left; yields further left on collision.
    Left,
    /// Drawn to the right (the default); yields further right on collision.
    #[default]
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// The flavours of comment bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleKind {
    /// Block-level bubble in normal flow. Toggleable, never moved.
    Block,
    /// Small bubble inside a zero-width pin. Moved by the inline placer.
    Pinned,
    /// Free-floating panel positioned next to its anchor.
    Overlay,
}

impl fmt::Display for BubbleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BubbleKind::Block => f.write_str("block"),
            BubbleKind::Pinned => f.write_str("pinned"),
            BubbleKind::Overlay => f.write_str("overlay"),
        }
    }
}

/// Role of a document element as far as comment layout is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// Zero-size marker at the commented location.
    Anchor,
    /// Zero-width inline container holding a pinned bubble.
    Pin,
    /// A comment bubble.
    Bubble {
        /// Flavour of bubble.
        kind: BubbleKind,
        /// Alignment side.
        side: Side,
    },
    /// Any other element (text, bubble content, page structure).
    Content,
}

impl ElementRole {
    /// Shorthand for a bubble role.
    pub fn bubble(kind: BubbleKind, side: Side) -> Self {
        Self::Bubble { kind, side }
    }

    /// Whether a click inside this element toggles it.
    pub fn is_bubble(&self) -> bool {
        matches!(self, Self::Bubble { .. })
    }

    /// Bubble side, if this is a bubble.
    pub fn side(&self) -> Option<Side> {
        match self {
            Self::Bubble { side, .. } => Some(*side),
            _ => None,
        }
    }

    /// Bubble kind, if this is a bubble.
    pub fn bubble_kind(&self) -> Option<BubbleKind> {
        match self {
            Self::Bubble { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Role filter for [`Document::query`](crate::document::Document::query).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleQuery {
    /// Every anchor.
    Anchors,
    /// Bubbles of one kind, either side.
    Bubbles(BubbleKind),
    /// Bubbles of every kind.
    AnyBubble,
}

impl RoleQuery {
    /// Whether `role` satisfies this query.
    pub fn matches(&self, role: &ElementRole) -> bool {
        match (self, role) {
            (Self::Anchors, ElementRole::Anchor) => true,
            (Self::Bubbles(want), ElementRole::Bubble { kind, .. }) => want == kind,
            (Self::AnyBubble, ElementRole::Bubble { .. }) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_side_is_right() {
        assert_eq!(Side::default(), Side::Right);
    }

    #[test]
    fn bubble_query_filters_by_kind() {
        let pinned = ElementRole::bubble(BubbleKind::Pinned, Side::Left);
        let overlay = ElementRole::bubble(BubbleKind::Overlay, Side::Right);
        let q = RoleQuery::Bubbles(BubbleKind::Pinned);
        assert!(q.matches(&pinned));
        assert!(!q.matches(&overlay));
        assert!(!q.matches(&ElementRole::Anchor));
    }

    #[test]
    fn any_bubble_matches_all_kinds_only() {
        for kind in [BubbleKind::Block, BubbleKind::Pinned, BubbleKind::Overlay] {
            assert!(RoleQuery::AnyBubble.matches(&ElementRole::bubble(kind, Side::Left)));
        }
        assert!(!RoleQuery::AnyBubble.matches(&ElementRole::Pin));
        assert!(!RoleQuery::AnyBubble.matches(&ElementRole::Content));
    }

    #[test]
    fn accessors_return_none_for_non_bubbles() {
        assert_eq!(ElementRole::Anchor.side(), None);
        assert_eq!(ElementRole::Content.bubble_kind(), None);
        assert!(!ElementRole::Pin.is_bubble());
    }
}
