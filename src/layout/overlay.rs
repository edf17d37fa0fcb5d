//! Overlay placer: positions floating bubbles next to their anchors.

use super::ledger::PlacedLedger;
use super::tokens::LayoutTokens;
use crate::document::Document;
use crate::model::{BubbleKind, ElementId, Point, Rect, RoleQuery, Side, Size, Viewport};
use tracing::{debug, trace};

/// What the overlay placer did in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayOutcome {
    /// Overlays written back with a new position.
    pub placed: usize,
    /// Of those, overlays pushed right to avoid an earlier one.
    pub shifted: usize,
    /// Overlays left untouched: no identifier, no anchor, or no size.
    pub skipped: usize,
}

/// Left edge of an overlay relative to its anchor, before clamping.
///
/// Left-side overlays end `gap` pixels before the anchor; right-side
/// overlays start `gap` plus the extra right shift after it.
pub fn base_left(side: Side, anchor_x: f64, width: f64, tokens: &LayoutTokens) -> f64 {
    match side {
        Side::Left => anchor_x - tokens.gap - width,
        Side::Right => anchor_x + tokens.gap + tokens.overlay_right_shift,
    }
}

/// Where an overlay ends up, and how far collision avoidance pushed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    /// Final rectangle in document coordinates.
    pub rect: Rect,
    /// Accumulated collision shift, before re-clamping. Zero when nothing
    /// was in the way.
    pub shift: f64,
}

/// Final placement for an overlay of `size` whose anchor sits at `anchor`
/// (document coordinates), given what has been placed so far this pass.
pub fn resolve_overlay_rect(
    side: Side,
    anchor: Point,
    size: Size,
    viewport: &Viewport,
    tokens: &LayoutTokens,
    ledger: &PlacedLedger,
) -> OverlayPlacement {
    let left = viewport.clamp_left(base_left(side, anchor.x, size.width, tokens), size.width);
    let top = anchor.y - tokens.overlay_rise;
    let candidate = Rect::new(left, top, size.width, size.height);

    if !tokens.avoids_collisions() {
        return OverlayPlacement {
            rect: candidate,
            shift: 0.0,
        };
    }

    let shift = ledger.accumulate_shift(&candidate, tokens.overlap_shift);
    OverlayPlacement {
        rect: Rect {
            left: viewport.clamp_left(left + shift, size.width),
            ..candidate
        },
        shift,
    }
}

/// Position every overlay bubble for this pass.
///
/// Overlays are handled in document order; each is matched to the first
/// anchor carrying the same comment identifier. Overlays without an
/// identifier or without a matching anchor keep whatever position they had.
pub fn place_overlays<D: Document + ?Sized>(doc: &mut D, tokens: &LayoutTokens) -> OverlayOutcome {
    let mut outcome = OverlayOutcome::default();
    let overlays = doc.query(RoleQuery::Bubbles(BubbleKind::Overlay));
    if overlays.is_empty() {
        return outcome;
    }

    let viewport = doc.viewport();
    let mut ledger = PlacedLedger::new();

    for overlay in overlays {
        let Some(placement) = place_one(doc, overlay, &viewport, tokens, &ledger) else {
            outcome.skipped += 1;
            continue;
        };
        outcome.placed += 1;
        if placement.shift != 0.0 {
            outcome.shifted += 1;
        }
        ledger.record(placement.rect);
    }

    outcome
}

fn place_one<D: Document + ?Sized>(
    doc: &mut D,
    overlay: ElementId,
    viewport: &Viewport,
    tokens: &LayoutTokens,
    ledger: &PlacedLedger,
) -> Option<OverlayPlacement> {
    let Some(id) = doc.comment_id(overlay) else {
        debug!(%overlay, "Overlay has no comment id, skipping");
        return None;
    };
    let Some(anchor) = doc.find_anchor(&id) else {
        debug!(%overlay, comment_id = %id, "No anchor for overlay, skipping");
        return None;
    };
    let side = doc.role(overlay).and_then(|r| r.side()).unwrap_or_default();

    doc.prepare_measurement(overlay);
    let (Some(anchor_rect), Some(size)) = (doc.bounding_rect(anchor), doc.offset_size(overlay))
    else {
        doc.reveal(overlay);
        return None;
    };

    let anchor_point = anchor_rect.origin().offset_by(viewport.scroll_offset());
    let placement = resolve_overlay_rect(side, anchor_point, size, viewport, tokens, ledger);

    doc.place(overlay, placement.rect.origin());
    doc.reveal(overlay);

    trace!(
        %overlay,
        comment_id = %id,
        %side,
        left = placement.rect.left,
        top = placement.rect.top,
        shift = placement.shift,
        "Placed overlay"
    );
    Some(placement)
}

#[cfg(test)]
#[path = "overlay_tests.rs"]
mod tests;
