//! Inline placer: nudges pinned bubbles apart and raises them.

use super::ledger::PlacedLedger;
use super::tokens::LayoutTokens;
use crate::document::Document;
use crate::model::{BubbleKind, Offset, RoleQuery, Side};
use tracing::trace;

/// What the inline placer did in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InlineOutcome {
    /// Bubbles that received a transform.
    pub placed: usize,
    /// Of those, bubbles moved sideways to avoid an earlier one.
    pub shifted: usize,
}

/// Position every pinned bubble for this pass.
///
/// Bubbles are handled in document order, so earlier bubbles keep their
/// natural spot and later ones yield: left-side bubbles move further left,
/// right-side bubbles further right. Every bubble is raised by the inline
/// rise whether or not it moved.
pub fn place_inline<D: Document + ?Sized>(doc: &mut D, tokens: &LayoutTokens) -> InlineOutcome {
    let mut outcome = InlineOutcome::default();
    let mut ledger = PlacedLedger::new();

    for bubble in doc.query(RoleQuery::Bubbles(BubbleKind::Pinned)) {
        let side = doc.role(bubble).and_then(|r| r.side()).unwrap_or_default();

        doc.set_transform(bubble, None);
        let Some(natural) = doc.bounding_rect(bubble) else {
            continue;
        };

        let shift_x = if tokens.avoids_collisions() {
            let step = match side {
                Side::Left => -tokens.overlap_shift,
                Side::Right => tokens.overlap_shift,
            };
            ledger.accumulate_shift(&natural, step)
        } else {
            0.0
        };

        let transform = Offset::new(shift_x, -tokens.inline_rise);
        doc.set_transform(bubble, Some(transform));
        let placed = doc
            .bounding_rect(bubble)
            .unwrap_or_else(|| natural.translated(transform));
        ledger.record(placed);

        trace!(%bubble, %side, shift_x, rise = tokens.inline_rise, "Placed inline bubble");
        outcome.placed += 1;
        if shift_x != 0.0 {
            outcome.shifted += 1;
        }
    }

    outcome
}
