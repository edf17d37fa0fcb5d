//! Pass-scoped record of already placed bubbles.

use crate::model::Rect;

/// Rectangles placed so far in the current pass, in placement order.
///
/// A ledger lives for exactly one pass; nothing carries over between passes.
#[derive(Debug, Clone, Default)]
pub struct PlacedLedger {
    placed: Vec<Rect>,
}

impl PlacedLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a placed rectangle.
    pub fn record(&mut self, rect: Rect) {
        self.placed.push(rect);
    }

    /// Placed rectangles, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.placed.iter()
    }

    /// Number of placed rectangles.
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// Whether nothing has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Accumulate a horizontal shift for `candidate` against every placed
    /// rectangle.
    ///
    /// Walks the ledger once, oldest first. Each time the candidate, moved by
    /// the shift accumulated so far, overlaps a placed rectangle, `step` is
    /// added to the shift. This is a single pass; the result is not re-checked
    /// against rectangles visited earlier.
    pub fn accumulate_shift(&self, candidate: &Rect, step: f64) -> f64 {
        self.placed.iter().fold(0.0, |shift, prior| {
            let moved = Rect {
                left: candidate.left + shift,
                ..*candidate
            };
            if moved.overlaps(prior) {
                shift + step
            } else {
                shift
            }
        })
    }
}
