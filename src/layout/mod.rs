//! Layout passes for comment bubbles.
//!
//! A pass reads the layout tokens fresh, then runs the inline placer over
//! pinned bubbles followed by the overlay placer. Block bubbles are never
//! moved. A pass only depends on the document's current flow geometry, so
//! running it again without an intervening change is a no-op.

pub mod inline;
pub mod ledger;
pub mod overlay;
pub mod tokens;

pub use inline::{place_inline, InlineOutcome};
pub use ledger::PlacedLedger;
pub use overlay::{place_overlays, resolve_overlay_rect, OverlayOutcome, OverlayPlacement};
pub use tokens::{resolve_length, LayoutTokens, Token};

use crate::document::Document;
use serde::Serialize;
use tracing::debug;

/// What one full pass did.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PassSummary {
    /// Tokens the pass ran with.
    #[serde(skip)]
    pub tokens: LayoutTokens,
    /// Pinned bubbles placed.
    pub inline_placed: usize,
    /// Pinned bubbles moved sideways.
    pub inline_shifted: usize,
    /// Overlays placed.
    pub overlays_placed: usize,
    /// Overlays pushed right.
    pub overlays_shifted: usize,
    /// Overlays left alone.
    pub overlays_skipped: usize,
}

impl PassSummary {
    fn new(tokens: LayoutTokens, inline: InlineOutcome, overlays: OverlayOutcome) -> Self {
        Self {
            tokens,
            inline_placed: inline.placed,
            inline_shifted: inline.shifted,
            overlays_placed: overlays.placed,
            overlays_shifted: overlays.shifted,
            overlays_skipped: overlays.skipped,
        }
    }
}

/// Run one complete layout pass over `doc`.
pub fn run_pass<D: Document + ?Sized>(doc: &mut D) -> PassSummary {
    let tokens = LayoutTokens::read(doc);
    let inline = place_inline(doc, &tokens);
    let overlays = place_overlays(doc, &tokens);

    debug!(
        inline_placed = inline.placed,
        inline_shifted = inline.shifted,
        overlays_placed = overlays.placed,
        overlays_shifted = overlays.shifted,
        overlays_skipped = overlays.skipped,
        "Layout pass complete"
    );
    PassSummary::new(tokens, inline, overlays)
}
