//! Layout tokens and the length resolver.
//!
//! Tokens are root-level custom properties a theme can set to tune spacing.
//! They are re-read on every pass, since the host may change them at any time.

use crate::document::Document;
use std::fmt;
use tracing::debug;

/// The named layout tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Distance between an anchor and its overlay.
    Gap,
    /// How far pinned bubbles are raised.
    InlineRise,
    /// Horizontal step used to separate colliding bubbles.
    OverlapShift,
    /// How far overlays are raised above their anchor line.
    OverlayRise,
    /// Extra rightward nudge for right-side overlays.
    OverlayRightShift,
}

impl Token {
    /// Every token, in a stable order.
    pub const ALL: [Token; 5] = [
        Token::Gap,
        Token::InlineRise,
        Token::OverlapShift,
        Token::OverlayRise,
        Token::OverlayRightShift,
    ];

    /// Custom property name on the root element.
    pub fn property(&self) -> &'static str {
        match self {
            Token::Gap => "--comment-gap",
            Token::InlineRise => "--comment-inline-rise",
            Token::OverlapShift => "--comment-overlap-shift",
            Token::OverlayRise => "--comment-overlay-rise",
            Token::OverlayRightShift => "--comment-overlay-right-shift",
        }
    }

    /// Pixel value used when the token is absent or unusable.
    pub fn fallback(&self) -> f64 {
        match self {
            Token::Gap => 8.0,
            Token::OverlayRise => 6.0,
            Token::InlineRise | Token::OverlapShift | Token::OverlayRightShift => 0.0,
        }
    }

    /// Look a token up by its property name.
    pub fn from_property(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.property() == name)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property())
    }
}

/// Resolve a root custom property to pixels.
///
/// The raw text is handed to the document's own layout (a throwaway probe)
/// so every unit the host understands is honored. Absent, blank, zero,
/// negative, or non-finite results all collapse to `fallback`.
pub fn resolve_length<D: Document + ?Sized>(doc: &mut D, property: &str, fallback: f64) -> f64 {
    let Some(raw) = doc.root_property(property) else {
        return fallback;
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return fallback;
    }

    let px = doc.measure_length(raw);
    if !px.is_finite() || px <= 0.0 {
        debug!(property, value = raw, measured = px, "Unusable length token, using fallback");
        return fallback;
    }
    px
}

/// All tokens resolved for one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTokens {
    /// Anchor-to-overlay gap.
    pub gap: f64,
    /// Pinned bubble rise.
    pub inline_rise: f64,
    /// Collision step; collision avoidance is off unless positive.
    pub overlap_shift: f64,
    /// Overlay rise.
    pub overlay_rise: f64,
    /// Extra shift for right-side overlays.
    pub overlay_right_shift: f64,
}

impl Default for LayoutTokens {
    fn default() -> Self {
        Self {
            gap: Token::Gap.fallback(),
            inline_rise: Token::InlineRise.fallback(),
            overlap_shift: Token::OverlapShift.fallback(),
            overlay_rise: Token::OverlayRise.fallback(),
            overlay_right_shift: Token::OverlayRightShift.fallback(),
        }
    }
}

impl LayoutTokens {
    /// Resolve every token against the document's current styles.
    pub fn read<D: Document + ?Sized>(doc: &mut D) -> Self {
        let mut resolve =
            |token: Token| resolve_length(&mut *doc, token.property(), token.fallback());
        Self {
            gap: resolve(Token::Gap),
            inline_rise: resolve(Token::InlineRise),
            overlap_shift: resolve(Token::OverlapShift),
            overlay_rise: resolve(Token::OverlayRise),
            overlay_right_shift: resolve(Token::OverlayRightShift),
        }
    }

    /// Whether bubbles should be nudged apart.
    pub fn avoids_collisions(&self) -> bool {
        self.overlap_shift > 0.0
    }
}
