//! CSS length evaluation for the in-memory document.
//!
//! This is the "layout engine" behind [`SnapshotDocument`]'s probe element:
//! it decides what width a `width: <value>` declaration renders to. Values it
//! does not understand are dropped, exactly as a browser drops an invalid
//! declaration, leaving the probe at width 0.
//!
//! [`SnapshotDocument`]: super::SnapshotDocument

use crate::model::Viewport;
use cssparser::{Parser, ParserInput, Token};

/// Pixels per inch, fixed by CSS.
const PX_PER_IN: f64 = 96.0;

/// Everything a relative unit can depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LengthContext {
    /// Root (and inherited) font size in pixels.
    pub font_size: f64,
    /// Window size for viewport units.
    pub viewport: Viewport,
    /// Width of the containing block, for percentages.
    pub containing_width: f64,
}

/// Length units recognised in declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// CSS pixels.
    Px,
    /// Font size of the element.
    Em,
    /// Font size of the root element.
    Rem,
    /// x-height, approximated as half an em.
    Ex,
    /// Advance of "0", approximated as half an em.
    Ch,
    /// Points (1/72 in).
    Pt,
    /// Picas (12 pt).
    Pc,
    /// Inches.
    In,
    /// Centimetres.
    Cm,
    /// Millimetres.
    Mm,
    /// Quarter-millimetres.
    Q,
    /// 1% of viewport width.
    Vw,
    /// 1% of viewport height.
    Vh,
    /// 1% of the smaller viewport side.
    Vmin,
    /// 1% of the larger viewport side.
    Vmax,
    /// Percentage of the containing block width.
    Percent,
}

impl LengthUnit {
    /// Unit for a dimension suffix, matched case-insensitively.
    pub fn from_css(unit: &str) -> Option<Self> {
        let unit = match unit.to_ascii_lowercase().as_str() {
            "px" => Self::Px,
            "em" => Self::Em,
            "rem" => Self::Rem,
            "ex" => Self::Ex,
            "ch" => Self::Ch,
            "pt" => Self::Pt,
            "pc" => Self::Pc,
            "in" => Self::In,
            "cm" => Self::Cm,
            "mm" => Self::Mm,
            "q" => Self::Q,
            "vw" => Self::Vw,
            "vh" => Self::Vh,
            "vmin" => Self::Vmin,
            "vmax" => Self::Vmax,
            _ => return None,
        };
        Some(unit)
    }
}

/// A parsed, non-negative length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssLength {
    /// Numeric part.
    pub value: f64,
    /// Unit part.
    pub unit: LengthUnit,
}

impl CssLength {
    /// Parse a `width` value.
    ///
    /// The text must be exactly one `<length>` or `<percentage>` token, or a
    /// unitless zero. Anything a browser would drop yields `None`: unknown
    /// units, negative or non-finite numbers, functions, and trailing tokens
    /// such as the `.` in `1.px`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        let token = parser.next().ok()?.clone();
        parser.expect_exhausted().ok()?;

        let (value, unit) = match token {
            Token::Dimension { value, ref unit, .. } => {
                (f64::from(value), LengthUnit::from_css(unit)?)
            }
            Token::Percentage { unit_value, .. } => {
                (f64::from(unit_value) * 100.0, LengthUnit::Percent)
            }
            Token::Number { value, .. } if value == 0.0 => (0.0, LengthUnit::Px),
            _ => return None,
        };

        if !value.is_finite() || value < 0.0 {
            return None;
        }
        // `-0px` is a valid zero.
        Some(Self {
            value: value.abs(),
            unit,
        })
    }

    /// Convert to pixels.
    pub fn to_px(&self, ctx: &LengthContext) -> f64 {
        let vw = ctx.viewport.width / 100.0;
        let vh = ctx.viewport.height / 100.0;
        let factor = match self.unit {
            LengthUnit::Px => 1.0,
            LengthUnit::Em | LengthUnit::Rem => ctx.font_size,
            LengthUnit::Ex | LengthUnit::Ch => ctx.font_size / 2.0,
            LengthUnit::Pt => PX_PER_IN / 72.0,
            LengthUnit::Pc => PX_PER_IN / 6.0,
            LengthUnit::In => PX_PER_IN,
            LengthUnit::Cm => PX_PER_IN / 2.54,
            LengthUnit::Mm => PX_PER_IN / 25.4,
            LengthUnit::Q => PX_PER_IN / 101.6,
            LengthUnit::Vw => vw,
            LengthUnit::Vh => vh,
            LengthUnit::Vmin => vw.min(vh),
            LengthUnit::Vmax => vw.max(vh),
            LengthUnit::Percent => ctx.containing_width / 100.0,
        };
        self.value * factor
    }
}

/// Rendered width of a box declared `width: <text>`; 0 when the declaration is
/// invalid.
pub fn rendered_width(text: &str, ctx: &LengthContext) -> f64 {
    CssLength::parse(text).map_or(0.0, |len| len.to_px(ctx))
}
