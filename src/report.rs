//! JSON report of where every bubble ended up.

use crate::document::{Document, SnapshotDocument};
use crate::layout::{PassSummary, Token};
use crate::lifecycle::{startup_schedule, LayoutDriver, Trigger};
use crate::model::{BubbleKind, Offset, Point, Rect, RoleQuery, Side, Size};
use crate::toggle::ClickOutcome;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{info, warn};

/// One bubble's final state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BubbleReport {
    /// Element index in document order.
    pub index: usize,
    /// Bubble kind.
    pub kind: BubbleKind,
    /// Alignment side.
    pub side: Side,
    /// Comment identifier, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_id: Option<String>,
    /// Rendered box in document coordinates.
    pub rect: Rect,
    /// Visual transform, if one is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Offset>,
    /// Hidden flag.
    pub hidden: bool,
}

/// One executed pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassReport {
    /// What caused it.
    pub trigger: String,
    /// What it did.
    #[serde(flatten)]
    pub summary: PassSummary,
}

/// One delivered click.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickReport {
    /// Document-coordinate x.
    pub x: f64,
    /// Document-coordinate y.
    pub y: f64,
    /// Index of the bubble that was toggled, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toggled: Option<usize>,
    /// The bubble's hidden flag afterwards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl ClickReport {
    /// Record a click at (`x`, `y`) and what it did.
    pub fn new(x: f64, y: f64, outcome: Option<ClickOutcome>) -> Self {
        let (toggled, hidden) = match outcome {
            Some(ClickOutcome::Toggled { bubble, hidden }) => (Some(bubble.get()), Some(hidden)),
            Some(ClickOutcome::Ignored) | None => (None, None),
        };
        Self { x, y, toggled, hidden }
    }
}

/// Everything the command-line host prints.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LayoutReport {
    /// Passes in the order they ran.
    pub passes: Vec<PassReport>,
    /// Clicks in the order they were delivered.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clicks: Vec<ClickReport>,
    /// Every bubble, in document order.
    pub bubbles: Vec<BubbleReport>,
}

impl LayoutReport {
    /// Empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pass.
    pub fn record_pass(&mut self, trigger: Trigger, summary: PassSummary) {
        self.passes.push(PassReport {
            trigger: trigger.to_string(),
            summary,
        });
    }

    /// Append a click.
    pub fn record_click(&mut self, click: ClickReport) {
        self.clicks.push(click);
    }

    /// Capture every bubble's current state.
    pub fn capture(&mut self, doc: &SnapshotDocument) {
        self.bubbles = bubbles(doc);
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Fails only if serialization itself fails.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Final state of every bubble in `doc`, in document order.
pub fn bubbles(doc: &SnapshotDocument) -> Vec<BubbleReport> {
    doc.query(RoleQuery::AnyBubble)
        .into_iter()
        .filter_map(|el| {
            let role = doc.role(el)?;
            let state = doc.state(el)?;
            Some(BubbleReport {
                index: el.get(),
                kind: role.bubble_kind()?,
                side: role.side().unwrap_or_default(),
                comment_id: doc.comment_id(el).map(|id| id.to_string()),
                rect: doc.document_rect(el)?,
                transform: state.transform,
                hidden: state.hidden,
            })
        })
        .collect()
}

/// Host events to replay against a snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scenario {
    /// Token overrides applied before anything runs.
    pub tokens: BTreeMap<String, String>,
    /// Deferred retry delays for the startup schedule.
    pub retries: Vec<Duration>,
    /// Window size after startup, if the window is resized.
    pub resize: Option<Size>,
    /// Scroll offsets after startup, if the window scrolls.
    pub scroll: Option<Point>,
    /// Clicks, in document coordinates, delivered last.
    pub clicks: Vec<Point>,
}

/// Replay `scenario` against `doc` and report the outcome.
///
/// Runs the startup schedule, then a resize pass and a scroll pass if
/// requested, then delivers clicks by hit-testing their coordinates.
pub fn simulate(mut doc: SnapshotDocument, scenario: &Scenario) -> LayoutReport {
    for (name, value) in &scenario.tokens {
        if Token::from_property(name).is_none() {
            warn!(token = %name, "Unknown layout token, setting it anyway");
        }
        doc.set_token(name.clone(), value.clone());
    }

    let mut report = LayoutReport::new();
    let mut driver = LayoutDriver::new(doc);

    for scheduled in startup_schedule(&scenario.retries) {
        let summary = driver.trigger(scheduled.trigger);
        report.record_pass(scheduled.trigger, summary);
    }

    if let Some(size) = scenario.resize {
        driver.document_mut().resize(size.width, size.height);
        let summary = driver.trigger(Trigger::Resize);
        report.record_pass(Trigger::Resize, summary);
    }

    if let Some(offset) = scenario.scroll {
        driver.document_mut().scroll_to(offset.x, offset.y);
        let summary = driver.trigger(Trigger::Scroll);
        report.record_pass(Trigger::Scroll, summary);
    }

    for &point in &scenario.clicks {
        let target = driver.document().hit_test(point).element();
        let outcome = target.map(|target| driver.click(target));
        report.record_click(ClickReport::new(point.x, point.y, outcome));
    }

    report.capture(driver.document());
    info!(
        passes = report.passes.len(),
        clicks = report.clicks.len(),
        bubbles = report.bubbles.len(),
        "Scenario complete"
    );
    report
}
