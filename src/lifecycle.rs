//! When layout passes run.
//!
//! The host owns the event loop; this module only decides what a trigger
//! does. Every layout trigger runs one complete pass. Clicks never do.

use crate::document::Document;
use crate::layout::{run_pass, PassSummary};
use crate::model::ElementId;
use crate::toggle::{handle_click, ClickEvent, ClickOutcome};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Retry delays, in milliseconds, used when none are configured.
pub const DEFAULT_RETRY_DELAYS_MS: [u64; 2] = [50, 250];

/// [`DEFAULT_RETRY_DELAYS_MS`] as durations.
pub const DEFAULT_RETRY_DELAYS: [Duration; 2] = [
    Duration::from_millis(DEFAULT_RETRY_DELAYS_MS[0]),
    Duration::from_millis(DEFAULT_RETRY_DELAYS_MS[1]),
];

/// Something that asks for a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The document's content has been parsed.
    ContentReady,
    /// Fonts, images and styles have finished loading.
    Load,
    /// The window changed size.
    Resize,
    /// The window scrolled.
    Scroll,
    /// Deferred retry after startup, to catch late reflow.
    Deferred(Duration),
    /// Explicit request from the host.
    External,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::ContentReady => f.write_str("content-ready"),
            Trigger::Load => f.write_str("load"),
            Trigger::Resize => f.write_str("resize"),
            Trigger::Scroll => f.write_str("scroll"),
            Trigger::Deferred(delay) => write!(f, "deferred+{}ms", delay.as_millis()),
            Trigger::External => f.write_str("external"),
        }
    }
}

/// A trigger the host should fire after `delay` from startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTrigger {
    /// Time after startup.
    pub delay: Duration,
    /// What to fire.
    pub trigger: Trigger,
}

/// Triggers to fire once the document is ready, in order.
///
/// Content-ready and load fire immediately; each retry fires after its
/// delay. Retries are sorted and deduplicated.
pub fn startup_schedule(retries: &[Duration]) -> Vec<ScheduledTrigger> {
    let mut delays = retries.to_vec();
    delays.sort();
    delays.dedup();

    let immediate = [Trigger::ContentReady, Trigger::Load]
        .into_iter()
        .map(|trigger| ScheduledTrigger {
            delay: Duration::ZERO,
            trigger,
        });
    let deferred = delays.into_iter().map(|delay| ScheduledTrigger {
        delay,
        trigger: Trigger::Deferred(delay),
    });
    immediate.chain(deferred).collect()
}

/// Wires triggers and clicks to a document.
#[derive(Debug)]
pub struct LayoutDriver<D: Document> {
    doc: D,
    passes: usize,
}

impl<D: Document> LayoutDriver<D> {
    /// Take ownership of a document. No pass runs until triggered.
    pub fn new(doc: D) -> Self {
        Self { doc, passes: 0 }
    }

    /// Run one layout pass in response to `trigger`.
    pub fn trigger(&mut self, trigger: Trigger) -> PassSummary {
        self.passes += 1;
        debug!(%trigger, pass = self.passes, "Layout triggered");
        run_pass(&mut self.doc)
    }

    /// Fire a whole schedule in order, returning each pass's summary.
    ///
    /// Delays are not waited out; the host decides how real time maps to the
    /// schedule.
    pub fn run_schedule(&mut self, schedule: &[ScheduledTrigger]) -> Vec<PassSummary> {
        let summaries: Vec<_> = schedule.iter().map(|s| self.trigger(s.trigger)).collect();
        info!(passes = summaries.len(), "Startup schedule complete");
        summaries
    }

    /// Deliver a click on `target`. Never runs a pass.
    pub fn click(&mut self, target: ElementId) -> ClickOutcome {
        let mut event = ClickEvent::new(target);
        handle_click(&mut self.doc, &mut event)
    }

    /// Passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// The document.
    pub fn document(&self) -> &D {
        &self.doc
    }

    /// The document, for host-side changes such as scrolling.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    /// Give the document back.
    pub fn into_inner(self) -> D {
        self.doc
    }
}
