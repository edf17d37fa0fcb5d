//! Click-to-hide for comment bubbles.
//!
//! A click anywhere inside a bubble flips that bubble's hidden flag and
//! stops the click from reaching anything underneath. Geometry is never
//! touched, so toggling never triggers re-layout.

use crate::document::Document;
use crate::model::ElementId;
use tracing::debug;

/// A click delivered to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// Innermost element under the pointer.
    pub target: ElementId,
    propagation_stopped: bool,
}

impl ClickEvent {
    /// New click on `target`.
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            propagation_stopped: false,
        }
    }

    /// Keep the click from reaching outer handlers.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a handler consumed the click.
    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Result of handling a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A bubble's hidden flag was flipped.
    Toggled {
        /// The bubble.
        bubble: ElementId,
        /// Its new hidden state.
        hidden: bool,
    },
    /// The click was not inside any bubble.
    Ignored,
}

/// Nearest bubble containing `element`, the element itself included.
pub fn enclosing_bubble<D: Document + ?Sized>(doc: &D, element: ElementId) -> Option<ElementId> {
    let mut current = Some(element);
    while let Some(el) = current {
        if doc.role(el).is_some_and(|r| r.is_bubble()) {
            return Some(el);
        }
        current = doc.parent(el);
    }
    None
}

/// Handle a click: toggle the nearest enclosing bubble, if there is one.
pub fn handle_click<D: Document + ?Sized>(doc: &mut D, event: &mut ClickEvent) -> ClickOutcome {
    let Some(bubble) = enclosing_bubble(doc, event.target) else {
        return ClickOutcome::Ignored;
    };

    event.stop_propagation();
    let hidden = !doc.is_hidden(bubble);
    doc.set_hidden(bubble, hidden);

    debug!(%bubble, hidden, "Toggled comment bubble");
    ClickOutcome::Toggled { bubble, hidden }
}
