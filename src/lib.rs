//! Comment overlay layout engine.
//!
//! Keeps review-comment bubbles readable on a rendered document: pinned
//! bubbles are nudged apart and raised, floating overlays are placed beside
//! their anchors and kept inside the visible window, and any bubble can be
//! hidden with a click.
//!
//! The engine talks to the document only through [`document::Document`].
//! [`document::SnapshotDocument`] implements it over a JSON snapshot, which
//! is what the `comment-overlay` binary and the tests use.

pub mod config;
pub mod document;
pub mod layout;
pub mod lifecycle;
pub mod logging;
pub mod model;
pub mod report;
pub mod toggle;
