//! Identifier newtypes with smart constructors.
//!
//! Values are only built through their checked constructors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier linking an overlay bubble to its anchor.
///
/// Matching is exact string equality. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentId(String);

impl CommentId {
    /// Smart constructor: validates non-empty identifier.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidCommentId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidCommentId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CommentId {
    type Error = InvalidCommentId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommentId> for String {
    fn from(id: CommentId) -> Self {
        id.0
    }
}

/// Handle to an element of a [`Document`](crate::document::Document).
///
/// Handles are only meaningful for the document that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(usize);

impl ElementId {
    /// Create a handle from a raw index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ===== Error Types =====

/// Rejected comment identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCommentId {
    /// Identifier was the empty string.
    #[error("Comment ID cannot be empty")]
    Empty,
}

// ===== Tests =====
