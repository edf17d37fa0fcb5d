//! Domain model types (pure).
//!
//! All types in this module are plain data with smart constructors.

pub mod error;
pub mod geometry;
pub mod identifiers;
pub mod role;

// Re-export for convenience
pub use error::{AppError, SnapshotError};
pub use geometry::{clamp, Offset, Point, Rect, Size, Viewport, VIEWPORT_MARGIN};
pub use identifiers::{CommentId, ElementId, InvalidCommentId};
pub use role::{BubbleKind, ElementRole, RoleQuery, Side};
