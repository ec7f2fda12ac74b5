#![no_std]

//! # Surface Types
//!
//! This crate defines the rendering-surface boundary types for CodePane.
//!
//! ## Philosophy
//!
//! - **Readiness is explicit**: The surface announces when it can accept text;
//!   nothing is displayed on faith
//! - **Mounting is one-way**: A surface mounts once per page lifetime and
//!   never unmounts
//! - **Frames, not diffs**: Display updates are whole-text overwrites with
//!   monotonic revisions
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A rendering engine (no layout, no fonts, no themes)
//! - A widget tree
//! - A cursor or selection model

extern crate alloc;

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Readiness state of the rendering surface
///
/// Starts at `NotMounted` and transitions to `Mounted` exactly once.
/// There is no reverse transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceReadiness {
    /// Surface does not exist yet; it cannot accept text
    NotMounted,
    /// Surface is live and can accept text
    Mounted,
}

impl SurfaceReadiness {
    /// Creates the initial readiness state
    pub fn new() -> Self {
        SurfaceReadiness::NotMounted
    }

    /// Checks if the surface is mounted
    pub fn is_mounted(&self) -> bool {
        matches!(self, SurfaceReadiness::Mounted)
    }

    /// Marks the surface as mounted
    ///
    /// Idempotent: marking an already-mounted surface is a no-op.
    pub fn mark_mounted(&mut self) {
        *self = SurfaceReadiness::Mounted;
    }
}

impl Default for SurfaceReadiness {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SurfaceReadiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceReadiness::NotMounted => write!(f, "NotMounted"),
            SurfaceReadiness::Mounted => write!(f, "Mounted"),
        }
    }
}

/// Display frame - an imperative whole-text overwrite for the surface
///
/// The surface must show exactly this text, replacing whatever it holds,
/// including edits in flight. Frames carry monotonic revisions so a stale
/// frame can never overwrite a newer one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFrame {
    /// Monotonic revision number (must increase with each update)
    pub revision: u64,
    /// Full replacement text
    pub text: String,
}

impl DisplayFrame {
    /// Creates a new display frame
    pub fn new(revision: u64, text: impl Into<String>) -> Self {
        Self {
            revision,
            text: text.into(),
        }
    }

    /// Checks if this frame's revision is newer than another
    pub fn is_newer_than(&self, other: &DisplayFrame) -> bool {
        self.revision > other.revision
    }

    /// Checks if this frame's revision is compatible (monotonic increase)
    pub fn is_valid_successor(&self, previous: &DisplayFrame) -> bool {
        self.revision > previous.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_readiness_starts_not_mounted() {
        let readiness = SurfaceReadiness::new();
        assert!(!readiness.is_mounted());
        assert_eq!(readiness, SurfaceReadiness::NotMounted);
    }

    #[test]
    fn test_readiness_mark_mounted() {
        let mut readiness = SurfaceReadiness::new();
        readiness.mark_mounted();
        assert!(readiness.is_mounted());
    }

    #[test]
    fn test_readiness_mark_mounted_idempotent() {
        let mut readiness = SurfaceReadiness::new();
        readiness.mark_mounted();
        readiness.mark_mounted();
        assert!(readiness.is_mounted());
    }

    #[test]
    fn test_readiness_display() {
        assert_eq!(SurfaceReadiness::NotMounted.to_string(), "NotMounted");
        assert_eq!(SurfaceReadiness::Mounted.to_string(), "Mounted");
    }

    #[test]
    fn test_display_frame_creation() {
        let frame = DisplayFrame::new(1, "void main() {}");
        assert_eq!(frame.revision, 1);
        assert_eq!(frame.text, "void main() {}");
    }

    #[test]
    fn test_display_frame_revision_ordering() {
        let frame1 = DisplayFrame::new(1, "a");
        let frame2 = DisplayFrame::new(2, "b");

        assert!(frame2.is_newer_than(&frame1));
        assert!(!frame1.is_newer_than(&frame2));
        assert!(frame2.is_valid_successor(&frame1));
        assert!(!frame1.is_valid_successor(&frame2));
    }

    #[test]
    fn test_display_frame_equal_revision_not_successor() {
        let frame1 = DisplayFrame::new(3, "a");
        let frame2 = DisplayFrame::new(3, "b");

        assert!(!frame2.is_valid_successor(&frame1));
        assert!(!frame2.is_newer_than(&frame1));
    }

    #[test]
    fn test_display_frame_serialization() {
        let frame = DisplayFrame::new(4, "class A {}");
        let json = serde_json::to_string(&frame).unwrap();
        let deserialized: DisplayFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, deserialized);
    }

    #[test]
    fn test_readiness_serialization() {
        let readiness = SurfaceReadiness::Mounted;
        let json = serde_json::to_string(&readiness).unwrap();
        let deserialized: SurfaceReadiness = serde_json::from_str(&json).unwrap();
        assert_eq!(readiness, deserialized);
    }
}
