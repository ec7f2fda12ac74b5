//! Document state owned by the synchronization controller.

use serde::{Deserialize, Serialize};

/// Origin of the most recent text application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextOrigin {
    /// Applied from a user edit on the surface
    Local,
    /// Applied from a host push
    Remote,
}

/// The single synchronized document
///
/// Text, a monotonically increasing revision, and the origin of the last
/// application. Every application bumps the revision, whichever side it
/// came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    revision: u64,
    origin: TextOrigin,
}

impl Document {
    /// Creates an empty document at revision zero
    pub fn new() -> Self {
        Self {
            text: String::new(),
            revision: 0,
            origin: TextOrigin::Local,
        }
    }

    /// Creates a document with initial text, still at revision zero
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revision: 0,
            origin: TextOrigin::Local,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn origin(&self) -> TextOrigin {
        self.origin
    }

    /// Replaces the text, records its origin, and bumps the revision
    ///
    /// Returns the new revision.
    pub(crate) fn apply(&mut self, text: String, origin: TextOrigin) -> u64 {
        self.text = text;
        self.origin = origin;
        self.revision += 1;
        self.revision
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-slot buffer for host text that arrived before the surface mounted
///
/// Holds at most the latest push; a newer push displaces the old one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingRemote {
    Empty,
    Pending(String),
}

impl PendingRemote {
    pub fn is_pending(&self) -> bool {
        matches!(self, PendingRemote::Pending(_))
    }

    /// Stores `text`, returning the displaced text if the slot was occupied
    pub fn replace(&mut self, text: String) -> Option<String> {
        match std::mem::replace(self, PendingRemote::Pending(text)) {
            PendingRemote::Pending(displaced) => Some(displaced),
            PendingRemote::Empty => None,
        }
    }

    /// Empties the slot, returning its text if any
    pub fn take(&mut self) -> Option<String> {
        match std::mem::replace(self, PendingRemote::Empty) {
            PendingRemote::Pending(text) => Some(text),
            PendingRemote::Empty => None,
        }
    }
}

impl Default for PendingRemote {
    fn default() -> Self {
        PendingRemote::Empty
    }
}
