//! Carried lexical state

use core::fmt;
use serde::{Deserialize, Serialize};

/// Classification context carried from the end of one line to the start of
/// the next
///
/// The state is passed and returned by value; the scanner holds nothing
/// between calls. Only comment states survive a line boundary in practice:
/// strings cannot span lines, so `InString` is reachable mid-line but is
/// never produced as an exit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LexState {
    /// Ordinary code
    Root,
    /// Inside a block comment
    InBlockComment,
    /// Inside a documentation comment
    InDocComment,
    /// Inside a double-quoted string
    InString,
}

impl Default for LexState {
    fn default() -> Self {
        LexState::Root
    }
}

impl fmt::Display for LexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexState::Root => write!(f, "Root"),
            LexState::InBlockComment => write!(f, "InBlockComment"),
            LexState::InDocComment => write!(f, "InDocComment"),
            LexState::InString => write!(f, "InString"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_default_state_is_root() {
        assert_eq!(LexState::default(), LexState::Root);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(LexState::Root.to_string(), "Root");
        assert_eq!(LexState::InBlockComment.to_string(), "InBlockComment");
        assert_eq!(LexState::InDocComment.to_string(), "InDocComment");
        assert_eq!(LexState::InString.to_string(), "InString");
    }

    #[test]
    fn test_state_serialization() {
        let state = LexState::InDocComment;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: LexState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
