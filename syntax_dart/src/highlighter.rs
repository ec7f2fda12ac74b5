//! Incremental highlighting cache
//!
//! Wraps the line scanner with a per-line cache so repeated scans of a
//! mostly-unchanged document only rework the lines that need it. A line is
//! reused when both its content and its entry state match the cached scan;
//! a comment opened higher up therefore invalidates everything below it
//! until the state chain settles again.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::scanner::{scan_line, ScannedLine};
use crate::state::LexState;
use crate::token::Token;

struct CachedLine {
    content: String,
    entry: LexState,
    scanned: ScannedLine,
}

/// Line-oriented scan cache over a whole document
pub struct Highlighter {
    lines: Vec<CachedLine>,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rescans `text`, reusing cached lines where content and entry state
    /// both match. Returns how many lines were actually rescanned.
    pub fn rescan(&mut self, text: &str) -> usize {
        let mut state = LexState::Root;
        let mut rescanned = 0;
        let mut index = 0;

        for content in text.split('\n') {
            let entry = state;
            let reusable = self.lines.get(index).map_or(false, |cached| {
                cached.entry == entry && cached.content == content
            });

            if reusable {
                state = self.lines[index].scanned.exit;
            } else {
                let scanned = scan_line(content, entry);
                state = scanned.exit;
                let cached = CachedLine {
                    content: content.to_string(),
                    entry,
                    scanned,
                };
                if index < self.lines.len() {
                    self.lines[index] = cached;
                } else {
                    self.lines.push(cached);
                }
                rescanned += 1;
            }
            index += 1;
        }

        self.lines.truncate(index);
        rescanned
    }

    /// Number of cached lines; a trailing newline counts a final empty line
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Tokens of one line, or `None` past the end
    pub fn line_tokens(&self, index: usize) -> Option<&[Token]> {
        self.lines.get(index).map(|cached| cached.scanned.tokens.as_slice())
    }

    /// Exit state of one line, or `None` past the end
    pub fn line_exit(&self, index: usize) -> Option<LexState> {
        self.lines.get(index).map(|cached| cached.scanned.exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_initial_scan_covers_every_line() {
        let mut highlighter = Highlighter::new();
        let rescanned = highlighter.rescan("var a = 1;\nvar b = 2;\nvar c = 3;");
        assert_eq!(rescanned, 3);
        assert_eq!(highlighter.line_count(), 3);
    }

    #[test]
    fn test_unchanged_text_reuses_cache() {
        let mut highlighter = Highlighter::new();
        highlighter.rescan("var a = 1;\nvar b = 2;");
        let rescanned = highlighter.rescan("var a = 1;\nvar b = 2;");
        assert_eq!(rescanned, 0);
    }

    #[test]
    fn test_single_line_edit_rescans_one() {
        let mut highlighter = Highlighter::new();
        highlighter.rescan("var a = 1;\nvar b = 2;\nvar c = 3;");
        let rescanned = highlighter.rescan("var a = 1;\nvar bb = 2;\nvar c = 3;");
        assert_eq!(rescanned, 1);
        assert_eq!(
            highlighter.line_tokens(1).unwrap()[2].text,
            "bb"
        );
    }

    #[test]
    fn test_opened_comment_invalidates_lines_below() {
        let mut highlighter = Highlighter::new();
        highlighter.rescan("a;\nb;\nc;");

        // opening a block comment on line 0 changes every entry state below
        let rescanned = highlighter.rescan("/* a;\nb;\nc;");
        assert_eq!(rescanned, 3);
        assert_eq!(
            highlighter.line_tokens(1).unwrap()[0].kind,
            TokenKind::Comment
        );
        assert_eq!(highlighter.line_exit(2), Some(LexState::InBlockComment));

        // closing it on line 1 lets line 0 reuse but reworks the tail
        let rescanned = highlighter.rescan("/* a;\nb; */\nc;");
        assert_eq!(rescanned, 2);
        assert_eq!(
            highlighter.line_tokens(2).unwrap()[0].kind,
            TokenKind::Identifier
        );
        assert_eq!(highlighter.line_exit(2), Some(LexState::Root));
    }

    #[test]
    fn test_shrinking_text_truncates_cache() {
        let mut highlighter = Highlighter::new();
        highlighter.rescan("a;\nb;\nc;");
        let rescanned = highlighter.rescan("a;");
        assert_eq!(rescanned, 0);
        assert_eq!(highlighter.line_count(), 1);
        assert!(highlighter.line_tokens(1).is_none());
    }

    #[test]
    fn test_appended_line_scans_only_itself() {
        let mut highlighter = Highlighter::new();
        highlighter.rescan("a;\nb;");
        let rescanned = highlighter.rescan("a;\nb;\nc;");
        assert_eq!(rescanned, 1);
        assert_eq!(highlighter.line_count(), 3);
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        let mut highlighter = Highlighter::new();
        let rescanned = highlighter.rescan("");
        assert_eq!(rescanned, 1);
        assert_eq!(highlighter.line_count(), 1);
        assert!(highlighter.line_tokens(0).unwrap().is_empty());
    }
}
